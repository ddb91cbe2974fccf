//! Compile command: rewrite @expects annotations into guard code.
//!
//! Works on a single template or a directory tree. Directory mode
//! discovers templates through the config's include/exclude globs and
//! compiles them in parallel; each document is independent, so no
//! coordination is needed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use similar::TextDiff;

use super::discover_templates;
use crate::config::Config;
use crate::{rewrite, scan};

/// Options for the compile command
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Template file or directory to compile
    pub path: PathBuf,
    /// Rewrite files in place
    pub write: bool,
    /// Show a unified diff instead of the output
    pub diff: bool,
    /// Output file (single-file mode only)
    pub out: Option<PathBuf>,
}

/// Execute the compile command
pub fn execute_compile(options: CompileOptions, config: Config) -> Result<()> {
    if options.path.is_dir() {
        if options.out.is_some() {
            bail!("--out is only supported for single files");
        }
        compile_directory(&options, &config)
    } else {
        compile_file(&options.path, &options, &config, true)
    }
}

/// Compile one template; `chatty` controls the non-diff console output
fn compile_file(path: &Path, options: &CompileOptions, config: &Config, chatty: bool) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    scan::ensure_no_raw_code(&path.to_string_lossy(), &source, config)?;
    let output = rewrite::compile(&source, config)
        .with_context(|| format!("failed to compile {}", path.display()))?;

    if options.diff {
        print_diff(path, &source, &output);
        return Ok(());
    }

    if options.write {
        if output != source {
            fs::write(path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        if chatty {
            println!("{} {}", style("✓").green(), path.display());
        }
    } else if let Some(out) = &options.out {
        fs::write(out, &output).with_context(|| format!("failed to write {}", out.display()))?;
        if chatty {
            println!("{} {} → {}", style("✓").green(), path.display(), out.display());
        }
    } else {
        print!("{}", output);
    }

    Ok(())
}

fn compile_directory(options: &CompileOptions, config: &Config) -> Result<()> {
    if !options.write && !options.diff {
        bail!("directory mode requires --write or --diff");
    }

    let templates = discover_templates(&options.path, config)?;
    if templates.is_empty() {
        println!("{} No templates matched the include patterns", style("•").dim());
        return Ok(());
    }

    let progress = ProgressBar::new(templates.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} {pos}/{len} {wide_msg}")
            .expect("static progress template"),
    );

    // Documents are compiled independently; parallelism is safe because
    // the core holds no cross-call state.
    let failures: Vec<(PathBuf, anyhow::Error)> = templates
        .par_iter()
        .filter_map(|path| {
            let result = compile_file(path, options, config, false);
            progress.inc(1);
            result.err().map(|err| (path.clone(), err))
        })
        .collect();
    progress.finish_and_clear();

    let compiled = templates.len() - failures.len();
    println!(
        "{} Compiled {} template{}",
        style("✓").green(),
        compiled,
        if compiled == 1 { "" } else { "s" }
    );

    if !failures.is_empty() {
        for (path, err) in &failures {
            eprintln!("{} {}: {:#}", style("✗").red(), path.display(), err);
        }
        bail!("{} template(s) failed to compile", failures.len());
    }

    Ok(())
}

fn print_diff(path: &Path, source: &str, output: &str) {
    if source == output {
        println!("{} {} (unchanged)", style("•").dim(), path.display());
        return;
    }

    println!("{} {}", style("→").cyan(), path.display());
    let diff = TextDiff::from_lines(source, output);
    for change in diff.iter_all_changes() {
        match change.tag() {
            similar::ChangeTag::Delete => print!("{}", style(format!("-{}", change)).red()),
            similar::ChangeTag::Insert => print!("{}", style(format!("+{}", change)).green()),
            similar::ChangeTag::Equal => print!(" {}", change),
        }
    }
}
