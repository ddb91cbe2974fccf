//! Check command: parse-only validation of @expects annotations.
//!
//! Reports the declarations each template exposes and any annotation
//! errors, without rewriting anything. Exit code 1 when any template
//! fails to parse.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use console::style;

use super::discover_templates;
use crate::config::Config;
use crate::decl::{TypeKind, VariableDeclaration};
use crate::rewrite;

/// Options for the check command
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Template file or directory to check
    pub path: PathBuf,
}

/// Execute the check command
pub fn execute_check(options: CheckOptions, config: Config) -> Result<()> {
    let templates = if options.path.is_dir() {
        discover_templates(&options.path, &config)?
    } else {
        vec![options.path.clone()]
    };

    let mut failed = 0usize;
    for path in &templates {
        if let Err(err) = check_template(path) {
            eprintln!("{} {}: {:#}", style("✗").red(), path.display(), err);
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} template(s) with invalid @expects usage", failed);
    }

    Ok(())
}

fn check_template(path: &Path) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let decls = rewrite::declarations(&source)?;

    if decls.is_empty() {
        println!("{} {} (no @expects annotations)", style("•").dim(), path.display());
        return Ok(());
    }

    println!("{} {}", style("✓").green(), path.display());
    for decl in &decls {
        println!("  {}", describe(decl));
    }

    Ok(())
}

/// One-line human summary of a declaration
fn describe(decl: &VariableDeclaration) -> String {
    let type_text = match &decl.type_kind {
        TypeKind::None => "untyped".to_string(),
        TypeKind::Primitive(p) => p.as_str().to_string(),
        TypeKind::ClassRef(c) => format!("\\{}", c),
    };

    let mut flags = Vec::new();
    flags.push(if decl.required { "required" } else { "optional" });
    if decl.nullable {
        flags.push("nullable");
    }

    format!("${} : {} ({})", decl.name, type_text, flags.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::Primitive;

    fn decl(name: &str, type_kind: TypeKind, required: bool) -> VariableDeclaration {
        VariableDeclaration {
            name: name.to_string(),
            required,
            type_kind,
            default: None,
            nullable: false,
        }
    }

    #[test]
    fn test_describe_primitive() {
        let d = decl("age", TypeKind::Primitive(Primitive::Int), true);
        assert_eq!(describe(&d), "$age : int (required)");
    }

    #[test]
    fn test_describe_nullable_class() {
        let mut d = decl("user", TypeKind::ClassRef("App\\Models\\User".into()), false);
        d.nullable = true;
        assert_eq!(
            describe(&d),
            "$user : \\App\\Models\\User (optional, nullable)"
        );
    }

    #[test]
    fn test_check_reports_invalid_usage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.blade.php");
        fs::write(&path, "@expects(int $)").unwrap();

        let options = CheckOptions { path };
        assert!(execute_check(options, Config::default()).is_err());
    }
}
