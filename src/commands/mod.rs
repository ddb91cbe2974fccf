//! CLI command implementations.
//!
//! Each command is in its own submodule; options structs keep the clap
//! surface in `main.rs` decoupled from the library.

pub mod check;
pub mod compile;
pub mod init;

pub use check::{execute_check, CheckOptions};
pub use compile::{execute_compile, CompileOptions};
pub use init::{execute_init, InitOptions};

use std::path::{Path, PathBuf};

use crate::config::Config;

/// Walk a directory tree and keep files matching the config globs,
/// sorted for deterministic output.
pub(crate) fn discover_templates(root: &Path, config: &Config) -> crate::Result<Vec<PathBuf>> {
    let mut templates = Vec::new();

    for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if config.matches(relative)? {
            templates.push(entry.path().to_path_buf());
        }
    }

    templates.sort();
    Ok(templates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discover_respects_globs() {
        let dir = tempfile::tempdir().unwrap();
        let views = dir.path().join("views");
        fs::create_dir_all(views.join("vendor/pkg")).unwrap();
        fs::write(views.join("home.blade.php"), "@expects(int $n)").unwrap();
        fs::write(views.join("plain.php"), "<?php ?>").unwrap();
        fs::write(views.join("vendor/pkg/x.blade.php"), "").unwrap();

        let found = discover_templates(dir.path(), &Config::default()).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("home.blade.php"));
    }
}
