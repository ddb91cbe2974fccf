//! Raw-code policy pre-scan.
//!
//! Collaborator layer, not part of the compile core: when the config
//! forbids raw PHP in templates, a document containing `<?php` or `<?=`
//! openings is rejected before the compiler runs. `@expects` guards are
//! generated AFTER this check, so the compiler's own output is never
//! caught by it. The core `compile` stays invocable without this scan.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;
use crate::error::{ExpectsError, Result};

/// PHP open tags, long and short-echo forms
static PHP_OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<\?(php\b|=)").unwrap());

/// Enforce the raw-code policy for one document.
/// `path` is used only for the error message.
pub fn ensure_no_raw_code(path: &str, source: &str, config: &Config) -> Result<()> {
    if config.allow_raw_code {
        return Ok(());
    }

    if let Some(m) = PHP_OPEN_TAG.find(source) {
        let line = source[..m.start()].matches('\n').count() + 1;
        tracing::warn!(path, line, "raw PHP tag under disallow-raw-code policy");
        return Err(ExpectsError::RawCodeForbidden {
            path: path.to_string(),
            line,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forbidding() -> Config {
        Config {
            allow_raw_code: false,
            ..Config::default()
        }
    }

    #[test]
    fn test_allows_when_policy_inactive() {
        let source = "<?php echo 'hi'; ?>";
        assert!(ensure_no_raw_code("t.blade.php", source, &Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_php_tag() {
        let source = "line one\n<?php echo 'hi'; ?>";
        let err = ensure_no_raw_code("t.blade.php", source, &forbidding()).unwrap_err();
        match err {
            ExpectsError::RawCodeForbidden { path, line } => {
                assert_eq!(path, "t.blade.php");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_short_echo_tag() {
        assert!(ensure_no_raw_code("t", "<?= $x ?>", &forbidding()).is_err());
    }

    #[test]
    fn test_expects_annotation_passes() {
        let source = "@expects(string $title)\n{{ $title }}";
        assert!(ensure_no_raw_code("t", source, &forbidding()).is_ok());
    }
}
