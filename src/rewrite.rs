//! Document rewriting.
//!
//! The compile entry point for one template: extract occurrences, parse
//! each body with the matching front-end, generate guards, and splice
//! the results back over the original spans. Everything outside matched
//! spans is preserved byte-for-byte.

use crate::config::Config;
use crate::error::Result;
use crate::extract::{self, AnnotationForm, Occurrence};
use crate::generate;
use crate::parse::{docblock, signature};

/// Compile one template document.
///
/// Pure string transformation; the `Config` snapshot is immutable for
/// the duration of the call, so independent documents may be compiled
/// concurrently without coordination. A document with no annotations is
/// returned unchanged.
pub fn compile(source: &str, config: &Config) -> Result<String> {
    let occurrences = extract::occurrences(source)?;
    if occurrences.is_empty() {
        return Ok(source.to_string());
    }

    tracing::debug!(count = occurrences.len(), "found @expects occurrences");

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;

    // Spans come from the original text and are replaced left-to-right,
    // so earlier replacements never perturb later offsets.
    for occurrence in &occurrences {
        out.push_str(&source[cursor..occurrence.span.start]);
        if config.enabled {
            out.push_str(&replacement(occurrence)?);
        }
        cursor = occurrence.span.end;
    }
    out.push_str(&source[cursor..]);

    Ok(out)
}

/// Parse and pretty-print declarations without rewriting, for the
/// `check` command and editor tooling.
pub fn declarations(source: &str) -> Result<Vec<crate::decl::VariableDeclaration>> {
    let mut decls = Vec::new();
    for occurrence in extract::occurrences(source)? {
        decls.extend(parse_body(&occurrence)?);
    }
    Ok(decls)
}

fn parse_body(occurrence: &Occurrence) -> Result<Vec<crate::decl::VariableDeclaration>> {
    match occurrence.form {
        AnnotationForm::Expression => signature::parse(&occurrence.body),
        AnnotationForm::Block => docblock::parse(&occurrence.body),
    }
}

/// Guard block wrapped in the raw-code delimiters Blade passes through,
/// or nothing when the occurrence declares no variables.
fn replacement(occurrence: &Occurrence) -> Result<String> {
    let decls = parse_body(occurrence)?;
    let guards = generate::guards(&decls);
    if guards.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("<?php\n\n{guards}\n?>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> Config {
        Config::default()
    }

    fn disabled() -> Config {
        Config {
            enabled: false,
            ..Config::default()
        }
    }

    #[test]
    fn test_no_annotations_identity() {
        let source = "<html>\n{{ $anything }}\n</html>";
        assert_eq!(compile(source, &enabled()).unwrap(), source);
    }

    #[test]
    fn test_surrounding_text_preserved() {
        let source = "before\n@expects(string $title)\nafter";
        let out = compile(source, &enabled()).unwrap();
        assert!(out.starts_with("before\n<?php\n\n"));
        assert!(out.ends_with("\n?>\nafter"));
        assert!(out.contains("isset($title)"));
    }

    #[test]
    fn test_disabled_strips_annotations() {
        let source = "a\n@expects(string $title)\nb\n@expects\n@param int $n\n@endexpects\nc";
        let out = compile(source, &disabled()).unwrap();
        assert_eq!(out, "a\n\nb\n\nc");
        assert!(!out.contains("@expects"));
    }

    #[test]
    fn test_empty_parameter_list_removes_span() {
        let out = compile("x@expects()y", &enabled()).unwrap();
        assert_eq!(out, "xy");
    }

    #[test]
    fn test_multiple_occurrences_in_order() {
        let source = "@expects(int $a)\nmid\n@expects(string $b)";
        let out = compile(source, &enabled()).unwrap();
        let a = out.find("isset($a)").unwrap();
        let b = out.find("isset($b)").unwrap();
        assert!(a < b);
        assert!(out.contains("\nmid\n"));
    }

    #[test]
    fn test_front_end_equivalence() {
        // Same declaration through both grammars yields the same guards
        let expr = compile("@expects(int $age = 18)", &enabled()).unwrap();
        let block = compile("@expects\n@param int $age (default:18)\n@endexpects", &enabled())
            .unwrap();
        assert_eq!(expr, block);
    }

    #[test]
    fn test_parse_failure_aborts_document() {
        let source = "keep\n@expects(int $)\nkeep";
        assert!(compile(source, &enabled()).is_err());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let source = "@expects(string $title, ?App\\Models\\User $user = null)";
        let out = compile(source, &enabled()).unwrap();

        // required $title throws when unset
        assert!(out.contains(
            "if(!isset($title)) { throw new \\BladeExpects\\UndefinedVariableException"
        ));
        // optional $user defaults to null
        assert!(out.contains("if(!isset($user)) { $user = null; }"));
        // $title type-checked as string, null-skipping
        assert!(out.contains("if(!is_null($title) && !is_string($title))"));
        // $user instance-checked against the class, null-skipping
        assert!(out.contains("if(!is_null($user) && !$user instanceof \\App\\Models\\User)"));
        assert!(out.starts_with("<?php\n\n"));
        assert!(out.ends_with("\n?>"));
    }
}
