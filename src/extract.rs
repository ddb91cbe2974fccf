//! Annotation extraction and span tracking.
//!
//! Locates `@expects(...)` and `@expects ... @endexpects` occurrences in
//! raw template text. Pure scan: malformed bodies are deferred to the
//! parsing stage, only missing terminators are rejected here.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ExpectsError, Result};

/// Anchor for both annotation forms.
/// The word boundary keeps `@expectsSomething` from matching.
static ANCHOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@expects\b").unwrap());

/// Terminator of the block form
static END_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@endexpects\b").unwrap());

/// Which front-end grammar a body belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationForm {
    /// `@expects(<parameter-list>)`
    Expression,
    /// `@expects <tag-lines> @endexpects`
    Block,
}

/// One annotation occurrence: raw body plus the byte span to replace
#[derive(Debug, Clone)]
pub struct Occurrence {
    pub form: AnnotationForm,
    pub body: String,
    pub span: Range<usize>,
}

/// Scan a document for annotation occurrences, in source order.
///
/// The scan resumes after each occurrence's span, so the tag lines of a
/// block can never be re-matched as a nested expression form.
pub fn occurrences(source: &str) -> Result<Vec<Occurrence>> {
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(anchor) = ANCHOR.find_at(source, pos) {
        // Expression form allows horizontal whitespace before the paren
        let rest = &source[anchor.end()..];
        let gap = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        let open = anchor.end() + gap;

        if source[open..].starts_with('(') {
            let close = matching_paren(source, open).ok_or_else(|| {
                ExpectsError::syntax("unterminated @expects(...)", line_of(source, anchor.start()))
            })?;
            found.push(Occurrence {
                form: AnnotationForm::Expression,
                body: source[open + 1..close].to_string(),
                span: anchor.start()..close + 1,
            });
            pos = close + 1;
        } else {
            let end = END_MARKER.find_at(source, anchor.end()).ok_or_else(|| {
                ExpectsError::syntax("missing @endexpects", line_of(source, anchor.start()))
            })?;
            found.push(Occurrence {
                form: AnnotationForm::Block,
                body: source[anchor.end()..end.start()].to_string(),
                span: anchor.start()..end.end(),
            });
            pos = end.end();
        }
    }

    Ok(found)
}

/// Find the `)` balancing the `(` at `open`, skipping over quoted
/// string literals so `@expects(string $s = ')')` extracts correctly.
fn matching_paren(source: &str, open: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = open;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1; // skip escaped char
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\'' | b'"' => quote = Some(b),
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }

    None
}

/// The source line containing `offset`, for diagnostics
fn line_of(source: &str, offset: usize) -> &str {
    let start = source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = source[offset..]
        .find('\n')
        .map(|i| offset + i)
        .unwrap_or(source.len());
    source[start..end].trim()
}
