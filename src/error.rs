//! Error types shared across the compiler and CLI.
//!
//! Compile-time failures (syntax, bad defaults) are fatal for the single
//! document being compiled; there is no partial-success mode for one
//! annotation occurrence.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, ExpectsError>;

#[derive(Debug, Error)]
pub enum ExpectsError {
    /// An annotation body failed to parse under either grammar.
    /// Carries the offending raw text so the CLI can name the construct.
    #[error("invalid @expects usage ({message}) in `{snippet}`")]
    AnnotationSyntax { message: String, snippet: String },

    /// A default value of a kind the generator cannot render as a literal
    /// (array expression, constant, function call, ...).
    #[error("invalid default value for ${name}: {reason}")]
    InvalidDefault { name: String, reason: String },

    /// Raised by the pre-scan when the raw-code policy is active and the
    /// document contains PHP tags outside generated guards.
    #[error("raw PHP code is forbidden in templates: {path}:{line}")]
    RawCodeForbidden { path: String, line: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl ExpectsError {
    /// Shorthand used by both parser front-ends
    pub fn syntax(message: impl Into<String>, snippet: impl Into<String>) -> Self {
        let snippet: String = snippet.into();
        // Keep diagnostics on one line even for block-form bodies
        let snippet = snippet.split_whitespace().collect::<Vec<_>>().join(" ");
        ExpectsError::AnnotationSyntax {
            message: message.into(),
            snippet,
        }
    }

    pub fn invalid_default(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ExpectsError::InvalidDefault {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
