#![forbid(unsafe_code)]

//! # blade-expects
//!
//! Compile-time `@expects` guards for Blade templates.
//!
//! A template declares the variables it expects, either as a parameter
//! list or as docblock tags:
//!
//! ```text
//! @expects(string $title, int $age = 18, ?App\Models\User $user = null)
//!
//! @expects
//!   @param int $age visitor age (default:18)
//! @endexpects
//! ```
//!
//! The compiler rewrites each annotation into PHP guard statements that
//! throw when a required variable is missing or mistyped, and assign
//! defaults to optional ones.
//!
//! ## Example
//!
//! ```rust
//! use blade_expects::{compile, Config};
//!
//! let source = "@expects(string $title)\n<h1>{{ $title }}</h1>";
//! let output = compile(source, &Config::default()).unwrap();
//! assert!(output.contains("isset($title)"));
//! ```

pub mod commands;
pub mod config;
pub mod decl;
pub mod error;
pub mod extract;
pub mod generate;
pub mod parse;
pub mod rewrite;
pub mod scan;

// Re-exports
pub use config::Config;
pub use decl::{Literal, Primitive, TypeKind, VariableDeclaration};
pub use error::{ExpectsError, Result};
pub use extract::{AnnotationForm, Occurrence};
pub use rewrite::{compile, declarations};
pub use scan::ensure_no_raw_code;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
