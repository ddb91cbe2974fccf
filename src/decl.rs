//! Normalized declaration model shared by both parser front-ends.
//!
//! The expression form and the docblock form converge on the same
//! [`VariableDeclaration`] so the generator only ever sees one shape.

use serde::{Deserialize, Serialize};

/// Primitive kinds with a built-in PHP runtime check.
///
/// This set is closed: the generator maps each member to its `is_*`
/// function and knows no others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Array,
    Int,
    Float,
    String,
}

impl Primitive {
    /// Lowercase keyword as written in annotations and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Array => "array",
            Primitive::Int => "int",
            Primitive::Float => "float",
            Primitive::String => "string",
        }
    }

    /// PHP runtime predicate for this kind
    pub fn php_check(&self) -> &'static str {
        match self {
            Primitive::Array => "is_array",
            Primitive::Int => "is_int",
            Primitive::Float => "is_float",
            Primitive::String => "is_string",
        }
    }

    /// "a" or "an", by the keyword's leading letter
    pub fn article(&self) -> &'static str {
        match self.as_str().as_bytes()[0] {
            b'a' | b'e' | b'i' | b'o' | b'u' => "an",
            _ => "a",
        }
    }
}

/// Declared type of a template variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// No type guard emitted
    None,
    /// Checked with the primitive's `is_*` predicate
    Primitive(Primitive),
    /// Checked with `instanceof`; existence of the class is NOT verified
    ClassRef(String),
}

/// A compile-time-known default value.
///
/// `Raw` is the docblock-only extension: an `array`-typed
/// `(default:...)` marker keeps its text and is spliced verbatim into
/// the assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Int(i64),
    Float(f64),
    Str(String),
    Raw(String),
}

/// One member of a parsed type expression.
///
/// Closed tagged variant replacing the original's dynamic dispatch over
/// AST node classes. `Other` absorbs scalar keywords outside the
/// primitive set (`bool`, `mixed`, `callable`, ...) which contribute no
/// type guard.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeToken {
    Primitive(Primitive),
    ClassRef(String),
    NullMarker,
    Other,
}

/// Fold a union's members into `(TypeKind, nullable)`.
///
/// Known quirk, preserved from the original: when a union carries more
/// than one non-null type (`int|string`), the LAST member wins.
pub fn reduce_union(members: &[TypeToken]) -> (TypeKind, bool) {
    let mut kind = TypeKind::None;
    let mut nullable = false;

    for member in members {
        match member {
            TypeToken::NullMarker => nullable = true,
            TypeToken::Primitive(p) => kind = TypeKind::Primitive(*p),
            TypeToken::ClassRef(name) => kind = TypeKind::ClassRef(name.clone()),
            TypeToken::Other => {}
        }
    }

    (kind, nullable)
}

/// The single normalized entity produced by both parsers.
///
/// Built fresh per annotation occurrence, never mutated, discarded once
/// its guard code has been emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// Template variable name, without the `$` sigil
    pub name: String,
    /// True iff the variable must be bound at render time
    pub required: bool,
    /// Declared type, if any
    pub type_kind: TypeKind,
    /// Fallback value; present only when the variable is optional
    pub default: Option<Literal>,
    /// Type expression explicitly allows null
    pub nullable: bool,
}

/// Identifier syntax accepted for variable names and class path segments
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
