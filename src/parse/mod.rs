//! Annotation body parsing.
//!
//! Two front-ends share one semantic model: the expression form
//! (`signature`) reads a parameter-list-shaped body, the comment form
//! (`docblock`) reads `@param`/`@var` tag lines. Both converge on
//! [`crate::decl::VariableDeclaration`] so the generator output is
//! identical for equivalent declarations.

pub mod docblock;
pub mod signature;

use crate::decl::{Primitive, TypeToken};
use crate::error::{ExpectsError, Result};

/// Primitive keyword lookup shared by both front-ends
pub fn primitive_from_keyword(s: &str) -> Option<Primitive> {
    match s {
        "array" => Some(Primitive::Array),
        "int" | "integer" => Some(Primitive::Int),
        "float" | "double" => Some(Primitive::Float),
        "string" => Some(Primitive::String),
        _ => None,
    }
}

/// Scalar keywords that are legal in docblock type expressions but have
/// no runtime check in the closed primitive set. They contribute no
/// type guard, matching the original's fall-through.
fn is_inert_keyword(s: &str) -> bool {
    matches!(
        s,
        "bool" | "boolean" | "mixed" | "object" | "callable" | "iterable" | "void" | "self"
    )
}

/// Classify one member of a docblock type expression.
///
/// Returns the member's token and whether it carried its own `?` prefix.
pub fn classify_member(raw: &str) -> Result<(TypeToken, bool)> {
    let mut member = raw.trim();
    let mut nullable = false;

    if let Some(stripped) = member.strip_prefix('?') {
        nullable = true;
        member = stripped;
    }

    if member.is_empty() {
        return Err(ExpectsError::syntax("empty type expression", raw));
    }

    if member.eq_ignore_ascii_case("null") {
        return Ok((TypeToken::NullMarker, nullable));
    }

    // Array shapes: `array`, `array<...>`, `Foo[]`
    if member.ends_with("[]") || member == "array" || member.starts_with("array<") {
        return Ok((TypeToken::Primitive(Primitive::Array), nullable));
    }

    if let Some(primitive) = primitive_from_keyword(member) {
        return Ok((TypeToken::Primitive(primitive), nullable));
    }

    if is_inert_keyword(member) {
        return Ok((TypeToken::Other, nullable));
    }

    let path = class_path(member)
        .ok_or_else(|| ExpectsError::syntax(format!("malformed type `{}`", member), raw))?;
    Ok((TypeToken::ClassRef(path), nullable))
}

/// Validate a namespaced class/interface name, returning it without the
/// leading backslash. No existence check beyond syntax.
pub fn class_path(raw: &str) -> Option<String> {
    let trimmed = raw.strip_prefix('\\').unwrap_or(raw);
    if trimmed.is_empty() {
        return None;
    }
    for segment in trimmed.split('\\') {
        if !crate::decl::is_identifier(segment) {
            return None;
        }
    }
    Some(trimmed.to_string())
}
