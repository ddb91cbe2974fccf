//! Expression-form parser.
//!
//! Reads a body shaped like a function parameter list:
//!
//! ```text
//! string $name, int $age = 18, ?App\Models\User $user = null
//! ```
//!
//! Each entry is `[?]Type $name [= literal]`. This is a dedicated
//! micro-grammar parser; only literal defaults (null, int, float,
//! string) are supported, anything else is a usage error.

use crate::decl::{is_identifier, Literal, Primitive, TypeKind, VariableDeclaration};
use crate::error::{ExpectsError, Result};
use crate::parse::class_path;

/// Parse an expression-form body into declarations, in source order.
/// An empty body yields an empty list.
pub fn parse(body: &str) -> Result<Vec<VariableDeclaration>> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    split_top_level(trimmed)
        .into_iter()
        .map(|entry| parse_param(entry.trim()))
        .collect()
}

/// Split on commas outside parens, brackets and string literals
fn split_top_level(body: &str) -> Vec<&str> {
    let bytes = body.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<u8> = None;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\'' | b'"' => quote = Some(b),
                b'(' | b'[' => depth += 1,
                b')' | b']' => depth -= 1,
                b',' if depth == 0 => {
                    parts.push(&body[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
        i += 1;
    }

    parts.push(&body[start..]);
    parts
}

/// Parse one `[?]Type $name [= literal]` entry
fn parse_param(raw: &str) -> Result<VariableDeclaration> {
    if raw.is_empty() {
        return Err(ExpectsError::syntax("empty parameter", raw));
    }

    let mut rest = raw;
    let mut nullable = false;

    if let Some(stripped) = rest.strip_prefix('?') {
        nullable = true;
        rest = stripped.trim_start();
    }

    // Optional type hint, everything up to the first whitespace
    let mut type_kind = TypeKind::None;
    if !rest.starts_with('$') {
        let end = rest
            .find(char::is_whitespace)
            .ok_or_else(|| ExpectsError::syntax("missing variable name", raw))?;
        type_kind = classify_hint(&rest[..end], raw)?;
        rest = rest[end..].trim_start();
    } else if nullable {
        return Err(ExpectsError::syntax("`?` without a type", raw));
    }

    let after_sigil = rest
        .strip_prefix('$')
        .ok_or_else(|| ExpectsError::syntax("expected `$` variable", raw))?;

    let name: String = after_sigil
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if !is_identifier(&name) {
        return Err(ExpectsError::syntax("missing variable name", raw));
    }
    rest = after_sigil[name.len()..].trim_start();

    let default = if rest.is_empty() {
        None
    } else {
        let value = rest
            .strip_prefix('=')
            .ok_or_else(|| ExpectsError::syntax("unexpected token after variable", raw))?;
        Some(parse_literal(value.trim(), &name)?)
    };

    Ok(VariableDeclaration {
        name,
        required: default.is_none(),
        type_kind,
        default,
        nullable,
    })
}

/// A bare identifier from the primitive set is a primitive check; any
/// other (possibly namespaced) name is an instanceof check.
fn classify_hint(hint: &str, raw: &str) -> Result<TypeKind> {
    match hint {
        "array" => Ok(TypeKind::Primitive(Primitive::Array)),
        "int" => Ok(TypeKind::Primitive(Primitive::Int)),
        "float" => Ok(TypeKind::Primitive(Primitive::Float)),
        "string" => Ok(TypeKind::Primitive(Primitive::String)),
        other => class_path(other)
            .map(TypeKind::ClassRef)
            .ok_or_else(|| ExpectsError::syntax(format!("malformed type `{}`", other), raw)),
    }
}

/// Only literal defaults are supported. A default that is syntactically
/// plausible but not a literal (array, constant, call) is a hard usage
/// error, not a parse error.
fn parse_literal(value: &str, name: &str) -> Result<Literal> {
    if value.is_empty() {
        return Err(ExpectsError::syntax("missing default value", name));
    }

    if value.eq_ignore_ascii_case("null") {
        return Ok(Literal::Null);
    }

    if value.starts_with('\'') || value.starts_with('"') {
        return parse_quoted(value);
    }

    if looks_numeric(value) {
        if let Ok(int) = value.parse::<i64>() {
            return Ok(Literal::Int(int));
        }
        if let Ok(float) = value.parse::<f64>() {
            return Ok(Literal::Float(float));
        }
    }

    Err(ExpectsError::invalid_default(
        name,
        format!("`{}` is not a null, int, float or string literal", value),
    ))
}

fn looks_numeric(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    !digits.is_empty()
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
}

/// Decode a quoted PHP string literal. Single-quote semantics: only the
/// backslash and the delimiter are escapable, any other backslash is
/// kept verbatim.
fn parse_quoted(value: &str) -> Result<Literal> {
    let mut chars = value.chars();
    let quote = chars.next().unwrap();
    let mut decoded = String::new();
    let mut closed = false;

    while let Some(c) = chars.next() {
        if closed {
            return Err(ExpectsError::syntax("trailing text after string default", value));
        }
        if c == '\\' {
            match chars.next() {
                Some(next) if next == quote || next == '\\' => decoded.push(next),
                Some(next) => {
                    decoded.push('\\');
                    decoded.push(next);
                }
                None => return Err(ExpectsError::syntax("unterminated string default", value)),
            }
        } else if c == quote {
            closed = true;
        } else {
            decoded.push(c);
        }
    }

    if !closed {
        return Err(ExpectsError::syntax("unterminated string default", value));
    }
    Ok(Literal::Str(decoded))
}
