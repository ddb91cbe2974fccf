//! Docblock-form parser.
//!
//! Reads the block body as structured comment lines, one declaration
//! per `@param`/`@var` tag:
//!
//! ```text
//! @param  int                    $age    visitor age (default:18)
//! @param  \App\Models\User|null  $user   the authenticated user
//! @var    string[]               $tags
//! ```
//!
//! Tags of other kinds and free-text lines are ignored. The type
//! expression may be a union; a `null` member marks the declaration
//! nullable, and the description may embed a `(default:<value>)` hint.

use std::sync::LazyLock;

use regex::Regex;

use crate::decl::{
    is_identifier, reduce_union, Literal, Primitive, TypeKind, TypeToken, VariableDeclaration,
};
use crate::error::{ExpectsError, Result};
use crate::parse::classify_member;

/// `(default:<value>)` marker in a tag description, keyword
/// case-insensitive, value trimmed
static DEFAULT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(\s*default\s*:([^)]*)\)").unwrap());

/// Parse a block-form body into declarations, in tag order.
pub fn parse(body: &str) -> Result<Vec<VariableDeclaration>> {
    let mut decls = Vec::new();

    for line in body.lines() {
        // Tolerate `*`-guttered comment formatting
        let line = line.trim().trim_start_matches('*').trim();

        let rest = match line
            .strip_prefix("@param")
            .or_else(|| line.strip_prefix("@var"))
        {
            // Require a separator so `@parameter` stays an unknown tag
            Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
            _ => continue,
        };

        decls.push(parse_tag(rest, line)?);
    }

    Ok(decls)
}

/// Parse the `<type> $<name> [free text]` remainder of one tag line
fn parse_tag(rest: &str, line: &str) -> Result<VariableDeclaration> {
    let mut parts = rest.splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("");
    let mut remainder = parts.next().unwrap_or("").trim_start();

    // phpdoc allows a typeless `@param $name description`
    let (type_kind, nullable) = if first.starts_with('$') {
        remainder = rest;
        (TypeKind::None, false)
    } else {
        let members = first
            .split('|')
            .map(classify_member)
            .collect::<Result<Vec<_>>>()?;
        let own_nullable = members.iter().any(|(_, n)| *n);
        let tokens: Vec<TypeToken> = members.into_iter().map(|(t, _)| t).collect();
        let (kind, union_nullable) = reduce_union(&tokens);
        (kind, own_nullable || union_nullable)
    };

    let after_sigil = remainder
        .strip_prefix('$')
        .ok_or_else(|| ExpectsError::syntax("expected `$` variable after type", line))?;
    let name: String = after_sigil
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if !is_identifier(&name) {
        return Err(ExpectsError::syntax("missing variable name", line));
    }
    let description = after_sigil[name.len()..].trim();

    // A default marker makes the variable optional even when the
    // coercion produces no literal (ClassRef targets).
    let mut has_default = false;
    let mut default = None;
    if let Some(cap) = DEFAULT_MARKER.captures(description) {
        has_default = true;
        default = coerce_default(cap[1].trim(), &type_kind, &name)?;
    }

    Ok(VariableDeclaration {
        required: !has_default && !nullable,
        name,
        type_kind,
        default,
        nullable,
    })
}

/// Coerce the marker text to the declared primitive kind.
///
/// `int`/`float` parse as numeric literals, `string` keeps the raw
/// trimmed text, `array` keeps it verbatim (spliced unquoted). For
/// non-primitive targets no literal is produced.
fn coerce_default(text: &str, type_kind: &TypeKind, name: &str) -> Result<Option<Literal>> {
    if text.eq_ignore_ascii_case("null") {
        return Ok(Some(Literal::Null));
    }

    match type_kind {
        TypeKind::Primitive(Primitive::Int) => text
            .parse::<i64>()
            .map(|v| Some(Literal::Int(v)))
            .map_err(|_| {
                ExpectsError::invalid_default(name, format!("`{}` is not an int literal", text))
            }),
        TypeKind::Primitive(Primitive::Float) => text
            .parse::<f64>()
            .map(|v| Some(Literal::Float(v)))
            .map_err(|_| {
                ExpectsError::invalid_default(name, format!("`{}` is not a float literal", text))
            }),
        TypeKind::Primitive(Primitive::String) => Ok(Some(Literal::Str(text.to_string()))),
        TypeKind::Primitive(Primitive::Array) => Ok(Some(Literal::Raw(text.to_string()))),
        TypeKind::ClassRef(_) | TypeKind::None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_with_default_marker() {
        let decls = parse("@param int $age visitor age (default:18)").unwrap();
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "age");
        assert_eq!(decls[0].type_kind, TypeKind::Primitive(Primitive::Int));
        assert_eq!(decls[0].default, Some(Literal::Int(18)));
        assert!(!decls[0].required);
    }

    #[test]
    fn test_marker_keyword_case_insensitive() {
        let decls = parse("@param string $mode (Default: list )").unwrap();
        assert_eq!(decls[0].default, Some(Literal::Str("list".to_string())));
    }

    #[test]
    fn test_required_without_marker() {
        let decls = parse("@param string $title the page title").unwrap();
        assert!(decls[0].required);
        assert!(decls[0].default.is_none());
    }

    #[test]
    fn test_null_union_member_makes_optional() {
        let decls = parse("@param \\App\\Models\\User|null $user current user").unwrap();
        assert_eq!(
            decls[0].type_kind,
            TypeKind::ClassRef("App\\Models\\User".to_string())
        );
        assert!(decls[0].nullable);
        assert!(!decls[0].required);
    }

    #[test]
    fn test_var_tag_and_ignored_tags() {
        let body = "\
@author someone
@param int $a
some free text
@var string $b
@return void";
        let decls = parse(body).unwrap();
        let names: Vec<_> = decls.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_union_quirk_last_non_null_wins() {
        let decls = parse("@param int|string $id").unwrap();
        assert_eq!(decls[0].type_kind, TypeKind::Primitive(Primitive::String));
    }

    #[test]
    fn test_array_shape_member() {
        let decls = parse("@param string[] $tags (default:[])").unwrap();
        assert_eq!(decls[0].type_kind, TypeKind::Primitive(Primitive::Array));
        assert_eq!(decls[0].default, Some(Literal::Raw("[]".to_string())));
    }

    #[test]
    fn test_class_ref_marker_gives_no_literal_but_optional() {
        let decls = parse("@param \\App\\Clock $clock (default:now)").unwrap();
        assert!(decls[0].default.is_none());
        assert!(!decls[0].required);
    }

    #[test]
    fn test_typeless_param() {
        let decls = parse("@param $anything free text").unwrap();
        assert_eq!(decls[0].type_kind, TypeKind::None);
        assert!(decls[0].required);
    }

    #[test]
    fn test_gutter_stars_tolerated() {
        let body = " * @param int $n\n * @var string $s\n";
        let decls = parse(body).unwrap();
        assert_eq!(decls.len(), 2);
    }

    #[test]
    fn test_missing_name_fails() {
        assert!(parse("@param int $").is_err());
        assert!(parse("@param int notavariable").is_err());
    }

    #[test]
    fn test_bad_int_default_fails() {
        let err = parse("@param int $n (default:abc)").unwrap_err();
        assert!(matches!(
            err,
            crate::error::ExpectsError::InvalidDefault { .. }
        ));
    }

    #[test]
    fn test_nullable_prefix_type() {
        let decls = parse("@param ?int $count").unwrap();
        assert!(decls[0].nullable);
        assert!(!decls[0].required);
        assert_eq!(decls[0].type_kind, TypeKind::Primitive(Primitive::Int));
    }
}
