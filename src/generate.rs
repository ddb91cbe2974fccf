//! Guard-code generation.
//!
//! Turns normalized declarations into plain PHP statements. Code
//! generation is deliberately string templating: the emitted guards are
//! a small fixed set of patterns and need no AST pretty-printer.
//!
//! Per declaration, in source order:
//! 1. existence/default guard (throw when required, assign otherwise),
//! 2. type/class guard, skipped for null values so an optional nullable
//!    variable may be explicitly null.

use crate::decl::{Literal, TypeKind, VariableDeclaration};

/// Exceptions thrown by the emitted guards at render time
pub const UNDEFINED_VARIABLE_EXCEPTION: &str = "\\BladeExpects\\UndefinedVariableException";
pub const WRONG_TYPE_EXCEPTION: &str = "\\BladeExpects\\WrongTypeException";
pub const WRONG_CLASS_EXCEPTION: &str = "\\BladeExpects\\WrongClassException";

/// Emit the guard block for one annotation occurrence.
/// An empty declaration list produces an empty block.
pub fn guards(decls: &[VariableDeclaration]) -> String {
    let mut out = String::new();
    for decl in decls {
        push_guards(decl, &mut out);
    }
    out
}

fn push_guards(decl: &VariableDeclaration, out: &mut String) {
    let var = format!("${}", decl.name);

    if decl.required {
        let message = format!("View expects {var} variable to be defined");
        out.push_str(&format!(
            "if(!isset({var})) {{ throw new {UNDEFINED_VARIABLE_EXCEPTION}('{}'); }}\n",
            escape_single_quoted(&message)
        ));
    } else {
        out.push_str(&format!(
            "if(!isset({var})) {{ {var} = {}; }}\n",
            render_literal(decl.default.as_ref())
        ));
    }

    match &decl.type_kind {
        TypeKind::None => {}
        TypeKind::Primitive(p) => {
            let message = format!(
                "View expects {var} variable to be {} {} instead of ",
                p.article(),
                p.as_str()
            );
            out.push_str(&format!(
                "if(!is_null({var}) && !{}({var})) {{ throw new {WRONG_TYPE_EXCEPTION}('{}' . gettype({var})); }}\n",
                p.php_check(),
                escape_single_quoted(&message)
            ));
        }
        TypeKind::ClassRef(class) => {
            let fqcn = format!("\\{}", class);
            let message = format!("View expects {var} variable to be an instance of {fqcn}");
            out.push_str(&format!(
                "if(!is_null({var}) && !{var} instanceof {fqcn}) {{ throw new {WRONG_CLASS_EXCEPTION}('{}'); }}\n",
                escape_single_quoted(&message)
            ));
        }
    }
}

/// Literal rendering for the default-assignment guard. An optional
/// declaration without a reconstructable literal falls back to null.
fn render_literal(literal: Option<&Literal>) -> String {
    match literal {
        None | Some(Literal::Null) => "null".to_string(),
        Some(Literal::Int(v)) => v.to_string(),
        Some(Literal::Float(v)) => render_float(*v),
        Some(Literal::Str(v)) => format!("'{}'", escape_single_quoted(v)),
        Some(Literal::Raw(v)) => v.clone(),
    }
}

/// Keep the decimal point so the assigned value stays a PHP float
fn render_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

/// Escape for a single-quoted PHP string so the generated code
/// reproduces the exact original characters.
fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}
