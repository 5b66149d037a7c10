//! Component C2: reduction of a semantic operation to a
//! [`ConstantOrReference`], and type-display canonicalisation (spec.md
//! §4.2).

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::model::{ConstantOrReference, ScalarValue, SourceKind};
use crate::semantic::{InterpolationPart, Operation};

static TYPE_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("System.Int32", "int"),
        ("System.String", "string"),
        ("System.Boolean", "bool"),
        ("System.Decimal", "decimal"),
        ("System.DateTime", "DateTime"),
        ("System.Int64", "long"),
        ("System.Double", "double"),
        ("System.Object", "object"),
    ])
});

/// Fold a string-valued operation into its compile-time constant value, if
/// it has one. Handles literal strings, `+` concatenation of constants, and
/// interpolated strings whose holes are all constant (spec.md §4.3).
/// Returns `None` for anything else — callers treat that as "not a literal
/// template", per spec.md §4.3.
pub fn fold_string_constant(op: &Operation) -> Option<String> {
    match op {
        Operation::Literal(ScalarValue::Str(s)) => Some(s.clone()),
        Operation::NameOf(name) => Some(name.clone()),
        Operation::BinaryAdd(lhs, rhs) => {
            let l = fold_string_constant(lhs)?;
            let r = fold_string_constant(rhs)?;
            Some(l + &r)
        }
        Operation::Interpolated(parts) => {
            let mut out = String::new();
            for part in parts {
                match part {
                    InterpolationPart::Literal(s) => out.push_str(s),
                    InterpolationPart::Hole(hole) => out.push_str(&fold_scalar_constant(hole)?.display()),
                }
            }
            Some(out)
        }
        _ => None,
    }
}

/// Fold any scalar-valued operation (int, string, bool constants; `+` of
/// constants; `nameof`) into a [`ScalarValue`]. The restricted form of
/// constant folding described in spec.md §9: "arithmetic over integer
/// constants, string concatenation of constants, and `nameof(X)`".
pub fn fold_scalar_constant(op: &Operation) -> Option<ScalarValue> {
    match op {
        Operation::Literal(v) => Some(v.clone()),
        Operation::NameOf(name) => Some(ScalarValue::Str(name.clone())),
        Operation::BinaryAdd(lhs, rhs) => {
            let l = fold_scalar_constant(lhs)?;
            let r = fold_scalar_constant(rhs)?;
            match (l, r) {
                (ScalarValue::Int(a), ScalarValue::Int(b)) => Some(ScalarValue::Int(a + b)),
                (ScalarValue::Str(a), ScalarValue::Str(b)) => Some(ScalarValue::Str(a + &b)),
                _ => fold_string_constant(op).map(ScalarValue::Str),
            }
        }
        Operation::Interpolated(_) => fold_string_constant(op).map(ScalarValue::Str),
        _ => None,
    }
}

/// Reduce any semantic operation to a [`ConstantOrReference`] (spec.md
/// §4.2). An operand that is present but reduces to neither a constant nor
/// a named-symbol read (an invocation result, a conditional-access chain, a
/// coalesce) has no home in the five-kind wire shape; we record its source
/// text as a constant string rather than inventing a sixth variant — see
/// DESIGN.md for why this is the chosen reading of an otherwise-silent
/// spec gap.
pub fn reduce_to_constant_or_reference(op: &Operation) -> ConstantOrReference {
    if let Some(v) = fold_scalar_constant(op) {
        return ConstantOrReference::Constant(v);
    }
    match op {
        Operation::Local { name, .. } => ConstantOrReference::Local(name.clone()),
        Operation::Parameter { name, .. } => ConstantOrReference::Parameter(name.clone()),
        Operation::Field { name, .. } => ConstantOrReference::Field(name.clone()),
        Operation::Property { name, .. } => ConstantOrReference::Property(name.clone()),
        Operation::ConditionalAccess(text) | Operation::Coalesce(text) | Operation::Other(text) => {
            ConstantOrReference::Constant(ScalarValue::Str(text.clone()))
        }
        Operation::Invocation(inv) => {
            ConstantOrReference::Constant(ScalarValue::Str(format!("{}(...)", inv.method.name)))
        }
        Operation::EnumMember(name) => ConstantOrReference::Constant(ScalarValue::Str(name.clone())),
        Operation::ObjectCreation { type_display, .. } => {
            ConstantOrReference::Constant(ScalarValue::Str(format!("new {type_display}(...)")))
        }
        Operation::ParamsArray(_) => ConstantOrReference::Missing(None),
    }
}

/// Classify an operation into the broader [`SourceKind`] set used by
/// [`crate::model::ParameterBinding`] (spec.md §4.2, last bullet —
/// "Otherwise -> Invocation or other").
pub fn classify_source_kind(op: &Operation) -> SourceKind {
    if fold_scalar_constant(op).is_some() {
        return SourceKind::Constant;
    }
    match op {
        Operation::Local { .. } => SourceKind::Local,
        Operation::Parameter { .. } => SourceKind::Parameter,
        Operation::Field { .. } => SourceKind::Field,
        Operation::Property { .. } => SourceKind::Property,
        Operation::ConditionalAccess(_) => SourceKind::ConditionalAccess,
        Operation::Coalesce(_) => SourceKind::Coalesce,
        _ => SourceKind::Invocation,
    }
}

/// Canonicalise a raw type-display string into the crate's fixed short
/// form (spec.md §4.2): known aliases collapse (`System.Int32` -> `int`),
/// nullability is rendered as a trailing `?`, and generic arguments are
/// normalised recursively.
pub fn normalize_type_display(raw: &str, is_nullable: bool) -> String {
    let raw = raw.trim();
    let base = if let Some(lt) = raw.find('<') {
        if raw.ends_with('>') {
            let name = &raw[..lt];
            let inner = &raw[lt + 1..raw.len() - 1];
            let args: Vec<String> = split_balanced(inner)
                .iter()
                .map(|a| normalize_type_display(a, false))
                .collect();
            format!("{}<{}>", alias(name), args.join(","))
        } else {
            alias(raw).to_string()
        }
    } else {
        alias(raw).to_string()
    };

    if is_nullable && !base.ends_with('?') {
        format!("{base}?")
    } else {
        base
    }
}

fn alias(name: &str) -> &str {
    TYPE_ALIASES.get(name).copied().unwrap_or(name)
}

/// Split a comma-separated generic argument list, respecting nested
/// `<...>` so `Dictionary<string,List<int>>`'s inner list splits into two
/// arguments, not three.
fn split_balanced(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                out.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(s[start..].trim());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_nested_concatenation() {
        let op = Operation::BinaryAdd(
            Box::new(Operation::Literal(ScalarValue::Str("a".into()))),
            Box::new(Operation::BinaryAdd(
                Box::new(Operation::Literal(ScalarValue::Str("b".into()))),
                Box::new(Operation::Literal(ScalarValue::Str("c".into()))),
            )),
        );
        assert_eq!(fold_string_constant(&op), Some("abc".to_string()));
    }

    #[test]
    fn non_constant_invocation_does_not_fold() {
        let op = Operation::Other("GetTemplate()".into());
        assert_eq!(fold_string_constant(&op), None);
    }

    #[test]
    fn normalizes_known_aliases_and_nullability() {
        assert_eq!(normalize_type_display("System.Int32", false), "int");
        assert_eq!(normalize_type_display("System.Int32", true), "int?");
    }

    #[test]
    fn normalizes_generic_arguments_recursively() {
        assert_eq!(
            normalize_type_display("Dictionary<System.String,System.Int32>", false),
            "Dictionary<string,int>"
        );
    }

    #[test]
    fn reduces_named_symbol_reads() {
        let op = Operation::Parameter {
            name: "userId".into(),
            type_display: "int".into(),
        };
        assert_eq!(
            reduce_to_constant_or_reference(&op),
            ConstantOrReference::Parameter("userId".into())
        );
    }
}
