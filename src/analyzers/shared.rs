//! Component C4.5: mining rules shared by more than one analyzer — message
//! parameter binding from a parsed template, `EventId` binding, structural
//! `[LogProperties]` walking, `[TagProvider]` validation, and
//! `[DataClassification]` discovery (spec.md §4.4.5).

use std::collections::HashSet;

use crate::model::{
    ConstantOrReference, EventIdBinding, LogPropertiesConfig, LogPropertiesParameter,
    ParameterBinding, PropertyNode, ReferenceKind, ScalarValue, TagProvider,
};
use crate::operation_utils::{classify_source_kind, reduce_to_constant_or_reference};
use crate::registry::LoggingTypes;
use crate::semantic::{AttributeArg, AttributeData, Compilation, Operation, ParameterSymbol, TypeSymbol};
use crate::template::TemplateSegment;

/// Pair message-template placeholders (left-to-right) with `args` entries
/// (left-to-right), zipping to `min(len)` on a mismatch (spec.md §4.4.1).
pub fn bind_message_parameters(template: &[TemplateSegment], args: &[Operation]) -> Vec<ParameterBinding> {
    template
        .iter()
        .filter_map(TemplateSegment::placeholder_name)
        .zip(args.iter())
        .map(|(name, arg)| ParameterBinding::new(name, infer_type_display(arg), classify_source_kind(arg)))
        .collect()
}

/// When the template isn't a compile-time literal, correlate positionally
/// with analyzer-supplied type info instead (spec.md §4.3).
pub fn bind_positional_parameters(args: &[Operation]) -> Vec<ParameterBinding> {
    args.iter()
        .enumerate()
        .map(|(i, arg)| ParameterBinding::new(i.to_string(), infer_type_display(arg), classify_source_kind(arg)))
        .collect()
}

/// The static type of an operation, used wherever an argument's own type
/// couldn't be derived from a message-template placeholder (spec.md §7
/// kind 4 "Unresolvable symbol" falls back to `"?"`, which `Operation::Other`
/// already routes into here).
pub fn infer_type_display(op: &Operation) -> String {
    match op {
        Operation::Local { type_display, .. }
        | Operation::Parameter { type_display, .. }
        | Operation::Field { type_display, .. }
        | Operation::Property { type_display, .. } => type_display.clone(),
        Operation::Literal(ScalarValue::Int(_)) => "int".to_string(),
        Operation::Literal(ScalarValue::Str(_)) => "string".to_string(),
        Operation::Literal(ScalarValue::Bool(_)) => "bool".to_string(),
        Operation::Literal(ScalarValue::Null) => "object".to_string(),
        Operation::ObjectCreation { type_display, .. } => type_display.clone(),
        Operation::Invocation(inv) => inv
            .method
            .return_type_display
            .clone()
            .unwrap_or_else(|| "?".to_string()),
        Operation::EnumMember(_) => "?".to_string(),
        _ => "?".to_string(),
    }
}

/// Build an [`EventIdBinding`] from the operand supplied for an `eventId`
/// role (spec.md §3): a `new EventId(id, name)` construction becomes
/// `Inline`, a bare constant becomes `Inline { id, name: Missing }`, and a
/// named-symbol read becomes `SymbolReference`.
pub fn build_event_id_binding(op: &Operation) -> EventIdBinding {
    match op {
        Operation::ObjectCreation { arguments, .. } => {
            let id = arguments
                .first()
                .map(|a| reduce_to_constant_or_reference(&a.value))
                .unwrap_or_else(ConstantOrReference::missing);
            let name = arguments
                .get(1)
                .map(|a| reduce_to_constant_or_reference(&a.value))
                .unwrap_or_else(ConstantOrReference::missing);
            EventIdBinding::Inline { id, name }
        }
        Operation::Local { name, .. } => EventIdBinding::SymbolReference {
            ref_kind: ReferenceKind::Local,
            ref_name: name.clone(),
        },
        Operation::Parameter { name, .. } => EventIdBinding::SymbolReference {
            ref_kind: ReferenceKind::Parameter,
            ref_name: name.clone(),
        },
        Operation::Field { name, .. } => EventIdBinding::SymbolReference {
            ref_kind: ReferenceKind::Field,
            ref_name: name.clone(),
        },
        Operation::Property { name, .. } => EventIdBinding::SymbolReference {
            ref_kind: ReferenceKind::Property,
            ref_name: name.clone(),
        },
        _ => EventIdBinding::Inline {
            id: reduce_to_constant_or_reference(op),
            name: ConstantOrReference::missing(),
        },
    }
}

/// Best-effort source text for an operand that isn't being decomposed
/// further — used for the scope-begin state-object form (spec.md §4.4.4),
/// where `message_template` is just "the literal expression text".
pub fn expression_text(op: &Operation) -> String {
    match op {
        Operation::Literal(ScalarValue::Str(s)) => s.clone(),
        Operation::Literal(ScalarValue::Int(n)) => n.to_string(),
        Operation::Literal(ScalarValue::Bool(b)) => b.to_string(),
        Operation::Literal(ScalarValue::Null) => "null".to_string(),
        Operation::EnumMember(name) => name.clone(),
        Operation::NameOf(name) => format!("nameof({name})"),
        Operation::Local { name, .. }
        | Operation::Parameter { name, .. }
        | Operation::Field { name, .. }
        | Operation::Property { name, .. } => name.clone(),
        Operation::ConditionalAccess(text) | Operation::Coalesce(text) | Operation::Other(text) => text.clone(),
        Operation::ObjectCreation { type_display, .. } => format!("new {type_display}(...)"),
        Operation::Invocation(inv) => format!("{}(...)", inv.method.name),
        Operation::BinaryAdd(_, _) => "(...)".to_string(),
        Operation::Interpolated(_) => "$\"...\"".to_string(),
        Operation::ParamsArray(_) => "(...)".to_string(),
    }
}

fn find_attribute<'a>(attrs: &'a [AttributeData], fqn: Option<&str>) -> Option<&'a AttributeData> {
    let fqn = fqn?;
    attrs.iter().find(|a| a.name == fqn || a.base_types.iter().any(|b| b == fqn))
}

pub(crate) fn custom_tag_name(attrs: &[AttributeData], types: &LoggingTypes) -> Option<String> {
    let attr = find_attribute(attrs, types.tag_name_attribute.as_deref())?;
    attr.resolve_arg("name", 0)
        .or_else(|| attr.resolve_arg("Name", 0))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

pub(crate) fn data_classification(attrs: &[AttributeData], types: &LoggingTypes) -> Option<String> {
    let sentinel = types.data_classification_base_attribute.as_deref()?;
    attrs
        .iter()
        .find(|a| a.name == sentinel || a.base_types.iter().any(|b| b == sentinel))
        .map(|a| a.name.clone())
}

/// Walk a `[LogProperties]`-annotated parameter's type into its property
/// tree (spec.md §4.4.5). `stack` holds the declaring-type FQNs already on
/// the current recursion path; hitting one again breaks the cycle and
/// leaves `nested = None` (invariant 3 / the `Node { Parent; Child }` seed
/// test).
pub fn build_log_properties_parameter(
    parameter: &ParameterSymbol,
    attrs: &[AttributeData],
    types: &LoggingTypes,
    compilation: &dyn Compilation,
) -> LogPropertiesParameter {
    let config = read_log_properties_config(attrs, types);
    let mut stack = HashSet::new();
    let properties = match &parameter.type_symbol {
        Some(ty) => {
            stack.insert(ty.fqn.clone());
            walk_properties(ty, &config, types, compilation, &stack)
        }
        None => Vec::new(),
    };
    let tag_provider = build_tag_provider(parameter, attrs, types, compilation);

    LogPropertiesParameter {
        parameter_name: parameter.name.clone(),
        parameter_type_display: parameter.type_display.clone(),
        config,
        properties,
        tag_provider,
    }
}

fn read_log_properties_config(attrs: &[AttributeData], types: &LoggingTypes) -> LogPropertiesConfig {
    let Some(attr) = find_attribute(attrs, types.log_properties_attribute.as_deref()) else {
        return LogPropertiesConfig::default();
    };
    let as_bool = |arg: Option<&AttributeArg>| matches!(arg, Some(AttributeArg::Bool(true)));
    LogPropertiesConfig {
        omit_reference_name: as_bool(attr.find_arg("OmitReferenceName")),
        skip_null_properties: as_bool(attr.find_arg("SkipNullProperties")),
        transitive: as_bool(attr.find_arg("Transitive")),
    }
}

fn walk_properties(
    ty: &TypeSymbol,
    config: &LogPropertiesConfig,
    types: &LoggingTypes,
    compilation: &dyn Compilation,
    stack: &HashSet<String>,
) -> Vec<PropertyNode> {
    ty.properties
        .iter()
        .map(|prop| {
            let emitted_name = custom_tag_name(&prop.attributes, types).unwrap_or_else(|| prop.name.clone());
            let nested = if !config.transitive {
                None
            } else {
                recurse_into_property_type(prop.type_symbol.as_ref(), config, types, compilation, stack)
            };
            PropertyNode {
                original_name: prop.name.clone(),
                emitted_name,
                type_display: crate::operation_utils::normalize_type_display(&prop.type_display, prop.is_nullable),
                is_nullable: prop.is_nullable,
                custom_tag_name: custom_tag_name(&prop.attributes, types),
                data_classification: data_classification(&prop.attributes, types),
                nested,
            }
        })
        .collect()
}

fn recurse_into_property_type(
    property_type: Option<&TypeSymbol>,
    config: &LogPropertiesConfig,
    types: &LoggingTypes,
    compilation: &dyn Compilation,
    stack: &HashSet<String>,
) -> Option<Vec<PropertyNode>> {
    let property_type = property_type?;
    // Collection-typed properties recurse into the element type instead of
    // the container (spec.md §4.4.5).
    let target = if property_type.is_collection {
        property_type.element_type.as_deref()?
    } else {
        property_type
    };

    if stack.contains(&target.fqn) {
        return None;
    }

    let mut next_stack = stack.clone();
    next_stack.insert(target.fqn.clone());
    Some(walk_properties(target, config, types, compilation, &next_stack))
}

/// Validate a `[TagProvider]` reference against the seven-rule set in
/// spec.md §4.4.5, stopping at (and recording) the first violated rule.
/// Returns `None` entirely when the tag-provider family itself — or the
/// tag-collector interface its first parameter must match — never
/// resolved, per the "optional families become no-ops" rule in §4.1.
fn build_tag_provider(
    parameter: &ParameterSymbol,
    attrs: &[AttributeData],
    types: &LoggingTypes,
    compilation: &dyn Compilation,
) -> Option<TagProvider> {
    let tag_collector = types.tag_collector_interface.as_deref()?;
    let attr = find_attribute(attrs, types.tag_provider_attribute.as_deref())?;

    let provider_type_fqn = attr
        .resolve_arg("providerType", 0)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    let provider_method_name = attr
        .resolve_arg("providerMethodName", 1)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    let omit_reference_name = matches!(attr.find_arg("OmitReferenceName"), Some(AttributeArg::Bool(true)));

    let (is_valid, validation_message) =
        validate_tag_provider(compilation, &provider_type_fqn, &provider_method_name, tag_collector, parameter);

    Some(TagProvider {
        parameter_name: parameter.name.clone(),
        provider_type_fqn,
        provider_method_name,
        omit_reference_name,
        is_valid,
        validation_message,
    })
}

fn validate_tag_provider(
    compilation: &dyn Compilation,
    provider_type_fqn: &str,
    provider_method_name: &str,
    tag_collector_fqn: &str,
    parameter: &ParameterSymbol,
) -> (bool, Option<String>) {
    let Some(method) = compilation.resolve_method(provider_type_fqn, provider_method_name) else {
        return (false, Some("method not found".to_string()));
    };
    if !method.is_static {
        return (false, Some("provider method must be static".to_string()));
    }
    if !method.is_visible_internally() {
        return (false, Some("provider method must be public or internal".to_string()));
    }
    if !method.returns_unit() {
        return (false, Some("provider method must return void".to_string()));
    }
    if method.parameters.len() != 2 {
        return (false, Some("provider method must take exactly two parameters".to_string()));
    }
    if method.parameters[0].type_display != tag_collector_fqn {
        return (
            false,
            Some("first parameter must be the tag collector interface".to_string()),
        );
    }
    if !is_assignable(&method.parameters[1], parameter) {
        return (
            false,
            Some("second parameter must be assignable from the annotated parameter's type".to_string()),
        );
    }
    (true, None)
}

fn is_assignable(target: &ParameterSymbol, source: &ParameterSymbol) -> bool {
    if target.type_display == "object" || target.type_display == source.type_display {
        return true;
    }
    source
        .type_symbol
        .as_ref()
        .map(|s| s.base_types.iter().any(|b| b == &target.type_display))
        .unwrap_or(false)
}
