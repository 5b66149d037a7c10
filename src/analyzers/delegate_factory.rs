//! Component C4.3: `LoggerMessage.Define<...>(...)` delegate factories —
//! spec.md §4.4.3.

use crate::model::{Finding, FindingHeader, LogLevel, ParameterBinding, ScalarValue, SourceKind};
use crate::operation_utils::fold_string_constant;
use crate::registry::LoggingTypes;
use crate::semantic::{Operation, SyntaxNode};
use crate::template::parse_template;

use super::shared::build_event_id_binding;
use super::Analyzer;

const DEFINE_METHOD_NAME: &str = "Define";

pub struct DelegateFactoryAnalyzer;

fn parse_log_level(op: &Operation) -> Option<LogLevel> {
    match op {
        Operation::EnumMember(name) => LogLevel::from_name(name),
        Operation::Literal(ScalarValue::Int(n)) => LogLevel::from_numeric(*n),
        _ => None,
    }
}

impl Analyzer for DelegateFactoryAnalyzer {
    fn name(&self) -> &'static str {
        "DelegateFactoryAnalyzer"
    }

    fn try_match(&self, node: &SyntaxNode, types: &LoggingTypes) -> Option<Finding> {
        let SyntaxNode::Invocation(inv) = node else {
            return None;
        };
        let define_type = types.logger_message_define_type.as_deref()?;
        if inv.method.containing_type_fqn != define_type || inv.method.name != DEFINE_METHOD_NAME {
            return None;
        }

        let log_level = inv.arguments.first().and_then(|a| parse_log_level(&a.value));
        let event_id = inv.arguments.get(1).map(|a| build_event_id_binding(&a.value));
        let message_template = inv
            .arguments
            .get(2)
            .and_then(|a| fold_string_constant(&a.value));

        // Positional correlation between the generic type arguments and the
        // template's placeholder names; their counts are allowed to differ
        // and neither list is truncated to match the other (spec.md §4.4.3).
        let placeholder_names: Vec<String> = message_template
            .as_deref()
            .map(|t| {
                parse_template(t)
                    .iter()
                    .filter_map(|seg| seg.placeholder_name().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        let slot_count = placeholder_names.len().max(inv.type_arguments.len());
        let message_parameters: Vec<ParameterBinding> = (0..slot_count)
            .map(|i| {
                let name = placeholder_names
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| i.to_string());
                let type_display = inv
                    .type_arguments
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| "?".to_string());
                ParameterBinding::new(name, type_display, SourceKind::Parameter)
            })
            .collect();

        Some(Finding::DelegateFactory {
            header: FindingHeader {
                method_name: inv.method.name.clone(),
                log_level,
                message_template,
                event_id,
                message_parameters,
                location: inv.location.clone(),
            },
        })
    }
}
