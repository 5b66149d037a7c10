//! Component C4.1: the extension-method family (`LogInformation`,
//! `LogWarning`, ... and the generic `Log`) — spec.md §4.4.1.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::model::{Finding, FindingHeader, LogLevel, ScalarValue};
use crate::operation_utils::fold_string_constant;
use crate::registry::LoggingTypes;
use crate::semantic::{Operation, SyntaxNode};
use crate::template::parse_template;

use super::shared::{bind_message_parameters, bind_positional_parameters, build_event_id_binding};
use super::Analyzer;

static EXTENSION_METHOD_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "Log",
        "LogTrace",
        "LogDebug",
        "LogInformation",
        "LogWarning",
        "LogError",
        "LogCritical",
    ])
});

pub struct ExtensionMethodAnalyzer;

fn parse_log_level(op: &Operation) -> Option<LogLevel> {
    match op {
        Operation::EnumMember(name) => LogLevel::from_name(name),
        Operation::Literal(ScalarValue::Int(n)) => LogLevel::from_numeric(*n),
        _ => None,
    }
}

impl Analyzer for ExtensionMethodAnalyzer {
    fn name(&self) -> &'static str {
        "ExtensionMethodAnalyzer"
    }

    fn try_match(&self, node: &SyntaxNode, types: &LoggingTypes) -> Option<Finding> {
        let SyntaxNode::Invocation(inv) = node else {
            return None;
        };
        if !EXTENSION_METHOD_NAMES.contains(inv.method.name.as_str()) {
            return None;
        }
        if !types.is_logger_type(&inv.method.containing_type_fqn) {
            return None;
        }

        let mut log_level = LogLevel::from_extension_method_name(&inv.method.name);
        let mut event_id = None;
        let mut message_op = None;
        let mut args: Vec<Operation> = Vec::new();

        for (i, arg) in inv.arguments.iter().enumerate() {
            let role = arg
                .name
                .clone()
                .or_else(|| inv.method.parameters.get(i).map(|p| p.name.clone()));
            match role.as_deref() {
                Some("logLevel") => {
                    if let Some(level) = parse_log_level(&arg.value) {
                        log_level = Some(level);
                    }
                }
                Some("eventId") => event_id = Some(build_event_id_binding(&arg.value)),
                Some("exception") => {}
                Some("message") => message_op = Some(arg.value.clone()),
                Some("args") => match &arg.value {
                    Operation::ParamsArray(items) => args = items.clone(),
                    other => args.push(other.clone()),
                },
                _ => {}
            }
        }

        let message_template = message_op.as_ref().and_then(fold_string_constant);
        let message_parameters = match &message_template {
            Some(template) => bind_message_parameters(&parse_template(template), &args),
            None => bind_positional_parameters(&args),
        };

        Some(Finding::ExtensionCall {
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
