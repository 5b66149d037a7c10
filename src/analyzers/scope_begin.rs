//! Component C4.4: `BeginScope(...)` on the logger interface — spec.md
//! §4.4.4.

use crate::model::{Finding, FindingHeader};
use crate::operation_utils::fold_string_constant;
use crate::registry::LoggingTypes;
use crate::semantic::{Operation, SyntaxNode};
use crate::template::parse_template;

use super::shared::{bind_message_parameters, expression_text};
use super::Analyzer;

pub struct ScopeBeginAnalyzer;

impl Analyzer for ScopeBeginAnalyzer {
    fn name(&self) -> &'static str {
        "ScopeBeginAnalyzer"
    }

    fn try_match(&self, node: &SyntaxNode, types: &LoggingTypes) -> Option<Finding> {
        let SyntaxNode::Invocation(inv) = node else {
            return None;
        };
        if inv.method.name != types.begin_scope_method_name || !types.is_logger_type(&inv.method.containing_type_fqn) {
            return None;
        }

        // Template + args form: the first argument folds to a string
        // literal. State-object form: it doesn't, and the whole argument
        // becomes the (opaque) message template with no parameters.
        let template_candidate = inv.arguments.first().and_then(|a| fold_string_constant(&a.value));

        let (message_template, message_parameters) = match template_candidate {
            Some(template) => {
                let args = &inv.arguments[1..];
                let values: Vec<Operation> = args.iter().map(|a| a.value.clone()).collect();
                let parameters = bind_message_parameters(&parse_template(&template), &values);
                (Some(template), parameters)
            }
            None => {
                let state_text = inv
                    .arguments
                    .first()
                    .map(|a| expression_text(&a.value))
                    .unwrap_or_default();
                (Some(state_text), Vec::new())
            }
        };

        Some(Finding::ScopeBegin {
            header: FindingHeader {
                method_name: inv.method.name.clone(),
                log_level: None,
                message_template,
                event_id: None,
                message_parameters,
                location: inv.location.clone(),
            },
        })
    }
}
