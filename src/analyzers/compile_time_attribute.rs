//! Component C4.2: partial methods carrying `[LoggerMessage]` — spec.md
//! §4.4.2. `invocations` is left empty here; the orchestrator attaches it
//! via [`crate::caller_finder`] (component C5) after every tree has been
//! walked.

use crate::model::{ConstantOrReference, Finding, FindingHeader, LogLevel, ParameterBinding, ScalarValue, SourceKind};
use crate::registry::LoggingTypes;
use crate::semantic::{AttributeArg, MethodDeclarationNode, SyntaxNode};

use super::shared::{build_log_properties_parameter, custom_tag_name, data_classification};
use super::Analyzer;

const EXCEPTION_BASE_TYPE: &str = "System.Exception";

pub struct CompileTimeAttributeAnalyzer<'c> {
    compilation: &'c dyn crate::semantic::Compilation,
}

impl<'c> CompileTimeAttributeAnalyzer<'c> {
    pub fn new(compilation: &'c dyn crate::semantic::Compilation) -> Self {
        Self { compilation }
    }

    fn matches_attribute<'a>(&self, decl: &'a MethodDeclarationNode, types: &LoggingTypes) -> Option<&'a crate::semantic::AttributeData> {
        let fqn = types.logger_message_attribute.as_deref()?;
        decl.attributes.iter().find(|a| a.name == fqn)
    }

    fn is_excluded_parameter(&self, param: &crate::semantic::ParameterSymbol, types: &LoggingTypes) -> bool {
        if types.is_logger_type(&param.type_display) {
            return true;
        }
        if types.log_level_enum.as_deref() == Some(param.type_display.as_str()) {
            return true;
        }
        let is_exception = param.type_display == EXCEPTION_BASE_TYPE
            || param
                .type_symbol
                .as_ref()
                .map(|t| t.base_types.iter().any(|b| b == EXCEPTION_BASE_TYPE))
                .unwrap_or(false);
        if is_exception {
            return true;
        }
        if let Some(log_properties_fqn) = types.log_properties_attribute.as_deref() {
            if param.attributes.iter().any(|a| a.name == log_properties_fqn) {
                return true;
            }
        }
        false
    }
}

impl<'c> Analyzer for CompileTimeAttributeAnalyzer<'c> {
    fn name(&self) -> &'static str {
        "CompileTimeAttributeAnalyzer"
    }

    fn try_match(&self, node: &SyntaxNode, types: &LoggingTypes) -> Option<Finding> {
        let SyntaxNode::MethodDeclaration(decl) = node else {
            return None;
        };
        if !decl.is_partial {
            return None;
        }
        let attr = self.matches_attribute(decl, types)?;

        let event_id = attr
            .resolve_arg("EventId", 0)
            .map(|v| ConstantOrReference::Constant(attribute_arg_to_scalar(v)));
        let log_level = attr
            .resolve_arg("Level", 1)
            .and_then(|v| match v {
                AttributeArg::EnumMember(name) => LogLevel::from_name(name),
                AttributeArg::Int(n) => LogLevel::from_numeric(*n),
                _ => None,
            });
        let message_template = attr
            .resolve_arg("Message", 2)
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let mut message_parameters = Vec::new();
        let mut log_properties_parameters = Vec::new();
        for param in &decl.method.parameters {
            if self.is_excluded_parameter(param, types) {
                continue;
            }
            let has_log_properties = types
                .log_properties_attribute
                .as_deref()
                .is_some_and(|fqn| param.attributes.iter().any(|a| a.name == fqn));
            if has_log_properties {
                log_properties_parameters.push(build_log_properties_parameter(
                    param,
                    &param.attributes,
                    types,
                    self.compilation,
                ));
            } else {
                let binding = ParameterBinding::new(
                    param.name.clone(),
                    crate::operation_utils::normalize_type_display(&param.type_display, param.is_nullable),
                    SourceKind::Parameter,
                )
                .with_custom_tag_name(custom_tag_name(&param.attributes, types))
                .with_data_classification(data_classification(&param.attributes, types));
                message_parameters.push(binding);
            }
        }

        Some(Finding::CompileTimeAttribute {
            header: FindingHeader {
                method_name: decl.method.name.clone(),
                log_level,
                message_template,
                event_id: event_id.map(|id| crate::model::EventIdBinding::Inline {
                    id,
                    name: ConstantOrReference::missing(),
                }),
                message_parameters,
                location: decl.location.clone(),
            },
            declaring_type: decl.declaring_type_fqn.clone(),
            log_properties_parameters,
            invocations: Vec::new(),
        })
    }
}

fn attribute_arg_to_scalar(arg: &AttributeArg) -> ScalarValue {
    match arg {
        AttributeArg::Int(n) => ScalarValue::Int(*n),
        AttributeArg::Str(s) => ScalarValue::Str(s.clone()),
        AttributeArg::Bool(b) => ScalarValue::Bool(*b),
        AttributeArg::EnumMember(name) => ScalarValue::Str(name.clone()),
    }
}
