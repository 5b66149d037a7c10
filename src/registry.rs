//! Component C1: resolving the well-known logging types from a
//! compilation's symbol table (spec.md §4.1). Built once per extraction and
//! shared by immutable reference with every analyzer and every rayon
//! worker task (spec.md §5 "Shared resources").

use crate::semantic::Compilation;

pub const LOGGER_INTERFACE: &str = "Microsoft.Extensions.Logging.ILogger";
pub const GENERIC_LOGGER_INTERFACE: &str = "Microsoft.Extensions.Logging.ILogger`1";
pub const LOG_LEVEL_ENUM: &str = "Microsoft.Extensions.Logging.LogLevel";
pub const EVENT_ID_STRUCT: &str = "Microsoft.Extensions.Logging.EventId";
pub const LOGGER_MESSAGE_ATTRIBUTE: &str = "Microsoft.Extensions.Logging.LoggerMessageAttribute";
pub const LOGGER_MESSAGE_DEFINE_TYPE: &str = "Microsoft.Extensions.Logging.LoggerMessage";
pub const BEGIN_SCOPE_METHOD_NAME: &str = "BeginScope";
pub const LOG_PROPERTIES_ATTRIBUTE: &str = "Microsoft.Extensions.Telemetry.LogPropertiesAttribute";
pub const TAG_NAME_ATTRIBUTE: &str = "Microsoft.Extensions.Compliance.Classification.TagNameAttribute";
pub const TAG_PROVIDER_ATTRIBUTE: &str = "Microsoft.Extensions.Telemetry.TagProviderAttribute";
pub const TAG_COLLECTOR_INTERFACE: &str = "Microsoft.Extensions.Telemetry.ITagCollector";
pub const DATA_CLASSIFICATION_BASE_ATTRIBUTE: &str =
    "Microsoft.Extensions.Compliance.Classification.DataClassificationAttribute";

/// The resolved well-known logging symbols for one extraction run.
///
/// `logger_interface` resolution is mandatory: if the compilation never
/// references it, [`LoggingTypes::resolve`] returns `None` and the
/// orchestrator returns an empty result (spec.md §4.1/§4.6 step 1). Every
/// other family is optional — its absence degrades the analyzer(s) that
/// depend on it to a no-op rather than aborting extraction.
#[derive(Debug, Clone)]
pub struct LoggingTypes {
    pub logger_interface: String,
    pub generic_logger_interface: Option<String>,
    pub log_level_enum: Option<String>,
    pub event_id_struct: Option<String>,
    pub logger_message_attribute: Option<String>,
    pub logger_message_define_type: Option<String>,
    pub begin_scope_method_name: String,
    pub log_properties_attribute: Option<String>,
    pub tag_name_attribute: Option<String>,
    pub tag_provider_attribute: Option<String>,
    pub tag_collector_interface: Option<String>,
    pub data_classification_base_attribute: Option<String>,
}

impl LoggingTypes {
    pub fn resolve(compilation: &dyn Compilation) -> Option<Self> {
        compilation.resolve_type(LOGGER_INTERFACE)?;

        let optional = |fqn: &str| compilation.resolve_type(fqn).map(|_| fqn.to_string());

        Some(Self {
            logger_interface: LOGGER_INTERFACE.to_string(),
            generic_logger_interface: optional(GENERIC_LOGGER_INTERFACE),
            log_level_enum: optional(LOG_LEVEL_ENUM),
            event_id_struct: optional(EVENT_ID_STRUCT),
            logger_message_attribute: optional(LOGGER_MESSAGE_ATTRIBUTE),
            logger_message_define_type: optional(LOGGER_MESSAGE_DEFINE_TYPE),
            begin_scope_method_name: BEGIN_SCOPE_METHOD_NAME.to_string(),
            log_properties_attribute: optional(LOG_PROPERTIES_ATTRIBUTE),
            tag_name_attribute: optional(TAG_NAME_ATTRIBUTE),
            tag_provider_attribute: optional(TAG_PROVIDER_ATTRIBUTE),
            tag_collector_interface: optional(TAG_COLLECTOR_INTERFACE),
            data_classification_base_attribute: optional(DATA_CLASSIFICATION_BASE_ATTRIBUTE),
        })
    }

    pub fn is_logger_type(&self, fqn: &str) -> bool {
        fqn == self.logger_interface
            || self.generic_logger_interface.as_deref() == Some(fqn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::model::InMemoryCompilation;

    #[test]
    fn missing_logger_interface_fails_resolution() {
        let compilation = InMemoryCompilation::new();
        assert!(LoggingTypes::resolve(&compilation).is_none());
    }

    #[test]
    fn optional_families_tolerate_absence() {
        let compilation = InMemoryCompilation::new().with_known_type_name(LOGGER_INTERFACE);
        let types = LoggingTypes::resolve(&compilation).expect("logger interface present");
        assert!(types.tag_name_attribute.is_none());
        assert!(types.log_properties_attribute.is_none());
    }

    #[test]
    fn present_optional_families_resolve() {
        let compilation = InMemoryCompilation::new()
            .with_known_type_name(LOGGER_INTERFACE)
            .with_known_type_name(TAG_NAME_ATTRIBUTE);
        let types = LoggingTypes::resolve(&compilation).unwrap();
        assert_eq!(types.tag_name_attribute.as_deref(), Some(TAG_NAME_ATTRIBUTE));
    }
}
