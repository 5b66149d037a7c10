use serde::{Deserialize, Serialize};

use super::location::SourceLocation;
use super::parameter::ParameterBinding;
use super::property::LogPropertiesParameter;
use super::value::ConstantOrReference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum LogLevel {
    Trace,
    Debug,
    Information,
    Warning,
    Error,
    Critical,
    None,
}

impl LogLevel {
    /// The level enum's numeric mapping (spec.md §4.4.1): `0..=6`. Anything
    /// `>= 7` is unknown and must not be guessed (spec.md §8 boundary case).
    pub fn from_numeric(n: i64) -> Option<Self> {
        match n {
            0 => Some(LogLevel::Trace),
            1 => Some(LogLevel::Debug),
            2 => Some(LogLevel::Information),
            3 => Some(LogLevel::Warning),
            4 => Some(LogLevel::Error),
            5 => Some(LogLevel::Critical),
            6 => Some(LogLevel::None),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Trace" => Some(LogLevel::Trace),
            "Debug" => Some(LogLevel::Debug),
            "Information" => Some(LogLevel::Information),
            "Warning" => Some(LogLevel::Warning),
            "Error" => Some(LogLevel::Error),
            "Critical" => Some(LogLevel::Critical),
            "None" => Some(LogLevel::None),
            _ => None,
        }
    }

    /// The method-name family that unconditionally implies this level, e.g.
    /// `LogInformation` always means `Information` (spec.md §4.4.1).
    pub fn from_extension_method_name(method_name: &str) -> Option<Self> {
        match method_name {
            "LogTrace" => Some(LogLevel::Trace),
            "LogDebug" => Some(LogLevel::Debug),
            "LogInformation" => Some(LogLevel::Information),
            "LogWarning" => Some(LogLevel::Warning),
            "LogError" => Some(LogLevel::Error),
            "LogCritical" => Some(LogLevel::Critical),
            _ => None,
        }
    }
}

/// The two shapes an `EventId` argument can take: supplied inline as a
/// constructor-like pair of operands, or read back from a named symbol
/// (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ReferenceKind {
    Local,
    Parameter,
    Field,
    Property,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum EventIdBinding {
    #[serde(rename = "Inline")]
    Inline {
        id: ConstantOrReference,
        name: ConstantOrReference,
    },
    #[serde(rename = "Ref")]
    SymbolReference {
        #[serde(rename = "refKind")]
        ref_kind: ReferenceKind,
        #[serde(rename = "refName")]
        ref_name: String,
    },
}

/// One call into a compile-time-declared logging method, discovered by
/// [`crate::caller_finder`] across the project graph (spec.md §3/§4.5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationSite {
    pub containing_type_fqn: String,
    pub location: SourceLocation,
    pub arguments: Vec<ParameterBinding>,
}

/// Fields common to every finding variant (spec.md §3 "Common header").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingHeader {
    pub method_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventIdBinding>,
    pub message_parameters: Vec<ParameterBinding>,
    pub location: SourceLocation,
}

/// A recognised logging call site (declaration or invocation). A tagged
/// union rather than an inheritance hierarchy, per spec.md §9: this keeps
/// JSON serialisation 1:1 with the §6 wire schema and makes illegal states
/// (e.g. `invocations` on an extension-method call) unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "methodType")]
pub enum Finding {
    #[serde(rename = "LoggerExtensions")]
    ExtensionCall {
        #[serde(flatten)]
        header: FindingHeader,
    },
    #[serde(rename = "LoggerMessageAttribute")]
    CompileTimeAttribute {
        #[serde(flatten)]
        header: FindingHeader,
        declaring_type: String,
        log_properties_parameters: Vec<LogPropertiesParameter>,
        invocations: Vec<InvocationSite>,
    },
    #[serde(rename = "LoggerMessageDefine")]
    DelegateFactory {
        #[serde(flatten)]
        header: FindingHeader,
    },
    #[serde(rename = "BeginScope")]
    ScopeBegin {
        #[serde(flatten)]
        header: FindingHeader,
    },
}

impl Finding {
    pub fn header(&self) -> &FindingHeader {
        match self {
            Finding::ExtensionCall { header }
            | Finding::DelegateFactory { header }
            | Finding::ScopeBegin { header }
            | Finding::CompileTimeAttribute { header, .. } => header,
        }
    }

    pub fn method_name(&self) -> &str {
        &self.header().method_name
    }

    pub fn location(&self) -> &SourceLocation {
        &self.header().location
    }

    pub fn message_parameters(&self) -> &[ParameterBinding] {
        &self.header().message_parameters
    }

    /// Sort key from spec.md §4.6 step 5: `(file_path, start_line,
    /// start_column, method_name)`.
    pub fn sort_key(&self) -> (String, u32, u32, String) {
        let loc = self.location();
        (
            loc.file_path.clone(),
            loc.start_line,
            loc.start_column,
            self.method_name().to_string(),
        )
    }
}
