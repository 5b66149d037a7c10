use serde::{Deserialize, Serialize};

/// How a message parameter's value was produced at the call site. A superset
/// of [`crate::model::ConstantOrReference`]'s kinds: a parameter binding can
/// also originate from an invocation result, a conditional-access chain, or
/// a null-coalescing expression (spec.md §3 `ParameterBinding`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SourceKind {
    Constant,
    Local,
    Parameter,
    Field,
    Property,
    Invocation,
    ConditionalAccess,
    Coalesce,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterBinding {
    pub name: String,
    pub type_display: String,
    pub source_kind: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_tag_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_classification: Option<String>,
}

impl ParameterBinding {
    pub fn new(name: impl Into<String>, type_display: impl Into<String>, source_kind: SourceKind) -> Self {
        Self {
            name: name.into(),
            type_display: type_display.into(),
            source_kind,
            custom_tag_name: None,
            data_classification: None,
        }
    }

    pub fn with_custom_tag_name(mut self, name: Option<String>) -> Self {
        self.custom_tag_name = name;
        self
    }

    pub fn with_data_classification(mut self, classification: Option<String>) -> Self {
        self.data_classification = classification;
        self
    }
}
