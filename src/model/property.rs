use serde::{Deserialize, Serialize};

/// Per-parameter `[LogProperties]` configuration (spec.md §3/§4.4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LogPropertiesConfig {
    pub omit_reference_name: bool,
    pub skip_null_properties: bool,
    pub transitive: bool,
}

/// One node in the structural-logging property tree mined from a
/// `[LogProperties]`-annotated parameter's type.
///
/// `nested` is `None` both when `transitive = false` (invariant 3) and when
/// recursion hit a type already on the current recursion stack (the cycle
/// breaker described in spec.md §4.4.5/§9) — the two cases are
/// indistinguishable on the wire, which is intentional: both mean "this
/// branch does not expand further".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyNode {
    pub original_name: String,
    pub emitted_name: String,
    pub type_display: String,
    pub is_nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_tag_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_classification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<Vec<PropertyNode>>,
}

/// The imperative tag-emission contract referenced by a `[TagProvider]`
/// parameter (spec.md §3/§4.4.5 rule set).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagProvider {
    pub parameter_name: String,
    pub provider_type_fqn: String,
    pub provider_method_name: String,
    pub omit_reference_name: bool,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_message: Option<String>,
}

/// A `[LogProperties]`-annotated parameter on a compile-time logging method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPropertiesParameter {
    pub parameter_name: String,
    pub parameter_type_display: String,
    pub config: LogPropertiesConfig,
    pub properties: Vec<PropertyNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_provider: Option<TagProvider>,
}
