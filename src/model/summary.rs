use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum IssueKind {
    TypeMismatch,
    CasingDifference,
}

/// One cross-site naming/typing inconsistency (spec.md §3/§4.7).
///
/// `names_with_types` holds every distinct `(name, type_display)` pair
/// contributing to the group; `issue_kinds` records which rule(s) fired —
/// a single group can carry both when the case-insensitive key also
/// disagrees on type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InconsistencyGroup {
    pub names_with_types: Vec<(String, String)>,
    pub issue_kinds: BTreeSet<IssueKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonParameterName {
    pub name: String,
    pub count: usize,
    pub most_common_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTagMapping {
    pub name: String,
    pub custom_tag_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagProviderSummary {
    pub parameter_name: String,
    pub provider_type_fqn: String,
    pub provider_method_name: String,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryStats {
    pub custom_tag_parameter_count: usize,
    pub custom_tag_property_count: usize,
    pub tag_provider_valid_count: usize,
    pub tag_provider_invalid_count: usize,
    pub transitive_property_count: usize,
    pub custom_tag_mappings: Vec<CustomTagMapping>,
    pub tag_providers: Vec<TagProviderSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub parameter_types_by_name: BTreeMap<String, BTreeSet<String>>,
    pub total_parameter_usage_count: usize,
    pub unique_parameter_name_count: usize,
    pub inconsistency_groups: Vec<InconsistencyGroup>,
    pub common_parameter_names: Vec<CommonParameterName>,
    pub telemetry_stats: TelemetryStats,
}

impl Summary {
    pub fn empty() -> Self {
        Self {
            parameter_types_by_name: BTreeMap::new(),
            total_parameter_usage_count: 0,
            unique_parameter_name_count: 0,
            inconsistency_groups: Vec::new(),
            common_parameter_names: Vec::new(),
            telemetry_stats: TelemetryStats::default(),
        }
    }
}
