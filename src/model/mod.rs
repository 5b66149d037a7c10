//! The immutable domain model (component C8 of spec.md §2/§3).
//!
//! Every type here is a plain value with structural equality. Sum-type
//! variants carry an explicit serde tag so JSON round-trips without loss —
//! see spec.md §9 "Polymorphic findings".

mod finding;
mod location;
mod parameter;
mod property;
mod summary;
mod value;

pub use finding::{EventIdBinding, Finding, FindingHeader, InvocationSite, LogLevel, ReferenceKind};
pub use location::SourceLocation;
pub use parameter::{ParameterBinding, SourceKind};
pub use property::{LogPropertiesConfig, LogPropertiesParameter, PropertyNode, TagProvider};
pub use summary::{
    CommonParameterName, CustomTagMapping, InconsistencyGroup, IssueKind, Summary,
    TagProviderSummary, TelemetryStats,
};
pub use value::{ConstantOrReference, ScalarValue};

use serde::{Deserialize, Serialize};

/// The top-level return value of [`crate::orchestrator::extract`] (spec.md
/// §3/§6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub findings: Vec<Finding>,
    pub summary: Summary,
    pub cancelled: bool,
}

impl ExtractionResult {
    pub fn empty() -> Self {
        Self {
            findings: Vec::new(),
            summary: Summary::empty(),
            cancelled: false,
        }
    }
}
