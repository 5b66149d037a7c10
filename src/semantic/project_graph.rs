use crate::model::SourceLocation;

use super::operation::Argument;
use super::symbol::MethodSymbol;

/// One observed call to a compile-time-declared logging method, as reported
/// by a [`ProjectGraph`] before argument mining (spec.md §4.5).
#[derive(Debug, Clone, PartialEq)]
pub struct RawCallSite {
    pub project_name: String,
    pub containing_type_fqn: String,
    pub location: SourceLocation,
    pub arguments: Vec<Argument>,
}

/// A multi-project symbol graph, consulted only by
/// [`crate::caller_finder`] (component C5). `None` at the
/// [`crate::orchestrator::extract`] call site means "no cross-project
/// search available" — spec.md §4.5 documents this as an intentional,
/// non-error fallback, not a degraded mode.
pub trait ProjectGraph: Send + Sync {
    /// Find every invocation of `method` (declared on `declaring_type_fqn`)
    /// across the graph. Symbol identity crosses project boundaries via
    /// whatever equivalence relation the implementation's adapter uses
    /// (spec.md §9) — this trait only needs the declaration's name and
    /// declaring type, not object identity of a compiler symbol.
    fn find_invocations(
        &self,
        declaring_type_fqn: &str,
        method: &MethodSymbol,
    ) -> anyhow::Result<Vec<RawCallSite>>;
}
