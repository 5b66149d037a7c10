//! Component C4: the pluggable analyzer set (spec.md §4.4). Each analyzer
//! claims one [`SyntaxNode`] shape and hands back a [`Finding`], or declines
//! by returning `None` — the orchestrator tries every analyzer against
//! every node and keeps whichever one matches.

mod compile_time_attribute;
mod delegate_factory;
mod extension_method;
mod scope_begin;
pub(crate) mod shared;

pub use compile_time_attribute::CompileTimeAttributeAnalyzer;
pub use delegate_factory::DelegateFactoryAnalyzer;
pub use extension_method::ExtensionMethodAnalyzer;
pub use scope_begin::ScopeBeginAnalyzer;

use crate::model::Finding;
use crate::registry::LoggingTypes;
use crate::semantic::{Compilation, SyntaxNode};

/// A single logging-call family recognizer (spec.md §4.4). Analyzers never
/// share mutable state — each is stateless or holds only an immutable
/// borrow of the compilation — so the orchestrator can run them across
/// trees in parallel (spec.md §9 "Parallel dispatch").
pub trait Analyzer: Send + Sync {
    fn name(&self) -> &'static str;
    fn try_match(&self, node: &SyntaxNode, types: &LoggingTypes) -> Option<Finding>;
}

/// The fixed dispatch order: extension calls, compile-time attributes,
/// delegate factories, then scope-begin. Order doesn't affect correctness
/// (node shapes are disjoint per family except where a method name
/// collides, which spec.md doesn't anticipate) but keeps diagnostic output
/// deterministic across runs.
pub fn all_analyzers(compilation: &dyn Compilation) -> Vec<Box<dyn Analyzer + '_>> {
    vec![
        Box::new(ExtensionMethodAnalyzer),
        Box::new(CompileTimeAttributeAnalyzer::new(compilation)),
        Box::new(DelegateFactoryAnalyzer),
        Box::new(ScopeBeginAnalyzer),
    ]
}
