use super::operation::SyntaxNode;
use super::symbol::{MethodSymbol, TypeSymbol};

/// One compiled source file, reduced to the operations the extractor walks.
/// A real adapter would derive this lazily from a Roslyn `SyntaxTree` +
/// `SemanticModel` pair; here it is a flat, already-bound list.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    pub file_path: String,
    pub nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    pub fn new(file_path: impl Into<String>, nodes: Vec<SyntaxNode>) -> Self {
        Self {
            file_path: file_path.into(),
            nodes,
        }
    }
}

/// The compiled-source view the core consumes (spec.md §6 "Consumed
/// interfaces"). Implementations are expected to be cheap to query
/// repeatedly and safe to share across the orchestrator's parallel worker
/// tasks (spec.md §5) — hence `Sync`.
pub trait Compilation: Send + Sync {
    fn syntax_trees(&self) -> &[SyntaxTree];

    /// Resolve a well-known type by fully-qualified name, standing in for a
    /// symbol-table lookup against the compilation's referenced assemblies.
    /// Returns `None` when the type isn't referenced — required for the
    /// [`crate::registry::LoggingTypes`] optional-family tolerance in
    /// spec.md §4.1.
    fn resolve_type(&self, fqn: &str) -> Option<TypeSymbol>;

    /// Resolve a static method on `type_fqn` by name — used to validate
    /// `[TagProvider]` references (spec.md §4.4.5).
    fn resolve_method(&self, type_fqn: &str, method_name: &str) -> Option<MethodSymbol>;
}
