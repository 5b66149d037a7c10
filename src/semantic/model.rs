//! In-memory reference implementations of [`Compilation`] and
//! [`ProjectGraph`], used by this crate's own test suite and available to
//! any consumer that wants to build a compilation programmatically instead
//! of through a real compiler adapter.

use std::collections::HashMap;

use super::project_graph::{ProjectGraph, RawCallSite};
use super::symbol::{MethodSymbol, TypeSymbol};
use super::tree::{Compilation, SyntaxTree};

#[derive(Debug, Clone, Default)]
pub struct InMemoryCompilation {
    trees: Vec<SyntaxTree>,
    known_types: HashMap<String, TypeSymbol>,
    known_methods: HashMap<(String, String), MethodSymbol>,
}

impl InMemoryCompilation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tree(mut self, tree: SyntaxTree) -> Self {
        self.trees.push(tree);
        self
    }

    pub fn with_type(mut self, fqn: impl Into<String>, type_symbol: TypeSymbol) -> Self {
        self.known_types.insert(fqn.into(), type_symbol);
        self
    }

    /// Register a well-known type by name alone (no members) — enough for
    /// the [`crate::registry::LoggingTypes`] resolution check, which only
    /// cares whether the name is referenced.
    pub fn with_known_type_name(mut self, fqn: impl Into<String>) -> Self {
        let fqn = fqn.into();
        self.known_types
            .entry(fqn.clone())
            .or_insert_with(|| TypeSymbol::scalar(fqn));
        self
    }

    pub fn with_method(
        mut self,
        type_fqn: impl Into<String>,
        method: MethodSymbol,
    ) -> Self {
        self.known_methods
            .insert((type_fqn.into(), method.name.clone()), method);
        self
    }
}

impl Compilation for InMemoryCompilation {
    fn syntax_trees(&self) -> &[SyntaxTree] {
        &self.trees
    }

    fn resolve_type(&self, fqn: &str) -> Option<TypeSymbol> {
        self.known_types.get(fqn).cloned()
    }

    fn resolve_method(&self, type_fqn: &str, method_name: &str) -> Option<MethodSymbol> {
        self.known_methods
            .get(&(type_fqn.to_string(), method_name.to_string()))
            .cloned()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectGraph {
    /// Keyed by `(declaring_type_fqn, method_name)`.
    call_sites: HashMap<(String, String), Vec<RawCallSite>>,
    fail_lookup: bool,
}

impl InMemoryProjectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_call_site(
        mut self,
        declaring_type_fqn: impl Into<String>,
        method_name: impl Into<String>,
        site: RawCallSite,
    ) -> Self {
        self.call_sites
            .entry((declaring_type_fqn.into(), method_name.into()))
            .or_default()
            .push(site);
        self
    }

    /// Make every lookup fail, to exercise the "cross-project finder
    /// failure" path (spec.md §7 kind 5).
    pub fn failing() -> Self {
        Self {
            fail_lookup: true,
            ..Default::default()
        }
    }
}

impl ProjectGraph for InMemoryProjectGraph {
    fn find_invocations(
        &self,
        declaring_type_fqn: &str,
        method: &MethodSymbol,
    ) -> anyhow::Result<Vec<RawCallSite>> {
        if self.fail_lookup {
            anyhow::bail!("project graph lookup failed for {declaring_type_fqn}::{}", method.name);
        }
        Ok(self
            .call_sites
            .get(&(declaring_type_fqn.to_string(), method.name.clone()))
            .cloned()
            .unwrap_or_default())
    }
}
