//! The compiled-source object model the extractor consumes. This crate does
//! not parse or compile source itself (spec.md §1 places workspace/solution
//! discovery out of scope) — these traits are the seam a real compiler
//! adapter (e.g. a Roslyn bridge) would implement against.

pub mod model;
mod operation;
mod project_graph;
mod symbol;
mod tree;

pub use operation::{Argument, InterpolationPart, InvocationOperation, MethodDeclarationNode, Operation, SyntaxNode};
pub use project_graph::{ProjectGraph, RawCallSite};
pub use symbol::{AttributeArg, AttributeData, MethodSymbol, ParameterSymbol, PropertySymbol, TypeSymbol, Visibility};
pub use tree::{Compilation, SyntaxTree};
