use crate::model::SourceLocation;

use super::symbol::{AttributeData, MethodSymbol};

/// One piece of a structured-interpolation expression (spec.md §4.3).
#[derive(Debug, Clone, PartialEq)]
pub enum InterpolationPart {
    Literal(String),
    Hole(Operation),
}

/// A semantic operation — the bound-tree node analyzers match against
/// (spec.md §4.2 "Operation Utilities"). This mirrors the slice of Roslyn's
/// `IOperation` hierarchy the extractor actually consumes; it is not a
/// general-purpose expression AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Literal(crate::model::ScalarValue),
    /// A direct enum member access, e.g. `LogLevel.Information`.
    EnumMember(String),
    NameOf(String),
    Local { name: String, type_display: String },
    Parameter { name: String, type_display: String },
    Field { name: String, type_display: String },
    Property { name: String, type_display: String },
    BinaryAdd(Box<Operation>, Box<Operation>),
    Interpolated(Vec<InterpolationPart>),
    /// `a?.b` — not further decomposed; spec.md §4.2 only asks for the
    /// expression text.
    ConditionalAccess(String),
    /// `expr ?? fallback` — not further decomposed.
    Coalesce(String),
    /// The `params object[] args` argument bound to a logger-extension call:
    /// the individual boxed values, in source order.
    ParamsArray(Vec<Operation>),
    ObjectCreation {
        type_display: String,
        arguments: Vec<Argument>,
    },
    Invocation(Box<InvocationOperation>),
    /// Anything else — an opaque expression the core cannot further reduce.
    Other(String),
}

/// One argument at a call site: its declared/resolved role name (from the
/// bound overload's parameter list) when supplied positionally, or its
/// explicit name when supplied by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Option<String>,
    pub value: Operation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvocationOperation {
    pub method: MethodSymbol,
    pub instance: Option<Operation>,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Argument>,
    pub location: SourceLocation,
}

/// A partial method declaration (the only kind of declaration the
/// compile-time-attribute analyzer matches — spec.md §4.4.2).
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDeclarationNode {
    pub method: MethodSymbol,
    pub is_partial: bool,
    pub attributes: Vec<AttributeData>,
    pub declaring_type_fqn: String,
    pub location: SourceLocation,
}

/// One dispatchable unit in a syntax tree: either an invocation analyzers
/// can claim (extension-method, delegate-factory, scope-begin families) or
/// a method declaration (the compile-time-attribute family).
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    Invocation(InvocationOperation),
    MethodDeclaration(MethodDeclarationNode),
}

impl SyntaxNode {
    pub fn location(&self) -> &SourceLocation {
        match self {
            SyntaxNode::Invocation(op) => &op.location,
            SyntaxNode::MethodDeclaration(m) => &m.location,
        }
    }
}
