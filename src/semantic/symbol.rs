//! The slice of a Roslyn-like symbol table the core needs. Real compiler
//! integration is out of scope (spec.md §1) — an adapter crate would build
//! these from an actual semantic model. [`crate::semantic::model`] ships an
//! in-memory implementation for tests and for consumers assembling fixtures
//! by hand.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Internal,
    Protected,
    Private,
}

/// One attribute instance attached to a parameter, property, or method.
///
/// `base_types` is the attribute *type's* own inheritance chain (e.g.
/// `["SensitiveDataAttribute", "DataClassificationAttribute", "Attribute"]`),
/// used by the data-classification walk in spec.md §4.4.5/§9. It is the
/// adapter's job to resolve this chain; the core only walks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeData {
    pub name: String,
    pub base_types: Vec<String>,
    pub positional_args: Vec<AttributeArg>,
    pub named_args: Vec<(String, AttributeArg)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeArg {
    Int(i64),
    Str(String),
    Bool(bool),
    /// An argument whose value is itself a symbolic reference (e.g. a
    /// `nameof(...)` result already folded, or an enum member access such
    /// as `LogLevel.Information`).
    EnumMember(String),
}

impl AttributeArg {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeArg::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeArg::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl AttributeData {
    pub fn find_arg(&self, name: &str) -> Option<&AttributeArg> {
        self.named_args
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Resolve an argument that may be supplied positionally or by name,
    /// with the named form winning on conflict (spec.md §4.4.2).
    pub fn resolve_arg<'a>(&'a self, name: &str, position: usize) -> Option<&'a AttributeArg> {
        self.find_arg(name).or_else(|| self.positional_args.get(position))
    }
}

/// A resolved type, exposing exactly the facts the core's mining rules need:
/// its public instance properties (already filtered to exclude indexers and
/// write-only members, per spec.md §4.4.5 — that filtering is the adapter's
/// contract), its collection shape, and its inheritance chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    pub fqn: String,
    pub properties: Vec<PropertySymbol>,
    pub is_nullable: bool,
    pub is_collection: bool,
    pub element_type: Option<Box<TypeSymbol>>,
    pub base_types: Vec<String>,
}

impl TypeSymbol {
    pub fn scalar(fqn: impl Into<String>) -> Self {
        Self {
            fqn: fqn.into(),
            properties: Vec::new(),
            is_nullable: false,
            is_collection: false,
            element_type: None,
            base_types: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySymbol {
    pub name: String,
    pub type_display: String,
    pub type_symbol: Option<TypeSymbol>,
    pub attributes: Vec<AttributeData>,
    pub is_nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSymbol {
    pub name: String,
    pub type_display: String,
    pub type_symbol: Option<TypeSymbol>,
    pub attributes: Vec<AttributeData>,
    pub is_nullable: bool,
}

/// A resolved method. For a logger-extension invocation this is the bound
/// overload (its `parameters` give the role — `eventId` / `exception` /
/// `message` / `args` — of each supplied argument); for a compile-time
/// attribute analyzer match it is the partial method declaration itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSymbol {
    pub name: String,
    pub containing_type_fqn: String,
    pub is_static: bool,
    pub is_extension: bool,
    pub visibility: Visibility,
    /// `None` means the method returns `void`/unit.
    pub return_type_display: Option<String>,
    pub parameters: Vec<ParameterSymbol>,
}

impl MethodSymbol {
    pub fn returns_unit(&self) -> bool {
        self.return_type_display.is_none()
    }

    pub fn is_visible_internally(&self) -> bool {
        matches!(self.visibility, Visibility::Public | Visibility::Internal)
    }
}
