use serde::{Deserialize, Serialize};

/// A scalar compile-time constant. Untagged so it serialises as a bare
/// JSON scalar (`1`, `"x"`, `true`, `null`) rather than a wrapped object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Int(i64),
    Str(String),
    Bool(bool),
    Null,
}

impl ScalarValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ScalarValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// `display(parse(display(v))) == display(v)` round-trip form used in the
    /// constant-folding properties (§8 round-trip laws).
    pub fn display(&self) -> String {
        match self {
            ScalarValue::Int(n) => n.to_string(),
            ScalarValue::Str(s) => s.clone(),
            ScalarValue::Bool(b) => b.to_string(),
            ScalarValue::Null => "null".to_string(),
        }
    }

    /// Recovers the most specific scalar a display string could represent.
    /// Not a strict inverse of `display` (e.g. the string `"5"` parses back
    /// to `Int(5)`, not `Str("5")`) — only the round-trip law
    /// `display(parse(display(v))) == display(v)` is guaranteed, not variant
    /// identity.
    pub fn parse(s: &str) -> ScalarValue {
        if let Ok(n) = s.parse::<i64>() {
            ScalarValue::Int(n)
        } else if s == "true" {
            ScalarValue::Bool(true)
        } else if s == "false" {
            ScalarValue::Bool(false)
        } else if s == "null" {
            ScalarValue::Null
        } else {
            ScalarValue::Str(s.to_string())
        }
    }
}

/// A value that is either a compile-time constant or a named symbolic
/// reference — never both, never neither. `Missing` is the distinguished
/// sentinel for "not supplied" (spec.md §3).
///
/// Adjacently tagged (`kind` + `value`) so the wire form matches spec.md §3's
/// `{ kind, value }` shape exactly, with `value` omitted-as-null for `Missing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum ConstantOrReference {
    Constant(ScalarValue),
    Local(String),
    Parameter(String),
    Field(String),
    Property(String),
    Missing(Option<()>),
}

impl ConstantOrReference {
    pub fn missing() -> Self {
        ConstantOrReference::Missing(None)
    }

    pub fn constant(value: ScalarValue) -> Self {
        ConstantOrReference::Constant(value)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ConstantOrReference::Missing(_))
    }
}
