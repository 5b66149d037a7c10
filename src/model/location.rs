use serde::{Deserialize, Serialize};

/// A 1-based, inclusive source span. Conversion to 0-based editor coordinates
/// is the boundary layer's responsibility, not this crate's.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub file_path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub start_column: u32,
    pub end_column: u32,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, start_line: u32, start_column: u32) -> Self {
        Self {
            file_path: file_path.into(),
            start_line,
            end_line: start_line,
            start_column,
            end_column: start_column,
        }
    }

    pub fn with_end(mut self, end_line: u32, end_column: u32) -> Self {
        self.end_line = end_line;
        self.end_column = end_column;
        self
    }
}
