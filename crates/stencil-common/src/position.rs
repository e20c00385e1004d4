//! Source positions for template nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in the template source.
///
/// `line` and `column` are 1-based; `offset` is the 0-based byte offset.
/// Positions are plain values: nodes copy them, nothing ever mutates one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    #[serde(default)]
    pub offset: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, column: u32, offset: u32) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Position at `line:column` with an unknown byte offset.
    #[must_use]
    pub const fn at(line: u32, column: u32) -> Self {
        Self::new(line, column, 0)
    }

    /// Marker comment placed in generated code so runtime errors can be
    /// mapped back to the template: `/* line 3:5 */`.
    #[must_use]
    pub fn to_line_marker(&self) -> String {
        format!("/* line {self} */")
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
#[path = "../tests/position.rs"]
mod tests;
