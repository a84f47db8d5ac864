// Base types shared by the kind registries, the tree walker and the span reporter

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grammar symbol id, as handed out by tree-sitter
pub type KindId = u16;

/// Closed set of categories a caller can ask for
///
/// The lowercase names returned by [`DeclarationCategory::as_str`] are the only
/// names that can ever match; the selection file uses the same strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationCategory {
    Class,
    Function,
    Property,
    Field,
    Namespace,
    Comment,
}

impl DeclarationCategory {
    pub const ALL: [DeclarationCategory; 6] = [
        DeclarationCategory::Class,
        DeclarationCategory::Function,
        DeclarationCategory::Property,
        DeclarationCategory::Field,
        DeclarationCategory::Namespace,
        DeclarationCategory::Comment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationCategory::Class => "class",
            DeclarationCategory::Function => "function",
            DeclarationCategory::Property => "property",
            DeclarationCategory::Field => "field",
            DeclarationCategory::Namespace => "namespace",
            DeclarationCategory::Comment => "comment",
        }
    }

    /// Look up a category by its canonical name (exact, case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for DeclarationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open byte interval `[start, end)` of a syntax element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteSpan {
    pub start: usize,
    pub end: usize,
}

impl ByteSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Coordinate system used when a record is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanUnit {
    /// Half-open offsets counted in UTF-16 code units
    #[default]
    Chars,
    /// Half-open offsets counted in UTF-8 bytes
    Bytes,
    /// 1-based, inclusive start and end line numbers
    Lines,
}

impl SpanUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanUnit::Chars => "chars",
            SpanUnit::Bytes => "bytes",
            SpanUnit::Lines => "lines",
        }
    }
}

impl FromStr for SpanUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chars" | "characters" => Ok(SpanUnit::Chars),
            "bytes" => Ok(SpanUnit::Bytes),
            "lines" => Ok(SpanUnit::Lines),
            other => Err(format!(
                "unknown span unit '{}'; expected one of: chars, bytes, lines",
                other
            )),
        }
    }
}

impl fmt::Display for SpanUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output line: `<category> - [<start>-<end>]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanRecord {
    pub category: DeclarationCategory,
    pub start: usize,
    pub end: usize,
}

impl fmt::Display for SpanRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - [{}-{}]", self.category, self.start, self.end)
    }
}
