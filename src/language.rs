//! Language Support - tree-sitter grammar and kind registry per language
//!
//! Single source of truth for which languages the extractor understands, how a
//! file maps to one, and which grammar parses it.

use crate::error::{Result, SpanError};
use crate::extractors::base::KindRegistry;
use crate::extractors::{csharp, java, python};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tree_sitter::{Parser, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[serde(rename = "csharp")]
    CSharp,
    Java,
    Python,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::CSharp, Language::Java, Language::Python];

    pub fn name(&self) -> &'static str {
        match self {
            Language::CSharp => "csharp",
            Language::Java => "java",
            Language::Python => "python",
        }
    }

    /// Get the tree-sitter grammar for this language
    pub fn tree_sitter_language(&self) -> tree_sitter::Language {
        match self {
            Language::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
            Language::Java => tree_sitter_java::LANGUAGE.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
        }
    }

    /// Process-wide kind registry, built on first use
    pub fn registry(&self) -> &'static KindRegistry {
        match self {
            Language::CSharp => &csharp::REGISTRY,
            Language::Java => &java::REGISTRY,
            Language::Python => &python::REGISTRY,
        }
    }

    /// Detect language from file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "cs" => Some(Language::CSharp),
            "java" => Some(Language::Java),
            "py" | "pyi" => Some(Language::Python),
            _ => None,
        }
    }

    pub fn detect(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Parse text into a tree
    ///
    /// tree-sitter recovers from syntax errors, so this only fails when the
    /// grammar cannot be loaded or the parser gives up.
    pub fn parse(&self, content: &str) -> Result<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.tree_sitter_language())
            .map_err(|e| SpanError::Parse {
                path: String::new(),
                reason: format!("failed to load {} grammar: {}", self.name(), e),
            })?;

        parser.parse(content, None).ok_or_else(|| SpanError::Parse {
            path: String::new(),
            reason: format!("{} parser returned no tree", self.name()),
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csharp" | "c#" | "cs" => Ok(Language::CSharp),
            "java" => Ok(Language::Java),
            "python" | "py" => Ok(Language::Python),
            other => Err(format!(
                "unsupported language '{}'; expected one of: csharp, java, python",
                other
            )),
        }
    }
}
