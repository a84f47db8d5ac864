//! Selector configuration: which categories the caller wants reported
//!
//! Loaded once per run from a JSON array of names. Names are kept verbatim, so
//! an unknown name is accepted and simply never matches.

use crate::error::{Result, SpanError};
use crate::extractors::base::DeclarationCategory;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    names: BTreeSet<String>,
}

impl SelectionSet {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selection = Self {
            names: names.into_iter().map(Into::into).collect(),
        };
        let unknown = selection.unknown_names();
        if !unknown.is_empty() {
            debug!("Selection contains unknown categories: {:?}", unknown);
        }
        selection
    }

    /// Parse a JSON array of strings; `source_name` only labels errors
    pub fn from_json_str(json: &str, source_name: &str) -> Result<Self> {
        let names: Vec<String> =
            serde_json::from_str(json).map_err(|e| SpanError::Configuration {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_names(names))
    }

    /// Read and parse a declarations file
    pub fn load(path: &Path) -> Result<Self> {
        let source_name = path.display().to_string();
        let json = fs::read_to_string(path).map_err(|e| SpanError::Configuration {
            source_name: source_name.clone(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&json, &source_name)
    }

    pub fn contains(&self, category: DeclarationCategory) -> bool {
        self.names.contains(category.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Names that do not denote any category
    pub fn unknown_names(&self) -> Vec<&str> {
        self.names()
            .filter(|name| DeclarationCategory::from_name(name).is_none())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
