//! Run options shared by the CLI and the Python module

use crate::extractors::base::SpanUnit;
use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do when one input file cannot be read or parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the run at the first failing file
    #[default]
    Abort,
    /// Log the failure, emit nothing for that file and continue
    Skip,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(FailurePolicy::Abort),
            "skip" => Ok(FailurePolicy::Skip),
            other => Err(format!("unknown failure policy '{}'", other)),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Abort => f.write_str("abort"),
            FailurePolicy::Skip => f.write_str("skip"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    pub unit: SpanUnit,
    pub on_error: FailurePolicy,
    /// Parse files on the rayon pool; output order is unchanged
    pub parallel: bool,
    /// Treat trees containing ERROR or MISSING nodes as parse failures
    pub strict: bool,
    /// Force a language instead of detecting it from the extension
    pub language: Option<Language>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_behavior() {
        let options = ExtractOptions::default();
        assert_eq!(options.unit, SpanUnit::Chars);
        assert_eq!(options.on_error, FailurePolicy::Abort);
        assert!(!options.parallel);
        assert!(!options.strict);
        assert_eq!(options.language, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: ExtractOptions =
            serde_json::from_str(r#"{"unit": "lines", "on_error": "skip", "language": "java"}"#)
                .unwrap();
        assert_eq!(options.unit, SpanUnit::Lines);
        assert_eq!(options.on_error, FailurePolicy::Skip);
        assert_eq!(options.language, Some(Language::Java));
        assert!(!options.parallel);
    }
}
