//! ExtractorManager - turns input files into parsed [`FileUnit`]s and span records
//!
//! Handles reading, language detection and parsing. Stateless apart from the
//! options; one manager can be shared across rayon workers.

use crate::error::{Result, SpanError};
use crate::extractors::base::{SpanExtractor, SpanRecord};
use crate::language::Language;
use crate::options::ExtractOptions;
use crate::selection::SelectionSet;
use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::Tree;

const BOM: char = '\u{feff}';

/// Read a source file; invalid UTF-8 sequences become U+FFFD
fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| SpanError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(String::from_utf8(bytes).unwrap_or_else(|e| {
        tracing::warn!("{} is not valid UTF-8; decoding lossily", path.display());
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    }))
}

/// One parsed input file
pub struct FileUnit {
    pub path: PathBuf,
    pub language: Language,
    pub content: String,
    pub tree: Tree,
}

impl FileUnit {
    /// Span records of this file, declarations first, then comments
    pub fn records<'a>(
        &'a self,
        extractor: &'a SpanExtractor<'a>,
    ) -> impl Iterator<Item = SpanRecord> + 'a {
        extractor.extract(&self.tree)
    }

    pub fn has_syntax_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

#[derive(Debug, Default, Clone)]
pub struct ExtractorManager {
    options: ExtractOptions,
}

impl ExtractorManager {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Languages the manager can parse
    pub fn supported_languages(&self) -> Vec<&'static str> {
        Language::ALL.iter().map(Language::name).collect()
    }

    /// Language for a path: the configured override, else the file extension
    pub fn language_for(&self, path: &Path) -> Result<Language> {
        self.options
            .language
            .or_else(|| Language::detect(path))
            .ok_or_else(|| SpanError::UnsupportedLanguage {
                path: path.display().to_string(),
            })
    }

    /// Read and parse one file
    pub fn load(&self, path: &Path) -> Result<FileUnit> {
        let language = self.language_for(path)?;
        let content = read_source(path)?;
        self.parse(path, language, content)
    }

    /// Parse already-loaded text
    pub fn parse(
        &self,
        path: &Path,
        language: Language,
        mut content: String,
    ) -> Result<FileUnit> {
        if content.starts_with(BOM) {
            content.drain(..BOM.len_utf8());
        }

        let tree = language.parse(&content).map_err(|e| e.with_path(path))?;
        let unit = FileUnit {
            path: path.to_path_buf(),
            language,
            content,
            tree,
        };

        if self.options.strict && unit.has_syntax_errors() {
            return Err(SpanError::Parse {
                path: path.display().to_string(),
                reason: "source contains syntax errors".to_string(),
            });
        }

        tracing::debug!(
            "Parsed {} file: {} ({} bytes)",
            language,
            path.display(),
            unit.content.len()
        );
        Ok(unit)
    }

    /// Read, parse and collect the records of one file
    pub fn extract_file(&self, path: &Path, selection: &SelectionSet) -> Result<Vec<SpanRecord>> {
        let language = self.language_for(path)?;
        let content = read_source(path)?;
        self.extract_spans(path, language, content, selection)
    }

    /// Parse text and collect its records in one go
    pub fn extract_spans(
        &self,
        path: &Path,
        language: Language,
        content: String,
        selection: &SelectionSet,
    ) -> Result<Vec<SpanRecord>> {
        let unit = self.parse(path, language, content)?;
        let extractor = SpanExtractor::new(
            language.registry(),
            selection,
            &unit.content,
            self.options.unit,
        );
        let records: Vec<SpanRecord> = unit.records(&extractor).collect();
        Ok(records)
    }
}
