// decl_spans - tree-sitter declaration and comment span extraction
//
// Parses source files with tree-sitter and reports the spans of class, function,
// property, field and namespace declarations plus comments, filtered by a
// caller-supplied list of category names.

pub mod driver;
pub mod error;
pub mod extractors;
pub mod language;
pub mod logging;
pub mod options;
pub mod selection;

// PyO3 bindings layer
#[cfg(feature = "python")]
pub mod bindings;

pub use driver::{Driver, FileFailure, RunSummary};
pub use error::{Result, SpanError};
pub use extractors::{
    DeclarationCategory, ExtractorManager, FileUnit, SpanExtractor, SpanRecord, SpanUnit,
};
pub use language::Language;
pub use logging::init_logging;
pub use options::{ExtractOptions, FailurePolicy};
pub use selection::SelectionSet;

/// decl_spans Python module
#[cfg(feature = "python")]
#[pyo3::pymodule]
fn decl_spans(m: &pyo3::Bound<'_, pyo3::types::PyModule>) -> pyo3::PyResult<()> {
    use pyo3::prelude::*;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    m.add_function(wrap_pyfunction!(bindings::extract_spans, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_files, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::supported_languages, m)?)?;

    Ok(())
}
