// API Functions - PyO3-exposed functions for Python

use crate::extractors::base::{SpanRecord, SpanUnit};
use crate::extractors::manager::ExtractorManager;
use crate::language::Language;
use crate::options::ExtractOptions;
use crate::selection::SelectionSet;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::path::Path;

/// `(category, start, end)` as seen from Python
type PySpan = (String, usize, usize);

fn to_py_spans(records: Vec<SpanRecord>) -> Vec<PySpan> {
    records
        .into_iter()
        .map(|r| (r.category.as_str().to_string(), r.start, r.end))
        .collect()
}

fn manager_for(unit: &str, language: Option<Language>) -> PyResult<ExtractorManager> {
    let unit: SpanUnit = unit.parse().map_err(PyValueError::new_err)?;
    Ok(ExtractorManager::new(ExtractOptions {
        unit,
        language,
        ..Default::default()
    }))
}

/// Extract declaration and comment spans from source text
///
/// Args:
///     content (str): Source code
///     language (str): "csharp", "java" or "python"
///     declarations (list[str]): Category names to report
///     unit (str): "chars" (default), "bytes" or "lines"
///
/// Returns:
///     list[tuple[str, int, int]]: Declarations first, then comments
#[pyfunction]
#[pyo3(signature = (content, language, declarations, unit = "chars"))]
pub fn extract_spans(
    content: String,
    language: &str,
    declarations: Vec<String>,
    unit: &str,
) -> PyResult<Vec<PySpan>> {
    let language: Language = language.parse().map_err(PyValueError::new_err)?;
    let manager = manager_for(unit, Some(language))?;
    let selection = SelectionSet::from_names(declarations);

    let records = manager
        .extract_spans(Path::new("<string>"), language, content, &selection)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(to_py_spans(records))
}

/// Extract spans from several files in parallel
///
/// Releases the GIL while parsing. Results keep the input order; the first
/// failing file (in input order) raises ValueError.
///
/// Args:
///     paths (list[str]): Source files; language is detected from the extension
///     declarations (list[str]): Category names to report
///     unit (str): "chars" (default), "bytes" or "lines"
///
/// Returns:
///     list[tuple[str, list[tuple[str, int, int]]]]: (path, spans) per file
#[pyfunction]
#[pyo3(signature = (paths, declarations, unit = "chars"))]
pub fn extract_files(
    py: Python<'_>,
    paths: Vec<String>,
    declarations: Vec<String>,
    unit: &str,
) -> PyResult<Vec<(String, Vec<PySpan>)>> {
    use rayon::prelude::*;

    let manager = manager_for(unit, None)?;
    let selection = SelectionSet::from_names(declarations);

    let results: Vec<_> = py.detach(|| {
        paths
            .par_iter()
            .map(|path| {
                manager
                    .extract_file(Path::new(path), &selection)
                    .map(|records| (path.clone(), to_py_spans(records)))
            })
            .collect()
    });

    results
        .into_iter()
        .map(|result| result.map_err(|e| PyValueError::new_err(e.to_string())))
        .collect()
}

/// Get list of supported languages
#[pyfunction]
pub fn supported_languages() -> Vec<&'static str> {
    ExtractorManager::default().supported_languages()
}
