// PyO3 Bindings Module
//
// Exposes span extraction to Python hosts that drive the analysis themselves.

mod api;

// Re-export for lib.rs
pub use api::{extract_files, extract_spans, supported_languages};
