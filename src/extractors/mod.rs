//! Language extractors
//!
//! - `base` - categories, kind registries, tree walking and span reporting
//! - `manager` - reading and parsing files into `FileUnit`s
//! - one module per language holding its kind table and registry

pub mod base;
pub mod manager;

pub mod csharp;
pub mod java;
pub mod python;

// Re-export the public API
pub use base::{
    ByteSpan, DeclarationCategory, Element, KindId, KindRegistry, KindTable, SpanExtractor,
    SpanRecord, SpanUnit, SyntaxElement,
};
pub use manager::{ExtractorManager, FileUnit};
