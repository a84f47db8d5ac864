// Base extraction types and machinery
//
// - types.rs: categories, spans, records and units
// - registry.rs: per-language category <-> kind lookup
// - tree_methods.rs: the two pre-order passes over a tree
// - extractor.rs: span reporting (lookup, selection filter, unit conversion)

pub mod extractor;
pub mod registry;
pub mod tree_methods;
pub mod types;

// Re-export key types for external use
pub use extractor::{OffsetIndex, SpanExtractor};
pub use registry::{KindRegistry, KindTable, Refine};
pub use tree_methods::{Element, Pass, PreOrder, SyntaxElement};
pub use types::{ByteSpan, DeclarationCategory, KindId, SpanRecord, SpanUnit};
