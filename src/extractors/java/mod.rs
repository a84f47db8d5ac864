// Java kind table
//
// Methods and constructors both report as `function`; class fields and
// interface constants both report as `field`. Locals are
// `local_variable_declaration` in this grammar, so `field` only ever matches
// type members.

use crate::extractors::base::{DeclarationCategory, KindRegistry, KindTable};
use once_cell::sync::Lazy;

pub static KIND_TABLE: KindTable = KindTable {
    language: "java",
    declarations: &[
        (DeclarationCategory::Class, "class_declaration"),
        (DeclarationCategory::Function, "method_declaration"),
        (DeclarationCategory::Function, "constructor_declaration"),
        (DeclarationCategory::Field, "field_declaration"),
        (DeclarationCategory::Field, "constant_declaration"),
    ],
    comments: &["line_comment", "block_comment"],
    statement_comments: &[],
    refined: &[],
    refine: None,
};

pub static REGISTRY: Lazy<KindRegistry> =
    Lazy::new(|| KindRegistry::build(&tree_sitter_java::LANGUAGE.into(), &KIND_TABLE));
