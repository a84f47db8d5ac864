// C# kind table
//
// One grammar kind per declaration category. tree-sitter-c-sharp folds `//` and
// `/* */` comments into a single `comment` extra.

use crate::extractors::base::{DeclarationCategory, KindRegistry, KindTable};
use once_cell::sync::Lazy;

pub static KIND_TABLE: KindTable = KindTable {
    language: "csharp",
    declarations: &[
        (DeclarationCategory::Class, "class_declaration"),
        (DeclarationCategory::Function, "method_declaration"),
        (DeclarationCategory::Property, "property_declaration"),
        (DeclarationCategory::Field, "field_declaration"),
        (DeclarationCategory::Namespace, "namespace_declaration"),
    ],
    comments: &["comment"],
    statement_comments: &[],
    refined: &[],
    refine: None,
};

pub static REGISTRY: Lazy<KindRegistry> =
    Lazy::new(|| KindRegistry::build(&tree_sitter_c_sharp::LANGUAGE.into(), &KIND_TABLE));
