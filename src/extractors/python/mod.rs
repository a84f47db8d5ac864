// Python kind table
//
// Python categories depend on context, not only on the node kind:
// - declarations are reported only at module level and in class bodies (a `def`
//   inside a function or an `if` block is not)
// - a function decorated with a bare `@property` is a `property`
// - `field` is the target of a plain `name = ...` / `obj.attr = ...` statement at
//   declaration level or directly in the body of `__init__`
// - a string-literal statement at declaration level (a docstring) is a `comment`,
//   reported in the comment pass together with `#` comments

use crate::extractors::base::{DeclarationCategory, KindRegistry, KindTable};
use once_cell::sync::Lazy;
use tree_sitter::Node;

pub static KIND_TABLE: KindTable = KindTable {
    language: "python",
    declarations: &[
        (DeclarationCategory::Class, "class_definition"),
        (DeclarationCategory::Function, "function_definition"),
        (DeclarationCategory::Field, "identifier"),
        (DeclarationCategory::Field, "attribute"),
    ],
    comments: &["comment"],
    statement_comments: &["expression_statement"],
    refined: &[DeclarationCategory::Property],
    refine: Some(refine),
};

pub static REGISTRY: Lazy<KindRegistry> =
    Lazy::new(|| KindRegistry::build(&tree_sitter_python::LANGUAGE.into(), &KIND_TABLE));

fn refine(
    node: Node<'_>,
    source: &str,
    category: DeclarationCategory,
) -> Option<DeclarationCategory> {
    match category {
        DeclarationCategory::Class => at_declaration_level(node).then_some(category),
        DeclarationCategory::Function if at_declaration_level(node) => {
            if is_property(node, source) {
                Some(DeclarationCategory::Property)
            } else {
                Some(category)
            }
        }
        DeclarationCategory::Function => None,
        DeclarationCategory::Field => is_field_target(node, source).then_some(category),
        DeclarationCategory::Comment => {
            (at_declaration_level(node) && is_string_statement(node, source)).then_some(category)
        }
        _ => Some(category),
    }
}

fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// Node whose body holds `statement`: the module, or the owner of the enclosing
/// block. Decorators are looked through.
fn body_owner<'tree>(statement: Node<'tree>) -> Option<Node<'tree>> {
    let mut parent = statement.parent()?;
    if parent.kind() == "decorated_definition" {
        parent = parent.parent()?;
    }
    match parent.kind() {
        "module" => Some(parent),
        "block" => parent.parent(),
        _ => None,
    }
}

/// Directly in the module body, or in the body of a class at declaration level
fn at_declaration_level(statement: Node<'_>) -> bool {
    match body_owner(statement) {
        Some(owner) if owner.kind() == "module" => true,
        Some(owner) if owner.kind() == "class_definition" => at_declaration_level(owner),
        _ => false,
    }
}

fn is_property(function: Node<'_>, source: &str) -> bool {
    let Some(decorated) = function.parent() else {
        return false;
    };
    if decorated.kind() != "decorated_definition" {
        return false;
    }
    let mut cursor = decorated.walk();
    let found = decorated
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "decorator")
        .any(|decorator| {
            decorator
                .named_child(0)
                .is_some_and(|e| e.kind() == "identifier" && text(e, source) == "property")
        });
    found
}

fn is_init(function: Node<'_>, source: &str) -> bool {
    function
        .child_by_field_name("name")
        .is_some_and(|name| text(name, source) == "__init__")
}

/// Left side of a plain (unannotated) assignment statement
fn is_field_target(target: Node<'_>, source: &str) -> bool {
    let Some(assignment) = target.parent() else {
        return false;
    };
    if assignment.kind() != "assignment"
        || assignment.child_by_field_name("left") != Some(target)
        || assignment.child_by_field_name("type").is_some()
    {
        return false;
    }
    let Some(statement) = assignment.parent() else {
        return false;
    };
    if statement.kind() != "expression_statement" {
        return false;
    }

    match body_owner(statement) {
        Some(owner) if owner.kind() == "function_definition" => {
            is_init(owner, source) && at_declaration_level(owner)
        }
        Some(_) => at_declaration_level(statement),
        None => false,
    }
}

/// Statement made of one string literal; f-strings and bytes do not count
fn is_string_statement(statement: Node<'_>, source: &str) -> bool {
    let mut cursor = statement.walk();
    let mut expressions = statement
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra());
    let (Some(expression), None) = (expressions.next(), expressions.next()) else {
        return false;
    };

    match expression.kind() {
        "string" => is_plain_string(expression, source),
        "concatenated_string" => {
            let mut cursor = expression.walk();
            let plain = expression
                .named_children(&mut cursor)
                .all(|part| part.kind() != "string" || is_plain_string(part, source));
            plain
        }
        _ => false,
    }
}

fn is_plain_string(string: Node<'_>, source: &str) -> bool {
    let literal = text(string, source);
    let prefix = literal
        .find(|c: char| c == '"' || c == '\'')
        .map_or(literal, |quote| &literal[..quote]);
    !prefix
        .chars()
        .any(|c| matches!(c, 'f' | 'F' | 'b' | 'B'))
}
