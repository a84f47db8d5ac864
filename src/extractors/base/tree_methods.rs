// Tree walking for span extraction
//
// Two independent pre-order passes over one tree:
// - the structure pass yields nodes and tokens (self included), skipping trivia
// - the trivia pass yields only trivia (tree-sitter "extra" nodes: comments)
// Trivia subtrees are never descended into by either pass. Languages whose
// comments can also be structural (Python docstrings) walk the comment pass
// over both streams so that it stays in document order.

use super::registry::KindRegistry;
use super::types::{ByteSpan, KindId};
use tree_sitter::{Node, TreeCursor};

/// Uniform view over nodes, tokens and trivia
pub trait SyntaxElement {
    fn kind(&self) -> KindId;
    fn span(&self) -> ByteSpan;
}

/// A syntax element borrowed from a parsed tree
#[derive(Debug, Clone, Copy)]
pub enum Element<'tree> {
    /// Structural construct with children
    Node(Node<'tree>),
    /// Leaf of the structure pass
    Token(Node<'tree>),
    /// Comment (or other extra) attached by the grammar
    Trivia(Node<'tree>),
}

impl<'tree> Element<'tree> {
    fn classify(node: Node<'tree>) -> Self {
        if node.is_extra() {
            Element::Trivia(node)
        } else if node.child_count() == 0 {
            Element::Token(node)
        } else {
            Element::Node(node)
        }
    }

    pub fn node(&self) -> Node<'tree> {
        match *self {
            Element::Node(node) | Element::Token(node) | Element::Trivia(node) => node,
        }
    }

    pub fn is_trivia(&self) -> bool {
        matches!(self, Element::Trivia(_))
    }
}

impl SyntaxElement for Element<'_> {
    fn kind(&self) -> KindId {
        self.node().kind_id()
    }

    fn span(&self) -> ByteSpan {
        let node = self.node();
        ByteSpan::new(node.start_byte(), node.end_byte())
    }
}

/// Which elements a [`PreOrder`] walk yields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Structure,
    Trivia,
    /// Nodes, tokens and trivia
    All,
}

/// Lazy depth-first pre-order walk driven by a `TreeCursor`
pub struct PreOrder<'tree> {
    cursor: TreeCursor<'tree>,
    pass: Pass,
    done: bool,
}

impl<'tree> PreOrder<'tree> {
    pub fn new(root: Node<'tree>, pass: Pass) -> Self {
        Self {
            cursor: root.walk(),
            pass,
            done: false,
        }
    }

    /// Move to the next node in pre-order; marks the walk done at the end
    fn advance(&mut self, descend: bool) {
        if descend && self.cursor.goto_first_child() {
            return;
        }
        loop {
            if self.cursor.goto_next_sibling() {
                return;
            }
            if !self.cursor.goto_parent() {
                self.done = true;
                return;
            }
        }
    }
}

impl<'tree> Iterator for PreOrder<'tree> {
    type Item = Element<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let node = self.cursor.node();
            let element = Element::classify(node);
            self.advance(!element.is_trivia());

            let wanted = match self.pass {
                Pass::Structure => !element.is_trivia(),
                Pass::Trivia => element.is_trivia(),
                Pass::All => true,
            };
            if wanted {
                return Some(element);
            }
        }
        None
    }
}

/// Structure-pass elements whose kind is a registered declaration kind
pub fn declaration_elements<'tree, 'r>(
    root: Node<'tree>,
    registry: &'r KindRegistry,
) -> impl Iterator<Item = Element<'tree>> + 'r
where
    'tree: 'r,
{
    PreOrder::new(root, Pass::Structure).filter(move |e| registry.is_declaration_kind(e.kind()))
}

/// Comment-pass elements: trivia of a comment kind, plus structural comment
/// candidates for languages that have them
pub fn comment_elements<'tree, 'r>(
    root: Node<'tree>,
    registry: &'r KindRegistry,
) -> impl Iterator<Item = Element<'tree>> + 'r
where
    'tree: 'r,
{
    let pass = if registry.has_statement_comments() {
        Pass::All
    } else {
        Pass::Trivia
    };
    PreOrder::new(root, pass).filter(move |e| {
        if e.is_trivia() {
            registry.is_comment_kind(e.kind())
        } else {
            registry.is_statement_comment_kind(e.kind())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn parse_csharp(code: &str) -> tree_sitter::Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
            .unwrap();
        parser.parse(code, None).unwrap()
    }

    #[test]
    fn test_structure_pass_starts_with_root() {
        let tree = parse_csharp("class A {}");
        let first = PreOrder::new(tree.root_node(), Pass::Structure)
            .next()
            .unwrap();
        assert_eq!(first.node().kind(), "compilation_unit");
        assert_eq!(first.span(), ByteSpan::new(0, 10));
    }

    #[test]
    fn test_structure_pass_visits_every_non_extra_node_once() {
        let code = "namespace N { class A { int x; void M() { } } }";
        let tree = parse_csharp(code);

        let mut expected = 0;
        let mut stack = vec![tree.root_node()];
        while let Some(node) = stack.pop() {
            if node.is_extra() {
                continue;
            }
            expected += 1;
            let mut cursor = node.walk();
            stack.extend(node.children(&mut cursor));
        }

        let visited = PreOrder::new(tree.root_node(), Pass::Structure).count();
        assert_eq!(visited, expected);
    }

    #[test]
    fn test_structure_pass_is_pre_order() {
        let tree = parse_csharp("class A { int x; }\nclass B { }");
        let starts: Vec<usize> = PreOrder::new(tree.root_node(), Pass::Structure)
            .map(|e| e.span().start)
            .collect();
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_leaves_are_tokens() {
        let tree = parse_csharp("class A {}");
        let elements: Vec<Element> = PreOrder::new(tree.root_node(), Pass::Structure).collect();
        assert!(matches!(elements[0], Element::Node(_)));
        assert!(elements
            .iter()
            .filter(|e| matches!(e, Element::Token(_)))
            .all(|e| e.node().child_count() == 0));
    }

    #[test]
    fn test_trivia_pass_only_yields_comments() {
        let code = "// one\nclass A {\n  /* two */\n  int x; // three\n}\n";
        let tree = parse_csharp(code);

        let trivia: Vec<Element> = PreOrder::new(tree.root_node(), Pass::Trivia).collect();
        assert_eq!(trivia.len(), 3);
        assert!(trivia.iter().all(|e| e.is_trivia()));
        assert!(trivia.iter().all(|e| e.node().kind() == "comment"));

        let structure_has_comments = PreOrder::new(tree.root_node(), Pass::Structure)
            .any(|e| e.node().kind() == "comment");
        assert!(!structure_has_comments);
    }

    #[test]
    fn test_full_pass_merges_both_streams() {
        let code = "// one\nclass A { int x; /* two */ }\n";
        let tree = parse_csharp(code);

        let structure = PreOrder::new(tree.root_node(), Pass::Structure).count();
        let trivia = PreOrder::new(tree.root_node(), Pass::Trivia).count();
        let all: Vec<Element> = PreOrder::new(tree.root_node(), Pass::All).collect();
        assert_eq!(all.len(), structure + trivia);

        let comment_starts: Vec<usize> = all
            .iter()
            .filter(|e| e.is_trivia())
            .map(|e| e.span().start)
            .collect();
        assert_eq!(comment_starts, vec![0, 24]);
    }

    #[test]
    fn test_empty_source_yields_root_only() {
        let tree = parse_csharp("");
        assert_eq!(PreOrder::new(tree.root_node(), Pass::Structure).count(), 1);
        assert_eq!(PreOrder::new(tree.root_node(), Pass::Trivia).count(), 0);
    }
}
