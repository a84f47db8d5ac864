// Kind Registry - fixed mapping between categories and grammar symbol ids
//
// Each language module owns a `KindTable` literal; the registry resolves the kind
// names in it to every symbol id the grammar uses for them. Registries are built
// once behind a `Lazy` and never mutated afterwards.

use super::types::{DeclarationCategory, KindId};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, warn};
use tree_sitter::Node;

/// Context rule for one non-trivia match: the node, the source text and the
/// category its kind maps to. Returns the category to report, or `None` to drop
/// the match.
pub type Refine = fn(Node<'_>, &str, DeclarationCategory) -> Option<DeclarationCategory>;

/// Literal kind table for one language
///
/// `declarations` may list a category more than once (Java maps both methods and
/// constructors to `function`). `Comment` must not appear there; trivia comment
/// kinds go in `comments`, and structural nodes that can act as comments (Python
/// docstrings) go in `statement_comments`.
pub struct KindTable {
    pub language: &'static str,
    pub declarations: &'static [(DeclarationCategory, &'static str)],
    pub comments: &'static [&'static str],
    pub statement_comments: &'static [&'static str],
    /// Categories that only `refine` produces
    pub refined: &'static [DeclarationCategory],
    pub refine: Option<Refine>,
}

impl fmt::Debug for KindTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindTable")
            .field("language", &self.language)
            .field("declarations", &self.declarations)
            .field("comments", &self.comments)
            .field("statement_comments", &self.statement_comments)
            .field("refined", &self.refined)
            .field("refine", &self.refine.is_some())
            .finish()
    }
}

/// Immutable, bidirectional category <-> kind lookup for one grammar
#[derive(Debug)]
pub struct KindRegistry {
    language: &'static str,
    table: &'static KindTable,
    by_kind: HashMap<KindId, DeclarationCategory>,
    kinds_by_category: HashMap<DeclarationCategory, Vec<KindId>>,
    comment_kinds: HashSet<KindId>,
    statement_comment_kinds: HashSet<KindId>,
}

impl KindRegistry {
    /// Resolve a kind table against a grammar
    ///
    /// A kind name can be carried by several symbol ids (aliases); all of them are
    /// registered. When two entries claim the same id, the first one wins in both
    /// directions.
    pub fn build(language: &tree_sitter::Language, table: &'static KindTable) -> Self {
        let mut ids_by_name: HashMap<&'static str, Vec<KindId>> = HashMap::new();
        for id in 0..language.node_kind_count() {
            let Ok(id) = KindId::try_from(id) else {
                break;
            };
            if !language.node_kind_is_named(id) {
                continue;
            }
            if let Some(name) = language.node_kind_for_id(id) {
                ids_by_name.entry(name).or_default().push(id);
            }
        }

        let mut by_kind = HashMap::new();
        let mut kinds_by_category: HashMap<DeclarationCategory, Vec<KindId>> = HashMap::new();
        let mut comment_kinds = HashSet::new();
        let mut statement_comment_kinds = HashSet::new();

        for &(category, name) in table.declarations {
            debug_assert!(category != DeclarationCategory::Comment);
            let ids = ids_by_name.get(name).map(Vec::as_slice).unwrap_or_default();
            if ids.is_empty() {
                warn!("{} grammar has no '{}' kind", table.language, name);
            }
            for &id in ids {
                match by_kind.entry(id) {
                    Entry::Vacant(slot) => {
                        slot.insert(category);
                        kinds_by_category.entry(category).or_default().push(id);
                    }
                    Entry::Occupied(slot) => debug!(
                        "{} kind '{}' already maps to {}, ignoring {}",
                        table.language,
                        name,
                        slot.get(),
                        category
                    ),
                }
            }
        }

        for &name in table.comments {
            let ids = ids_by_name.get(name).map(Vec::as_slice).unwrap_or_default();
            if ids.is_empty() {
                warn!("{} grammar has no '{}' comment kind", table.language, name);
            }
            for &id in ids {
                if by_kind.contains_key(&id) {
                    continue;
                }
                comment_kinds.insert(id);
                kinds_by_category
                    .entry(DeclarationCategory::Comment)
                    .or_default()
                    .push(id);
            }
        }

        for &name in table.statement_comments {
            let ids = ids_by_name.get(name).map(Vec::as_slice).unwrap_or_default();
            if ids.is_empty() {
                warn!("{} grammar has no '{}' kind", table.language, name);
            }
            for &id in ids {
                if by_kind.contains_key(&id) || comment_kinds.contains(&id) {
                    continue;
                }
                if statement_comment_kinds.insert(id) {
                    kinds_by_category
                        .entry(DeclarationCategory::Comment)
                        .or_default()
                        .push(id);
                }
            }
        }

        debug!(
            "Built {} kind registry: {} declaration kinds, {} comment kinds",
            table.language,
            by_kind.len(),
            comment_kinds.len()
        );

        Self {
            language: table.language,
            table,
            by_kind,
            kinds_by_category,
            comment_kinds,
            statement_comment_kinds,
        }
    }

    pub fn language(&self) -> &'static str {
        self.language
    }

    /// Category for a kind, `None` when the kind is not registered
    ///
    /// Every comment kind collapses to [`DeclarationCategory::Comment`].
    pub fn category_for(&self, kind: KindId) -> Option<DeclarationCategory> {
        if let Some(&category) = self.by_kind.get(&kind) {
            return Some(category);
        }
        (self.comment_kinds.contains(&kind) || self.statement_comment_kinds.contains(&kind))
            .then_some(DeclarationCategory::Comment)
    }

    /// Apply the language's context rule to a non-trivia match
    pub fn refine(
        &self,
        node: Node<'_>,
        source: &str,
        category: DeclarationCategory,
    ) -> Option<DeclarationCategory> {
        match self.table.refine {
            Some(refine) => refine(node, source, category),
            None => Some(category),
        }
    }

    /// Kind ids registered for a category (empty when the language lacks it)
    pub fn kinds_for(&self, category: DeclarationCategory) -> &[KindId] {
        self.kinds_by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Kind names registered for a category, in table order
    pub fn kind_names_for(&self, category: DeclarationCategory) -> Vec<&'static str> {
        if category == DeclarationCategory::Comment {
            return self
                .table
                .comments
                .iter()
                .chain(self.table.statement_comments)
                .copied()
                .collect();
        }
        self.table
            .declarations
            .iter()
            .filter(|(c, _)| *c == category)
            .map(|(_, name)| *name)
            .collect()
    }

    /// Categories this language can produce at all
    pub fn categories(&self) -> Vec<DeclarationCategory> {
        DeclarationCategory::ALL
            .into_iter()
            .filter(|c| !self.kinds_for(*c).is_empty() || self.table.refined.contains(c))
            .collect()
    }

    pub fn is_declaration_kind(&self, kind: KindId) -> bool {
        self.by_kind.contains_key(&kind)
    }

    /// Trivia comment kind
    pub fn is_comment_kind(&self, kind: KindId) -> bool {
        self.comment_kinds.contains(&kind)
    }

    /// Structural kind that may be reported as a comment
    pub fn is_statement_comment_kind(&self, kind: KindId) -> bool {
        self.statement_comment_kinds.contains(&kind)
    }

    pub fn has_statement_comments(&self) -> bool {
        !self.statement_comment_kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static OVERLAPPING: KindTable = KindTable {
        language: "csharp",
        declarations: &[
            (DeclarationCategory::Class, "class_declaration"),
            (DeclarationCategory::Function, "class_declaration"),
            (DeclarationCategory::Field, "field_declaration"),
        ],
        comments: &["comment"],
        statement_comments: &[],
        refined: &[],
        refine: None,
    };

    fn overlapping() -> KindRegistry {
        KindRegistry::build(&tree_sitter_c_sharp::LANGUAGE.into(), &OVERLAPPING)
    }

    #[test]
    fn test_first_claim_wins_in_both_directions() {
        let registry = overlapping();
        assert!(registry.kinds_for(DeclarationCategory::Function).is_empty());
        assert!(!registry.kinds_for(DeclarationCategory::Class).is_empty());
        assert!(!registry
            .categories()
            .contains(&DeclarationCategory::Function));

        for category in DeclarationCategory::ALL {
            for &kind in registry.kinds_for(category) {
                assert_eq!(registry.category_for(kind), Some(category));
            }
        }
    }

    #[test]
    fn test_refine_defaults_to_identity() {
        let registry = overlapping();
        let tree = crate::language::Language::CSharp.parse("class A {}").unwrap();
        let root = tree.root_node();
        assert_eq!(
            registry.refine(root, "class A {}", DeclarationCategory::Class),
            Some(DeclarationCategory::Class)
        );
    }
}
