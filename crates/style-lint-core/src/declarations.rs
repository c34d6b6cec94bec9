//! Lookup of member names by declaring type, shared across a lint run.

use crate::structure::StructuralNode;
use std::collections::BTreeMap;
use tracing::debug;

/// Member names of every type-like declaration, keyed by type name.
///
/// Built once per run from every parsed file before validation starts and
/// only read while rules run. Several declarations with the same name (a
/// type and its extensions) contribute to one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationIndex {
    members_by_type: BTreeMap<String, Vec<String>>,
}

impl DeclarationIndex {
    /// Creates an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            members_by_type: BTreeMap::new(),
        }
    }

    /// Builds an index from several declaration trees.
    #[must_use]
    pub fn from_structures<'a, I>(structures: I) -> Self
    where
        I: IntoIterator<Item = &'a StructuralNode>,
    {
        let mut index = Self::new();
        for root in structures {
            index.insert_structure(root);
        }
        debug!("Declaration index holds {} types", index.len());
        index
    }

    /// Records every type-like declaration found in `root`.
    pub fn insert_structure(&mut self, root: &StructuralNode) {
        for node in root.depth_first().filter(|n| n.kind.is_type_like()) {
            let Some(name) = node.name.as_deref() else {
                continue;
            };
            self.members_by_type
                .entry(name.to_string())
                .or_default()
                .extend(node.member_names().map(String::from));
        }
    }

    /// Member names declared by `type_name`, empty when unknown.
    #[must_use]
    pub fn members_of(&self, type_name: &str) -> &[String] {
        self.members_by_type
            .get(type_name)
            .map_or(&[], Vec::as_slice)
    }

    /// Flattened member names of every type `node` inherits from.
    ///
    /// Names that do not resolve contribute nothing.
    #[must_use]
    pub fn inherited_members(&self, node: &StructuralNode) -> Vec<&str> {
        node.inherited_types
            .iter()
            .flat_map(|name| self.members_of(name))
            .map(String::as_str)
            .collect()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.members_by_type.clear();
    }

    /// Number of indexed type names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members_by_type.len()
    }

    /// Returns true if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members_by_type.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::DeclarationKind;

    fn protocol_and_conformer() -> StructuralNode {
        StructuralNode::new(DeclarationKind::SourceFile, 0, 100)
            .with_child(
                StructuralNode::new(DeclarationKind::Protocol, 0, 40)
                    .with_name("A")
                    .with_child(StructuralNode::new(DeclarationKind::VarInstance, 10, 5).with_name("b")),
            )
            .with_child(
                StructuralNode::new(DeclarationKind::Struct, 50, 40)
                    .with_name("C")
                    .with_inherited_types(["A", "Unknown"])
                    .with_child(StructuralNode::new(DeclarationKind::VarInstance, 60, 5).with_name("b"))
                    .with_child(StructuralNode::new(DeclarationKind::VarInstance, 70, 5).with_name("d")),
            )
    }

    #[test]
    fn indexes_members_by_type() {
        let root = protocol_and_conformer();
        let index = DeclarationIndex::from_structures([&root]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.members_of("A"), ["b".to_string()]);
        assert_eq!(index.members_of("C"), ["b".to_string(), "d".to_string()]);
    }

    #[test]
    fn unknown_inherited_type_resolves_to_nothing() {
        let root = protocol_and_conformer();
        let index = DeclarationIndex::from_structures([&root]);
        let conformer = &root.children[1];
        assert_eq!(index.inherited_members(conformer), vec!["b"]);
        assert!(index.members_of("Unknown").is_empty());
    }

    #[test]
    fn extensions_merge_into_one_entry() {
        let root = StructuralNode::new(DeclarationKind::SourceFile, 0, 100)
            .with_child(
                StructuralNode::new(DeclarationKind::Struct, 0, 20)
                    .with_name("S")
                    .with_child(StructuralNode::new(DeclarationKind::VarInstance, 5, 5).with_name("x")),
            )
            .with_child(
                StructuralNode::new(DeclarationKind::Extension, 30, 20)
                    .with_name("S")
                    .with_child(
                        StructuralNode::new(DeclarationKind::FunctionMethodInstance, 35, 5)
                            .with_name("run()"),
                    ),
            );
        let mut index = DeclarationIndex::from_structures([&root]);
        assert_eq!(index.members_of("S"), ["x".to_string(), "run()".to_string()]);

        index.clear();
        assert!(index.is_empty());
    }
}
