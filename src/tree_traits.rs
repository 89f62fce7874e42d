/*
Rendering lives in a trait so the domain types stay free of display concerns:
the CLI pulls in `TreeNodeConvert` and prints the resulting `termtree::Tree`.
 */
use std::collections::HashMap;

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::domain::{NodeRef, RecordId, Tree};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> TermTree<String>;
}

/// Node id, followed by `[n]` when `n` records are attached to the node itself.
fn label(node: &NodeRef<'_>) -> String {
    match node.single_node_data().len() {
        0 => node.id().to_string(),
        n => format!("{} [{}]", node.id(), n),
    }
}

/// Drops a rendered tree level by level; nested `termtree::Tree` values
/// otherwise drop recursively.
pub fn release(tree: TermTree<String>) {
    let mut pending = vec![tree];
    while let Some(mut tree) = pending.pop() {
        pending.append(&mut tree.leaves);
    }
}

impl TreeNodeConvert for NodeRef<'_> {
    /// Built bottom-up: every child is finished before its parent is visited.
    fn to_tree_string(&self) -> TermTree<String> {
        let mut finished: HashMap<&RecordId, TermTree<String>> = HashMap::new();
        for node in self.subtree_postorder() {
            let leaves: Vec<_> = node
                .children()
                .filter_map(|child| finished.remove(child.id()))
                .collect();
            finished.insert(node.id(), TermTree::new(label(&node)).with_leaves(leaves));
        }
        finished
            .remove(self.id())
            .unwrap_or_else(|| TermTree::new(label(self)))
    }
}

impl TreeNodeConvert for Tree {
    #[instrument(level = "debug", skip(self), fields(root = %self.root().id()))]
    fn to_tree_string(&self) -> TermTree<String> {
        self.root().to_tree_string()
    }
}
