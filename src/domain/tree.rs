//! One materialized tree: node storage, id index, data attachment and reads.

use std::collections::HashMap;
use std::fmt;

use generational_arena::Index;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::arena::{NodeData, TreeArena, TreeNode};
use crate::domain::config::{DataConfig, RawDataConfig};
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::record::{Record, RecordId};

/// A tree discovered by the forest builder.
///
/// Structure is fixed after construction; only the data collections attached
/// to nodes grow, through [`Tree::add_data`].
#[derive(Debug)]
pub struct Tree {
    nodes: TreeArena,
    root: Index,
    index: HashMap<RecordId, Index>,
}

impl Tree {
    pub(crate) fn with_root(data: NodeData, capacity: usize) -> Self {
        let mut nodes = TreeArena::with_capacity(capacity);
        let root = nodes.insert_node(data, None);
        Self {
            nodes,
            root,
            index: HashMap::new(),
        }
    }

    pub(crate) fn root_index(&self) -> Index {
        self.root
    }

    pub(crate) fn insert_child(&mut self, parent: Index, data: NodeData) -> Index {
        self.nodes.insert_node(data, Some(parent))
    }

    /// Rebuilds the id index from a walk of the tree.
    pub(crate) fn reindex(&mut self) {
        self.index = self
            .nodes
            .iter()
            .map(|(idx, node)| (node.data.id.clone(), idx))
            .collect();
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            idx: self.root,
            node: self.nodes.node(self.root),
        }
    }

    pub fn node_by_id(&self, id: impl Into<RecordId>) -> Option<NodeRef<'_>> {
        let idx = *self.index.get(&id.into())?;
        self.node_ref(idx)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of levels; a lone root has depth 1.
    pub fn depth(&self) -> usize {
        self.nodes.depth()
    }

    /// All nodes in pre-order, children left to right.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.nodes.iter().map(move |(idx, node)| NodeRef {
            tree: self,
            idx,
            node,
        })
    }

    pub fn iter_postorder(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.nodes.iter_postorder().map(move |(idx, node)| NodeRef {
            tree: self,
            idx,
            node,
        })
    }

    pub fn leaves(&self) -> Vec<NodeRef<'_>> {
        self.nodes
            .leaf_nodes()
            .into_iter()
            .filter_map(|idx| self.node_ref(idx))
            .collect()
    }

    /// Attaches every record whose `reference_id` names a node of this tree
    /// to that node's `collection_name` collection.
    ///
    /// Records referencing nodes outside this tree are skipped. Returns the
    /// number of records attached.
    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn add_data(&mut self, records: &[Record], config: &DataConfig) -> usize {
        let mut attached = 0;
        for record in records {
            let Some(id) = RecordId::of(record, &config.reference_id) else {
                continue;
            };
            let Some(&idx) = self.index.get(&id) else {
                continue;
            };
            if let Some(node) = self.nodes.get_node_mut(idx) {
                node.data.push_data(&config.collection_name, record.clone());
                attached += 1;
            }
        }
        debug!(
            attached,
            skipped = records.len() - attached,
            collection = %config.collection_name,
            "Attached data"
        );
        attached
    }

    /// Starts an argument-checked [`Tree::add_data`] call.
    pub fn attach<'r>(&mut self) -> Attach<'_, 'r> {
        Attach {
            tree: self,
            records: None,
            config: None,
        }
    }

    fn node_ref(&self, idx: Index) -> Option<NodeRef<'_>> {
        self.nodes.get_node(idx).map(|node| NodeRef {
            tree: self,
            idx,
            node,
        })
    }
}

/// Pending data attachment whose arguments are checked before anything is
/// written.
#[must_use = "nothing is attached until `apply` is called"]
pub struct Attach<'t, 'r> {
    tree: &'t mut Tree,
    records: Option<&'r [Record]>,
    config: Option<RawDataConfig>,
}

impl<'t, 'r> Attach<'t, 'r> {
    pub fn records(mut self, records: &'r [Record]) -> Self {
        self.records = Some(records);
        self
    }

    pub fn config(mut self, config: impl Into<RawDataConfig>) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn apply(self) -> TreeResult<usize> {
        let records = self.records.ok_or(TreeError::MissingArgument("records"))?;
        let config = self.config.ok_or(TreeError::MissingArgument("config"))?;
        let config = DataConfig::try_from(config)?;
        Ok(self.tree.add_data(records, &config))
    }
}

/// Borrowed view of one node inside its tree.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    idx: Index,
    node: &'a TreeNode,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> &'a RecordId {
        &self.node.data.id
    }

    /// The wrapped input record.
    pub fn record(&self) -> &'a Record {
        &self.node.data.record
    }

    /// Field of the wrapped record.
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.node.data.record.get(field)
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node.parent.and_then(|idx| self.tree.node_ref(idx))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let (tree, node) = (self.tree, self.node);
        node.children
            .iter()
            .filter_map(move |&idx| tree.node_ref(idx))
    }

    pub fn child_count(&self) -> usize {
        self.node.children.len()
    }

    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.node.children.is_empty()
    }

    pub fn collection(&self, name: &str) -> Option<&'a [Record]> {
        self.node.data.collection(name)
    }

    pub fn collection_names(&self) -> impl Iterator<Item = &'a str> + 'a {
        let node = self.node;
        node.data.collections.iter().map(|c| c.name.as_str())
    }

    /// This node and its subtree, children before their parent.
    pub fn subtree_postorder(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        tree.nodes
            .iter_postorder_from(self.idx)
            .map(move |(idx, node)| NodeRef { tree, idx, node })
    }

    /// Records attached directly to this node, collection by collection in
    /// order of first attachment.
    pub fn single_node_data(&self) -> Vec<&'a Record> {
        self.node.data.attached().collect()
    }

    /// Records attached to this node and its whole subtree, pre-order.
    pub fn recursive_node_data(&self) -> Vec<&'a Record> {
        self.tree
            .nodes
            .iter_from(self.idx)
            .flat_map(|(_, node)| node.data.attached())
            .collect()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.idx == other.idx
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", self.id())
            .field("parent", &self.parent().map(|p| p.id().clone()))
            .field("children", &self.child_count())
            .finish()
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node.data)
    }
}
