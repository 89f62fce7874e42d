//! Forest builder: turns flat parent-linked records into trees.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, instrument, trace};

use crate::domain::arena::NodeData;
use crate::domain::config::{RawTreeConfig, TreeConfig};
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::record::{Record, RecordId};
use crate::domain::tree::Tree;

/// Collects the inputs of a build and checks them before any work is done.
///
/// ```
/// use serde_json::json;
/// use treekit::domain::{ForestBuilder, Record, TreeConfig};
///
/// let records: Vec<Record> =
///     serde_json::from_value(json!([{ "id": 1 }, { "id": 2, "parentid": 1 }])).unwrap();
/// let trees = ForestBuilder::new()
///     .records(records)
///     .config(TreeConfig::default())
///     .build()
///     .unwrap();
/// assert_eq!(trees.len(), 1);
/// assert_eq!(trees[0].root().child_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ForestBuilder {
    records: Option<Vec<Record>>,
    config: Option<RawTreeConfig>,
}

impl ForestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(mut self, records: impl IntoIterator<Item = Record>) -> Self {
        self.records = Some(records.into_iter().collect());
        self
    }

    pub fn config(mut self, config: impl Into<RawTreeConfig>) -> Self {
        self.config = Some(config.into());
        self
    }

    /// Build one tree per discovered root, roots in input order.
    pub fn build(self) -> TreeResult<Vec<Tree>> {
        let records = self.records.ok_or(TreeError::MissingArgument("records"))?;
        let config = self.config.ok_or(TreeError::MissingArgument("config"))?;
        let config = TreeConfig::try_from(config)?;
        build_trees(records, &config)
    }
}

/// Builds the forest for `records`.
///
/// Ids are resolved against one index shared by the whole input, so a record
/// may name a parent that appears later. Records whose parent id is missing
/// or unknown become roots.
#[instrument(level = "debug", skip_all, fields(records = records.len()))]
pub fn build_trees(records: Vec<Record>, config: &TreeConfig) -> TreeResult<Vec<Tree>> {
    let (ids, positions) = index_ids(&records, config)?;

    let mut parents: Vec<Option<usize>> = Vec::with_capacity(records.len());
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots = Vec::new();
    for (position, record) in records.iter().enumerate() {
        let parent = RecordId::of(record, &config.parent_id)
            .and_then(|parent_id| positions.get(&parent_id).copied());
        match parent {
            Some(parent) => children[parent].push(position),
            None => roots.push(position),
        }
        parents.push(parent);
    }

    let mut slots: Vec<Option<NodeData>> = ids
        .iter()
        .cloned()
        .zip(records)
        .map(|(id, record)| Some(NodeData::new(id, record)))
        .collect();

    let mut trees = Vec::with_capacity(roots.len());
    for root in roots {
        if let Some(tree) = assemble_tree(root, &children, &mut slots) {
            trace!(root = %tree.root().id(), nodes = tree.node_count(), "Assembled tree");
            trees.push(tree);
        }
    }

    // Anything left was never reached from a root
    if let Some(stranded) = slots.iter().position(Option::is_some) {
        let member = cycle_member(stranded, &parents);
        return Err(TreeError::CycleDetected(ids[member].clone()));
    }

    debug!(trees = trees.len(), "Built forest");
    Ok(trees)
}

/// First pass: one id per record, unique across the input, plus the lookup
/// index from id to input position.
fn index_ids(
    records: &[Record],
    config: &TreeConfig,
) -> TreeResult<(Vec<RecordId>, HashMap<RecordId, usize>)> {
    let mut ids = Vec::with_capacity(records.len());
    let mut positions = HashMap::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        let id = RecordId::of(record, &config.id).ok_or_else(|| TreeError::InvalidRecord {
            position,
            field: config.id.clone(),
        })?;
        if positions.insert(id.clone(), position).is_some() {
            return Err(TreeError::DuplicateId(id));
        }
        ids.push(id);
    }
    Ok((ids, positions))
}

/// Follows parent links from a stranded record until one repeats.
fn cycle_member(start: usize, parents: &[Option<usize>]) -> usize {
    let mut seen = HashSet::new();
    let mut current = start;
    while seen.insert(current) {
        match parents[current] {
            Some(parent) => current = parent,
            None => break,
        }
    }
    current
}

/// Moves the subtree below `root` out of `slots` into a new tree.
///
/// Breadth-first so each parent receives its children in input order.
fn assemble_tree(
    root: usize,
    children: &[Vec<usize>],
    slots: &mut [Option<NodeData>],
) -> Option<Tree> {
    let mut tree = Tree::with_root(slots[root].take()?, children[root].len() + 1);
    let mut queue: VecDeque<(usize, _)> = children[root]
        .iter()
        .map(|&child| (child, tree.root_index()))
        .collect();

    while let Some((position, parent_idx)) = queue.pop_front() {
        let Some(data) = slots[position].take() else {
            continue;
        };
        let idx = tree.insert_child(parent_idx, data);
        queue.extend(children[position].iter().map(|&child| (child, idx)));
    }

    tree.reindex();
    Some(tree)
}
