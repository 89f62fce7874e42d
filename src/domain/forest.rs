//! Operations spanning every tree of a forest.

use tracing::{debug, instrument};

use crate::domain::config::DataConfig;
use crate::domain::record::{Record, RecordId};
use crate::domain::tree::{NodeRef, Tree};

/// Finds the node with `id` in whichever tree holds it.
pub fn find_node<'a>(trees: &'a [Tree], id: &RecordId) -> Option<NodeRef<'a>> {
    trees.iter().find_map(|tree| tree.node_by_id(id))
}

/// Attaches `records` to every tree; each record lands in the one tree that
/// holds the node it references.
#[instrument(level = "debug", skip_all, fields(trees = trees.len()))]
pub fn add_data_to_forest(trees: &mut [Tree], records: &[Record], config: &DataConfig) -> usize {
    let attached: usize = trees
        .iter_mut()
        .map(|tree| tree.add_data(records, config))
        .sum();
    debug!(attached, "Attached data across forest");
    attached
}
