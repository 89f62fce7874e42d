//! Domain layer: records, trees and the forest builder
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod config;
pub mod error;
pub mod forest;
pub mod record;
pub mod tree;

pub use arena::{Collection, NodeData, TreeArena, TreeNode};
pub use builder::{build_trees, ForestBuilder};
pub use config::{DataConfig, RawDataConfig, RawTreeConfig, TreeConfig};
pub use error::{TreeError, TreeResult};
pub use forest::{add_data_to_forest, find_node};
pub use record::{Record, RecordId};
pub use tree::{Attach, NodeRef, Tree};
