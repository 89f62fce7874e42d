//! Build trees from flat parent-linked records and aggregate data attached to
//! their nodes.
//!
//! ```
//! use serde_json::json;
//! use treekit::{DataConfig, ForestBuilder, Record, TreeConfig};
//!
//! let records: Vec<Record> = serde_json::from_value(json!([
//!     { "id": 1 },
//!     { "id": 2, "parentid": 1 },
//! ]))
//! .unwrap();
//! let mut trees = ForestBuilder::new()
//!     .records(records)
//!     .config(TreeConfig::default())
//!     .build()
//!     .unwrap();
//!
//! let items: Vec<Record> =
//!     serde_json::from_value(json!([{ "referenceid": 2, "name": "a" }])).unwrap();
//! let config = DataConfig::new("referenceid", "items").unwrap();
//! trees[0].add_data(&items, &config);
//!
//! let root = trees[0].root();
//! assert!(root.single_node_data().is_empty());
//! assert_eq!(root.recursive_node_data().len(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use config::Settings;
pub use domain::{
    add_data_to_forest, build_trees, find_node, DataConfig, ForestBuilder, NodeRef,
    RawDataConfig, RawTreeConfig, Record, RecordId, Tree, TreeConfig, TreeError, TreeResult,
};
pub use tree_traits::TreeNodeConvert;
