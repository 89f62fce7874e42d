//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treekit/treekit.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `TREEKIT_*` prefix, `__` between section and key
//!    (e.g. `TREEKIT_TREE__PARENTID=up`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::{RawDataConfig, RawTreeConfig};

const DEFAULT_ID: &str = "id";
const DEFAULT_PARENT_ID: &str = "parentid";
const DEFAULT_REFERENCE_ID: &str = "referenceid";
const DEFAULT_COLLECTION: &str = "items";

/// Unified configuration for treekit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Field mapping used to build trees
    pub tree: RawTreeConfig,
    /// Field mapping used to attach auxiliary data
    pub data: RawDataConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree: RawTreeConfig {
                id: Some(DEFAULT_ID.into()),
                parent_id: Some(DEFAULT_PARENT_ID.into()),
            },
            data: RawDataConfig {
                reference_id: Some(DEFAULT_REFERENCE_ID.into()),
                collection_name: Some(DEFAULT_COLLECTION.into()),
            },
        }
    }
}

/// Get the XDG config directory for treekit.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treekit").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treekit.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// `local` must exist when given; the global file is optional.
    pub fn load(local: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("tree.id", DEFAULT_ID)?
            .set_default("tree.parentid", DEFAULT_PARENT_ID)?
            .set_default("data.referenceid", DEFAULT_REFERENCE_ID)?
            .set_default("data.collectionname", DEFAULT_COLLECTION)?;

        if let Some(global_path) = global_config_path() {
            builder = builder.add_source(File::from(global_path).required(false));
        }
        if let Some(local_path) = local {
            builder = builder.add_source(File::from(local_path).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix("TREEKIT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Tree mapping with command line overrides applied.
    pub fn tree_config(&self, id: Option<&str>, parent_id: Option<&str>) -> RawTreeConfig {
        RawTreeConfig {
            id: id.map(str::to_string).or_else(|| self.tree.id.clone()),
            parent_id: parent_id
                .map(str::to_string)
                .or_else(|| self.tree.parent_id.clone()),
        }
    }

    /// Data mapping with command line overrides applied.
    pub fn data_config(
        &self,
        reference_id: Option<&str>,
        collection_name: Option<&str>,
    ) -> RawDataConfig {
        RawDataConfig {
            reference_id: reference_id
                .map(str::to_string)
                .or_else(|| self.data.reference_id.clone()),
            collection_name: collection_name
                .map(str::to_string)
                .or_else(|| self.data.collection_name.clone()),
        }
    }
}
