//! Field mappings for building trees and attaching data.
//!
//! Each mapping exists twice: a raw form where every field is optional (what
//! settings files and builders collect) and a validated form the core runs on.

use serde::{Deserialize, Serialize};

use crate::domain::error::{TreeError, TreeResult};

/// Unvalidated tree mapping, `{ id, parentid }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTreeConfig {
    pub id: Option<String>,
    #[serde(rename = "parentid")]
    pub parent_id: Option<String>,
}

/// Unvalidated data mapping, `{ referenceid, collectionname }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDataConfig {
    #[serde(rename = "referenceid")]
    pub reference_id: Option<String>,
    #[serde(rename = "collectionname")]
    pub collection_name: Option<String>,
}

/// Names of the identifier and parent-identifier fields of tree records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    pub id: String,
    pub parent_id: String,
}

/// Foreign-key field of auxiliary records and the collection they land in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    pub reference_id: String,
    pub collection_name: String,
}

fn required(value: Option<String>, property: &'static str) -> TreeResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(TreeError::InvalidConfig(property))
}

impl TreeConfig {
    pub fn new(id: impl Into<String>, parent_id: impl Into<String>) -> TreeResult<Self> {
        RawTreeConfig {
            id: Some(id.into()),
            parent_id: Some(parent_id.into()),
        }
        .try_into()
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            id: "id".into(),
            parent_id: "parentid".into(),
        }
    }
}

impl TryFrom<RawTreeConfig> for TreeConfig {
    type Error = TreeError;

    fn try_from(raw: RawTreeConfig) -> TreeResult<Self> {
        Ok(Self {
            id: required(raw.id, "id")?,
            parent_id: required(raw.parent_id, "parentid")?,
        })
    }
}

impl From<TreeConfig> for RawTreeConfig {
    fn from(config: TreeConfig) -> Self {
        Self {
            id: Some(config.id),
            parent_id: Some(config.parent_id),
        }
    }
}

impl DataConfig {
    pub fn new(
        reference_id: impl Into<String>,
        collection_name: impl Into<String>,
    ) -> TreeResult<Self> {
        RawDataConfig {
            reference_id: Some(reference_id.into()),
            collection_name: Some(collection_name.into()),
        }
        .try_into()
    }
}

impl TryFrom<RawDataConfig> for DataConfig {
    type Error = TreeError;

    fn try_from(raw: RawDataConfig) -> TreeResult<Self> {
        Ok(Self {
            reference_id: required(raw.reference_id, "referenceid")?,
            collection_name: required(raw.collection_name, "collectionname")?,
        })
    }
}

impl From<DataConfig> for RawDataConfig {
    fn from(config: DataConfig) -> Self {
        Self {
            reference_id: Some(config.reference_id),
            collection_name: Some(config.collection_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_raw_config_when_validating_then_id_is_reported_first() {
        let result = TreeConfig::try_from(RawTreeConfig::default());
        assert_eq!(result, Err(TreeError::InvalidConfig("id")));
    }

    #[test]
    fn given_only_id_when_validating_then_parentid_is_reported() {
        let raw = RawTreeConfig {
            id: Some("id".into()),
            parent_id: None,
        };
        assert_eq!(
            TreeConfig::try_from(raw),
            Err(TreeError::InvalidConfig("parentid"))
        );
    }

    #[test]
    fn given_blank_field_name_when_validating_then_treated_as_unset() {
        assert_eq!(
            TreeConfig::new("  ", "parentid"),
            Err(TreeError::InvalidConfig("id"))
        );
        assert_eq!(
            DataConfig::new("referenceid", ""),
            Err(TreeError::InvalidConfig("collectionname"))
        );
    }

    #[test]
    fn given_data_config_without_reference_when_validating_then_errors() {
        let raw = RawDataConfig {
            reference_id: None,
            collection_name: Some("items".into()),
        };
        assert_eq!(
            DataConfig::try_from(raw),
            Err(TreeError::InvalidConfig("referenceid"))
        );
    }

    #[test]
    fn given_toml_with_short_keys_when_deserializing_then_maps_fields() {
        let raw: RawTreeConfig = toml::from_str("id = \"key\"\nparentid = \"up\"\n").unwrap();
        let config = TreeConfig::try_from(raw).unwrap();
        assert_eq!(config.id, "key");
        assert_eq!(config.parent_id, "up");
    }
}
