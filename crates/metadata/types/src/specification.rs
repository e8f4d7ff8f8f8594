//! Scope, contract and record specifications.

use serde::{Deserialize, Serialize};

use crate::address::MetadataAddress;
use crate::party::PartyType;
use crate::record::InputSource;

/// Display metadata attached to a specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Description {
    pub name: String,
    pub description: String,
    pub website_url: String,
    pub icon_url: String,
}

impl Description {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSpecification {
    pub id: MetadataAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    pub owner_addresses: Vec<String>,
    pub parties_involved: Vec<PartyType>,
    #[serde(default)]
    pub contract_spec_ids: Vec<MetadataAddress>,
}

/// Where a contract's definition lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ContractSource {
    ResourceId(MetadataAddress),
    Hash(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSpecification {
    pub id: MetadataAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    pub owner_addresses: Vec<String>,
    pub parties_involved: Vec<PartyType>,
    pub source: ContractSource,
    pub class_name: String,
}

/// How many outputs a record produced under a specification carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefinitionType {
    Unspecified,
    Proposed,
    Record,
    RecordList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpecification {
    pub name: String,
    pub type_name: String,
    pub source: InputSource,
}

impl InputSpecification {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, source: InputSource) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSpecification {
    pub id: MetadataAddress,
    pub name: String,
    pub inputs: Vec<InputSpecification>,
    pub type_name: String,
    pub result_type: DefinitionType,
    #[serde(default)]
    pub responsible_parties: Vec<PartyType>,
}
