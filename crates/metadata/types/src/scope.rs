//! Scopes: the top-level registry container.

use serde::{Deserialize, Serialize};

use crate::address::MetadataAddress;
use crate::party::Party;

/// A scope and the parties that own it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub id: MetadataAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification_id: Option<MetadataAddress>,
    pub owners: Vec<Party>,
    #[serde(default)]
    pub data_access: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_owner_address: Option<String>,
}

impl Scope {
    pub fn new(id: MetadataAddress, owners: Vec<Party>) -> Self {
        Self {
            id,
            specification_id: None,
            owners,
            data_access: Vec::new(),
            value_owner_address: None,
        }
    }

    pub fn with_specification(mut self, specification_id: MetadataAddress) -> Self {
        self.specification_id = Some(specification_id);
        self
    }

    pub fn with_data_access(mut self, data_access: Vec<String>) -> Self {
        self.data_access = data_access;
        self
    }

    pub fn with_value_owner(mut self, address: impl Into<String>) -> Self {
        self.value_owner_address = Some(address.into());
        self
    }

    /// The value owner, treating an empty string as unset.
    pub fn value_owner(&self) -> Option<&str> {
        self.value_owner_address
            .as_deref()
            .filter(|address| !address.is_empty())
    }

    pub fn owner_addresses(&self) -> impl Iterator<Item = &str> {
        self.owners.iter().map(|owner| owner.address.as_str())
    }
}
