//! Sessions and their audit metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::address::MetadataAddress;
use crate::party::Party;

/// Creation and update bookkeeping carried by a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditFields {
    pub created_date: Option<DateTime<Utc>>,
    pub created_by: String,
    pub updated_date: Option<DateTime<Utc>>,
    pub updated_by: String,
    pub version: u32,
    pub message: String,
}

impl AuditFields {
    /// Audit fields for the next write of an entity.
    ///
    /// A first write starts at version 1 and records its creator. Later
    /// writes bump the version (saturating at `u32::MAX`), keep the creation
    /// fields and record the updater.
    pub fn update(
        existing: Option<&AuditFields>,
        blocktime: DateTime<Utc>,
        signers: impl Into<String>,
        message: impl Into<String>,
    ) -> AuditFields {
        match existing {
            None => AuditFields {
                created_date: Some(blocktime),
                created_by: signers.into(),
                version: 1,
                message: message.into(),
                ..AuditFields::default()
            },
            Some(previous) => AuditFields {
                created_date: previous.created_date,
                created_by: previous.created_by.clone(),
                updated_date: Some(blocktime),
                updated_by: signers.into(),
                version: previous.version.saturating_add(1),
                message: message.into(),
            },
        }
    }
}

/// A unit of work under a scope, governed by a contract specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: MetadataAddress,
    pub specification_id: MetadataAddress,
    pub name: String,
    pub parties: Vec<Party>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit: Option<AuditFields>,
}

impl Session {
    pub fn new(
        id: MetadataAddress,
        specification_id: MetadataAddress,
        name: impl Into<String>,
        parties: Vec<Party>,
    ) -> Self {
        Self {
            id,
            specification_id,
            name: name.into(),
            parties,
            audit: None,
        }
    }

    pub fn with_audit(mut self, audit: AuditFields) -> Self {
        self.audit = Some(audit);
        self
    }
}
