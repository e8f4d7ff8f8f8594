//! Records: the outputs of a session's process.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::MetadataAddress;
use crate::error::AddressError;

/// Where an input's value comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InputSource {
    /// A hash of a value proposed alongside the record.
    Hash(String),
    /// Another record already in the registry.
    Record(MetadataAddress),
}

/// Discriminant of an [`InputSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Hash,
    Record,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Hash => f.write_str("hash"),
            SourceKind::Record => f.write_str("record"),
        }
    }
}

impl InputSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            InputSource::Hash(_) => SourceKind::Hash,
            InputSource::Record(_) => SourceKind::Record,
        }
    }

    /// The hash, or the record id in textual form.
    pub fn value(&self) -> String {
        match self {
            InputSource::Hash(hash) => hash.clone(),
            InputSource::Record(id) => id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordInputStatus {
    Unknown,
    Proposed,
    Record,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInput {
    pub name: String,
    pub type_name: String,
    pub source: InputSource,
    pub status: RecordInputStatus,
}

impl RecordInput {
    /// A proposed input sourced from a hash.
    pub fn proposed(
        name: impl Into<String>,
        type_name: impl Into<String>,
        hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            source: InputSource::Hash(hash.into()),
            status: RecordInputStatus::Proposed,
        }
    }

    /// An input sourced from an existing record.
    pub fn from_record(
        name: impl Into<String>,
        type_name: impl Into<String>,
        record_id: MetadataAddress,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            source: InputSource::Record(record_id),
            status: RecordInputStatus::Record,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    Unspecified,
    Pass,
    Skip,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutput {
    pub hash: String,
    pub status: ResultStatus,
}

impl RecordOutput {
    pub fn new(hash: impl Into<String>, status: ResultStatus) -> Self {
        Self {
            hash: hash.into(),
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ProcessId {
    Address(String),
    Hash(String),
}

impl ProcessId {
    fn is_empty(&self) -> bool {
        match self {
            ProcessId::Address(value) | ProcessId::Hash(value) => value.is_empty(),
        }
    }
}

/// The process that produced a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub process_id: ProcessId,
    pub name: String,
    pub method: String,
}

impl Process {
    pub fn new(process_id: ProcessId, name: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            process_id,
            name: name.into(),
            method: method.into(),
        }
    }

    pub fn has_process_id(&self) -> bool {
        !self.process_id.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub session_id: MetadataAddress,
    pub process: Process,
    pub inputs: Vec<RecordInput>,
    pub outputs: Vec<RecordOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification_id: Option<MetadataAddress>,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        session_id: MetadataAddress,
        process: Process,
        inputs: Vec<RecordInput>,
        outputs: Vec<RecordOutput>,
    ) -> Self {
        Self {
            name: name.into(),
            session_id,
            process,
            inputs,
            outputs,
            specification_id: None,
        }
    }

    /// The record's address, derived from its session's scope and its name.
    pub fn id(&self) -> Result<MetadataAddress, AddressError> {
        self.session_id.as_record_address(&self.name)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.session_id)
    }
}
