//! Self-describing metadata addresses.
//!
//! Every registry entity is keyed by a [`MetadataAddress`]: a one-byte type
//! tag followed by one or two UUIDs and, for records and record
//! specifications, a SHA-256 hash of the normalized name. Scope, session and
//! record addresses nest: each one embeds the owning scope's UUID, so the
//! scope of any of them can be derived without a store lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::AddressError;

const UUID_LEN: usize = 16;
const NAME_HASH_LEN: usize = 32;

/// Shortest valid address: a type tag plus one UUID.
pub const MIN_ADDRESS_LEN: usize = 1 + UUID_LEN;

/// The entity type encoded in an address's first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AddressKind {
    Scope,
    Session,
    Record,
    ContractSpecification,
    ScopeSpecification,
    RecordSpecification,
}

impl AddressKind {
    pub const ALL: [AddressKind; 6] = [
        AddressKind::Scope,
        AddressKind::Session,
        AddressKind::Record,
        AddressKind::ContractSpecification,
        AddressKind::ScopeSpecification,
        AddressKind::RecordSpecification,
    ];

    /// Leading byte of every address (and store key) of this kind.
    pub fn tag(&self) -> u8 {
        match self {
            AddressKind::Scope => 0x00,
            AddressKind::Session => 0x01,
            AddressKind::Record => 0x02,
            AddressKind::ContractSpecification => 0x03,
            AddressKind::ScopeSpecification => 0x04,
            AddressKind::RecordSpecification => 0x05,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Human readable prefix used in the textual form.
    pub fn hrp(&self) -> &'static str {
        match self {
            AddressKind::Scope => "scope",
            AddressKind::Session => "session",
            AddressKind::Record => "record",
            AddressKind::ContractSpecification => "contractspec",
            AddressKind::ScopeSpecification => "scopespec",
            AddressKind::RecordSpecification => "recspec",
        }
    }

    pub fn from_hrp(hrp: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.hrp() == hrp)
    }

    /// Exact byte length of an address of this kind.
    pub fn expected_len(&self) -> usize {
        match self {
            AddressKind::Scope
            | AddressKind::ContractSpecification
            | AddressKind::ScopeSpecification => 1 + UUID_LEN,
            AddressKind::Session => 1 + 2 * UUID_LEN,
            AddressKind::Record | AddressKind::RecordSpecification => 1 + UUID_LEN + NAME_HASH_LEN,
        }
    }

    /// Store key prefix covering every entity of this kind.
    pub fn key_prefix(&self) -> [u8; 1] {
        [self.tag()]
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hrp())
    }
}

/// Hash of a record or record specification name.
///
/// Names are trimmed and lowercased first, so `" Rec1"` and `"rec1"` share
/// an address.
pub fn name_hash(name: &str) -> Result<[u8; NAME_HASH_LEN], AddressError> {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(AddressError::MissingName);
    }
    Ok(Sha256::digest(normalized.as_bytes()).into())
}

/// A verified metadata address: the decoded kind plus its raw bytes.
///
/// Values can only be obtained through the constructors below or
/// [`MetadataAddress::from_bytes`], so the byte layout always matches the
/// kind.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetadataAddress {
    kind: AddressKind,
    bytes: Vec<u8>,
}

impl MetadataAddress {
    fn build(kind: AddressKind, parts: &[&[u8]]) -> Self {
        let mut bytes = Vec::with_capacity(kind.expected_len());
        bytes.push(kind.tag());
        for part in parts {
            bytes.extend_from_slice(part);
        }
        Self { kind, bytes }
    }

    pub fn scope(scope_uuid: Uuid) -> Self {
        Self::build(AddressKind::Scope, &[scope_uuid.as_bytes()])
    }

    pub fn session(scope_uuid: Uuid, session_uuid: Uuid) -> Self {
        Self::build(
            AddressKind::Session,
            &[scope_uuid.as_bytes(), session_uuid.as_bytes()],
        )
    }

    pub fn record(scope_uuid: Uuid, name: &str) -> Result<Self, AddressError> {
        let hash = name_hash(name)?;
        Ok(Self::build(
            AddressKind::Record,
            &[scope_uuid.as_bytes(), &hash],
        ))
    }

    pub fn scope_specification(spec_uuid: Uuid) -> Self {
        Self::build(AddressKind::ScopeSpecification, &[spec_uuid.as_bytes()])
    }

    pub fn contract_specification(spec_uuid: Uuid) -> Self {
        Self::build(AddressKind::ContractSpecification, &[spec_uuid.as_bytes()])
    }

    pub fn record_specification(
        contract_spec_uuid: Uuid,
        name: &str,
    ) -> Result<Self, AddressError> {
        let hash = name_hash(name)?;
        Ok(Self::build(
            AddressKind::RecordSpecification,
            &[contract_spec_uuid.as_bytes(), &hash],
        ))
    }

    /// Verify and wrap raw address bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        if bytes.len() < MIN_ADDRESS_LEN {
            return Err(AddressError::TooShort {
                min: MIN_ADDRESS_LEN,
                actual: bytes.len(),
            });
        }
        let kind = AddressKind::from_tag(bytes[0]).ok_or(AddressError::UnknownType(bytes[0]))?;
        if bytes.len() != kind.expected_len() {
            return Err(AddressError::LengthMismatch {
                expected: kind.expected_len(),
                actual: bytes.len(),
            });
        }
        Ok(Self {
            kind,
            bytes: bytes.to_vec(),
        })
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    pub fn is_kind(&self, kind: AddressKind) -> bool {
        self.kind == kind
    }

    pub fn hrp(&self) -> &'static str {
        self.kind.hrp()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn uuid_at(&self, offset: usize) -> Uuid {
        let mut raw = [0u8; UUID_LEN];
        raw.copy_from_slice(&self.bytes[offset..offset + UUID_LEN]);
        Uuid::from_bytes(raw)
    }

    /// The first UUID after the tag. Every address kind has one.
    pub fn primary_uuid(&self) -> Uuid {
        self.uuid_at(1)
    }

    /// Scope UUID embedded in scope, session and record addresses.
    pub fn scope_uuid(&self) -> Result<Uuid, AddressError> {
        match self.kind {
            AddressKind::Scope | AddressKind::Session | AddressKind::Record => {
                Ok(self.primary_uuid())
            }
            _ => Err(AddressError::NoScopeUuid),
        }
    }

    pub fn session_uuid(&self) -> Result<Uuid, AddressError> {
        match self.kind {
            AddressKind::Session => Ok(self.uuid_at(1 + UUID_LEN)),
            _ => Err(AddressError::NoSessionUuid),
        }
    }

    /// Contract specification UUID embedded in contract and record
    /// specification addresses.
    pub fn contract_specification_uuid(&self) -> Result<Uuid, AddressError> {
        match self.kind {
            AddressKind::ContractSpecification | AddressKind::RecordSpecification => {
                Ok(self.primary_uuid())
            }
            _ => Err(AddressError::NoContractSpecificationUuid),
        }
    }

    pub fn name_hash(&self) -> Option<&[u8]> {
        match self.kind {
            AddressKind::Record | AddressKind::RecordSpecification => {
                Some(&self.bytes[1 + UUID_LEN..])
            }
            _ => None,
        }
    }

    pub fn as_scope_address(&self) -> Result<Self, AddressError> {
        self.scope_uuid().map(Self::scope)
    }

    /// Address of the record called `name` in this address's scope.
    pub fn as_record_address(&self, name: &str) -> Result<Self, AddressError> {
        Self::record(self.scope_uuid()?, name)
    }

    pub fn as_contract_specification_address(&self) -> Result<Self, AddressError> {
        self.contract_specification_uuid()
            .map(Self::contract_specification)
    }

    pub fn as_record_specification_address(&self, name: &str) -> Result<Self, AddressError> {
        Self::record_specification(self.contract_specification_uuid()?, name)
    }

    /// Key prefix of every session in this address's scope.
    pub fn scope_session_prefix(&self) -> Result<Vec<u8>, AddressError> {
        let scope_uuid = self.scope_uuid()?;
        Ok(prefixed(AddressKind::Session, &scope_uuid))
    }

    /// Key prefix of every record in this address's scope.
    pub fn scope_record_prefix(&self) -> Result<Vec<u8>, AddressError> {
        let scope_uuid = self.scope_uuid()?;
        Ok(prefixed(AddressKind::Record, &scope_uuid))
    }

    /// Key prefix of every record specification under this contract
    /// specification.
    pub fn contract_specification_record_spec_prefix(&self) -> Result<Vec<u8>, AddressError> {
        let spec_uuid = self.contract_specification_uuid()?;
        Ok(prefixed(AddressKind::RecordSpecification, &spec_uuid))
    }
}

fn prefixed(kind: AddressKind, uuid: &Uuid) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(MIN_ADDRESS_LEN);
    prefix.push(kind.tag());
    prefix.extend_from_slice(uuid.as_bytes());
    prefix
}

impl AsRef<[u8]> for MetadataAddress {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for MetadataAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.hrp(), hex::encode(&self.bytes))
    }
}

impl fmt::Debug for MetadataAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MetadataAddress({self})")
    }
}

impl FromStr for MetadataAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hrp, encoded) = s
            .split_once(':')
            .ok_or_else(|| AddressError::InvalidFormat(s.to_string()))?;
        let hrp_kind =
            AddressKind::from_hrp(hrp).ok_or_else(|| AddressError::UnknownHrp(hrp.to_string()))?;
        let bytes = hex::decode(encoded).map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;
        let address = Self::from_bytes(&bytes)?;
        if address.kind != hrp_kind {
            return Err(AddressError::HrpMismatch {
                expected: address.kind,
                got: hrp.to_string(),
            });
        }
        Ok(address)
    }
}

impl Serialize for MetadataAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MetadataAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
