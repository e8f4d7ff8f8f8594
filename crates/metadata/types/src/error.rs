//! Error types for addresses and structural validation.

use thiserror::Error;

use crate::address::AddressKind;
use crate::party::PartyType;

/// Errors raised while building, parsing or decoding addresses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("incorrect address length (must be at least {min}, actual: {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("invalid metadata address type: {0}")]
    UnknownType(u8),

    #[error("incorrect address length (expected: {expected}, actual: {actual})")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("this metadata address does not contain a scope uuid")]
    NoScopeUuid,

    #[error("this metadata address does not contain a session uuid")]
    NoSessionUuid,

    #[error("this metadata address does not contain a contract specification uuid")]
    NoContractSpecificationUuid,

    #[error("missing required name")]
    MissingName,

    #[error("invalid metadata address string: {0}")]
    InvalidFormat(String),

    #[error("unknown metadata address prefix: {0}")]
    UnknownHrp(String),

    #[error("invalid metadata address encoding: {0}")]
    InvalidEncoding(String),

    #[error("metadata address prefix mismatch (expected: {expected}, got {got})")]
    HrpMismatch { expected: AddressKind, got: String },

    #[error("empty address string is not allowed")]
    EmptyAccount,

    #[error("address {0} contains invalid characters")]
    InvalidAccount(String),

    #[error("address length exceeds maximum (expected <= {max} got: {actual})")]
    AccountTooLong { max: usize, actual: usize },
}

/// Structural validation failures for registry entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error("invalid {entity} identifier (expected: {expected}, got {got})")]
    WrongIdentifierKind {
        entity: &'static str,
        expected: AddressKind,
        got: AddressKind,
    },

    // Parties
    #[error("at least one party is required")]
    NoParties,

    #[error("missing party address")]
    MissingPartyAddress,

    #[error("invalid party address [{address}]: {source}")]
    InvalidPartyAddress {
        address: String,
        source: AddressError,
    },

    #[error("invalid party type for party {0}")]
    InvalidPartyType(String),

    #[error("duplicate owners not allowed: address = {address}, role = {role}")]
    DuplicateOwner { address: String, role: PartyType },

    // Scopes
    #[error("invalid scope owners: {0}")]
    InvalidScopeOwners(Box<ValidationError>),

    #[error("invalid address in data access on scope: {0}")]
    InvalidDataAccess(AddressError),

    #[error("invalid value owner address on scope: {0}")]
    InvalidValueOwner(AddressError),

    // Sessions
    #[error("session must have at least one party")]
    SessionWithoutParties,

    #[error("invalid party on session: {0}")]
    InvalidSessionParty(Box<ValidationError>),

    #[error("session audit message exceeds maximum length (expected < {max} got: {actual})")]
    AuditMessageTooLong { max: usize, actual: usize },

    // Records
    #[error("invalid record input: {0}")]
    InvalidRecordInput(Box<ValidationError>),

    #[error("invalid record output: {0}")]
    InvalidRecordOutput(Box<ValidationError>),

    #[error("invalid/missing name for record")]
    MissingRecordName,

    #[error("invalid record process: {0}")]
    InvalidRecordProcess(Box<ValidationError>),

    #[error("missing required name")]
    MissingName,

    #[error("missing type name")]
    MissingTypeName,

    #[error("missing required method")]
    MissingMethod,

    #[error("missing required process id")]
    MissingProcessId,

    #[error("invalid record input status, status unknown or missing")]
    UnknownInputStatus,

    #[error("hash specifier only applies to proposed inputs")]
    HashSourceRequiresProposed,

    #[error("missing required hash for proposed value")]
    MissingProposedHash,

    #[error("record id must be used with Record type inputs")]
    RecordSourceRequiresRecord,

    #[error("invalid record id address (found {0}, expected record)")]
    RecordSourceNotARecord(AddressKind),

    #[error("invalid record output status, status unspecified")]
    UnspecifiedOutputStatus,

    #[error("missing required hash")]
    MissingOutputHash,

    // Specifications
    #[error("description {field} cannot be empty")]
    EmptyDescriptionName { field: String },

    #[error("description {field} exceeds maximum length (expected <= {max} got: {actual})")]
    DescriptionTooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("url {field} exceeds maximum length (expected <= {max} got: {actual})")]
    UrlTooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("url {field} must use the http, https, or data protocol")]
    UrlProtocol { field: String },

    #[error("the ScopeSpecification must have at least one owner")]
    ScopeSpecWithoutOwners,

    #[error("invalid owner address at index {index} on ScopeSpecification: {source}")]
    InvalidScopeSpecOwner { index: usize, source: AddressError },

    #[error("the ScopeSpecification must have at least one party involved")]
    ScopeSpecWithoutParties,

    #[error("invalid contract specification id prefix at index {index} (expected: {expected}, got {got})")]
    WrongContractSpecIdKind {
        index: usize,
        expected: AddressKind,
        got: AddressKind,
    },

    #[error("invalid owner addresses count (expected > 0 got: {0})")]
    ContractSpecOwnerCount(usize),

    #[error("invalid owner address at index {index}: {source}")]
    InvalidContractSpecOwner { index: usize, source: AddressError },

    #[error("invalid parties involved count (expected > 0 got: {0})")]
    ContractSpecPartyCount(usize),

    #[error("source hash cannot be empty")]
    EmptySourceHash,

    #[error("class name cannot be empty")]
    EmptyClassName,

    #[error("class name exceeds maximum length (expected <= {max} got: {actual})")]
    ClassNameTooLong { max: usize, actual: usize },

    #[error("record specification id does not match its name (expected: {expected}, got {got})")]
    RecordSpecIdMismatch { expected: String, got: String },

    #[error("invalid record specification result type, type unspecified")]
    UnspecifiedResultType,

    #[error("invalid input specification: {0}")]
    InvalidInputSpecification(Box<ValidationError>),

    #[error("invalid responsible party type at index {0}")]
    InvalidResponsibleParty(usize),
}

/// Errors loading validation limits.
#[derive(Debug, Error)]
pub enum LimitsError {
    #[error("failed to read limits file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid limits configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result alias for structural validation.
pub type ValidationResult<T> = Result<T, ValidationError>;
