use std::fmt;

use metadata_store::StoreError;
use metadata_types::{AddressError, MetadataAddress, PartyType, SourceKind, ValidationError};
use thiserror::Error;
use uuid::Uuid;

/// Result type for authorization checks.
pub type AuthzResult<T> = Result<T, AuthzError>;

/// Audit subfields that become immutable once set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditField {
    Message,
    Version,
    UpdatedDate,
    UpdatedBy,
    CreatedBy,
    CreatedDate,
}

impl fmt::Display for AuditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuditField::Message => "message",
            AuditField::Version => "version",
            AuditField::UpdatedDate => "updated-date",
            AuditField::UpdatedBy => "updated-by",
            AuditField::CreatedBy => "created-by",
            AuditField::CreatedDate => "created-date",
        };
        f.write_str(name)
    }
}

/// Coarse classification of a rejected mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthzErrorKind {
    Structural,
    IdentityImmutable,
    NotFound,
    SignatureMissing,
    AuthorityMissing,
    SpecificationMismatch,
    AuditImmutable,
    Store,
}

/// Reasons a proposed registry mutation is rejected.
#[derive(Debug, Error)]
pub enum AuthzError {
    #[error(transparent)]
    Structural(#[from] ValidationError),

    #[error(transparent)]
    Address(#[from] AddressError),

    // Identity
    #[error("cannot update scope identifier. expected {expected}, got {got}")]
    ScopeIdChanged {
        expected: MetadataAddress,
        got: MetadataAddress,
    },

    #[error("cannot update session identifier. expected {expected}, got {got}")]
    SessionIdChanged {
        expected: MetadataAddress,
        got: MetadataAddress,
    },

    #[error("cannot update specification identifier. expected {expected}, got {got}")]
    SessionSpecificationChanged {
        expected: MetadataAddress,
        got: MetadataAddress,
    },

    #[error("proposed name to existing session must not be empty")]
    SessionNameCleared,

    #[error("the Name field of records cannot be changed")]
    RecordNameChanged,

    #[error("the SessionId field of records cannot be changed")]
    RecordSessionChanged,

    #[error("the SpecificationId of records cannot be changed")]
    RecordSpecificationChanged,

    #[error("cannot remove record. expected {expected}, got {got}")]
    RecordIdMismatch {
        expected: MetadataAddress,
        got: MetadataAddress,
    },

    #[error("cannot update scope spec identifier. expected {expected}, got {got}")]
    ScopeSpecIdChanged {
        expected: MetadataAddress,
        got: MetadataAddress,
    },

    #[error("cannot update contract spec identifier. expected {expected}, got {got}")]
    ContractSpecIdChanged {
        expected: MetadataAddress,
        got: MetadataAddress,
    },

    #[error("cannot update record spec identifier. expected {expected}, got {got}")]
    RecordSpecIdChanged {
        expected: MetadataAddress,
        got: MetadataAddress,
    },

    #[error("cannot update record spec name. expected {expected}, got {got}")]
    RecordSpecNameChanged { expected: String, got: String },

    // Lookups
    #[error("scope not found for scope id {0}")]
    SessionScopeNotFound(MetadataAddress),

    #[error("scope not found for scope uuid {0}")]
    RecordScopeNotFound(Uuid),

    #[error("unable to find scope {0}")]
    ScopeNotFound(MetadataAddress),

    #[error("cannot get scope uuid: {0}")]
    ScopeUuidUnavailable(AddressError),

    #[error("cannot find contract specification {0}")]
    ContractSpecNotFound(MetadataAddress),

    #[error("no contract spec exists with id {0}")]
    ReferencedContractSpecMissing(MetadataAddress),

    #[error("session not found for session id {0}")]
    SessionNotFound(MetadataAddress),

    #[error("input {name} source record id {record_id} not found")]
    SourceRecordNotFound {
        name: String,
        record_id: MetadataAddress,
    },

    #[error("record specification not found for record specification id {record_spec_id} (contract spec uuid {contract_spec_uuid} and record name {name})")]
    RecordSpecNotFound {
        record_spec_id: MetadataAddress,
        contract_spec_uuid: Uuid,
        name: String,
    },

    // Signatures
    #[error("missing signature from {address} ({role})")]
    MissingSignature { address: String, role: PartyType },

    #[error("missing signature from existing owner {0}; required for update")]
    MissingExistingOwnerSignature(String),

    #[error("missing signature from [{0} (PARTY_TYPE_OWNER)]")]
    MissingScopeOwnerSignature(String),

    // Marker authority
    #[error("missing signature for {0} with authority to withdraw/remove existing value owner")]
    MissingWithdrawAuthority(String),

    #[error("no signatures present with authority to add scope to marker {0}")]
    MissingDepositAuthority(String),

    // Specification conformance
    #[error("proposed name does not match contract spec. expected {name}, got {class_name}")]
    SessionNameMismatch { name: String, class_name: String },

    #[error("missing required party type [{0}] from parties")]
    MissingPartyType(PartyType),

    #[error("proposed specification id {proposed} does not match expected specification id {expected}")]
    RecordSpecificationMismatch {
        proposed: MetadataAddress,
        expected: MetadataAddress,
    },

    #[error("missing input {0}")]
    MissingInput(String),

    #[error("extra input {0}")]
    ExtraInput(String),

    #[error("input name {0} provided twice")]
    DuplicateInput(String),

    #[error("input {name} has TypeName {got} but spec calls for {expected}")]
    InputTypeMismatch {
        name: String,
        got: String,
        expected: String,
    },

    #[error("input {name} has source type {got} but spec calls for {expected}")]
    InputSourceKindMismatch {
        name: String,
        got: SourceKind,
        expected: SourceKind,
    },

    #[error("input {name} has source {got} but spec calls for {expected}")]
    InputSourceMismatch {
        name: String,
        got: String,
        expected: String,
    },

    #[error("invalid output count (expected: 1, got: {0})")]
    SingleOutputCount(usize),

    #[error("invalid output count (expected > 0, got: 0)")]
    EmptyOutputList,

    // Audit
    #[error("attempt to modify audit fields, modification not allowed")]
    AuditFieldsAdded,

    #[error("attempt to modify {0} audit field, modification not allowed")]
    AuditFieldModified(AuditField),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthzError {
    pub fn kind(&self) -> AuthzErrorKind {
        use AuthzError::*;
        match self {
            Structural(_) | Address(_) | ScopeUuidUnavailable(_) => AuthzErrorKind::Structural,
            ScopeIdChanged { .. }
            | SessionIdChanged { .. }
            | SessionSpecificationChanged { .. }
            | SessionNameCleared
            | RecordNameChanged
            | RecordSessionChanged
            | RecordSpecificationChanged
            | RecordIdMismatch { .. }
            | ScopeSpecIdChanged { .. }
            | ContractSpecIdChanged { .. }
            | RecordSpecIdChanged { .. }
            | RecordSpecNameChanged { .. } => AuthzErrorKind::IdentityImmutable,
            SessionScopeNotFound(_)
            | RecordScopeNotFound(_)
            | ScopeNotFound(_)
            | ContractSpecNotFound(_)
            | ReferencedContractSpecMissing(_)
            | SessionNotFound(_)
            | RecordSpecNotFound { .. }
            | SourceRecordNotFound { .. } => AuthzErrorKind::NotFound,
            MissingSignature { .. }
            | MissingExistingOwnerSignature(_)
            | MissingScopeOwnerSignature(_) => AuthzErrorKind::SignatureMissing,
            MissingWithdrawAuthority(_) | MissingDepositAuthority(_) => {
                AuthzErrorKind::AuthorityMissing
            }
            SessionNameMismatch { .. }
            | RecordSpecificationMismatch { .. }
            | MissingPartyType(_)
            | MissingInput(_)
            | ExtraInput(_)
            | DuplicateInput(_)
            | InputTypeMismatch { .. }
            | InputSourceKindMismatch { .. }
            | InputSourceMismatch { .. }
            | SingleOutputCount(_)
            | EmptyOutputList => AuthzErrorKind::SpecificationMismatch,
            AuditFieldsAdded | AuditFieldModified(_) => AuthzErrorKind::AuditImmutable,
            Store(_) => AuthzErrorKind::Store,
        }
    }
}
