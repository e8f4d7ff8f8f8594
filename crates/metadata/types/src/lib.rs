//! Metadata registry types.
//!
//! Addresses, entities and the structural validation every proposed
//! mutation must pass before authorization runs:
//!
//! - [`MetadataAddress`]: self-describing, nesting entity keys
//! - [`Scope`], [`Session`], [`Record`]: the registry hierarchy
//! - [`ScopeSpecification`], [`ContractSpecification`],
//!   [`RecordSpecification`]: the schemas governing it
//! - [`BasicValidator`]: field-level checks driven by an [`AddressCodec`]
//!   and [`ValidationLimits`]

#![deny(unsafe_code)]

pub mod address;
pub mod codec;
pub mod error;
pub mod limits;
pub mod party;
pub mod record;
pub mod scope;
pub mod session;
pub mod specification;
pub mod validate;

pub use address::{name_hash, AddressKind, MetadataAddress, MIN_ADDRESS_LEN};
pub use codec::{AddressCodec, PlainAddressCodec};
pub use error::{AddressError, LimitsError, ValidationError, ValidationResult};
pub use limits::ValidationLimits;
pub use party::{Party, PartyType};
pub use record::{
    InputSource, Process, ProcessId, Record, RecordInput, RecordInputStatus, RecordOutput,
    ResultStatus, SourceKind,
};
pub use scope::Scope;
pub use session::{AuditFields, Session};
pub use specification::{
    ContractSource, ContractSpecification, DefinitionType, Description, InputSpecification,
    RecordSpecification, ScopeSpecification,
};
pub use validate::BasicValidator;
