//! Authorization for metadata registry mutations.
//!
//! Every proposed write or removal of a scope, session, record or
//! specification passes through a [`MetadataAuthorizer`] before a
//! transaction handler persists it. Checks run in a fixed order
//! (structural, identity, existence, signatures, conformance) and the first
//! failure is returned, so a given state always yields the same error.
//!
//! Building blocks:
//! - [`marker_authority`]: custodial marker access checks
//! - [`require_all_signers`]: fail-fast signer requirements

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod authorizer;
mod error;
pub mod marker;
mod record;
mod scope;
mod session;
pub mod signers;
mod specification;

pub use authorizer::MetadataAuthorizer;
pub use error::{AuditField, AuthzError, AuthzErrorKind, AuthzResult};
pub use marker::{
    marker_authority, Access, AccessGrant, AccessGrantSet, AccountLookup, InMemoryAccounts,
    MarkerAuthority,
};
pub use signers::{require_all_owner_addresses, require_all_signers};
