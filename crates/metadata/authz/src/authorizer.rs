use std::fmt::Display;
use std::sync::Arc;

use metadata_store::MetadataView;
use metadata_types::BasicValidator;
use tracing::{debug, warn};

use crate::error::AuthzResult;
use crate::marker::{marker_authority, Access, AccountLookup, MarkerAuthority};

/// Decides whether proposed registry mutations may be applied.
///
/// Holds no state of its own: every decision is a function of the existing
/// entity, the proposed entity, the signer set and reads through the
/// [`MetadataView`] and [`AccountLookup`] collaborators.
#[derive(Clone)]
pub struct MetadataAuthorizer {
    pub(crate) view: Arc<dyn MetadataView>,
    pub(crate) accounts: Arc<dyn AccountLookup>,
    pub(crate) validator: BasicValidator,
}

impl MetadataAuthorizer {
    pub fn new(
        view: Arc<dyn MetadataView>,
        accounts: Arc<dyn AccountLookup>,
        validator: BasicValidator,
    ) -> Self {
        Self {
            view,
            accounts,
            validator,
        }
    }

    pub fn validator(&self) -> &BasicValidator {
        &self.validator
    }

    /// Marker authority of `address` for `required`, checked against
    /// `signers`.
    pub fn marker_authority(
        &self,
        address: &str,
        signers: &[String],
        required: Access,
    ) -> MarkerAuthority {
        marker_authority(
            self.accounts.as_ref(),
            self.validator.codec(),
            address,
            signers,
            required,
        )
    }
}

impl std::fmt::Debug for MetadataAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataAuthorizer")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

pub(crate) fn log_outcome(operation: &'static str, id: &dyn Display, result: &AuthzResult<()>) {
    match result {
        Ok(()) => debug!(operation, id = %id, "Mutation authorized"),
        Err(err) => warn!(
            operation,
            id = %id,
            kind = ?err.kind(),
            error = %err,
            "Mutation rejected"
        ),
    }
}
