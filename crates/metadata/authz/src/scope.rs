//! Scope create, update and removal checks.

use metadata_types::{AddressKind, MetadataAddress, Scope, ValidationError};
use tracing::debug;

use crate::authorizer::{log_outcome, MetadataAuthorizer};
use crate::error::{AuthzError, AuthzResult};
use crate::marker::Access;
use crate::signers::first_missing_address;

impl MetadataAuthorizer {
    /// Validate writing `proposed` over `existing` (`None` for a new scope).
    pub fn validate_scope_update(
        &self,
        existing: Option<&Scope>,
        proposed: &Scope,
        signers: &[String],
    ) -> AuthzResult<()> {
        debug!(scope_id = %proposed.id, signers = signers.len(), "Validating scope update");
        let result = self.check_scope_update(existing, proposed, signers);
        log_outcome("scope update", &proposed.id, &result);
        result
    }

    fn check_scope_update(
        &self,
        existing: Option<&Scope>,
        proposed: &Scope,
        signers: &[String],
    ) -> AuthzResult<()> {
        if let Some(existing) = existing {
            if proposed.id != existing.id {
                return Err(AuthzError::ScopeIdChanged {
                    expected: existing.id.clone(),
                    got: proposed.id.clone(),
                });
            }
        }

        self.validator.validate_scope(proposed)?;

        if let Some(existing) = existing {
            require_existing_owners(existing, signers)?;
        }

        self.validate_value_owner_change(
            existing.and_then(Scope::value_owner),
            proposed.value_owner(),
            signers,
        )
    }

    /// Validate removing `existing`, addressed by `proposed_id`.
    ///
    /// Removal moves the value owner to nothing, so a marker value owner
    /// still needs a withdraw-authorized signer.
    pub fn validate_scope_remove(
        &self,
        existing: &Scope,
        proposed_id: &MetadataAddress,
        signers: &[String],
    ) -> AuthzResult<()> {
        debug!(scope_id = %proposed_id, signers = signers.len(), "Validating scope removal");
        let result = self.check_scope_remove(existing, proposed_id, signers);
        log_outcome("scope remove", proposed_id, &result);
        result
    }

    fn check_scope_remove(
        &self,
        existing: &Scope,
        proposed_id: &MetadataAddress,
        signers: &[String],
    ) -> AuthzResult<()> {
        if *proposed_id != existing.id {
            return Err(AuthzError::ScopeIdChanged {
                expected: existing.id.clone(),
                got: proposed_id.clone(),
            });
        }
        if !proposed_id.is_kind(AddressKind::Scope) {
            return Err(ValidationError::WrongIdentifierKind {
                entity: "scope",
                expected: AddressKind::Scope,
                got: proposed_id.kind(),
            }
            .into());
        }
        require_existing_owners(existing, signers)?;
        self.validate_value_owner_change(existing.value_owner(), None, signers)
    }

    /// Marker rules for moving the value owner from `current` to `next`.
    fn validate_value_owner_change(
        &self,
        current: Option<&str>,
        next: Option<&str>,
        signers: &[String],
    ) -> AuthzResult<()> {
        if current == next {
            return Ok(());
        }
        if let Some(current) = current {
            if self
                .marker_authority(current, signers, Access::Withdraw)
                .is_unauthorized_marker()
            {
                return Err(AuthzError::MissingWithdrawAuthority(current.to_string()));
            }
        }
        if let Some(next) = next {
            if self
                .marker_authority(next, signers, Access::Deposit)
                .is_unauthorized_marker()
            {
                return Err(AuthzError::MissingDepositAuthority(next.to_string()));
            }
        }
        Ok(())
    }
}

fn require_existing_owners(existing: &Scope, signers: &[String]) -> AuthzResult<()> {
    match first_missing_address(existing.owner_addresses(), signers) {
        Some(address) => Err(AuthzError::MissingExistingOwnerSignature(address.to_string())),
        None => Ok(()),
    }
}
