//! Session update checks.

use metadata_types::{AuditFields, Session};
use tracing::debug;

use crate::authorizer::{log_outcome, MetadataAuthorizer};
use crate::error::{AuditField, AuthzError, AuthzResult};
use crate::signers::first_missing_address;

impl MetadataAuthorizer {
    /// Validate writing `proposed` over `existing` (`None` for a new session).
    pub fn validate_session_update(
        &self,
        existing: Option<&Session>,
        proposed: &Session,
        signers: &[String],
    ) -> AuthzResult<()> {
        debug!(session_id = %proposed.id, signers = signers.len(), "Validating session update");
        let result = self.check_session_update(existing, proposed, signers);
        log_outcome("session update", &proposed.id, &result);
        result
    }

    fn check_session_update(
        &self,
        existing: Option<&Session>,
        proposed: &Session,
        signers: &[String],
    ) -> AuthzResult<()> {
        self.validator.validate_session(proposed)?;

        let scope_id = existing.unwrap_or(proposed).id.as_scope_address()?;
        let scope = self
            .view
            .get_scope(&scope_id)?
            .ok_or_else(|| AuthzError::SessionScopeNotFound(scope_id.clone()))?;

        if let Some(existing) = existing {
            if proposed.id != existing.id {
                return Err(AuthzError::SessionIdChanged {
                    expected: existing.id.clone(),
                    got: proposed.id.clone(),
                });
            }
        }

        let contract_spec = self
            .view
            .get_contract_specification(&proposed.specification_id)?
            .ok_or_else(|| AuthzError::ContractSpecNotFound(proposed.specification_id.clone()))?;
        if let Some(existing) = existing {
            if proposed.specification_id != existing.specification_id {
                return Err(AuthzError::SessionSpecificationChanged {
                    expected: existing.specification_id.clone(),
                    got: proposed.specification_id.clone(),
                });
            }
            if !existing.name.is_empty() && proposed.name.is_empty() {
                return Err(AuthzError::SessionNameCleared);
            }
        }

        if proposed.name != contract_spec.class_name {
            return Err(AuthzError::SessionNameMismatch {
                name: proposed.name.clone(),
                class_name: contract_spec.class_name.clone(),
            });
        }

        if let Some(role) = contract_spec
            .parties_involved
            .iter()
            .find(|role| !proposed.parties.iter().any(|party| party.role == **role))
        {
            return Err(AuthzError::MissingPartyType(*role));
        }

        if let Some(address) = first_missing_address(scope.owner_addresses(), signers) {
            return Err(AuthzError::MissingScopeOwnerSignature(address.to_string()));
        }

        match existing {
            Some(existing) => {
                validate_audit_unchanged(existing.audit.as_ref(), proposed.audit.as_ref())
            }
            None => Ok(()),
        }
    }
}

/// Audit fields may be omitted from a proposal but never added or altered.
fn validate_audit_unchanged(
    existing: Option<&AuditFields>,
    proposed: Option<&AuditFields>,
) -> AuthzResult<()> {
    let (existing, proposed) = match (existing, proposed) {
        (_, None) => return Ok(()),
        (None, Some(_)) => return Err(AuthzError::AuditFieldsAdded),
        (Some(existing), Some(proposed)) => (existing, proposed),
    };

    let changed = [
        (AuditField::Message, existing.message != proposed.message),
        (AuditField::Version, existing.version != proposed.version),
        (AuditField::UpdatedDate, existing.updated_date != proposed.updated_date),
        (AuditField::UpdatedBy, existing.updated_by != proposed.updated_by),
        (AuditField::CreatedBy, existing.created_by != proposed.created_by),
        (AuditField::CreatedDate, existing.created_date != proposed.created_date),
    ];
    match changed.into_iter().find(|(_, changed)| *changed) {
        Some((field, _)) => Err(AuthzError::AuditFieldModified(field)),
        None => Ok(()),
    }
}
