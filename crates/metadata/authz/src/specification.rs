//! Specification update checks.
//!
//! Specifications are governed by their owner addresses: once stored, every
//! listed owner must sign a change, and identifiers never move.

use metadata_types::{ContractSpecification, RecordSpecification, ScopeSpecification};
use tracing::debug;

use crate::authorizer::{log_outcome, MetadataAuthorizer};
use crate::error::{AuthzError, AuthzResult};
use crate::signers::require_all_owner_addresses;

impl MetadataAuthorizer {
    pub fn validate_scope_spec_update(
        &self,
        existing: Option<&ScopeSpecification>,
        proposed: &ScopeSpecification,
        signers: &[String],
    ) -> AuthzResult<()> {
        debug!(spec_id = %proposed.id, "Validating scope specification update");
        let result = self.check_scope_spec_update(existing, proposed, signers);
        log_outcome("scope spec update", &proposed.id, &result);
        result
    }

    fn check_scope_spec_update(
        &self,
        existing: Option<&ScopeSpecification>,
        proposed: &ScopeSpecification,
        signers: &[String],
    ) -> AuthzResult<()> {
        if let Some(existing) = existing {
            if proposed.id != existing.id {
                return Err(AuthzError::ScopeSpecIdChanged {
                    expected: existing.id.clone(),
                    got: proposed.id.clone(),
                });
            }
        }
        self.validator.validate_scope_specification(proposed)?;

        for contract_spec_id in &proposed.contract_spec_ids {
            if !self.view.contains(contract_spec_id)? {
                return Err(AuthzError::ReferencedContractSpecMissing(contract_spec_id.clone()));
            }
        }

        match existing {
            Some(existing) => require_all_owner_addresses(&existing.owner_addresses, signers),
            None => Ok(()),
        }
    }

    pub fn validate_contract_spec_update(
        &self,
        existing: Option<&ContractSpecification>,
        proposed: &ContractSpecification,
        signers: &[String],
    ) -> AuthzResult<()> {
        debug!(spec_id = %proposed.id, "Validating contract specification update");
        let result = self.check_contract_spec_update(existing, proposed, signers);
        log_outcome("contract spec update", &proposed.id, &result);
        result
    }

    fn check_contract_spec_update(
        &self,
        existing: Option<&ContractSpecification>,
        proposed: &ContractSpecification,
        signers: &[String],
    ) -> AuthzResult<()> {
        if let Some(existing) = existing {
            if proposed.id != existing.id {
                return Err(AuthzError::ContractSpecIdChanged {
                    expected: existing.id.clone(),
                    got: proposed.id.clone(),
                });
            }
        }
        self.validator.validate_contract_specification(proposed)?;

        match existing {
            Some(existing) => require_all_owner_addresses(&existing.owner_addresses, signers),
            None => Ok(()),
        }
    }

    /// Record specifications are owned through their contract
    /// specification, whose owners must all sign.
    pub fn validate_record_spec_update(
        &self,
        existing: Option<&RecordSpecification>,
        proposed: &RecordSpecification,
        signers: &[String],
    ) -> AuthzResult<()> {
        debug!(spec_id = %proposed.id, "Validating record specification update");
        let result = self.check_record_spec_update(existing, proposed, signers);
        log_outcome("record spec update", &proposed.id, &result);
        result
    }

    fn check_record_spec_update(
        &self,
        existing: Option<&RecordSpecification>,
        proposed: &RecordSpecification,
        signers: &[String],
    ) -> AuthzResult<()> {
        self.validator.validate_record_specification(proposed)?;

        if let Some(existing) = existing {
            if proposed.id != existing.id {
                return Err(AuthzError::RecordSpecIdChanged {
                    expected: existing.id.clone(),
                    got: proposed.id.clone(),
                });
            }
            if proposed.name != existing.name {
                return Err(AuthzError::RecordSpecNameChanged {
                    expected: existing.name.clone(),
                    got: proposed.name.clone(),
                });
            }
        }

        let contract_spec_id = proposed.id.as_contract_specification_address()?;
        let contract_spec = self
            .view
            .get_contract_specification(&contract_spec_id)?
            .ok_or(AuthzError::ContractSpecNotFound(contract_spec_id))?;
        require_all_owner_addresses(&contract_spec.owner_addresses, signers)
    }
}
