//! Record update and removal checks, including conformance of a record's
//! inputs and outputs to its record specification.

use std::collections::HashMap;

use metadata_store::MetadataView;
use metadata_types::{
    DefinitionType, InputSource, InputSpecification, MetadataAddress, Record, RecordInput,
    RecordSpecification,
};
use tracing::debug;

use crate::authorizer::{log_outcome, MetadataAuthorizer};
use crate::error::{AuthzError, AuthzResult};
use crate::signers::require_all_signers;

impl MetadataAuthorizer {
    /// Validate writing `proposed` over `existing` (`None` for a new record).
    pub fn validate_record_update(
        &self,
        existing: Option<&Record>,
        proposed: &Record,
        signers: &[String],
    ) -> AuthzResult<()> {
        debug!(record = %proposed, signers = signers.len(), "Validating record update");
        let result = self.check_record_update(existing, proposed, signers);
        log_outcome("record update", proposed, &result);
        result
    }

    fn check_record_update(
        &self,
        existing: Option<&Record>,
        proposed: &Record,
        signers: &[String],
    ) -> AuthzResult<()> {
        self.validator.validate_record(proposed)?;

        if let Some(existing) = existing {
            if proposed.name != existing.name {
                return Err(AuthzError::RecordNameChanged);
            }
            if proposed.session_id != existing.session_id {
                return Err(AuthzError::RecordSessionChanged);
            }
            // A stored record without a specification id may gain one.
            if let (Some(stored), Some(specified)) =
                (&existing.specification_id, &proposed.specification_id)
            {
                if stored != specified {
                    return Err(AuthzError::RecordSpecificationChanged);
                }
            }
        }

        let scope_uuid = proposed.session_id.scope_uuid()?;
        let scope = self
            .view
            .get_scope(&MetadataAddress::scope(scope_uuid))?
            .ok_or(AuthzError::RecordScopeNotFound(scope_uuid))?;
        require_all_signers(&scope.owners, signers)?;

        let session = self
            .view
            .get_session(&proposed.session_id)?
            .ok_or_else(|| AuthzError::SessionNotFound(proposed.session_id.clone()))?;

        let contract_spec_uuid = session.specification_id.contract_specification_uuid()?;
        let record_spec_id =
            MetadataAddress::record_specification(contract_spec_uuid, &proposed.name)?;
        if let Some(specified) = &proposed.specification_id {
            if *specified != record_spec_id {
                return Err(AuthzError::RecordSpecificationMismatch {
                    proposed: specified.clone(),
                    expected: record_spec_id,
                });
            }
        }
        let record_spec = self
            .view
            .get_record_specification(&record_spec_id)?
            .ok_or_else(|| AuthzError::RecordSpecNotFound {
                record_spec_id: record_spec_id.clone(),
                contract_spec_uuid,
                name: proposed.name.clone(),
            })?;

        validate_inputs(self.view.as_ref(), &record_spec, &proposed.inputs)?;
        validate_output_count(record_spec.result_type, proposed.outputs.len())
    }

    /// Validate removing `existing`, addressed by `proposed_id`.
    pub fn validate_record_remove(
        &self,
        existing: &Record,
        proposed_id: &MetadataAddress,
        signers: &[String],
    ) -> AuthzResult<()> {
        debug!(record_id = %proposed_id, signers = signers.len(), "Validating record removal");
        let result = self.check_record_remove(existing, proposed_id, signers);
        log_outcome("record remove", proposed_id, &result);
        result
    }

    fn check_record_remove(
        &self,
        existing: &Record,
        proposed_id: &MetadataAddress,
        signers: &[String],
    ) -> AuthzResult<()> {
        let scope_uuid = existing
            .session_id
            .scope_uuid()
            .map_err(AuthzError::ScopeUuidUnavailable)?;
        let scope_id = MetadataAddress::scope(scope_uuid);
        let scope = self
            .view
            .get_scope(&scope_id)?
            .ok_or_else(|| AuthzError::ScopeNotFound(scope_id.clone()))?;

        let record_id = MetadataAddress::record(scope_uuid, &existing.name)?;
        if record_id != *proposed_id {
            return Err(AuthzError::RecordIdMismatch {
                expected: record_id,
                got: proposed_id.clone(),
            });
        }

        require_all_signers(&scope.owners, signers)
    }
}

/// The proposed inputs must name exactly the specification's inputs, once
/// each, with matching type and source. Record-sourced inputs must point at
/// a stored record.
fn validate_inputs(
    view: &dyn MetadataView,
    spec: &RecordSpecification,
    inputs: &[RecordInput],
) -> AuthzResult<()> {
    let mut proposed: HashMap<&str, &RecordInput> = HashMap::with_capacity(inputs.len());
    for input in inputs {
        if proposed.insert(input.name.as_str(), input).is_some() {
            return Err(AuthzError::DuplicateInput(input.name.clone()));
        }
    }

    if let Some(missing) = spec
        .inputs
        .iter()
        .find(|input_spec| !proposed.contains_key(input_spec.name.as_str()))
    {
        return Err(AuthzError::MissingInput(missing.name.clone()));
    }

    let specified: HashMap<&str, &InputSpecification> = spec
        .inputs
        .iter()
        .map(|input_spec| (input_spec.name.as_str(), input_spec))
        .collect();
    if let Some(extra) = inputs
        .iter()
        .find(|input| !specified.contains_key(input.name.as_str()))
    {
        return Err(AuthzError::ExtraInput(extra.name.clone()));
    }

    for input in inputs {
        let Some(input_spec) = specified.get(input.name.as_str()) else {
            continue;
        };
        if input.type_name != input_spec.type_name {
            return Err(AuthzError::InputTypeMismatch {
                name: input.name.clone(),
                got: input.type_name.clone(),
                expected: input_spec.type_name.clone(),
            });
        }
        if let InputSource::Record(record_id) = &input.source {
            if view.get_record(record_id)?.is_none() {
                return Err(AuthzError::SourceRecordNotFound {
                    name: input.name.clone(),
                    record_id: record_id.clone(),
                });
            }
        }
        if input.source.kind() != input_spec.source.kind() {
            return Err(AuthzError::InputSourceKindMismatch {
                name: input.name.clone(),
                got: input.source.kind(),
                expected: input_spec.source.kind(),
            });
        }
        let (got, expected) = (input.source.value(), input_spec.source.value());
        if got != expected {
            return Err(AuthzError::InputSourceMismatch {
                name: input.name.clone(),
                got,
                expected,
            });
        }
    }
    Ok(())
}

fn validate_output_count(result_type: DefinitionType, count: usize) -> AuthzResult<()> {
    match result_type {
        DefinitionType::Record if count != 1 => Err(AuthzError::SingleOutputCount(count)),
        DefinitionType::RecordList if count == 0 => Err(AuthzError::EmptyOutputList),
        _ => Ok(()),
    }
}
