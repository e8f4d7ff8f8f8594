//! Structural ("basic") validation of registry entities.
//!
//! These checks need no stored state: address kinds, required fields,
//! well-formed account addresses and size limits. Authorization layers run
//! them first and forward their errors unchanged.

use std::sync::Arc;

use crate::address::{AddressKind, MetadataAddress};
use crate::codec::{AddressCodec, PlainAddressCodec};
use crate::error::{ValidationError, ValidationResult};
use crate::limits::ValidationLimits;
use crate::party::Party;
use crate::record::{
    InputSource, Process, Record, RecordInput, RecordInputStatus, RecordOutput, ResultStatus,
};
use crate::scope::Scope;
use crate::session::Session;
use crate::specification::{
    ContractSource, ContractSpecification, DefinitionType, Description, InputSpecification,
    RecordSpecification, ScopeSpecification,
};

const URL_PROTOCOLS: [&str; 3] = ["http://", "https://", "data:"];

fn expect_kind(
    entity: &'static str,
    address: &MetadataAddress,
    expected: AddressKind,
) -> ValidationResult<()> {
    if address.kind() != expected {
        return Err(ValidationError::WrongIdentifierKind {
            entity,
            expected,
            got: address.kind(),
        });
    }
    Ok(())
}

fn field_path(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("({path}) {field}")
    }
}

/// Structural validator configured with an address codec and size limits.
#[derive(Clone)]
pub struct BasicValidator {
    codec: Arc<dyn AddressCodec>,
    limits: ValidationLimits,
}

impl Default for BasicValidator {
    fn default() -> Self {
        Self::new(Arc::new(PlainAddressCodec), ValidationLimits::default())
    }
}

impl std::fmt::Debug for BasicValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicValidator")
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl BasicValidator {
    pub fn new(codec: Arc<dyn AddressCodec>, limits: ValidationLimits) -> Self {
        Self { codec, limits }
    }

    pub fn codec(&self) -> &dyn AddressCodec {
        self.codec.as_ref()
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    pub fn validate_party(&self, party: &Party) -> ValidationResult<()> {
        if party.address.is_empty() {
            return Err(ValidationError::MissingPartyAddress);
        }
        self.codec
            .decode(&party.address)
            .map_err(|source| ValidationError::InvalidPartyAddress {
                address: party.address.clone(),
                source,
            })?;
        if !party.role.is_specified() {
            return Err(ValidationError::InvalidPartyType(party.address.clone()));
        }
        Ok(())
    }

    /// A required, duplicate-free list of parties.
    pub fn validate_parties(&self, parties: &[Party]) -> ValidationResult<()> {
        if parties.is_empty() {
            return Err(ValidationError::NoParties);
        }
        for (i, party) in parties.iter().enumerate() {
            self.validate_party(party)?;
            if parties[i + 1..].contains(party) {
                return Err(ValidationError::DuplicateOwner {
                    address: party.address.clone(),
                    role: party.role,
                });
            }
        }
        Ok(())
    }

    pub fn validate_scope(&self, scope: &Scope) -> ValidationResult<()> {
        expect_kind("scope", &scope.id, AddressKind::Scope)?;
        if let Some(spec_id) = &scope.specification_id {
            expect_kind("scope specification", spec_id, AddressKind::ScopeSpecification)?;
        }
        self.validate_parties(&scope.owners)
            .map_err(|e| ValidationError::InvalidScopeOwners(Box::new(e)))?;
        for address in &scope.data_access {
            self.codec
                .decode(address)
                .map_err(ValidationError::InvalidDataAccess)?;
        }
        if let Some(value_owner) = scope.value_owner() {
            self.codec
                .decode(value_owner)
                .map_err(ValidationError::InvalidValueOwner)?;
        }
        Ok(())
    }

    pub fn validate_session(&self, session: &Session) -> ValidationResult<()> {
        expect_kind("session", &session.id, AddressKind::Session)?;
        if session.parties.is_empty() {
            return Err(ValidationError::SessionWithoutParties);
        }
        for party in &session.parties {
            self.validate_party(party)
                .map_err(|e| ValidationError::InvalidSessionParty(Box::new(e)))?;
        }
        expect_kind(
            "contract specification",
            &session.specification_id,
            AddressKind::ContractSpecification,
        )?;
        if let Some(audit) = &session.audit {
            let max = self.limits.max_audit_message_length;
            if audit.message.len() > max {
                return Err(ValidationError::AuditMessageTooLong {
                    max,
                    actual: audit.message.len(),
                });
            }
        }
        Ok(())
    }

    pub fn validate_record(&self, record: &Record) -> ValidationResult<()> {
        expect_kind("record", &record.session_id, AddressKind::Session)?;
        if let Some(spec_id) = &record.specification_id {
            expect_kind("record specification", spec_id, AddressKind::RecordSpecification)?;
        }
        for input in &record.inputs {
            self.validate_record_input(input)
                .map_err(|e| ValidationError::InvalidRecordInput(Box::new(e)))?;
        }
        for output in &record.outputs {
            self.validate_record_output(output)
                .map_err(|e| ValidationError::InvalidRecordOutput(Box::new(e)))?;
        }
        if record.name.is_empty() {
            return Err(ValidationError::MissingRecordName);
        }
        self.validate_process(&record.process)
            .map_err(|e| ValidationError::InvalidRecordProcess(Box::new(e)))
    }

    pub fn validate_record_input(&self, input: &RecordInput) -> ValidationResult<()> {
        if input.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if input.status == RecordInputStatus::Unknown {
            return Err(ValidationError::UnknownInputStatus);
        }
        match &input.source {
            InputSource::Hash(hash) => {
                if input.status != RecordInputStatus::Proposed {
                    return Err(ValidationError::HashSourceRequiresProposed);
                }
                if hash.is_empty() {
                    return Err(ValidationError::MissingProposedHash);
                }
            }
            InputSource::Record(record_id) => {
                if input.status != RecordInputStatus::Record {
                    return Err(ValidationError::RecordSourceRequiresRecord);
                }
                if !record_id.is_kind(AddressKind::Record) {
                    return Err(ValidationError::RecordSourceNotARecord(record_id.kind()));
                }
            }
        }
        if input.type_name.is_empty() {
            return Err(ValidationError::MissingTypeName);
        }
        Ok(())
    }

    pub fn validate_record_output(&self, output: &RecordOutput) -> ValidationResult<()> {
        match output.status {
            ResultStatus::Skip => Ok(()),
            ResultStatus::Unspecified => Err(ValidationError::UnspecifiedOutputStatus),
            _ if output.hash.is_empty() => Err(ValidationError::MissingOutputHash),
            _ => Ok(()),
        }
    }

    pub fn validate_process(&self, process: &Process) -> ValidationResult<()> {
        if process.method.is_empty() {
            return Err(ValidationError::MissingMethod);
        }
        if process.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if !process.has_process_id() {
            return Err(ValidationError::MissingProcessId);
        }
        Ok(())
    }

    /// `path` names the owning field in error messages, e.g.
    /// `"ScopeSpecification.Description"`.
    pub fn validate_description(
        &self,
        description: &Description,
        path: &str,
    ) -> ValidationResult<()> {
        let limits = &self.limits;
        if description.name.is_empty() {
            return Err(ValidationError::EmptyDescriptionName {
                field: field_path(path, "Name"),
            });
        }
        if description.name.len() > limits.max_description_name_length {
            return Err(ValidationError::DescriptionTooLong {
                field: field_path(path, "Name"),
                max: limits.max_description_name_length,
                actual: description.name.len(),
            });
        }
        if description.description.len() > limits.max_description_length {
            return Err(ValidationError::DescriptionTooLong {
                field: field_path(path, "Description"),
                max: limits.max_description_length,
                actual: description.description.len(),
            });
        }
        self.validate_url(&description.website_url, path, "WebsiteUrl")?;
        self.validate_url(&description.icon_url, path, "IconUrl")
    }

    fn validate_url(&self, url: &str, path: &str, field: &str) -> ValidationResult<()> {
        if url.is_empty() {
            return Ok(());
        }
        if url.len() > self.limits.max_url_length {
            return Err(ValidationError::UrlTooLong {
                field: field_path(path, field),
                max: self.limits.max_url_length,
                actual: url.len(),
            });
        }
        if !URL_PROTOCOLS.iter().any(|protocol| url.starts_with(protocol)) {
            return Err(ValidationError::UrlProtocol {
                field: field_path(path, field),
            });
        }
        Ok(())
    }

    pub fn validate_scope_specification(&self, spec: &ScopeSpecification) -> ValidationResult<()> {
        expect_kind("scope specification", &spec.id, AddressKind::ScopeSpecification)?;
        if let Some(description) = &spec.description {
            self.validate_description(description, "ScopeSpecification.Description")?;
        }
        if spec.owner_addresses.is_empty() {
            return Err(ValidationError::ScopeSpecWithoutOwners);
        }
        for (index, owner) in spec.owner_addresses.iter().enumerate() {
            self.codec
                .decode(owner)
                .map_err(|source| ValidationError::InvalidScopeSpecOwner { index, source })?;
        }
        if spec.parties_involved.is_empty() {
            return Err(ValidationError::ScopeSpecWithoutParties);
        }
        for (index, contract_spec_id) in spec.contract_spec_ids.iter().enumerate() {
            if !contract_spec_id.is_kind(AddressKind::ContractSpecification) {
                return Err(ValidationError::WrongContractSpecIdKind {
                    index,
                    expected: AddressKind::ContractSpecification,
                    got: contract_spec_id.kind(),
                });
            }
        }
        Ok(())
    }

    pub fn validate_contract_specification(
        &self,
        spec: &ContractSpecification,
    ) -> ValidationResult<()> {
        expect_kind("contract specification", &spec.id, AddressKind::ContractSpecification)?;
        if let Some(description) = &spec.description {
            self.validate_description(description, "ContractSpecification.Description")?;
        }
        if spec.owner_addresses.is_empty() {
            return Err(ValidationError::ContractSpecOwnerCount(0));
        }
        for (index, owner) in spec.owner_addresses.iter().enumerate() {
            self.codec
                .decode(owner)
                .map_err(|source| ValidationError::InvalidContractSpecOwner { index, source })?;
        }
        if spec.parties_involved.is_empty() {
            return Err(ValidationError::ContractSpecPartyCount(0));
        }
        if let ContractSource::Hash(hash) = &spec.source {
            if hash.is_empty() {
                return Err(ValidationError::EmptySourceHash);
            }
        }
        if spec.class_name.is_empty() {
            return Err(ValidationError::EmptyClassName);
        }
        if spec.class_name.len() > self.limits.max_class_name_length {
            return Err(ValidationError::ClassNameTooLong {
                max: self.limits.max_class_name_length,
                actual: spec.class_name.len(),
            });
        }
        Ok(())
    }

    pub fn validate_record_specification(
        &self,
        spec: &RecordSpecification,
    ) -> ValidationResult<()> {
        expect_kind("record specification", &spec.id, AddressKind::RecordSpecification)?;
        if spec.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        let expected = spec.id.as_record_specification_address(&spec.name)?;
        if expected != spec.id {
            return Err(ValidationError::RecordSpecIdMismatch {
                expected: expected.to_string(),
                got: spec.id.to_string(),
            });
        }
        if spec.type_name.is_empty() {
            return Err(ValidationError::MissingTypeName);
        }
        if spec.result_type == DefinitionType::Unspecified {
            return Err(ValidationError::UnspecifiedResultType);
        }
        for input in &spec.inputs {
            self.validate_input_specification(input)
                .map_err(|e| ValidationError::InvalidInputSpecification(Box::new(e)))?;
        }
        for (index, role) in spec.responsible_parties.iter().enumerate() {
            if !role.is_specified() {
                return Err(ValidationError::InvalidResponsibleParty(index));
            }
        }
        Ok(())
    }

    pub fn validate_input_specification(&self, input: &InputSpecification) -> ValidationResult<()> {
        if input.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if input.type_name.is_empty() {
            return Err(ValidationError::MissingTypeName);
        }
        match &input.source {
            InputSource::Hash(hash) if hash.is_empty() => Err(ValidationError::MissingProposedHash),
            InputSource::Record(record_id) if !record_id.is_kind(AddressKind::Record) => {
                Err(ValidationError::RecordSourceNotARecord(record_id.kind()))
            }
            _ => Ok(()),
        }
    }
}
