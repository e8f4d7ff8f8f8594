//! Typed access to registry entities over a [`KvStore`].
//!
//! Entities are JSON-encoded and keyed by their metadata address bytes, so
//! the address type tag doubles as the key prefix of each entity family.

use metadata_types::{
    AddressKind, ContractSpecification, MetadataAddress, Record, RecordSpecification, Scope,
    ScopeSpecification, Session,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::traits::{KvStore, MetadataView};
use crate::{StoreError, StoreResult};

fn expect_kind(id: &MetadataAddress, expected: AddressKind) -> StoreResult<()> {
    if id.kind() != expected {
        return Err(StoreError::WrongKind {
            expected,
            got: id.kind(),
        });
    }
    Ok(())
}

/// Reads and writes registry entities.
#[derive(Debug, Default)]
pub struct MetadataKeeper<S: KvStore> {
    store: S,
}

impl<S: KvStore> MetadataKeeper<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load<T: DeserializeOwned>(
        &self,
        id: &MetadataAddress,
        kind: AddressKind,
    ) -> StoreResult<Option<T>> {
        expect_kind(id, kind)?;
        match self.store.get(id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn save<T: Serialize>(
        &self,
        id: &MetadataAddress,
        kind: AddressKind,
        entity: &T,
    ) -> StoreResult<()> {
        expect_kind(id, kind)?;
        let bytes = serde_json::to_vec(entity)?;
        self.store.set(id.as_bytes(), bytes)?;
        debug!(id = %id, "Entry stored");
        Ok(())
    }

    fn remove(&self, id: &MetadataAddress, kind: AddressKind) -> StoreResult<()> {
        expect_kind(id, kind)?;
        self.store.delete(id.as_bytes())?;
        debug!(id = %id, "Entry removed");
        Ok(())
    }

    fn load_prefix<T: DeserializeOwned>(&self, prefix: &[u8]) -> StoreResult<Vec<T>> {
        self.store
            .iterate_prefix(prefix)?
            .into_iter()
            .map(|(_, bytes)| serde_json::from_slice(&bytes).map_err(StoreError::from))
            .collect()
    }

    pub fn set_scope(&self, scope: &Scope) -> StoreResult<()> {
        self.save(&scope.id, AddressKind::Scope, scope)
    }

    pub fn remove_scope(&self, id: &MetadataAddress) -> StoreResult<()> {
        self.remove(id, AddressKind::Scope)
    }

    pub fn set_session(&self, session: &Session) -> StoreResult<()> {
        self.save(&session.id, AddressKind::Session, session)
    }

    pub fn remove_session(&self, id: &MetadataAddress) -> StoreResult<()> {
        self.remove(id, AddressKind::Session)
    }

    /// Store a record under the id derived from its session and name.
    pub fn set_record(&self, record: &Record) -> StoreResult<()> {
        let id = record.id()?;
        self.save(&id, AddressKind::Record, record)
    }

    pub fn remove_record(&self, id: &MetadataAddress) -> StoreResult<()> {
        self.remove(id, AddressKind::Record)
    }

    pub fn set_scope_specification(&self, spec: &ScopeSpecification) -> StoreResult<()> {
        self.save(&spec.id, AddressKind::ScopeSpecification, spec)
    }

    pub fn remove_scope_specification(&self, id: &MetadataAddress) -> StoreResult<()> {
        self.remove(id, AddressKind::ScopeSpecification)
    }

    pub fn set_contract_specification(&self, spec: &ContractSpecification) -> StoreResult<()> {
        self.save(&spec.id, AddressKind::ContractSpecification, spec)
    }

    pub fn remove_contract_specification(&self, id: &MetadataAddress) -> StoreResult<()> {
        self.remove(id, AddressKind::ContractSpecification)
    }

    pub fn set_record_specification(&self, spec: &RecordSpecification) -> StoreResult<()> {
        self.save(&spec.id, AddressKind::RecordSpecification, spec)
    }

    pub fn remove_record_specification(&self, id: &MetadataAddress) -> StoreResult<()> {
        self.remove(id, AddressKind::RecordSpecification)
    }

    /// Sessions in the scope `id` belongs to.
    pub fn sessions_in_scope(&self, id: &MetadataAddress) -> StoreResult<Vec<Session>> {
        self.load_prefix(&id.scope_session_prefix()?)
    }

    /// Records in the scope `id` belongs to.
    pub fn records_in_scope(&self, id: &MetadataAddress) -> StoreResult<Vec<Record>> {
        self.load_prefix(&id.scope_record_prefix()?)
    }

    pub fn record_specifications_for_contract(
        &self,
        contract_spec_id: &MetadataAddress,
    ) -> StoreResult<Vec<RecordSpecification>> {
        self.load_prefix(&contract_spec_id.contract_specification_record_spec_prefix()?)
    }
}

impl<S: KvStore> MetadataView for MetadataKeeper<S> {
    fn get_scope(&self, id: &MetadataAddress) -> StoreResult<Option<Scope>> {
        self.load(id, AddressKind::Scope)
    }

    fn get_session(&self, id: &MetadataAddress) -> StoreResult<Option<Session>> {
        self.load(id, AddressKind::Session)
    }

    fn get_record(&self, id: &MetadataAddress) -> StoreResult<Option<Record>> {
        self.load(id, AddressKind::Record)
    }

    fn get_scope_specification(
        &self,
        id: &MetadataAddress,
    ) -> StoreResult<Option<ScopeSpecification>> {
        self.load(id, AddressKind::ScopeSpecification)
    }

    fn get_contract_specification(
        &self,
        id: &MetadataAddress,
    ) -> StoreResult<Option<ContractSpecification>> {
        self.load(id, AddressKind::ContractSpecification)
    }

    fn get_record_specification(
        &self,
        id: &MetadataAddress,
    ) -> StoreResult<Option<RecordSpecification>> {
        self.load(id, AddressKind::RecordSpecification)
    }

    fn contains(&self, id: &MetadataAddress) -> StoreResult<bool> {
        self.store.has(id.as_bytes())
    }
}
