use metadata_types::{
    ContractSpecification, MetadataAddress, Record, RecordSpecification, Scope, ScopeSpecification,
    Session,
};

use crate::StoreResult;

/// Opaque keyed storage with prefix iteration.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    fn set(&self, key: &[u8], value: Vec<u8>) -> StoreResult<()>;

    fn delete(&self, key: &[u8]) -> StoreResult<()>;

    /// All entries whose key starts with `prefix`, in ascending key order.
    fn iterate_prefix(&self, prefix: &[u8]) -> StoreResult<Vec<(Vec<u8>, Vec<u8>)>>;
}

/// Typed, read-only lookups of stored registry entities.
pub trait MetadataView: Send + Sync {
    fn get_scope(&self, id: &MetadataAddress) -> StoreResult<Option<Scope>>;

    fn get_session(&self, id: &MetadataAddress) -> StoreResult<Option<Session>>;

    fn get_record(&self, id: &MetadataAddress) -> StoreResult<Option<Record>>;

    fn get_scope_specification(
        &self,
        id: &MetadataAddress,
    ) -> StoreResult<Option<ScopeSpecification>>;

    fn get_contract_specification(
        &self,
        id: &MetadataAddress,
    ) -> StoreResult<Option<ContractSpecification>>;

    fn get_record_specification(
        &self,
        id: &MetadataAddress,
    ) -> StoreResult<Option<RecordSpecification>>;

    /// Whether any entity is stored under `id`.
    fn contains(&self, id: &MetadataAddress) -> StoreResult<bool>;
}
