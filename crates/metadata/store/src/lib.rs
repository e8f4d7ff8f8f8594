//! Metadata registry storage.
//!
//! This crate defines the storage contract the registry core reads through:
//! - [`KvStore`]: opaque byte keys with prefix iteration
//! - [`InMemoryKvStore`]: deterministic reference backend for tests and tools
//! - [`MetadataKeeper`]: typed entity access keyed by metadata address bytes
//! - [`MetadataView`]: the read-only lookups authorization depends on
//!
//! Validation never writes; only the keeper's `set_*`/`remove_*` methods do.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod error;
pub mod keeper;
pub mod memory;
mod traits;

pub use error::{StoreError, StoreResult};
pub use keeper::MetadataKeeper;
pub use memory::InMemoryKvStore;
pub use traits::{KvStore, MetadataView};
