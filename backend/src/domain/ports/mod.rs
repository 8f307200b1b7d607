//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven adapters (storage, catalog source, form service) implement these
//! traits; services depend only on the traits so tests can swap in mocks.

mod macros;
pub(crate) use macros::define_port_error;

mod key_value_store;
mod place_catalog_source;
mod storage_key;
mod suggestion_submitter;

#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{KeyValueStore, KeyValueStoreError};
#[cfg(test)]
pub use place_catalog_source::MockPlaceCatalogSource;
pub use place_catalog_source::{PlaceCatalogSource, PlaceCatalogSourceError};
pub use storage_key::{StorageKey, StorageNamespace, StorageNamespaceValidationError};
#[cfg(test)]
pub use suggestion_submitter::MockSuggestionSubmitter;
pub use suggestion_submitter::{
    FixtureSuggestionSubmitter, SuggestionSubmitter, SuggestionSubmitterError,
};
