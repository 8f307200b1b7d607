//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **catalog**: venue lists compiled into the binary
//! - **storage**: per-client key-value stores (memory, directory)
//! - **forms**: hosted form service receiving place suggestions
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod catalog;
pub mod forms;
pub mod storage;
