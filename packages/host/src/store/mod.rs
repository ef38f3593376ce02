//! Credential and static data stores
//!
//! - In-memory stores for tests and embedded hosts
//! - JSON file store for single-process tools that must survive restarts

mod file;
mod memory;

pub use file::FileStaticData;
pub use memory::{MemoryCredentialStore, MemoryStaticData};
