//! URL store abstractions
//!
//! Supports multiple storage backends:
//! - `MemoryUrlStore`: In-memory for testing and host-managed state
//! - `FileUrlStore`: YAML file-based (user/workspace level)

mod traits;
mod memory;
mod file;

pub use traits::{UrlStore, StoreError, StoreResult};
pub use memory::MemoryUrlStore;
pub use file::{FileUrlStore, UrlsFile, StoreLevel};
