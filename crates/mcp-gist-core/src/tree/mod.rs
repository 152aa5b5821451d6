//! URL browsing tree
//!
//! Roots are the configured URLs; expanding a URL lists the server records
//! published there, read through the resolution cache.

mod labels;
mod provider;

pub use labels::TreeLabels;
pub use provider::TreeProvider;
