//! Content resolution
//!
//! Turns a source URL into the raw text of its definition document:
//! - Gist URLs (`https://gist.github.com/<owner>/<id>`) and bare gist ids are
//!   read through the gist metadata endpoint, following `raw_url` when the
//!   first file is truncated
//! - Any other absolute URL is fetched with a single GET

mod content_resolver;
mod gist;
mod settings;

pub use content_resolver::ContentResolver;
pub use gist::{gist_id, SourceRef};
pub use settings::{ResolverSettings, DEFAULT_GIST_API_BASE};
