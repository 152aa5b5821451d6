//! Server definition document parsing and validation
//!
//! A definition document is a JSON array. Each element becomes either a
//! network server (`type` is `"http"` or `"sse"`) or a process server.
//!
//! ```rust
//! use mcp_gist_core::definitions::validate;
//!
//! let defs = validate(r#"[{"label": "fs", "command": "npx"}]"#, "inline").unwrap();
//! assert_eq!(defs[0].label(), "fs");
//! ```

mod validator;

pub use validator::{parse_records, validate};
