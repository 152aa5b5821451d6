//! Definition document validation
//!
//! Turns the raw text of a definition document into server records, and
//! records into [`ServerDefinition`] variants.

use serde_json::Value;
use url::Url;

use crate::error::{DefinitionError, DefinitionResult};
use crate::types::{
    NetworkDefinition, ProcessDefinition, ServerDefinition, ServerRecord, UNKNOWN_SERVER_LABEL,
};

/// Parse a definition document into its records
///
/// The document must be a JSON array of objects. Records are returned in
/// document order without variant checks; the tree view displays these as-is.
pub fn parse_records(text: &str, url: &str) -> DefinitionResult<Vec<ServerRecord>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| DefinitionError::validation(url, format!("parse failure: {}", e)))?;

    let Value::Array(entries) = value else {
        return Err(DefinitionError::validation(url, "not an array"));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            if !entry.is_object() {
                return Err(DefinitionError::validation(
                    url,
                    format!("entry {} is not an object", index),
                ));
            }
            serde_json::from_value(entry).map_err(|e| {
                DefinitionError::validation(url, format!("entry {}: {}", index, e))
            })
        })
        .collect()
}

/// Parse and validate a definition document
pub fn validate(text: &str, url: &str) -> DefinitionResult<Vec<ServerDefinition>> {
    parse_records(text, url)?
        .into_iter()
        .enumerate()
        .map(|(index, record)| ServerDefinition::from_record(record, url, index))
        .collect()
}

impl ServerDefinition {
    /// Map a record to its definition variant
    ///
    /// `type` of `"http"` or `"sse"` selects [`NetworkDefinition`] and requires a
    /// well-formed `uri`; anything else selects [`ProcessDefinition`] and
    /// requires `command`. A missing label becomes [`UNKNOWN_SERVER_LABEL`].
    pub fn from_record(record: ServerRecord, url: &str, index: usize) -> DefinitionResult<Self> {
        let label = record.display_label().to_string();

        if let Some(transport) = record.transport() {
            let raw_uri = record.uri.as_deref().ok_or_else(|| {
                DefinitionError::validation(url, format!("entry {} ({}): missing uri", index, label))
            })?;
            let uri = Url::parse(raw_uri).map_err(|e| {
                DefinitionError::validation(
                    url,
                    format!("entry {} ({}): invalid uri '{}': {}", index, label, raw_uri, e),
                )
            })?;

            return Ok(Self::Network(NetworkDefinition {
                label,
                uri,
                headers: record.headers.unwrap_or_default(),
                version: record.version,
                transport,
            }));
        }

        let command = match record.command {
            Some(command) if !command.trim().is_empty() => command,
            _ => {
                return Err(DefinitionError::validation(
                    url,
                    format!("entry {} ({}): missing command", index, label),
                ))
            }
        };

        Ok(Self::Process(ProcessDefinition {
            label,
            command,
            args: record.args.unwrap_or_default(),
            env: record.env.unwrap_or_default(),
            version: record.version,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::NetworkTransport;

    const URL: &str = "https://example.com/servers.json";

    #[test]
    fn test_network_definition() {
        let text = r#"[{
            "label": "remote",
            "type": "http",
            "uri": "https://x/y",
            "headers": { "Authorization": "Bearer t" },
            "version": "1.0.0"
        }]"#;

        let defs = validate(text, URL).unwrap();
        assert_eq!(defs.len(), 1);

        let ServerDefinition::Network(def) = &defs[0] else {
            panic!("expected network definition");
        };
        assert_eq!(def.label, "remote");
        assert_eq!(def.uri.as_str(), "https://x/y");
        assert_eq!(def.headers.get("Authorization").map(String::as_str), Some("Bearer t"));
        assert_eq!(def.version.as_deref(), Some("1.0.0"));
        assert_eq!(def.transport, NetworkTransport::Http);
    }

    #[test]
    fn test_sse_headers_default_empty() {
        let text = r#"[{ "label": "events", "type": "sse", "uri": "https://example.com/sse" }]"#;

        let defs = validate(text, URL).unwrap();
        let ServerDefinition::Network(def) = &defs[0] else {
            panic!("expected network definition");
        };
        assert_eq!(def.transport, NetworkTransport::Sse);
        assert!(def.headers.is_empty());
        assert!(def.version.is_none());
    }

    #[test]
    fn test_process_definition_defaults() {
        let text = r#"[{ "label": "fs", "command": "npx" }]"#;

        let defs = validate(text, URL).unwrap();
        let ServerDefinition::Process(def) = &defs[0] else {
            panic!("expected process definition");
        };
        assert_eq!(def.command, "npx");
        assert!(def.args.is_empty());
        assert!(def.env.is_empty());
        assert!(def.version.is_none());
    }

    #[test]
    fn test_unknown_type_is_process() {
        let text = r#"[{ "label": "local", "type": "stdio", "command": "node", "args": ["server.js"], "env": { "PORT": "3000" } }]"#;

        let defs = validate(text, URL).unwrap();
        let ServerDefinition::Process(def) = &defs[0] else {
            panic!("expected process definition");
        };
        assert_eq!(def.args, vec!["server.js".to_string()]);
        assert_eq!(def.env.get("PORT").map(String::as_str), Some("3000"));
    }

    #[test]
    fn test_missing_label_uses_default() {
        let defs = validate(r#"[{ "command": "uvx" }]"#, URL).unwrap();
        assert_eq!(defs[0].label(), UNKNOWN_SERVER_LABEL);
    }

    #[test]
    fn test_order_preserved() {
        let text = r#"[
            { "label": "a", "command": "a" },
            { "label": "b", "type": "http", "uri": "https://b.example.com/mcp" },
            { "label": "c", "command": "c" }
        ]"#;

        let labels: Vec<_> = validate(text, URL)
            .unwrap()
            .iter()
            .map(|d| d.label().to_string())
            .collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_not_an_array() {
        let err = validate(r#"{"a":1}"#, URL).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("not an array"));
        assert!(err.to_string().contains(URL));
    }

    #[test]
    fn test_parse_failure() {
        let err = validate("[{", URL).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("parse failure"));
    }

    #[test]
    fn test_invalid_uri() {
        let err = validate(r#"[{ "label": "bad", "type": "http", "uri": "not a uri" }]"#, URL).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("invalid uri"));
    }

    #[test]
    fn test_missing_required_fields() {
        let err = validate(r#"[{ "label": "net", "type": "sse" }]"#, URL).unwrap_err();
        assert!(err.to_string().contains("missing uri"));

        let err = validate(r#"[{ "label": "proc" }]"#, URL).unwrap_err();
        assert!(err.to_string().contains("missing command"));
    }

    #[test]
    fn test_non_object_entry() {
        let err = parse_records(r#"[{ "command": "a" }, 42]"#, URL).unwrap_err();
        assert!(err.to_string().contains("entry 1 is not an object"));
    }

    #[test]
    fn test_parse_records_skips_variant_checks() {
        let records = parse_records(r#"[{ "label": "incomplete", "type": "http" }]"#, URL).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label.as_deref(), Some("incomplete"));
    }
}
