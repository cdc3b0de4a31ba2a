//! YAML decoding into caller-supplied types.
//!
//! Decoding always produces a *fresh* value: the result replaces the
//! previous snapshot wholesale, so fields dropped from the remote
//! document disappear, and a failed decode can never leave a snapshot
//! half-written.

use serde::de::DeserializeOwned;

use crate::errors::DecodeError;

/// Longest payload excerpt embedded in a decode error.
const SNIPPET_LEN: usize = 256;

/// Decode `bytes` as a YAML document into a fresh `T`.
pub fn decode_yaml<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    serde_yaml::from_slice(bytes).map_err(|source| DecodeError::MalformedPayload {
        source,
        snippet: payload_snippet(bytes),
    })
}

/// Lossy, truncated rendering of the offending payload for diagnostics.
fn payload_snippet(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let mut snippet: String = text.chars().take(SNIPPET_LEN).collect();
    if snippet.len() < text.len() {
        snippet.push_str("...");
    }
    snippet
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        #[serde(default)]
        name: String,
        #[serde(default)]
        port: u16,
        #[serde(default)]
        tags: Vec<String>,
    }

    #[test]
    fn test_decode_well_formed_document() {
        let doc = b"name: api\nport: 8080\ntags:\n  - a\n  - b\n";
        let sample: Sample = decode_yaml(doc).unwrap();
        assert_eq!(sample.name, "api");
        assert_eq!(sample.port, 8080);
        assert_eq!(sample.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_decode_missing_fields_fall_back_to_defaults() {
        let sample: Sample = decode_yaml(b"name: api\n").unwrap();
        assert_eq!(sample.name, "api");
        assert_eq!(sample.port, 0);
        assert!(sample.tags.is_empty());
    }

    #[test]
    fn test_shape_mismatch_is_malformed_payload() {
        // A sequence where a mapping is expected.
        let err = decode_yaml::<Sample>(b"- 1\n- 2\n").unwrap_err();
        let DecodeError::MalformedPayload { snippet, .. } = err;
        assert!(snippet.contains("- 1"));
    }

    #[test]
    fn test_invalid_yaml_is_malformed_payload() {
        let err = decode_yaml::<Sample>(b"name: [unterminated\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("malformed configuration payload"));
        assert!(msg.contains("unterminated"));
    }

    #[test]
    fn test_snippet_is_truncated() {
        let long = format!("name: {}\n", "x".repeat(2048));
        let err = decode_yaml::<Vec<String>>(long.as_bytes()).unwrap_err();
        let DecodeError::MalformedPayload { snippet, .. } = err;
        assert!(snippet.len() <= SNIPPET_LEN + 3);
        assert!(snippet.ends_with("..."));
    }
}
