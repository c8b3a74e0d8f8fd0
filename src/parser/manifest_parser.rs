use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

use crate::model::{Catalogue, CatalogueManifest, FileContentItem};

/// Errors produced while turning raw manifest bytes into a typed document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The host declared a transport encoding this parser does not support.
    #[error("unsupported content encoding: '{0}'")]
    Decoding(String),

    /// The document is valid YAML but does not fit the manifest shape.
    #[error("invalid manifest structure at '{field_path}': {message}")]
    Mapping { field_path: String, message: String },

    /// The content could not be read at all (bad base64, bad UTF-8,
    /// malformed YAML).
    #[error("unable to read manifest content: {0}")]
    Io(String),

    /// Schema validation failed; every violation found is reported.
    #[error("manifest validation failed: {}", violations.join("; "))]
    Validation { violations: Vec<String> },
}

/// Parses raw manifest file bytes into a [`CatalogueManifest`].
///
/// Deterministic and side-effect free; safe to call repeatedly on the same
/// content. Validation is split out so the catalogue resolver can look the
/// requested entry up first and validate only that entry.
pub struct ManifestParser;

impl ManifestParser {
    /// Decode and parse without validating. Fails with [`ParseError::Decoding`]
    /// on an unsupported declared encoding, [`ParseError::Io`] on unreadable
    /// content or malformed YAML, and [`ParseError::Mapping`] when the YAML
    /// is well-formed but structurally wrong for a manifest.
    pub fn parse(content: &FileContentItem) -> Result<CatalogueManifest, ParseError> {
        let text = Self::decode(content)?;

        let value: serde_yaml::Value = serde_yaml::from_str(&text)
            .map_err(|e| ParseError::Io(e.to_string()))?;

        serde_yaml::from_value(value).map_err(|e| ParseError::Mapping {
            field_path: e
                .location()
                .map(|at| format!("line {}, column {}", at.line(), at.column()))
                .unwrap_or_else(|| "document root".to_string()),
            message: e.to_string(),
        })
    }

    /// Parse and validate the whole document, aggregating every violation.
    pub fn parse_validated(content: &FileContentItem) -> Result<CatalogueManifest, ParseError> {
        let manifest = Self::parse(content)?;
        let violations = manifest.validate();
        if violations.is_empty() {
            Ok(manifest)
        } else {
            Err(ParseError::Validation { violations })
        }
    }

    /// Validate one catalogue entry in isolation.
    pub fn validate_catalogue(catalogue: &Catalogue, name: &str) -> Result<(), ParseError> {
        let violations = catalogue.validate(name);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ParseError::Validation { violations })
        }
    }

    fn decode(content: &FileContentItem) -> Result<String, ParseError> {
        let bytes = match content.encoding.as_deref() {
            None | Some("") | Some("none") | Some("utf-8") => content.bytes.clone(),
            Some("base64") => {
                // The host transports file content with embedded newlines.
                let packed: Vec<u8> = content
                    .bytes
                    .iter()
                    .copied()
                    .filter(|b| !b.is_ascii_whitespace())
                    .collect();
                BASE64
                    .decode(&packed)
                    .map_err(|e| ParseError::Io(format!("invalid base64 content: {}", e)))?
            }
            Some(other) => return Err(ParseError::Decoding(other.to_string())),
        };

        String::from_utf8(bytes).map_err(|e| ParseError::Io(format!("invalid utf-8 content: {}", e)))
    }
}
