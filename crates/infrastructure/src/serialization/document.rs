//! Reading YAML/JSON documents and writing deterministic JSON.

use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization or parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// IO error.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// File being read.
        path: String,
        /// Underlying error.
        source: io::Error,
    },
}

/// On-disk document format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json`
    Json,
    /// `.yaml`, `.yml` and anything else
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a path's extension; YAML unless it ends in `.json`.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Deserializes a document from text in the given format.
///
/// # Errors
///
/// Returns an error if the text is invalid or doesn't match the expected type.
pub fn from_document<T: DeserializeOwned>(
    text: &str,
    format: DocumentFormat,
) -> Result<T, SerializationError> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(text)?),
        DocumentFormat::Yaml => Ok(serde_yaml::from_str(text)?),
    }
}

/// Reads and deserializes a YAML or JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, SerializationError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SerializationError::Io {
            path: path.display().to_string(),
            source,
        })?;
    from_document(&text, DocumentFormat::from_path(path))
}
