//! Project metadata read from `package.json`.

use std::path::Path;

use serde_json::Value;

/// Top-level key/value metadata of the project being shipped.
///
/// This is the vocabulary available to `{{key}}` templating. It is read
/// fresh from `package.json` once per resolution and never written back.
#[derive(Debug, Clone)]
pub struct ProjectMetadata {
    fields: serde_json::Map<String, Value>,
}

impl ProjectMetadata {
    /// Read and parse a `package.json` from the given path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, contains invalid JSON,
    /// or its top level is not a JSON object.
    pub fn from_path(path: &Path) -> Result<Self, MetadataError> {
        let content = std::fs::read_to_string(path).map_err(|e| MetadataError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|e| MetadataError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        let Value::Object(fields) = value else {
            return Err(MetadataError::NotAnObject {
                path: path.display().to_string(),
            });
        };
        Ok(Self { fields })
    }

    /// Look up a top-level key and render it as a string.
    ///
    /// Strings are returned verbatim; numbers and booleans are rendered.
    /// Absent keys and structured values (arrays, objects, null) yield
    /// `None`, which leaves the placeholder verbatim during templating.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid package.json at {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid package.json at {path}: top level must be an object")]
    NotAnObject { path: String },
}
