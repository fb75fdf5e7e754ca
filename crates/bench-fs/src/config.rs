//! Format-agnostic document loading and saving

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// Indentation used for every JSON document a bench writes.
const JSON_INDENT: &[u8] = b"    ";

/// Format-agnostic document store.
///
/// Detects the format from the file extension and handles
/// serialization/deserialization transparently. Output is deterministic:
/// the same value always serializes to the same bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load a document from a file.
    ///
    /// Format is detected from file extension:
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    ///
    /// A file containing only whitespace is parsed as an empty JSON object or
    /// empty TOML table.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let content = io::read_text(path)?;
        self.parse(path, &content)
    }

    /// Load a document, returning `None` if the file does not exist.
    pub fn load_opt<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<Option<T>> {
        match io::read_text_opt(path)? {
            Some(content) => self.parse(path, &content).map(Some),
            None => Ok(None),
        }
    }

    fn parse<T: DeserializeOwned>(&self, path: &NormalizedPath, content: &str) -> Result<T> {
        let extension = path.extension().unwrap_or("");

        match extension.to_lowercase().as_str() {
            "toml" => toml::from_str(content).map_err(|e| Error::ConfigParse {
                path: path.to_native(),
                format: "TOML".into(),
                message: e.to_string(),
            }),
            "json" => {
                let content = if content.trim().is_empty() {
                    "{}"
                } else {
                    content
                };
                serde_json::from_str(content).map_err(|e| Error::ConfigParse {
                    path: path.to_native(),
                    format: "JSON".into(),
                    message: e.to_string(),
                })
            }
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Render a value as JSON. Benches only ever write JSON documents; TOML
    /// is read-only (`pyproject.toml`).
    pub fn render<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<String> {
        let extension = path.extension().unwrap_or("");

        match extension.to_lowercase().as_str() {
            "json" => {
                let mut buf = Vec::new();
                let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
                let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
                value
                    .serialize(&mut ser)
                    .map_err(|e| Error::ConfigSerialize {
                        path: path.to_native(),
                        format: "JSON".into(),
                        message: e.to_string(),
                    })?;
                buf.push(b'\n');
                String::from_utf8(buf).map_err(|e| Error::ConfigSerialize {
                    path: path.to_native(),
                    format: "JSON".into(),
                    message: e.to_string(),
                })
            }
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Save a document to a file.
    ///
    /// The whole file is replaced atomically.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let content = self.render(path, value)?;
        io::write_atomic(path, content.as_bytes())
    }
}
