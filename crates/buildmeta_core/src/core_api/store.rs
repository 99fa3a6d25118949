use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map as JsonMap, Value as JsonValue};
use tempfile::NamedTempFile;

use super::error::{MetaError, MetaErrorCode};
use super::types::MetaEntry;

/// The persisted character id → entry map.
///
/// Entries are kept as raw JSON so that fields written by other tools survive
/// when a single character is edited. Document key order is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaStore {
    path: PathBuf,
    entries: JsonMap<String, JsonValue>,
}

impl MetaStore {
    /// Reads the store at `path`. A missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self, MetaError> {
        let entries = match fs::read_to_string(path) {
            Ok(text) => parse_document(&text, path)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no existing store, starting empty");
                JsonMap::new()
            }
            Err(e) => {
                return Err(MetaError::new(
                    MetaErrorCode::Io,
                    format!("failed to read {}: {e}", path.display()),
                ));
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn raw(&self, id: &str) -> Option<&JsonValue> {
        self.entries.get(id)
    }

    pub fn entry(&self, id: &str) -> Result<Option<MetaEntry>, MetaError> {
        let Some(value) = self.entries.get(id) else {
            return Ok(None);
        };
        serde_json::from_value(value.clone()).map(Some).map_err(|e| {
            MetaError::new(
                MetaErrorCode::Parse,
                format!("entry {id} in {} is not a meta record: {e}", self.path.display()),
            )
        })
    }

    /// Replaces the whole entry for `id`, keeping its position if it already
    /// existed.
    pub fn upsert(&mut self, id: &str, entry: &MetaEntry) -> Result<(), MetaError> {
        let value = serde_json::to_value(entry).map_err(|e| {
            MetaError::new(
                MetaErrorCode::Parse,
                format!("failed to serialize entry {id}: {e}"),
            )
        })?;
        let replaced = self.entries.insert(id.to_string(), value).is_some();
        tracing::debug!(id, replaced, "store entry updated");
        Ok(())
    }

    /// Writes the full document. The new contents go to a temporary file in
    /// the same directory which then replaces the target.
    pub fn save(&self) -> Result<(), MetaError> {
        let mut rendered = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            MetaError::new(
                MetaErrorCode::Parse,
                format!("failed to render {}: {e}", self.path.display()),
            )
        })?;
        rendered.push('\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let io_err = |e: io::Error| {
            MetaError::new(
                MetaErrorCode::Io,
                format!("failed to write {}: {e}", self.path.display()),
            )
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(rendered.as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;

        tracing::info!(path = %self.path.display(), entries = self.entries.len(), "store written");
        Ok(())
    }
}

fn parse_document(text: &str, path: &Path) -> Result<JsonMap<String, JsonValue>, MetaError> {
    let value: JsonValue = serde_json::from_str(text).map_err(|e| {
        MetaError::new(
            MetaErrorCode::Parse,
            format!("failed to parse {}: {e}", path.display()),
        )
    })?;
    match value {
        JsonValue::Object(entries) => Ok(entries),
        other => Err(MetaError::new(
            MetaErrorCode::Parse,
            format!(
                "{} must contain a JSON object keyed by character id, found {}",
                path.display(),
                json_kind(&other)
            ),
        )),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
