//! JSON artifact loading and saving

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::ser::PrettyFormatter;

use crate::{Error, Result, io};

/// Load and parse a JSON artifact.
///
/// Malformed content is reported as [`Error::ArtifactParse`] with the path.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = io::read_bytes(path)?;
    serde_json::from_slice(&content).map_err(|e| Error::ArtifactParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Render a value as tab-indented JSON.
pub fn to_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| Error::ArtifactSerialize {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(out)
}

/// Serialize and atomically save a JSON artifact.
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = to_pretty_json(path, value)?;
    io::write_atomic(path, &content)
}
