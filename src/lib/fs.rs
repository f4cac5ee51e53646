//! Settings file helpers: JSON read and 4-space pretty write.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::lib::errors::SettingsError;

/// Indentation used for every settings file the launcher writes.
const JSON_INDENT: &[u8] = b"    ";

/// Read and deserialize a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SettingsError> {
    let content = fs::read_to_string(path)
        .map_err(|err| SettingsError::from_read_error(path.to_path_buf(), err))?;
    serde_json::from_str(&content)
        .map_err(|err| SettingsError::from_parse_error(path.to_path_buf(), err))
}

/// Serialize `value` as pretty JSON with 4-space indentation.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Overwrite `path` with the pretty JSON form of `value`.
///
/// Parent directories are created when missing.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), SettingsError> {
    let bytes = to_pretty_json(value).map_err(|err| {
        SettingsError::from_write_error(path.to_path_buf(), std::io::Error::other(err))
    })?;

    if let Some(parent) = non_empty_parent(path) {
        fs::create_dir_all(&parent)
            .map_err(|err| SettingsError::from_write_error(path.to_path_buf(), err))?;
    }

    fs::write(path, bytes).map_err(|err| SettingsError::from_write_error(path.to_path_buf(), err))
}

fn non_empty_parent(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
}
