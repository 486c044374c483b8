//! Keyed JSON objects under a root directory.
//!
//! Keys are `/`-separated relative paths. Writes go to a sibling `.tmp` file
//! and are renamed into place, so readers never see a partial object.

use std::path::{Path, PathBuf};

use crate::error::StorageError;

const TMP_SUFFIX: &str = ".tmp";

fn object_path(root: &Path, key: &str) -> Result<PathBuf, StorageError> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if invalid {
        return Err(StorageError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(key.split('/').fold(root.to_path_buf(), |path, segment| path.join(segment)))
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read an object's bytes.
pub fn get_object(root: &Path, key: &str) -> Result<Vec<u8>, StorageError> {
    let path = object_path(root, key)?;
    match std::fs::read(&path) {
        Ok(body) => Ok(body),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound {
            key: key.to_string(),
        }),
        Err(source) => Err(StorageError::Io { path, source }),
    }
}

/// Write an object atomically, creating parent directories as needed.
pub fn put_object(root: &Path, key: &str, body: &[u8]) -> Result<(), StorageError> {
    let path = object_path(root, key)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    let mut tmp_name = path.clone().into_os_string();
    tmp_name.push(TMP_SUFFIX);
    let tmp_path = PathBuf::from(tmp_name);

    std::fs::write(&tmp_path, body).map_err(io_error(&tmp_path))?;
    std::fs::rename(&tmp_path, &path).map_err(io_error(&path))?;
    Ok(())
}

/// Delete an object. Deleting a missing object is not an error.
pub fn delete_object(root: &Path, key: &str) -> Result<(), StorageError> {
    let path = object_path(root, key)?;
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(StorageError::Io { path, source }),
    }
}

/// Keys of the objects directly under `prefix` (which must end in `/`),
/// sorted ascending. In-flight temp files are skipped.
pub fn list_objects(root: &Path, prefix: &str) -> Result<Vec<String>, StorageError> {
    let dir = object_path(root, prefix.trim_end_matches('/'))?;
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(StorageError::Io { path: dir, source }),
    };

    let mut keys = Vec::new();
    for entry in entries {
        let entry = entry.map_err(io_error(&dir))?;
        let file_type = entry.file_type().map_err(io_error(&dir))?;
        if !file_type.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.ends_with(TMP_SUFFIX) {
            continue;
        }
        keys.push(format!("{prefix}{name}"));
    }
    keys.sort();
    Ok(keys)
}

/// Delete every object directly under `prefix`. Returns how many were removed.
pub fn delete_objects_by_prefix(root: &Path, prefix: &str) -> Result<usize, StorageError> {
    let keys = list_objects(root, prefix)?;
    for key in &keys {
        delete_object(root, key)?;
    }
    Ok(keys.len())
}
