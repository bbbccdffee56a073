/*! Key-value preference backends for the layout store. */

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use parking_lot::Mutex;

use crate::types::{DeskframeError, DeskframeResult};

/// Per-app key-value store holding opaque byte values.
pub trait Preferences: Send + Sync + 'static {
  /// Value stored under `key`, if any.
  fn get(&self, key: &str) -> DeskframeResult<Option<Vec<u8>>>;

  fn set(&self, key: &str, value: &[u8]) -> DeskframeResult<()>;

  /// Delete `key`. Deleting a missing key is not an error.
  fn remove(&self, key: &str) -> DeskframeResult<()>;
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FilePreferences {
  dir: PathBuf,
}

impl FilePreferences {
  /// Store files under `dir`, created on first write.
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  /// The per-user application-support directory for deskframe.
  pub fn default_location() -> DeskframeResult<Self> {
    let dirs = ProjectDirs::from("com", "deskframe", "deskframe").ok_or_else(|| {
      DeskframeError::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "could not determine application directories",
      ))
    })?;
    Ok(Self::new(dirs.data_dir()))
  }

  /// Directory holding the files.
  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn path(&self, key: &str) -> PathBuf {
    self.dir.join(format!("{key}.json"))
  }
}

impl Preferences for FilePreferences {
  fn get(&self, key: &str) -> DeskframeResult<Option<Vec<u8>>> {
    match std::fs::read(self.path(key)) {
      Ok(bytes) => Ok(Some(bytes)),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  /// Written to a temporary file first, then renamed over the old value.
  fn set(&self, key: &str, value: &[u8]) -> DeskframeResult<()> {
    std::fs::create_dir_all(&self.dir)?;
    let mut file = tempfile::NamedTempFile::new_in(&self.dir)?;
    file.write_all(value)?;
    file.as_file().sync_all()?;
    file.persist(self.path(key)).map_err(|e| e.error)?;
    Ok(())
  }

  fn remove(&self, key: &str) -> DeskframeResult<()> {
    match std::fs::remove_file(self.path(key)) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }
}

/// In-memory preferences.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
  values: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryPreferences {
  /// Empty store.
  pub fn new() -> Self {
    Self::default()
  }

  /// Pre-populate `key`.
  #[must_use]
  pub fn with_value(self, key: &str, value: impl Into<Vec<u8>>) -> Self {
    self.values.lock().insert(key.to_string(), value.into());
    self
  }

  /// Whether `key` has a value.
  pub fn contains(&self, key: &str) -> bool {
    self.values.lock().contains_key(key)
  }
}

impl Preferences for MemoryPreferences {
  fn get(&self, key: &str) -> DeskframeResult<Option<Vec<u8>>> {
    Ok(self.values.lock().get(key).cloned())
  }

  fn set(&self, key: &str, value: &[u8]) -> DeskframeResult<()> {
    self.values.lock().insert(key.to_string(), value.to_vec());
    Ok(())
  }

  fn remove(&self, key: &str) -> DeskframeResult<()> {
    self.values.lock().remove(key);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn file_preferences_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = FilePreferences::new(dir.path().join("nested"));

    assert_eq!(prefs.get("k").unwrap(), None);
    prefs.set("k", b"[1]").unwrap();
    assert_eq!(prefs.get("k").unwrap().as_deref(), Some(&b"[1]"[..]));
    prefs.set("k", b"[2]").unwrap();
    assert_eq!(prefs.get("k").unwrap().as_deref(), Some(&b"[2]"[..]));
  }

  #[test]
  fn file_preferences_remove_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = FilePreferences::new(dir.path());
    prefs.set("k", b"x").unwrap();
    prefs.remove("k").unwrap();
    prefs.remove("k").unwrap();
    assert_eq!(prefs.get("k").unwrap(), None);
  }

  #[test]
  fn memory_preferences_round_trip() {
    let prefs = MemoryPreferences::new().with_value("a", "1");
    assert!(prefs.contains("a"));
    prefs.remove("a").unwrap();
    assert!(!prefs.contains("a"));
    prefs.set("b", b"2").unwrap();
    assert_eq!(prefs.get("b").unwrap(), Some(b"2".to_vec()));
  }
}
