#![forbid(unsafe_code)]

//! Durable key-value preferences.
//!
//! The page persists exactly one value: the color theme. [`PreferenceStore`]
//! is the seam between the session and whatever durable storage the host
//! has (`localStorage` in the browser, a JSON file natively, memory in
//! tests).
//!
//! # File format (`FileStore`)
//!
//! ```json
//! { "theme": "dark" }
//! ```
//!
//! Writes use a temp-file-then-rename pattern to prevent corruption on crash.
//! A missing file is an empty store; a corrupted file is an error.

use std::collections::BTreeMap;

/// Storage key for the theme preference.
pub const THEME_KEY: &str = "theme";

/// Errors from a [`PreferenceStore`].
#[derive(Debug)]
pub enum StorageError {
    /// I/O error reading or writing the backing file.
    Io(std::io::Error),
    /// The backing data could not be encoded or decoded.
    Serialization(String),
    /// The host refused the write (quota, private mode, ...).
    Unavailable(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "storage I/O error: {e}"),
            Self::Serialization(msg) => write!(f, "storage serialization error: {msg}"),
            Self::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialization(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Durable string key-value storage.
pub trait PreferenceStore {
    /// Read a value. Absent keys return `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value, if present.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store. Used by tests and by hosts without durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    writes: u64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// JSON-file-backed store.
#[cfg(feature = "state-persistence")]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
    entries: BTreeMap<String, String>,
}

#[cfg(feature = "state-persistence")]
impl FileStore {
    /// Open a store at `path`, loading existing entries.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)
                .map_err(|e| StorageError::Serialization(format!("failed to parse {}: {e}", path.display())))?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

#[cfg(feature = "state-persistence")]
impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value. Unknown values are `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Read the stored theme, falling back to [`Theme::Light`].
    #[must_use]
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let stored = store.get(THEME_KEY);
        match stored.as_deref().map(Self::parse) {
            Some(Some(theme)) => theme,
            Some(None) => {
                tracing::warn!(message = "storage.theme.invalid", value = ?stored);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Persist this theme.
    pub fn store(self, store: &mut dyn PreferenceStore) -> Result<(), StorageError> {
        store.set(THEME_KEY, self.as_str())
    }
}
