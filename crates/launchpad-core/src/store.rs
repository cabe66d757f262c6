//! External string store
//!
//! Everything the launcher persists is a string under a fixed key. The core
//! only needs `get`/`set`/`remove`; what sits behind them is up to the host.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{LaunchpadError, Result};

/// Keys used in the external store
pub mod keys {
    /// Session flag, `"true"` once the passcode was accepted
    pub const SESSION: &str = "launcher-authenticated";
    /// JSON list of `{id, url}` tile URL overrides
    pub const TILE_URLS: &str = "launcher-app-urls";
    /// JSON list of tile ids in display order
    pub const TILE_ORDER: &str = "launcher-app-order";
    /// Four-digit passcode replacing the built-in secret
    pub const PASSCODE: &str = "launcher-passcode";
}

/// Opaque durable string map
pub trait KeyValueStore {
    /// Read a value, `None` when absent
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a value; removing an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// In-memory store, lost on drop
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store persisted as a single JSON object on disk
///
/// Every mutation rewrites the file; a failed write leaves the in-memory map
/// as it was. On Unix the file is created with owner-only permissions.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file does not exist
    ///
    /// A file that cannot be parsed is treated as empty and overwritten on
    /// the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Discarding unreadable store {:?}: {}", path, e);
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(&self.entries)?;
        let store_err = |e: std::io::Error| LaunchpadError::Store(format!("{:?}: {}", self.path, e));

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(store_err)?;

        // `mode` only applies on creation; tighten files left by older runs
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(store_err)?;
        }

        file.write_all(contents.as_bytes()).map_err(store_err)?;
        file.sync_all().map_err(store_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        self.flush().inspect_err(|_| match previous {
            Some(old) => {
                self.entries.insert(key.to_string(), old);
            }
            None => {
                self.entries.remove(key);
            }
        })
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(());
        };
        self.flush().inspect_err(|_| {
            self.entries.insert(key.to_string(), previous);
        })
    }
}

/// Handle that lets several owners write to one store
///
/// The launcher runs on a single thread, so a `RefCell` is enough.
#[derive(Debug, Default)]
pub struct SharedStore<S> {
    inner: Rc<RefCell<S>>,
}

impl<S> SharedStore<S> {
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(store)),
        }
    }
}

impl<S> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> KeyValueStore for SharedStore<S> {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.inner.borrow_mut().set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.inner.borrow_mut().remove(key)
    }
}
