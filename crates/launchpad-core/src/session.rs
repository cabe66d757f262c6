//! Persisted "authenticated" flag

use crate::error::Result;
use crate::store::{keys, KeyValueStore};

/// Stored value meaning "authenticated"
const AUTHENTICATED: &str = "true";

/// Durable session flag consulted at startup
pub trait SessionStore {
    /// Whether a previous run authenticated and never logged out
    fn load(&self) -> bool;

    /// Persist the flag
    fn save(&mut self, authenticated: bool) -> Result<()>;

    /// Forget the session
    fn clear(&mut self) -> Result<()>;
}

/// Session flag kept under [`keys::SESSION`] in a key-value store
#[derive(Debug, Clone)]
pub struct KvSessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> KvSessionStore<S> {
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the backing store
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> SessionStore for KvSessionStore<S> {
    fn load(&self) -> bool {
        self.store.get(keys::SESSION).as_deref() == Some(AUTHENTICATED)
    }

    fn save(&mut self, authenticated: bool) -> Result<()> {
        if authenticated {
            self.store.set(keys::SESSION, AUTHENTICATED)
        } else {
            self.store.remove(keys::SESSION)
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.store.remove(keys::SESSION)
    }
}
