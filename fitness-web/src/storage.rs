//! Durable key-value storage for the browser session.
//!
//! The session is mirrored into `localStorage` so that a reload restores it
//! without another round trip to the identity provider. Everything that
//! touches storage goes through [`KeyValueStore`] so the same logic runs
//! against an in-memory map under `cargo test`.

use gloo_storage::{LocalStorage, Storage};
use std::{cell::RefCell, collections::HashMap, rc::Rc};
use tracing::warn;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const USER_ID_KEY: &str = "userId";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const TOKEN_EXPIRES_AT_KEY: &str = "token_expires_at";
pub const PKCE_VERIFIER_KEY: &str = "pkce_verifier";
pub const OAUTH_STATE_KEY: &str = "oauth_state";

/// Keys that make up an authenticated session.
pub const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, USER_KEY, USER_ID_KEY];

/// Keys owned by the OAuth token lifecycle, cleared together with the session.
pub const TOKEN_LIFECYCLE_KEYS: [&str; 2] = [REFRESH_TOKEN_KEY, TOKEN_EXPIRES_AT_KEY];

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    /// Like [`KeyValueStore::get`] but treats an empty value as absent.
    fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get(key).filter(|value| !value.is_empty())
    }
}

/// `window.localStorage`, storing raw strings so other tabs and tools can read them.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::raw().set_item(key, value) {
            warn!(key, ?err, "failed to persist storage entry");
        }
    }

    fn remove(&self, key: &str) {
        if let Err(err) = LocalStorage::raw().remove_item(key) {
            warn!(key, ?err, "failed to remove storage entry");
        }
    }
}

/// Shared in-memory storage. Clones observe each other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let storage = Self::new();
        for (key, value) in entries {
            storage.set(key, value);
        }
        storage
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
