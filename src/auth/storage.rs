use std::cell::RefCell;
use std::collections::HashMap;

use leptos::logging::warn;
use web_sys::Storage;

use super::USER_STATUS_EVENT;

/// Where the session keys live between page loads.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`.
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// `None` when the browser refuses storage access (e.g. some private
    /// browsing modes).
    pub fn open() -> Option<Self> {
        match gloo_utils::window().local_storage() {
            Ok(Some(storage)) => Some(Self { storage }),
            Ok(None) => None,
            Err(err) => {
                warn!("[AUTH] localStorage unavailable: {:?}", err);
                None
            }
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = self.storage.set_item(key, value) {
            warn!("[AUTH] failed to store {}: {:?}", key, err);
        }
    }

    fn remove(&self, key: &str) {
        if let Err(err) = self.storage.remove_item(key) {
            warn!("[AUTH] failed to remove {}: {:?}", key, err);
        }
    }
}

/// In-process store, used when local storage is unavailable and in tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::default();
        for (key, value) in entries {
            store.set(key, value);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
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

/// Announces session changes outside the reactive graph.
pub trait StatusEvents {
    fn dispatch(&self);
}

/// Fires a plain `userStatusChange` event on `window`, for scripts that still
/// listen for it.
pub struct WindowEvents;

impl StatusEvents for WindowEvents {
    fn dispatch(&self) {
        let dispatched = web_sys::Event::new(USER_STATUS_EVENT)
            .and_then(|event| gloo_utils::window().dispatch_event(&event));
        if let Err(err) = dispatched {
            warn!("[AUTH] could not dispatch {}: {:?}", USER_STATUS_EVENT, err);
        }
    }
}
