use std::fmt;

use crate::{error::StoreError, store::KeyValueStore};

/// Store key the saved API key lives under.
pub const SAVED_KEY: &str = "apiKey";

/// Provider API key, passed explicitly to every network call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into().trim().to_string() }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn is_empty(&self) -> bool {
        self.api_key.is_empty()
    }

    /// Saved key, if any. An unavailable store reads as "nothing saved".
    pub fn load_saved(store: &dyn KeyValueStore) -> Option<Self> {
        match store.get(SAVED_KEY) {
            Ok(Some(key)) => Some(Self::new(key)).filter(|c| !c.is_empty()),
            Ok(None) => None,
            Err(err) => {
                tracing::debug!("Could not read saved API key: {err}");
                None
            }
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(SAVED_KEY, &self.api_key)
    }

    pub fn forget(store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.remove(SAVED_KEY)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("api_key", &"<redacted>").finish()
    }
}
