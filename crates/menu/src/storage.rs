//! Cart persistence through a probed key-value substrate.
//!
//! The substrate mirrors the page's string key-value storage: it may be
//! missing or broken entirely, so [`CartStorage`] probes it once with a
//! sentinel write before trusting it. When the probe fails the cart keeps
//! working for the rest of the visit, just without persistence.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;

use crate::cart::Cart;

/// Fixed key the whole cart is stored under.
pub const CART_KEY: &str = "copper-kettle.cart";

/// Sentinel key used to probe substrate usability.
const PROBE_KEY: &str = "copper-kettle.probe";

/// Errors from the storage substrate or cart codec.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Substrate I/O failed.
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Cart could not be encoded.
    #[error("cart encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string key-value storage substrate.
pub trait KeyValueStore {
    /// Read one key.
    ///
    /// # Errors
    ///
    /// Returns an error when the substrate cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write one key.
    ///
    /// # Errors
    ///
    /// Returns an error when the substrate rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete one key; absent keys are fine.
    ///
    /// # Errors
    ///
    /// Returns an error when the substrate rejects the delete.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory substrate for tests and ephemeral visits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed substrate: one JSON object mapping keys to values.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open a store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, entries })
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string(&self.entries)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Persistence adapter for the cart.
///
/// Probes the substrate once with a sentinel write + delete; an unusable
/// substrate degrades the adapter to a no-op rather than failing the page.
pub struct CartStorage {
    substrate: Option<Box<dyn KeyValueStore>>,
}

impl CartStorage {
    /// Wrap a substrate, probing it for usability.
    #[must_use]
    pub fn new(mut substrate: Box<dyn KeyValueStore>) -> Self {
        match probe(substrate.as_mut()) {
            Ok(()) => Self {
                substrate: Some(substrate),
            },
            Err(e) => {
                warn!("cart storage unavailable, continuing without persistence: {e}");
                Self { substrate: None }
            }
        }
    }

    /// Adapter with no substrate at all (persistence disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { substrate: None }
    }

    /// Whether the probe succeeded and writes go anywhere.
    #[must_use]
    pub fn available(&self) -> bool {
        self.substrate.is_some()
    }

    /// Write the whole cart as one blob. No-op when degraded.
    ///
    /// # Errors
    ///
    /// Returns an error when the substrate rejects the write.
    pub fn save(&mut self, cart: &Cart) -> Result<(), StorageError> {
        let Some(substrate) = self.substrate.as_mut() else {
            return Ok(());
        };
        let blob = serde_json::to_string(cart)?;
        substrate.set(CART_KEY, &blob)
    }

    /// Read the persisted cart.
    ///
    /// A missing key, unparsable content, or non-object content all mean
    /// "no cart" and hydrate empty. Substrate read failures surface to the
    /// caller, which chooses the fallback.
    ///
    /// # Errors
    ///
    /// Returns an error when the substrate cannot be read.
    pub fn load(&self) -> Result<Cart, StorageError> {
        let Some(substrate) = self.substrate.as_ref() else {
            return Ok(Cart::default());
        };
        let Some(blob) = substrate.get(CART_KEY)? else {
            return Ok(Cart::default());
        };

        match serde_json::from_str::<serde_json::Value>(&blob) {
            Ok(value) if value.is_object() => {
                Ok(serde_json::from_value(value).unwrap_or_else(|e| {
                    warn!("persisted cart has an unexpected shape, starting empty: {e}");
                    Cart::default()
                }))
            }
            Ok(_) => {
                warn!("persisted cart is not an object, starting empty");
                Ok(Cart::default())
            }
            Err(e) => {
                warn!("persisted cart is unparsable, starting empty: {e}");
                Ok(Cart::default())
            }
        }
    }
}

/// Sentinel write + delete proving the substrate accepts real operations.
fn probe(substrate: &mut dyn KeyValueStore) -> Result<(), StorageError> {
    substrate.set(PROBE_KEY, "1")?;
    substrate.remove(PROBE_KEY)
}
