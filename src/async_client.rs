//! Async wrapper around [`InventorySdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client and the snapshot file I/O do their work.
//!
//! # Example
//!
//! ```no_run
//! use hocg_inventory::AsyncInventorySdk;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sdk = AsyncInventorySdk::builder().offline(true).build().await.unwrap();
//!
//!     let snapshot = sdk.fetch().await.unwrap();
//!     let result = snapshot.compare_deck(r#"{"main": {"hBP01-001": 4}}"#).unwrap();
//!     println!("{} copies short", result.summary.copies_short);
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::CurrencyConfig;
use crate::error::{InventoryError, Result};
use crate::models::Reconciliation;
use crate::snapshot::InventorySnapshot;
use crate::{InventorySdk, InventorySdkBuilder};

// ---------------------------------------------------------------------------
// AsyncInventorySdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncInventorySdk`] instance.
#[derive(Default)]
pub struct AsyncInventorySdkBuilder {
    inner: InventorySdkBuilder,
}

impl AsyncInventorySdkBuilder {
    /// Seed project URL and API key from the environment.
    pub fn from_env() -> Self {
        Self {
            inner: InventorySdkBuilder::from_env(),
        }
    }

    pub fn project_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.project_url(url);
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.inner = self.inner.api_key(key);
        self
    }

    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.inner = self.inner.view(view);
        self
    }

    /// Set a custom cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path: PathBuf = path.as_ref().to_path_buf();
        self.inner = self.inner.cache_dir(path);
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.inner = self.inner.offline(offline);
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    pub fn currency(mut self, currency: CurrencyConfig) -> Self {
        self.inner = self.inner.currency(currency);
        self
    }

    /// Build the async SDK.
    ///
    /// Initialization creates the cache directory, so it runs on the
    /// blocking thread pool.
    pub async fn build(self) -> Result<AsyncInventorySdk> {
        tokio::task::spawn_blocking(move || {
            let sdk = self.inner.build()?;
            Ok(AsyncInventorySdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| InventoryError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncInventorySdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`InventorySdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`InventorySdk`] is
/// protected by a [`Mutex`] since it uses `RefCell` internally.
pub struct AsyncInventorySdk {
    inner: Arc<Mutex<InventorySdk>>,
}

impl AsyncInventorySdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncInventorySdkBuilder {
        AsyncInventorySdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&InventorySdk` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&InventorySdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| InventoryError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| InventoryError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Fetch positions (or the cached snapshot) asynchronously.
    pub async fn fetch(&self) -> Result<InventorySnapshot> {
        self.run(|s| s.fetch()).await
    }

    /// Fetch positions and reconcile pasted deck text against them.
    pub async fn fetch_and_compare(&self, raw_deck: &str) -> Result<Reconciliation> {
        let raw_deck = raw_deck.to_string();
        self.run(move |s| {
            let snapshot = s.fetch()?;
            s.compare_deck(&snapshot, &raw_deck)
        })
        .await
    }

    /// Remove the cached snapshot.
    pub async fn clear_cache(&self) -> Result<()> {
        self.run(|s| s.clear_cache()).await
    }

    /// Close the SDK, releasing the HTTP client.
    ///
    /// Fails if an operation started through [`run()`](Self::run) still
    /// holds the SDK.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let sdk = Arc::try_unwrap(self.inner)
                .map_err(|_| InventoryError::InvalidArgument("SDK still in use".into()))?
                .into_inner()
                .map_err(|_| InventoryError::InvalidArgument("SDK lock poisoned".into()))?;
            sdk.close();
            Ok(())
        })
        .await
        .map_err(|e| InventoryError::InvalidArgument(format!("Task join error: {e}")))?
    }
}
