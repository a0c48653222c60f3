//! Inventory dashboard core for a hololive OCG card collection.
//!
//! Fetches owned-card positions from a hosted REST view, caches the last
//! snapshot locally, and reconciles pasted deck-builder exports against the
//! collection to report which cards are short and what they would cost.
//!
//! # Quick start
//!
//! ```no_run
//! use hocg_inventory::InventorySdk;
//!
//! let sdk = InventorySdk::builder()
//!     .project_url("https://example.supabase.co")
//!     .api_key("publishable-key")
//!     .build()
//!     .unwrap();
//!
//! let snapshot = sdk.fetch().unwrap();
//! let result = sdk
//!     .compare_deck(&snapshot, r#"{"main": {"hBP01-001": 4}}"#)
//!     .unwrap();
//! for row in result.shortages() {
//!     println!("{} short by {}", row.identity, row.shortage);
//! }
//! ```

pub mod aggregate;
#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod deck_parser;
pub mod error;
pub mod export;
pub mod models;
pub mod normalize;
pub mod queries;
pub mod reconcile;
pub mod rest;
pub mod rest_query;
pub mod snapshot;

pub use aggregate::{aggregate, CardSummary, OwnedQuantityIndex};
#[cfg(feature = "async")]
pub use async_client::AsyncInventorySdk;
pub use cache::SnapshotCache;
pub use config::CurrencyConfig;
pub use error::{InventoryError, Result};
pub use normalize::{normalize, CardIdentity};
pub use reconcile::reconcile;
pub use rest_query::RestQuery;
pub use snapshot::{InventorySnapshot, SnapshotSource};

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

use models::{HoldingsSummary, Reconciliation};
use rest::RestClient;

// ---------------------------------------------------------------------------
// InventorySdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`InventorySdk`] instance.
///
/// Use [`InventorySdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](InventorySdkBuilder::build) to create the SDK.
#[derive(Clone)]
pub struct InventorySdkBuilder {
    project_url: Option<String>,
    api_key: Option<String>,
    view: String,
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    currency: CurrencyConfig,
}

impl Default for InventorySdkBuilder {
    fn default() -> Self {
        Self {
            project_url: None,
            api_key: None,
            view: config::DEFAULT_VIEW.to_string(),
            cache_dir: None,
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
            currency: CurrencyConfig::default(),
        }
    }
}

impl InventorySdkBuilder {
    /// Seed project URL and API key from `HOCG_PROJECT_URL` / `HOCG_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            project_url: std::env::var(config::ENV_PROJECT_URL).ok(),
            api_key: std::env::var(config::ENV_API_KEY).ok(),
            ..Self::default()
        }
    }

    /// Base URL of the hosted project, e.g. `https://xyz.supabase.co`.
    pub fn project_url(mut self, url: impl Into<String>) -> Self {
        self.project_url = Some(url.into());
        self
    }

    /// Static key sent as `apikey` and bearer token.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// REST view serving the position rows.
    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = view.into();
        self
    }

    /// Set a custom cache directory for the positions snapshot.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/hocg-inventory` on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never contacts the REST view and only reads the
    /// cached snapshot. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Display currency for converted holdings values.
    pub fn currency(mut self, currency: CurrencyConfig) -> Self {
        self.currency = currency;
        self
    }

    /// Build the SDK.
    ///
    /// Nothing is fetched eagerly. Online mode requires both a project URL
    /// and an API key.
    pub fn build(self) -> Result<InventorySdk> {
        let cache = SnapshotCache::new(self.cache_dir)?;

        let rest = if self.offline {
            None
        } else {
            let url = non_empty(self.project_url).ok_or_else(|| {
                InventoryError::InvalidArgument(format!(
                    "project URL is required unless offline (set {})",
                    config::ENV_PROJECT_URL
                ))
            })?;
            let key = non_empty(self.api_key).ok_or_else(|| {
                InventoryError::InvalidArgument(format!(
                    "API key is required unless offline (set {})",
                    config::ENV_API_KEY
                ))
            })?;
            Some(RefCell::new(RestClient::new(&url, &key, self.timeout)))
        };

        Ok(InventorySdk {
            rest,
            cache,
            view: self.view,
            currency: self.currency,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// InventorySdk
// ---------------------------------------------------------------------------

/// The main entry point.
///
/// Owns the REST client and the snapshot cache. Position data is returned as
/// an [`InventorySnapshot`] value and passed back in explicitly; the SDK keeps
/// no session state between calls.
pub struct InventorySdk {
    rest: Option<RefCell<RestClient>>,
    cache: SnapshotCache,
    view: String,
    currency: CurrencyConfig,
}

impl InventorySdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> InventorySdkBuilder {
        InventorySdkBuilder::default()
    }

    pub fn is_offline(&self) -> bool {
        self.rest.is_none()
    }

    pub fn currency(&self) -> &CurrencyConfig {
        &self.currency
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// The query used to fetch positions.
    pub fn positions_query(&self) -> RestQuery {
        RestQuery::positions(&self.view)
    }

    /// Fetch the current positions.
    ///
    /// Online, the REST view is queried and the response saved as the new
    /// snapshot; if the fetch fails and a snapshot exists, that snapshot is
    /// returned instead. Offline, the snapshot is loaded directly.
    pub fn fetch(&self) -> Result<InventorySnapshot> {
        let Some(rest) = &self.rest else {
            return Ok(InventorySnapshot::new(self.cache.load()?, SnapshotSource::Cache));
        };

        match self.fetch_remote(rest) {
            Ok(snapshot) => Ok(snapshot),
            Err(e) if self.cache.has_snapshot() => {
                warn!(error = %e, "position fetch failed, using cached snapshot");
                Ok(InventorySnapshot::new(self.cache.load()?, SnapshotSource::Cache))
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch from the REST view only, never falling back to the cache.
    pub fn refresh(&self) -> Result<InventorySnapshot> {
        let rest = self.rest.as_ref().ok_or_else(|| {
            InventoryError::InvalidArgument("cannot refresh in offline mode".into())
        })?;
        self.fetch_remote(rest)
    }

    fn fetch_remote(&self, rest: &RefCell<RestClient>) -> Result<InventorySnapshot> {
        let body = rest.borrow_mut().fetch_raw(&self.positions_query())?;
        let positions = rest::decode_positions(&body)?;
        if let Err(e) = self.cache.save(&body) {
            warn!(error = %e, "could not save positions snapshot");
        }
        Ok(InventorySnapshot::new(positions, SnapshotSource::Remote))
    }

    /// Search/paging/valuation interface over `snapshot`.
    pub fn positions<'a>(&'a self, snapshot: &'a InventorySnapshot) -> queries::PositionQuery<'a> {
        snapshot.query(&self.currency)
    }

    /// Holdings totals for `snapshot` in JPY and the display currency.
    pub fn holdings(&self, snapshot: &InventorySnapshot) -> HoldingsSummary {
        self.positions(snapshot).holdings()
    }

    /// Owned quantity per card identity.
    pub fn inventory(&self, snapshot: &InventorySnapshot) -> OwnedQuantityIndex {
        snapshot.index()
    }

    /// Parse pasted deck text and reconcile it against `snapshot`.
    ///
    /// Fails with [`InventoryError::DeckParse`] or
    /// [`InventoryError::DeckSchema`] on unusable input.
    pub fn compare_deck(&self, snapshot: &InventorySnapshot, raw_deck: &str) -> Result<Reconciliation> {
        snapshot.compare_deck(raw_deck)
    }

    /// Remove the cached snapshot.
    pub fn clear_cache(&self) -> Result<()> {
        self.cache.clear()
    }

    /// Consume the SDK and release the HTTP client.
    pub fn close(self) {
        if let Some(rest) = self.rest {
            rest.into_inner().close();
        }
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for InventorySdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InventorySdk(view={}, cache_dir={}, offline={}, currency={})",
            self.view,
            self.cache.cache_dir.display(),
            self.is_offline(),
            self.currency.code
        )
    }
}
