//! Local snapshot of the last successful position fetch.
//!
//! Lets the SDK run offline, or keep working when the REST view is
//! unreachable. The snapshot is the raw JSON array exactly as served;
//! a gzipped copy (`positions.json.gz`) is read transparently.

use crate::config;
use crate::error::{InventoryError, Result};
use crate::models::InventoryPosition;
use flate2::read::GzDecoder;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Stores and loads the positions snapshot.
pub struct SnapshotCache {
    /// Directory where the snapshot is stored.
    pub cache_dir: PathBuf,
}

impl SnapshotCache {
    /// Create a snapshot cache.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(cache_dir: Option<PathBuf>) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { cache_dir: dir })
    }

    fn plain_path(&self) -> PathBuf {
        self.cache_dir.join(config::SNAPSHOT_FILE)
    }

    fn gz_path(&self) -> PathBuf {
        self.cache_dir.join(format!("{}.gz", config::SNAPSHOT_FILE))
    }

    /// Path of the snapshot that [`load`](Self::load) would read, if any.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        [self.plain_path(), self.gz_path()]
            .into_iter()
            .find(|p| p.exists())
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot_path().is_some()
    }

    /// Write the raw JSON body of a fetch.
    ///
    /// Writes to a temp file first and renames on success, so an
    /// interrupted write never leaves a truncated snapshot behind.
    pub fn save(&self, body: &str) -> Result<()> {
        let dest = self.plain_path();
        let tmp_dest = dest.with_extension("json.tmp");

        let result = (|| -> Result<()> {
            fs::write(&tmp_dest, body)?;
            fs::rename(&tmp_dest, &dest)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_dest);
        } else {
            // The fresh plain snapshot supersedes any gzipped copy.
            let _ = fs::remove_file(self.gz_path());
            info!(path = %dest.display(), "saved positions snapshot");
        }
        result
    }

    fn read(path: &Path) -> Result<String> {
        let mut contents = String::new();
        if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            let file = fs::File::open(path)?;
            let decoder = GzDecoder::new(BufReader::new(file));
            BufReader::new(decoder).read_to_string(&mut contents)?;
        } else {
            contents = fs::read_to_string(path)?;
        }
        Ok(contents)
    }

    /// Load and decode the snapshot.
    ///
    /// A snapshot that cannot be decoded is deleted so the next online
    /// fetch replaces it.
    pub fn load(&self) -> Result<Vec<InventoryPosition>> {
        let path = self.snapshot_path().ok_or_else(|| {
            InventoryError::NotFound(format!(
                "No positions snapshot in {}",
                self.cache_dir.display()
            ))
        })?;

        let parsed = Self::read(&path).and_then(|contents| {
            serde_json::from_str::<Vec<InventoryPosition>>(&contents).map_err(InventoryError::from)
        });

        match parsed {
            Ok(positions) => {
                info!(rows = positions.len(), path = %path.display(), "loaded positions snapshot");
                Ok(positions)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt positions snapshot, removing");
                let _ = fs::remove_file(&path);
                Err(InventoryError::NotFound(format!(
                    "Snapshot '{}' was corrupt and has been removed. \
                     Fetch again online to rebuild it. Original error: {}",
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("unknown"),
                    e
                )))
            }
        }
    }

    /// Remove all cached files and recreate the cache directory.
    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }
}
