//! Coordinate caches consulted by the resolver before geocoding.
//!
//! Entries never expire: the key space is the set of city names actually
//! encountered, which stays small. Failures are never stored.

use super::types::Coordinates;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

/// Key/value store for resolved coordinates, shared across threads.
pub trait CoordinateCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Coordinates>;

    /// Last write wins; values for a key are immutable once computed.
    fn put(&self, key: &str, coords: Coordinates);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─── In-memory cache ────────────────────────────────────────────

/// Process-lifetime cache behind a read/write lock.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Coordinates>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded cache, mostly for tests and offline fixtures.
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Coordinates)>,
        S: Into<String>,
    {
        Self {
            entries: RwLock::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }
}

impl CoordinateCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Coordinates> {
        // A poisoned lock still holds consistent data: inserts are single map writes.
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).copied()
    }

    fn put(&self, key: &str, coords: Coordinates) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), coords);
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

// ─── File-backed cache ──────────────────────────────────────────

#[derive(Serialize, Deserialize, Clone)]
struct CacheEntry {
    lat: f64,
    lon: f64,
    /// Unix millis of the first successful lookup.
    resolved_at: i64,
}

/// JSON cache at ~/.futtravel/geocache.json, persisted after every insert.
pub struct FileCache {
    path: PathBuf,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl FileCache {
    /// Load from a specific path. Missing or corrupt files start empty.
    pub fn load_from(path: PathBuf) -> Self {
        let entries = Self::read_file(&path).unwrap_or_default();
        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded coordinate cache");
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".futtravel")
            .join("geocache.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(path: &Path) -> Option<HashMap<String, CacheEntry>> {
        let data = fs::read_to_string(path).ok()?;
        serde_json::from_str(&data).ok()
    }

    fn persist(&self, entries: &HashMap<String, CacheEntry>) {
        let result = self
            .path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| serde_json::to_string_pretty(entries).map_err(std::io::Error::other))
            .and_then(|json| fs::write(&self.path, json));
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "could not persist coordinate cache");
        }
    }
}

impl CoordinateCache for FileCache {
    fn get(&self, key: &str) -> Option<Coordinates> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).map(|e| Coordinates::new(e.lat, e.lon))
    }

    fn put(&self, key: &str, coords: Coordinates) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key.to_string(),
            CacheEntry {
                lat: coords.lat,
                lon: coords.lon,
                resolved_at: chrono::Utc::now().timestamp_millis(),
            },
        );
        self.persist(&entries);
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
