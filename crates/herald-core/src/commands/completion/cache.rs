//! Completion result cache

use dashmap::DashMap;
use parking_lot::Mutex;
use std::time::{Duration, Instant};

use crate::config::CompletionCacheConfig;

/// Cache key for one default completion query
///
/// Sender-independent: the cached candidates are filtered per sender on
/// every lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompletionKey {
    /// Lower-cased root
    pub root: String,
    /// Lower-cased partial token
    pub partial: String,
}

impl CompletionKey {
    pub fn new(root: &str, partial: &str) -> Self {
        Self {
            root: root.to_lowercase(),
            partial: partial.to_lowercase(),
        }
    }
}

/// One sub-command head under a root, with the permission of the command it
/// came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    pub head: String,
    /// Required permission node (empty = public)
    pub permission: String,
}

impl CompletionCandidate {
    pub fn new(head: impl Into<String>, permission: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            permission: permission.into(),
        }
    }
}

/// Cached completion result
#[derive(Debug, Clone)]
pub struct CachedCompletion {
    /// Unfiltered candidates
    pub candidates: Vec<CompletionCandidate>,
    /// Registry generation the candidates were computed against
    pub generation: u64,
    /// When this was cached
    pub cached_at: Instant,
    /// Time-to-live
    pub ttl: Duration,
    /// Number of times this entry was served
    pub hit_count: u64,
}

impl CachedCompletion {
    pub fn new(candidates: Vec<CompletionCandidate>, generation: u64, ttl: Duration) -> Self {
        Self {
            candidates,
            generation,
            cached_at: Instant::now(),
            ttl,
            hit_count: 0,
        }
    }

    /// Still fresh and computed against the current registry
    pub fn is_valid(&self, generation: u64) -> bool {
        self.generation == generation && self.cached_at.elapsed() < self.ttl
    }

    pub fn age(&self) -> Duration {
        self.cached_at.elapsed()
    }
}

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    /// Entries dropped for age or a registry change
    pub expirations: u64,
    /// Entries dropped to stay under `max_entries`
    pub evictions: u64,
    pub clears: u64,
}

impl CompletionCacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "hits: {}, misses: {}, hit rate: {:.1}%, inserts: {}, evictions: {}",
            self.hits,
            self.misses,
            self.hit_rate() * 100.0,
            self.inserts,
            self.evictions
        )
    }
}

/// TTL cache of default completion candidates
///
/// An entry is only served while the registry generation it was computed
/// against is still current, so any registration or removal invalidates it.
#[derive(Debug)]
pub struct CompletionCache {
    config: CompletionCacheConfig,
    entries: DashMap<CompletionKey, CachedCompletion>,
    stats: Mutex<CompletionCacheStats>,
}

impl CompletionCache {
    pub fn new(config: CompletionCacheConfig) -> Self {
        Self {
            config,
            entries: DashMap::new(),
            stats: Mutex::new(CompletionCacheStats::default()),
        }
    }

    /// Look up candidates valid for `generation`
    pub fn get(&self, key: &CompletionKey, generation: u64) -> Option<Vec<CompletionCandidate>> {
        if !self.config.enabled() {
            return None;
        }

        let stale = match self.entries.get_mut(key) {
            Some(mut entry) if entry.is_valid(generation) => {
                entry.hit_count += 1;
                self.stats.lock().hits += 1;
                return Some(entry.candidates.clone());
            }
            Some(_) => true,
            None => false,
        };

        let mut stats = self.stats.lock();
        if stale {
            self.entries.remove(key);
            stats.expirations += 1;
        }
        stats.misses += 1;
        None
    }

    /// Store candidates computed against `generation`
    pub fn insert(&self, key: CompletionKey, candidates: Vec<CompletionCandidate>, generation: u64) {
        if !self.config.enabled() {
            return;
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.config.max_entries {
            self.evict_oldest();
        }

        self.entries.insert(
            key,
            CachedCompletion::new(candidates, generation, self.config.ttl()),
        );
        self.stats.lock().inserts += 1;
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().cached_at)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
            self.stats.lock().evictions += 1;
        }
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries.clear();
        self.stats.lock().clears += 1;
    }

    /// Drop entries that are stale for `generation`; returns how many
    pub fn cleanup_expired(&self, generation: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_valid(generation));
        let removed = before.saturating_sub(self.entries.len());

        if removed > 0 {
            self.stats.lock().expirations += removed as u64;
        }
        removed
    }

    pub fn stats(&self) -> CompletionCacheStats {
        self.stats.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn config(&self) -> &CompletionCacheConfig {
        &self.config
    }
}

impl Default for CompletionCache {
    fn default() -> Self {
        Self::new(CompletionCacheConfig::default())
    }
}
