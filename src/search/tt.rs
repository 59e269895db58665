//! Transposition cache shared by concurrent search workers.
//!
//! The cache maps a position key — the full 23-cell board plus the
//! maximizing flag, packed into a `u64` — to the score the search
//! computed for that node. Entries are kept for the whole session and
//! never evicted; the game tree is small enough that unbounded growth
//! is acceptable.
//!
//! The map is split into shards, each behind its own mutex, so workers
//! touching different shards never contend. Two workers racing on the
//! same key both compute the same score, so last-write-wins is sound.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::board::{Cell, CELL_COUNT};

/// Number of independent shards. Must be a power of two.
const SHARD_COUNT: usize = 16;

/// Pack a board snapshot and the maximizing flag into a cache key.
///
/// Each cell takes two bits (0 empty, 1 goat, 2 tiger) in bits
/// `[2i, 2i+1]`; the maximizing flag sits above the highest cell. The
/// packing is injective, so key equality is position equality and no
/// collision handling is needed.
#[must_use]
pub fn position_key(cells: &[Cell; CELL_COUNT], maximizing: bool) -> u64 {
    let mut key = 0u64;
    for (i, &cell) in cells.iter().enumerate() {
        let bits = match cell {
            Cell::Empty => 0u64,
            Cell::Goat => 1,
            Cell::Tiger => 2,
        };
        key |= bits << (2 * i);
    }
    key | (u64::from(maximizing) << (2 * CELL_COUNT))
}

/// Sharded score cache. All methods take `&self`, so a single instance
/// can be shared across worker threads behind an `Arc`.
pub struct TranspositionTable {
    shards: Vec<Mutex<HashMap<u64, i32>>>,
    hits: AtomicU64,
    misses: AtomicU64,
    stores: AtomicU64,
}

impl TranspositionTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            shards: (0..SHARD_COUNT).map(|_| Mutex::new(HashMap::new())).collect(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            stores: AtomicU64::new(0),
        }
    }

    /// Lock the shard owning `key`. A poisoned shard only means another
    /// worker panicked mid-insert; the map itself is still usable.
    fn shard(&self, key: u64) -> MutexGuard<'_, HashMap<u64, i32>> {
        match self.shards[(key as usize) & (SHARD_COUNT - 1)].lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Look up a previously computed score.
    #[must_use]
    pub fn probe(&self, key: u64) -> Option<i32> {
        let found = self.shard(key).get(&key).copied();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Record the score for a position. Overwrites any racing write for
    /// the same key; all writers compute the same value.
    pub fn store(&self, key: u64, score: i32) {
        self.shard(key).insert(key, score);
        self.stores.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of cached positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| match s.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries and reset the counters.
    pub fn clear(&self) {
        for shard in &self.shards {
            match shard.lock() {
                Ok(mut guard) => guard.clear(),
                Err(poisoned) => poisoned.into_inner().clear(),
            }
        }
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.stores.store(0, Ordering::Relaxed);
    }

    /// Usage counters for diagnostics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache usage counters.
#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    /// Positions currently cached
    pub entries: usize,
    /// Probes that found an entry
    pub hits: u64,
    /// Probes that found nothing
    pub misses: u64,
    /// Scores written
    pub stores: u64,
}

impl CacheStats {
    /// Probe hit rate in percent.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let probes = self.hits + self.misses;
        if probes == 0 {
            0.0
        } else {
            self.hits as f64 / probes as f64 * 100.0
        }
    }
}
