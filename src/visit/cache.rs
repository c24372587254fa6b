//! The resolution cache.
//!
//! Resolution is a hierarchy search, so its results are memoized per
//! (visitor type, node kind) pair in a [`Registry`]. A registry is an
//! explicit, constructible object owned by whichever scope wants shared
//! resolution — typically one per process or one per parser pool — and
//! passed by reference to traversal entry points. It is safe to share
//! across threads: lookups interleave freely under a read lock, and the
//! eviction sweep is serialized so it runs at most once at a time.
//!
//! The cache is best-effort. Losing an entry to eviction only costs a
//! re-resolution, never correctness.

use std::any::TypeId;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;

use crate::node::{Kind, KindSet};

use super::error::VisitError;
use super::resolve::{Resolution, resolve};
use super::Walker;

/// Entry count the sweep trims down to.
pub const DEFAULT_LOW_WATER: usize = 256;
/// Entry count that triggers a sweep.
pub const DEFAULT_HIGH_WATER: usize = 512;

struct CacheEntry {
    resolution: Resolution,
    last_used: AtomicU64,
}

/// Shared memo of dispatch resolutions, bounded by watermarks.
pub struct Registry {
    entries: RwLock<FxHashMap<(TypeId, Kind), CacheEntry>>,
    clock: AtomicU64,
    sweeping: Mutex<()>,
    low: usize,
    high: usize,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_bounds(DEFAULT_LOW_WATER, DEFAULT_HIGH_WATER)
    }

    /// Registry with custom watermarks. The sweep trims to `low` whenever
    /// the entry count exceeds `high`.
    pub fn with_bounds(low: usize, high: usize) -> Self {
        assert!(low > 0 && low < high, "watermarks must satisfy 0 < low < high");
        Self {
            entries: RwLock::new(FxHashMap::default()),
            clock: AtomicU64::new(0),
            sweeping: Mutex::new(()),
            low,
            high,
        }
    }

    /// A traversal entry point bound to this registry.
    pub fn walker(&self) -> Walker<'_> {
        Walker::new(self)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Whether a (visitor, kind) pair is currently memoized. Diagnostic
    /// only — the answer can be stale the moment it returns.
    pub fn cached(&self, visitor: TypeId, kind: Kind) -> bool {
        self.entries.read().contains_key(&(visitor, kind))
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Look up the resolution for (`visitor_id`, `kind`), resolving and
    /// memoizing on a miss. Negative outcomes are cached too, so repeated
    /// dispatch over unhandled kinds never re-searches the hierarchy.
    /// Ambiguity errors are not cached — they are fatal every time.
    pub fn resolution_for(
        &self,
        visitor_id: TypeId,
        visitor_name: &'static str,
        declared: KindSet,
        kind: Kind,
    ) -> Result<Resolution, VisitError> {
        let stamp = self.clock.fetch_add(1, Ordering::Relaxed);
        {
            let entries = self.entries.read();
            if let Some(entry) = entries.get(&(visitor_id, kind)) {
                entry.last_used.store(stamp, Ordering::Relaxed);
                return Ok(entry.resolution);
            }
        }

        tracing::trace!(
            visitor = visitor_name,
            kind = kind.name(),
            "resolution cache miss"
        );
        let resolution = resolve(visitor_name, declared, kind)?;

        let over_high = {
            let mut entries = self.entries.write();
            entries
                .entry((visitor_id, kind))
                .or_insert_with(|| CacheEntry {
                    resolution,
                    last_used: AtomicU64::new(stamp),
                });
            entries.len() > self.high
        };
        if over_high {
            self.sweep();
        }
        Ok(resolution)
    }

    /// Evict the least recently used entries down to the low watermark.
    /// The threshold stamp is found with a partition-based selection over
    /// the per-entry counters; no full sort is needed. At most one sweep
    /// runs at a time — a thread that loses the race simply skips.
    fn sweep(&self) {
        let Some(_guard) = self.sweeping.try_lock() else {
            return;
        };
        let mut entries = self.entries.write();
        if entries.len() <= self.high {
            return;
        }
        let excess = entries.len() - self.low;
        let mut stamps: Vec<u64> = entries
            .values()
            .map(|e| e.last_used.load(Ordering::Relaxed))
            .collect();
        let (_, &mut cutoff, _) = stamps.select_nth_unstable(excess - 1);
        entries.retain(|_, e| e.last_used.load(Ordering::Relaxed) > cutoff);
        tracing::debug!(
            evicted = excess,
            kept = entries.len(),
            "resolution cache sweep"
        );
    }
}
