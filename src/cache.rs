//! Per-unit proof catalogue cache.
//!
//! Each compilation unit owns one slot holding a `OnceLock`. The first
//! caller for a unit runs the build; concurrent callers for the same unit
//! block on the same `OnceLock` and observe the same catalogue. Calls for
//! different units proceed independently since the map shard lock is only
//! held while fetching the slot, never during a build.
//!
//! A failing build degrades to an empty catalogue for that unit. The entry
//! lives until the host calls [`ProofCache::invalidate`] for the unit or
//! [`ProofCache::clear`].
//!
//! A build that queries its own unit through the same cache, on the same
//! thread, gets an empty catalogue for the nested call instead of waiting on
//! the `OnceLock` it is filling. The nested result is not stored. A cycle
//! spread across threads (unit 1 waits for unit 2 on another thread, which
//! waits for unit 1) is not detected.

use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use rustc_hash::{FxBuildHasher, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use witness_repr::Catalogue;

use crate::error::BuildError;

static GLOBAL: OnceLock<ProofCache> = OnceLock::new();

thread_local! {
    /// Builds running on this thread, keyed by cache address and unit.
    static BUILDING: RefCell<FxHashSet<(usize, UnitId)>> = RefCell::new(FxHashSet::default());
}

/// Marks a build as in progress on this thread until dropped.
struct BuildGuard {
    key: (usize, UnitId),
}

impl BuildGuard {
    /// `None` if the same build is already running on this thread.
    fn enter(cache: &ProofCache, unit: UnitId) -> Option<Self> {
        let key = (cache as *const ProofCache as usize, unit);
        let fresh = BUILDING.with(|building| building.borrow_mut().insert(key));
        fresh.then_some(Self { key })
    }
}

impl Drop for BuildGuard {
    fn drop(&mut self) {
        BUILDING.with(|building| {
            building.borrow_mut().remove(&self.key);
        });
    }
}

/// Opaque identity of a compilation unit, assigned by the host.
///
/// Two units with identical content but different ids never share a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(u64);

impl UnitId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit#{}", self.0)
    }
}

type Slot = Arc<OnceLock<Arc<Catalogue>>>;

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered from a filled slot
    pub hits: u64,
    /// Lookups that found no filled slot
    pub misses: u64,
    /// Builds that ran to completion, successful or not
    pub builds: u64,
    /// Builds that returned an error and were replaced by an empty catalogue
    pub failures: u64,
    /// Nested lookups of a unit from inside its own build
    pub reentrant: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    builds: AtomicU64,
    failures: AtomicU64,
    reentrant: AtomicU64,
}

/// Compilation-unit-scoped proof catalogue cache.
#[derive(Debug, Default)]
pub struct ProofCache {
    slots: DashMap<UnitId, Slot, FxBuildHasher>,
    counters: Counters,
}

impl ProofCache {
    /// Get the process-wide cache instance.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    pub fn new() -> Self {
        Self::default()
    }

    /// The cached catalogue of `unit`, if it has been built.
    pub fn get(&self, unit: UnitId) -> Option<Arc<Catalogue>> {
        let found = self
            .slots
            .get(&unit)
            .and_then(|slot| slot.value().get().cloned());
        let counter = if found.is_some() {
            &self.counters.hits
        } else {
            &self.counters.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// The catalogue of `unit`, building it with `build` on first access.
    ///
    /// At most one build per unit runs to completion and every caller sees
    /// its result. A build error is logged and stored as an empty catalogue.
    /// A nested call for `unit` from inside its own build returns an empty
    /// catalogue without touching the slot.
    pub fn get_or_initialize<F>(&self, unit: UnitId, build: F) -> Arc<Catalogue>
    where
        F: FnOnce() -> Result<Catalogue, BuildError>,
    {
        let slot = self.slot(unit);
        if let Some(catalogue) = slot.get() {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(catalogue);
        }
        self.counters.misses.fetch_add(1, Ordering::Relaxed);

        let Some(_guard) = BuildGuard::enter(self, unit) else {
            self.counters.reentrant.fetch_add(1, Ordering::Relaxed);
            warn!(%unit, "proof catalogue requested from inside its own build, using empty catalogue");
            return Arc::new(Catalogue::empty());
        };

        let catalogue = slot.get_or_init(|| {
            self.counters.builds.fetch_add(1, Ordering::Relaxed);
            match build() {
                Ok(catalogue) => {
                    debug!(%unit, proofs = catalogue.len(), "built proof catalogue");
                    Arc::new(catalogue)
                }
                Err(err) => {
                    self.counters.failures.fetch_add(1, Ordering::Relaxed);
                    warn!(%unit, error = %err, "proof catalogue build failed, using empty catalogue");
                    Arc::new(Catalogue::empty())
                }
            }
        });
        Arc::clone(catalogue)
    }

    /// Drop the entry for `unit`. Returns whether one existed.
    ///
    /// Callers still holding the old `Arc<Catalogue>` keep it; the next
    /// lookup rebuilds.
    pub fn invalidate(&self, unit: UnitId) -> bool {
        let removed = self.slots.remove(&unit).is_some();
        if removed {
            debug!(%unit, "invalidated proof catalogue");
        }
        removed
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let count = self.slots.len();
        self.slots.clear();
        debug!(count, "cleared proof cache");
    }

    /// Number of units with a slot, filled or in progress.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            builds: self.counters.builds.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
            reentrant: self.counters.reentrant.load(Ordering::Relaxed),
        }
    }

    /// Fetch or create the slot, releasing the shard lock before returning.
    fn slot(&self, unit: UnitId) -> Slot {
        if let Some(slot) = self.slots.get(&unit) {
            return Arc::clone(slot.value());
        }
        let entry = self.slots.entry(unit).or_default();
        Arc::clone(entry.value())
    }
}
