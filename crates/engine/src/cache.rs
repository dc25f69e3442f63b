//! Single-slot memo for candidate resolution.

use attrpick_registry::{AttributeCatalog, BuiltinCatalog};
use attrpick_types::{AttributeSnapshot, CandidateList};
use tracing::debug;

use crate::resolve::CandidateResolver;

/// Hit/miss counters, mostly useful for tests and diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Clone)]
struct CacheSlot {
    entity_id: String,
    candidates: CandidateList,
}

/// Remembers the last `(entity id, candidates)` pair.
///
/// Only one entity is active per picker, so a single slot is enough: asking
/// for the same entity again returns the stored list without touching the
/// store or the resolver, and asking for any other entity replaces the slot.
#[derive(Debug, Clone, Default)]
pub struct ResolutionCache<C = BuiltinCatalog> {
    resolver: CandidateResolver<C>,
    slot: Option<CacheSlot>,
    stats: CacheStats,
}

impl<C: AttributeCatalog> ResolutionCache<C> {
    pub fn new(resolver: CandidateResolver<C>) -> Self {
        Self {
            resolver,
            slot: None,
            stats: CacheStats::default(),
        }
    }

    /// Cached candidates for `entity_id`, computing them on a key change.
    ///
    /// `snapshot_provider` is only called on a miss.
    pub fn get_or_compute<'s, F>(&mut self, entity_id: &str, snapshot_provider: F) -> CandidateList
    where
        F: FnOnce() -> Option<&'s AttributeSnapshot>,
    {
        if let Some(slot) = self.slot.as_ref().filter(|slot| slot.entity_id == entity_id) {
            self.stats.hits += 1;
            debug!(entity_id, candidate_count = slot.candidates.len(), "candidate cache hit");
            return slot.candidates.clone();
        }

        self.stats.misses += 1;
        debug!(
            entity_id,
            previous = self.slot.as_ref().map(|slot| slot.entity_id.as_str()),
            "candidate cache miss"
        );
        let candidates = self.resolver.resolve(entity_id, snapshot_provider());
        self.slot = Some(CacheSlot {
            entity_id: entity_id.to_string(),
            candidates: candidates.clone(),
        });
        candidates
    }

    /// Entity id currently held in the slot.
    pub fn cached_entity(&self) -> Option<&str> {
        self.slot.as_ref().map(|slot| slot.entity_id.as_str())
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::indexmap;
    use serde_json::json;
    use std::cell::Cell;

    fn climate_snapshot() -> AttributeSnapshot {
        indexmap! {
            "temperature".to_string() => json!(21),
            "humidity".to_string() => json!(40),
            "friendly_name".to_string() => json!("Office"),
        }
    }

    #[test]
    fn repeated_lookup_resolves_once() {
        let snapshot = climate_snapshot();
        let calls = Cell::new(0);
        let mut cache = ResolutionCache::new(CandidateResolver::new(BuiltinCatalog));

        let provider = || {
            calls.set(calls.get() + 1);
            Some(&snapshot)
        };
        let first = cache.get_or_compute("climate.office", provider);
        let second = cache.get_or_compute("climate.office", || {
            calls.set(calls.get() + 1);
            Some(&snapshot)
        });

        assert_eq!(first, vec!["temperature", "humidity"]);
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn new_entity_always_recomputes_even_with_identical_snapshot() {
        let snapshot = climate_snapshot();
        let mut cache = ResolutionCache::new(CandidateResolver::new(BuiltinCatalog));

        cache.get_or_compute("climate.office", || Some(&snapshot));
        let other = cache.get_or_compute("climate.bedroom", || Some(&snapshot));
        assert_eq!(other, vec!["temperature", "humidity"]);
        assert_eq!(cache.stats().misses, 2);
        assert_eq!(cache.cached_entity(), Some("climate.bedroom"));

        // Switching back is a miss too: the slot was replaced, not merged.
        cache.get_or_compute("climate.office", || Some(&snapshot));
        assert_eq!(cache.stats().misses, 3);
    }

    #[test]
    fn absent_entity_is_cached_as_empty() {
        let mut cache = ResolutionCache::new(CandidateResolver::new(BuiltinCatalog));
        assert!(cache.get_or_compute("light.missing", || None).is_empty());
        assert_eq!(cache.cached_entity(), Some("light.missing"));
    }
}
