//! Candidate resolution.
//!
//! Turns an entity's attribute snapshot into the list of keys the user may
//! pick from: the snapshot's keys restricted to the catalog entry for the
//! entity's domain, in the snapshot's own order.

use attrpick_registry::{AttributeCatalog, BuiltinCatalog, domain_of};
use attrpick_types::{AttributeSnapshot, CandidateList};
use tracing::debug;

/// Pure resolver from `(entity id, snapshot)` to a [`CandidateList`].
#[derive(Debug, Clone, Default)]
pub struct CandidateResolver<C = BuiltinCatalog> {
    catalog: C,
}

impl<C: AttributeCatalog> CandidateResolver<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Resolve the selectable keys for `entity_id`.
    ///
    /// An absent snapshot or an unknown domain yields an empty list. The result
    /// depends only on the arguments, which is what makes memoizing it by
    /// entity id sound.
    pub fn resolve(&self, entity_id: &str, snapshot: Option<&AttributeSnapshot>) -> CandidateList {
        let Some(snapshot) = snapshot else {
            debug!(entity_id, "no snapshot for entity; no candidates");
            return CandidateList::new();
        };

        let domain = domain_of(entity_id);
        let allowed = self.catalog.candidate_keys(domain);
        if allowed.is_empty() {
            debug!(entity_id, domain, "domain has no selectable attributes");
            return CandidateList::new();
        }

        let candidates: CandidateList = snapshot
            .keys()
            .filter(|key| allowed.contains(&key.as_str()))
            .cloned()
            .collect();
        debug!(
            entity_id,
            domain,
            attribute_count = snapshot.len(),
            candidate_count = candidates.len(),
            "resolved attribute candidates"
        );
        candidates
    }
}
