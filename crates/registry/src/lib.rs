//! Attribute catalog crate.
//!
//! Maps an entity domain (the category tag in front of the `.` in an entity
//! identifier) to the ordered set of attribute keys a user may select for
//! entities of that domain. The built-in table is a process-wide constant;
//! [`LayeredCatalog`] adds configured domains and keys on top of it.

pub mod catalog;
pub mod domain;
pub mod layered;

pub use catalog::{ATTRIBUTE_CATALOG, AttributeCatalog, BuiltinCatalog, CatalogEntry};
pub use domain::{DOMAIN_SEPARATOR, domain_of};
pub use layered::LayeredCatalog;

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    /// Every built-in entry has a non-empty domain, unique domains across the
    /// table, and unique keys within each entry.
    #[test]
    fn builtin_table_has_unique_domains_and_keys() {
        let mut seen_domains = HashSet::new();
        for entry in ATTRIBUTE_CATALOG {
            assert!(!entry.domain.is_empty(), "empty domain in catalog");
            assert!(seen_domains.insert(entry.domain), "duplicate domain: {}", entry.domain);
            let mut seen_keys = HashSet::new();
            for key in entry.keys {
                assert!(seen_keys.insert(*key), "duplicate key {} in {}", key, entry.domain);
            }
        }
    }
}
