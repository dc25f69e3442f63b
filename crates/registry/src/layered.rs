//! Catalog extension layered over the built-in table.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::catalog::{AttributeCatalog, BuiltinCatalog};

/// Built-in catalog plus configured extra keys per domain.
///
/// Built-in keys keep their order and come first; extra keys are appended in
/// configuration order with duplicates dropped. Domains unknown to the
/// built-in table are served purely from the extension. The catalog is
/// immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayeredCatalog {
    base: BuiltinCatalog,
    extra: IndexMap<String, IndexSet<String>>,
}

impl LayeredCatalog {
    /// Build a catalog from `domain → keys` extensions.
    pub fn new<I, D, K>(extra_domains: I) -> Self
    where
        I: IntoIterator<Item = (D, K)>,
        D: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        let base = BuiltinCatalog;
        let mut extra: IndexMap<String, IndexSet<String>> = IndexMap::new();
        for (domain, keys) in extra_domains {
            let domain = domain.into();
            let builtin = base.candidate_keys(&domain);
            let slot = extra.entry(domain.clone()).or_default();
            for key in keys {
                let key = key.into();
                if key.is_empty() || builtin.contains(&key.as_str()) {
                    continue;
                }
                slot.insert(key);
            }
            if slot.is_empty() {
                extra.shift_remove(&domain);
            }
        }
        debug!(extended_domains = extra.len(), "built layered attribute catalog");
        Self { base, extra }
    }

    /// Domains that received extra keys, in configuration order.
    pub fn extended_domains(&self) -> impl Iterator<Item = &str> {
        self.extra.keys().map(String::as_str)
    }
}

impl AttributeCatalog for LayeredCatalog {
    fn candidate_keys(&self, domain: &str) -> Vec<&str> {
        let mut keys = self.base.candidate_keys(domain);
        if let Some(extra) = self.extra.get(domain) {
            keys.extend(extra.iter().map(String::as_str));
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_extensions_matches_builtin() {
        let catalog = LayeredCatalog::default();
        assert_eq!(catalog.candidate_keys("light"), BuiltinCatalog.candidate_keys("light"));
        assert!(catalog.candidate_keys("sensor").is_empty());
    }

    #[test]
    fn appends_extra_keys_after_builtin_and_drops_duplicates() {
        let catalog = LayeredCatalog::new([("light", vec!["color_temp", "brightness", "color_temp"])]);
        assert_eq!(catalog.candidate_keys("light"), vec!["brightness", "color_temp"]);
    }

    #[test]
    fn adds_new_domains_in_configuration_order() {
        let catalog = LayeredCatalog::new([
            ("sensor", vec!["unit_of_measurement"]),
            ("alarm_control_panel", vec!["code_format", ""]),
            ("switch", Vec::new()),
        ]);
        assert_eq!(catalog.candidate_keys("sensor"), vec!["unit_of_measurement"]);
        assert_eq!(catalog.candidate_keys("alarm_control_panel"), vec!["code_format"]);
        let domains: Vec<&str> = catalog.extended_domains().collect();
        assert_eq!(domains, vec!["sensor", "alarm_control_panel"]);
    }
}
