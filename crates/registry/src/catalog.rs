use std::fmt::Debug;

use serde::Serialize;

/// Source of the selectable attribute keys for a domain.
pub trait AttributeCatalog: Debug + Send + Sync {
    /// Ordered, duplicate-free keys selectable for `domain`. Unknown domains
    /// yield an empty list.
    fn candidate_keys(&self, domain: &str) -> Vec<&str>;

    /// Whether `key` is selectable for `domain`.
    fn allows(&self, domain: &str, key: &str) -> bool {
        self.candidate_keys(domain).contains(&key)
    }
}

/// Selectable attributes for one entity domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Domain tag, e.g. `light`.
    pub domain: &'static str,
    /// Selectable attribute keys in catalog order.
    pub keys: &'static [&'static str],
}

/// Built-in table of selectable attributes, ordered by domain.
pub const ATTRIBUTE_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        domain: "light",
        keys: &["brightness"],
    },
    CatalogEntry {
        domain: "climate",
        keys: &[
            "current_temperature",
            "fan_mode",
            "preset_mode",
            "swing_mode",
            "temperature",
            "current_humidity",
            "humidity",
            "hvac_action",
        ],
    },
    CatalogEntry {
        domain: "fan",
        keys: &["speed"],
    },
    CatalogEntry {
        domain: "air_quality",
        keys: &["nitrogen_oxide", "particulate_matter_10", "particulate_matter_2_5"],
    },
    CatalogEntry {
        domain: "cover",
        keys: &["current_position", "current_tilt_position"],
    },
    CatalogEntry {
        domain: "device_tracker",
        keys: &["battery"],
    },
    CatalogEntry {
        domain: "humidifier",
        keys: &["humidity"],
    },
    CatalogEntry {
        domain: "media_player",
        keys: &["media_title"],
    },
    CatalogEntry {
        domain: "vacuum",
        keys: &["battery_level", "status"],
    },
    CatalogEntry {
        domain: "water_heater",
        keys: &["current_temperature", "temperature", "operation_mode"],
    },
    CatalogEntry {
        domain: "weather",
        keys: &["temperature", "humidity", "ozone", "pressure", "wind_bearing", "wind_speed", "visibility"],
    },
];

/// The built-in catalog backed by [`ATTRIBUTE_CATALOG`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    /// All built-in entries in table order.
    pub fn entries(&self) -> &'static [CatalogEntry] {
        ATTRIBUTE_CATALOG
    }

    /// The entry for `domain`, if the table lists it.
    pub fn entry(&self, domain: &str) -> Option<&'static CatalogEntry> {
        ATTRIBUTE_CATALOG.iter().find(|entry| entry.domain == domain)
    }
}

impl AttributeCatalog for BuiltinCatalog {
    fn candidate_keys(&self, domain: &str) -> Vec<&str> {
        self.entry(domain).map(|entry| entry.keys.to_vec()).unwrap_or_default()
    }
}
