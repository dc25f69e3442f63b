//! Utility helpers shared across the attrpick crates: attribute name
//! formatting, fuzzy matching for candidate search, path expansion, and the
//! on-disk picker configuration.

pub mod config;
pub mod path_processing;
pub mod text_processing;

pub use config::{CONFIG_PATH_ENV, ConfigError, PickerConfig, default_config_path};
pub use path_processing::expand_tilde;
pub use text_processing::{format_attribute_name, fuzzy_score};
