/// Separator between the domain and the object id in an entity identifier.
pub const DOMAIN_SEPARATOR: char = '.';

/// Extract the domain from an entity identifier.
///
/// The domain is everything before the first [`DOMAIN_SEPARATOR`]. An
/// identifier without a separator has the empty domain, which no catalog
/// lists, so it resolves to no candidates.
///
/// ```rust
/// use attrpick_registry::domain_of;
///
/// assert_eq!(domain_of("light.kitchen"), "light");
/// assert_eq!(domain_of("sensor.outdoor.temp"), "sensor");
/// assert_eq!(domain_of("kitchen"), "");
/// ```
pub fn domain_of(entity_id: &str) -> &str {
    entity_id
        .split_once(DOMAIN_SEPARATOR)
        .map(|(domain, _)| domain)
        .unwrap_or_default()
}
