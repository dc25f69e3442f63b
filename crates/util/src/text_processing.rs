//! # Text Processing Utilities
//!
//! Display formatting for attribute keys and the fuzzy matcher used to narrow
//! the candidate list while the user types.

use once_cell::sync::Lazy;
use regex::Regex;

/// Whole-word tokens rendered in upper case inside attribute names.
static ACRONYMS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [("id", "ID"), ("ip", "IP"), ("mac", "MAC"), ("gps", "GPS")]
        .into_iter()
        .filter_map(|(word, replacement)| {
            Regex::new(&format!(r"\b{word}\b"))
                .ok()
                .map(|pattern| (pattern, replacement))
        })
        .collect()
});

/// Turns a raw attribute key into a human-readable name.
///
/// Underscores become spaces, a few well-known acronyms are upper-cased when
/// they appear as whole words, and the first character is capitalized.
///
/// # Example
/// ```rust
/// use attrpick_util::format_attribute_name;
///
/// assert_eq!(format_attribute_name("current_temperature"), "Current temperature");
/// assert_eq!(format_attribute_name("device_id"), "Device ID");
/// assert_eq!(format_attribute_name(""), "");
/// ```
pub fn format_attribute_name(key: &str) -> String {
    let mut formatted = key.replace('_', " ");
    for (pattern, replacement) in ACRONYMS.iter() {
        if pattern.is_match(&formatted) {
            formatted = pattern.replace_all(&formatted, *replacement).into_owned();
        }
    }

    let mut chars = formatted.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns `Some(score)` when every character of `needle` appears in order in
/// `hay` (case-insensitive), otherwise `None`. Higher is better.
///
/// Consecutive runs, matches at word starts (after a space, `_`, or
/// punctuation), and prefix matches score higher; gaps and long candidates
/// score lower. Whitespace in `needle` is ignored.
///
/// # Example
/// ```rust
/// use attrpick_util::fuzzy_score;
///
/// assert!(fuzzy_score("current_temperature", "temp").is_some());
/// assert!(fuzzy_score("brightness", "bri").unwrap() > fuzzy_score("brightness", "bns").unwrap());
/// assert!(fuzzy_score("brightness", "xyz").is_none());
/// assert_eq!(fuzzy_score("anything", ""), Some(0));
/// ```
pub fn fuzzy_score(hay: &str, needle: &str) -> Option<i64> {
    let needle: Vec<char> = needle
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    if needle.is_empty() {
        return Some(0);
    }
    let hay: Vec<char> = hay.chars().flat_map(char::to_lowercase).collect();

    let mut score = 0i64;
    let mut consecutive = 0i64;
    let mut previous: Option<usize> = None;
    let mut cursor = 0usize;

    for needle_char in needle {
        let offset = hay[cursor..].iter().position(|c| *c == needle_char)?;
        let index = cursor + offset;

        match previous {
            Some(prev) if index == prev + 1 => consecutive += 1,
            Some(prev) => {
                consecutive = 1;
                score -= (index - prev - 1) as i64 / 2;
            }
            None => {
                consecutive = 1;
                score += i64::max(0, 20 - index as i64);
            }
        }
        score += 6 * consecutive;

        let at_word_start = index == 0 || hay.get(index - 1).is_some_and(|c| c.is_whitespace() || c.is_ascii_punctuation());
        if at_word_start {
            score += 10;
        }

        previous = Some(index);
        cursor = index + 1;
    }

    Some(score - hay.len() as i64 / 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_plain_keys() {
        assert_eq!(format_attribute_name("brightness"), "Brightness");
        assert_eq!(format_attribute_name("particulate_matter_2_5"), "Particulate matter 2 5");
    }

    #[test]
    fn uppercases_acronyms_only_as_whole_words() {
        assert_eq!(format_attribute_name("ip_address"), "IP address");
        assert_eq!(format_attribute_name("gps_accuracy"), "GPS accuracy");
        assert_eq!(format_attribute_name("mac"), "MAC");
        assert_eq!(format_attribute_name("video_id"), "Video ID");
        assert_eq!(format_attribute_name("identity"), "Identity");
        assert_eq!(format_attribute_name("zipcode"), "Zipcode");
    }

    #[test]
    fn custom_text_is_capitalized_verbatim() {
        assert_eq!(format_attribute_name("my custom value"), "My custom value");
        assert_eq!(format_attribute_name("ümlaut"), "Ümlaut");
    }

    #[test]
    fn fuzzy_prefers_prefix_and_word_starts() {
        let prefix = fuzzy_score("temperature", "temp").expect("prefix match");
        let inner = fuzzy_score("current_temperature", "temp").expect("word start match");
        let scattered = fuzzy_score("swing_mode", "sm").expect("scattered match");
        assert!(prefix > inner, "prefix {prefix} should beat inner {inner}");
        assert!(inner > scattered);
    }

    #[test]
    fn fuzzy_is_case_insensitive_and_order_sensitive() {
        assert!(fuzzy_score("Humidity", "HUM").is_some());
        assert!(fuzzy_score("humidity", "ytih").is_none());
        assert!(fuzzy_score("", "a").is_none());
        assert_eq!(fuzzy_score("", "  "), Some(0));
    }
}
