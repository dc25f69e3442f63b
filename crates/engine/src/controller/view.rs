//! Declarative view construction and candidate search.

use attrpick_types::{CandidateItem, EntityStore, PickerView, ToggleAffordance};
use attrpick_util::{format_attribute_name, fuzzy_score};

use super::props::PickerProps;

/// Localization key for the default field label.
pub const ATTRIBUTE_LABEL_KEY: &str = "attrpick.picker.attribute";
/// Localization key for the clear button.
pub const CLEAR_LABEL_KEY: &str = "attrpick.picker.clear";
/// Localization key for the drop-down toggle.
pub const SHOW_ATTRIBUTES_KEY: &str = "attrpick.picker.show_attributes";

fn localized(store: &dyn EntityStore, key: &str, fallback: &str) -> String {
    store
        .localize(key)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

pub(crate) fn build_view(props: &PickerProps, opened: bool, candidates: &[String], store: &dyn EntityStore) -> PickerView {
    let current = props.value.as_deref().filter(|value| !value.is_empty());

    PickerView {
        label: props
            .label
            .clone()
            .unwrap_or_else(|| localized(store, ATTRIBUTE_LABEL_KEY, "Attribute")),
        input_text: current.map(format_attribute_name).unwrap_or_default(),
        value: props.value.clone(),
        disabled: props.disabled || props.entity_id.is_none(),
        autofocus: props.autofocus,
        allow_custom_value: props.allow_custom_value,
        opened,
        clear_button: current.map(|_| localized(store, CLEAR_LABEL_KEY, "Clear")),
        toggle: ToggleAffordance {
            label: localized(store, SHOW_ATTRIBUTES_KEY, "Show attributes"),
            expanded: opened,
        },
        items: candidates
            .iter()
            .map(|key| CandidateItem {
                key: key.clone(),
                display: format_attribute_name(key),
            })
            .collect(),
    }
}

/// Narrow rendered items to those matching `query`, keeping candidate order.
///
/// Items match on either the display name or the raw key. Filtering happens
/// on the already-rendered rows and never triggers a new resolution.
pub fn filter_items<'a>(items: &'a [CandidateItem], query: &str) -> Vec<&'a CandidateItem> {
    if query.trim().is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| fuzzy_score(&item.display, query).is_some() || fuzzy_score(&item.key, query).is_some())
        .collect()
}
