//! External picker inputs and change tracking between update cycles.

use attrpick_types::PickerProperty;
use indexmap::IndexSet;

/// Inputs the host assigns to a picker instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerProps {
    pub entity_id: Option<String>,
    pub value: Option<String>,
    pub disabled: bool,
    pub autofocus: bool,
    pub label: Option<String>,
    pub allow_custom_value: bool,
}

/// Properties that changed since the last update cycle, in change order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangedProperties(IndexSet<PickerProperty>);

impl ChangedProperties {
    pub fn insert(&mut self, property: PickerProperty) {
        self.0.insert(property);
    }

    pub fn contains(&self, property: PickerProperty) -> bool {
        self.0.contains(&property)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PickerProperty> + '_ {
        self.0.iter().copied()
    }

    /// Hand out the accumulated set and start a fresh one.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl FromIterator<PickerProperty> for ChangedProperties {
    fn from_iter<T: IntoIterator<Item = PickerProperty>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Whether an update cycle with `changed` may re-render the picker.
///
/// While the drop-down is open only a change of the open flag itself renders;
/// anything else would swap the option list out from under the user.
pub fn should_render(changed: &ChangedProperties, opened: bool) -> bool {
    !opened || changed.contains(PickerProperty::Opened)
}

/// Assign `next` into `slot`, recording `property` when the value actually changes.
pub(crate) fn assign<T: PartialEq>(slot: &mut T, next: T, property: PickerProperty, changed: &mut ChangedProperties) -> bool {
    if *slot == next {
        return false;
    }
    *slot = next;
    changed.insert(property);
    true
}
