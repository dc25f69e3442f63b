//! Picker signals, effects, events, and the declarative view.

use serde::{Deserialize, Serialize};

/// Ordered attribute keys offered for selection.
pub type CandidateList = Vec<String>;

/// Interactive parts of the picker that a presentation adapter can report presses on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affordance {
    /// The clear button shown next to a non-empty value.
    Clear,
    /// The drop-down toggle.
    Toggle,
}

/// Inbound signals consumed by the picker controller.
///
/// The first three come from user interaction routed through the presentation
/// adapter; the `Set*` variants are the host assigning the picker's external
/// inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum PickerInput {
    /// The drop-down reported a new open state.
    OpenedChanged { opened: bool },
    /// The text field or drop-down reported a new value.
    ValueEdited { value: String },
    /// A pointer press on one of the picker's affordances. Unless a handler
    /// stops propagation, a press toggles the drop-down.
    Pressed { affordance: Affordance },
    SetEntityId { entity_id: Option<String> },
    SetValue { value: Option<String> },
    SetDisabled { disabled: bool },
    SetAutofocus { autofocus: bool },
    SetLabel { label: Option<String> },
    SetAllowCustomValue { allow_custom_value: bool },
}

/// Side effects requested by the controller while handling an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Observable state changed; run an update cycle.
    RequestUpdate,
    /// Emit the outward change notification for `value` once the current task completes.
    ScheduleNotification { value: String },
    /// The triggering interaction was consumed and must not reach default handling.
    StopPropagation,
}

/// Outward notifications. Always emitted as `ValueChanged` followed by `Change`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum PickerEvent {
    ValueChanged { value: String },
    Change,
}

/// Observable picker fields tracked between update cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickerProperty {
    Store,
    EntityId,
    Value,
    Disabled,
    Autofocus,
    Label,
    AllowCustomValue,
    Opened,
}

/// One selectable row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateItem {
    /// Raw attribute key; this is what selection writes into the value.
    pub key: String,
    /// Human-readable attribute name.
    pub display: String,
}

/// State of the drop-down toggle button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleAffordance {
    pub label: String,
    /// `true` while the drop-down is open.
    pub expanded: bool,
}

/// Everything a presentation adapter needs to draw the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerView {
    /// Field label.
    pub label: String,
    /// Text shown in the input: the formatted current value, or empty.
    pub input_text: String,
    /// Raw current value handed to the drop-down.
    pub value: Option<String>,
    pub disabled: bool,
    pub autofocus: bool,
    pub allow_custom_value: bool,
    pub opened: bool,
    /// Label of the clear button; `None` hides the button.
    pub clear_button: Option<String>,
    pub toggle: ToggleAffordance,
    /// Candidate rows. Empty while closed.
    pub items: Vec<CandidateItem>,
}
