//! Attribute picker controller.
//!
//! The controller owns the picker's observable state (current value and
//! open/closed flag) and reacts to [`PickerInput`] signals. It follows a
//! two-phase cycle:
//!
//! 1. [`PickerController::dispatch`] applies one input and returns the
//!    [`Effect`]s the host must carry out (run an update, schedule the outward
//!    notification, stop propagation of the interaction).
//! 2. [`PickerController::update`] consumes the accumulated property changes,
//!    decides whether a render is allowed, resolves candidates on the
//!    transition into the open state, and produces the [`PickerView`].
//!
//! Candidates are resolved lazily: changing the entity id does nothing until
//! the next open, and reopening for the same entity is served from the
//! [`ResolutionCache`].

mod props;
mod view;

use std::sync::Arc;

use attrpick_registry::{AttributeCatalog, BuiltinCatalog};
use attrpick_types::{Affordance, CandidateList, Effect, EntityStore, PickerInput, PickerProperty, PickerView};
use tracing::debug;

use crate::cache::{CacheStats, ResolutionCache};
use crate::resolve::CandidateResolver;

pub use props::{ChangedProperties, PickerProps, should_render};
pub use view::{ATTRIBUTE_LABEL_KEY, CLEAR_LABEL_KEY, SHOW_ATTRIBUTES_KEY, filter_items};

use props::assign;

/// Result of one update cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Nothing changed since the last cycle.
    Idle,
    /// Changes were consumed without rendering because the drop-down is open.
    Suppressed,
    /// The picker rendered. `None` is the empty render used while no store is attached.
    Rendered(Option<PickerView>),
}

/// State machine behind one attribute picker instance.
#[derive(Debug)]
pub struct PickerController<C = BuiltinCatalog> {
    store: Option<Arc<dyn EntityStore>>,
    props: PickerProps,
    opened: bool,
    cache: ResolutionCache<C>,
    candidates: CandidateList,
    changed: ChangedProperties,
    render_count: u64,
    disposed: bool,
}

impl Default for PickerController<BuiltinCatalog> {
    fn default() -> Self {
        Self::new(BuiltinCatalog)
    }
}

impl<C: AttributeCatalog> PickerController<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            store: None,
            props: PickerProps::default(),
            opened: false,
            cache: ResolutionCache::new(CandidateResolver::new(catalog)),
            candidates: CandidateList::new(),
            changed: ChangedProperties::default(),
            render_count: 0,
            disposed: false,
        }
    }

    /// Builder-style variant of [`PickerController::set_store`].
    pub fn with_store(mut self, store: Arc<dyn EntityStore>) -> Self {
        self.set_store(Some(store));
        self
    }

    // ===== SELECTORS =====

    pub fn opened(&self) -> bool {
        self.opened
    }

    pub fn value(&self) -> Option<&str> {
        self.props.value.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.props.entity_id.as_deref()
    }

    /// Candidates handed to the drop-down; empty while closed.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Number of renders performed so far.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether changes are waiting for the next update cycle.
    pub fn has_pending_changes(&self) -> bool {
        !self.changed.is_empty()
    }

    /// The view for the current state, or `None` while no store is attached.
    pub fn view(&self) -> Option<PickerView> {
        let store = self.store.as_deref()?;
        Some(view::build_view(&self.props, self.opened, &self.candidates, store))
    }

    // ===== MUTATIONS =====

    /// Attach or replace the store handle. Replacing it with the same handle is a no-op.
    pub fn set_store(&mut self, store: Option<Arc<dyn EntityStore>>) -> Vec<Effect> {
        let same = match (&self.store, &store) {
            (Some(current), Some(next)) => Arc::ptr_eq(current, next),
            (None, None) => true,
            _ => false,
        };
        if same {
            return Vec::new();
        }
        self.store = store;
        self.changed.insert(PickerProperty::Store);
        vec![Effect::RequestUpdate]
    }

    /// Apply one inbound signal and return the effects the host must run.
    pub fn dispatch(&mut self, input: PickerInput) -> Vec<Effect> {
        if self.disposed {
            debug!(?input, "ignoring input for disposed picker");
            return Vec::new();
        }

        let assigned = match input {
            PickerInput::OpenedChanged { opened } => return self.set_opened(opened),
            PickerInput::ValueEdited { value } => return self.value_edited(value),
            PickerInput::Pressed { affordance } => return self.pressed(affordance),
            PickerInput::SetEntityId { entity_id } => assign(&mut self.props.entity_id, entity_id, PickerProperty::EntityId, &mut self.changed),
            PickerInput::SetValue { value } => assign(&mut self.props.value, value, PickerProperty::Value, &mut self.changed),
            PickerInput::SetDisabled { disabled } => assign(&mut self.props.disabled, disabled, PickerProperty::Disabled, &mut self.changed),
            PickerInput::SetAutofocus { autofocus } => {
                assign(&mut self.props.autofocus, autofocus, PickerProperty::Autofocus, &mut self.changed)
            }
            PickerInput::SetLabel { label } => assign(&mut self.props.label, label, PickerProperty::Label, &mut self.changed),
            PickerInput::SetAllowCustomValue { allow_custom_value } => assign(
                &mut self.props.allow_custom_value,
                allow_custom_value,
                PickerProperty::AllowCustomValue,
                &mut self.changed,
            ),
        };
        if assigned { vec![Effect::RequestUpdate] } else { Vec::new() }
    }

    /// Consume pending changes and render when allowed.
    pub fn update(&mut self) -> UpdateOutcome {
        if self.disposed || self.changed.is_empty() {
            return UpdateOutcome::Idle;
        }

        let changed = self.changed.take();
        if !should_render(&changed, self.opened) {
            debug!(
                changed = ?changed.iter().collect::<Vec<_>>(),
                "render suppressed while drop-down is open"
            );
            return UpdateOutcome::Suppressed;
        }

        if changed.contains(PickerProperty::Opened) {
            if self.opened {
                self.refresh_candidates();
            } else {
                self.candidates.clear();
            }
        }

        self.render_count += 1;
        UpdateOutcome::Rendered(self.view())
    }

    /// Tear the instance down. Later inputs and updates are ignored.
    pub fn dispose(&mut self) {
        if !self.disposed {
            debug!(entity_id = ?self.props.entity_id, "picker disposed");
        }
        self.disposed = true;
        self.changed = ChangedProperties::default();
        self.candidates.clear();
    }

    fn set_opened(&mut self, opened: bool) -> Vec<Effect> {
        if assign(&mut self.opened, opened, PickerProperty::Opened, &mut self.changed) {
            debug!(opened, entity_id = ?self.props.entity_id, "drop-down state changed");
            vec![Effect::RequestUpdate]
        } else {
            Vec::new()
        }
    }

    fn value_edited(&mut self, value: String) -> Vec<Effect> {
        if self.props.value.as_deref() == Some(value.as_str()) {
            return Vec::new();
        }
        self.set_value(value)
    }

    fn pressed(&mut self, affordance: Affordance) -> Vec<Effect> {
        let mut effects = match affordance {
            Affordance::Clear => self.clear_value(),
            Affordance::Toggle => Vec::new(),
        };
        if !effects.contains(&Effect::StopPropagation) {
            effects.extend(self.set_opened(!self.opened));
        }
        effects
    }

    fn clear_value(&mut self) -> Vec<Effect> {
        let mut effects = self.set_value(String::new());
        effects.push(Effect::StopPropagation);
        effects
    }

    /// Commit a user-driven value and schedule the outward notification.
    fn set_value(&mut self, value: String) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        if assign(&mut self.props.value, Some(value.clone()), PickerProperty::Value, &mut self.changed) {
            effects.push(Effect::RequestUpdate);
        }
        effects.push(Effect::ScheduleNotification { value });
        effects
    }

    fn refresh_candidates(&mut self) {
        let Some(entity_id) = self.props.entity_id.as_deref() else {
            self.candidates = CandidateList::new();
            return;
        };
        let Some(store) = self.store.as_deref() else {
            self.candidates = CandidateList::new();
            return;
        };
        self.candidates = self.cache.get_or_compute(entity_id, || store.snapshot(entity_id));
    }
}
