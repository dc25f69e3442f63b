//! # Attrpick Engine
//!
//! Headless controller for a single attribute picker: given an entity id and
//! a store holding that entity's attribute snapshot, it offers the attributes
//! that make sense for the entity's domain and reports the user's choice.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use attrpick_engine::{PickerController, UpdateOutcome};
//! use attrpick_types::{EntityStore, MemoryStore, PickerInput};
//!
//! let mut snapshot = attrpick_types::AttributeSnapshot::new();
//! snapshot.insert("brightness".into(), serde_json::json!(128));
//! snapshot.insert("color_temp".into(), serde_json::json!(300));
//! let store: Arc<dyn EntityStore> = Arc::new(MemoryStore::new().with_state("light.kitchen", snapshot));
//!
//! let mut picker = PickerController::default().with_store(store);
//! picker.dispatch(PickerInput::SetEntityId { entity_id: Some("light.kitchen".into()) });
//! picker.dispatch(PickerInput::OpenedChanged { opened: true });
//!
//! let UpdateOutcome::Rendered(Some(view)) = picker.update() else { unreachable!() };
//! assert_eq!(view.items.len(), 1);
//! assert_eq!(view.items[0].display, "Brightness");
//! ```
//!
//! ## Architecture
//!
//! - **`resolve`**: pure candidate resolution against an attribute catalog
//! - **`cache`**: single-slot memo keyed by entity id
//! - **`controller`**: picker state machine, render gating, and view building
//! - **`notify`**: deferred `value-changed` / `change` notifications
//! - **`runtime`**: async host loop wiring a controller to a presentation adapter

pub mod cache;
pub mod controller;
pub mod notify;
pub mod resolve;
pub mod runtime;

pub use cache::{CacheStats, ResolutionCache};
pub use controller::{
    ATTRIBUTE_LABEL_KEY, CLEAR_LABEL_KEY, ChangedProperties, PickerController, PickerProps, SHOW_ATTRIBUTES_KEY, UpdateOutcome,
    filter_items, should_render,
};
pub use notify::NotificationQueue;
pub use resolve::CandidateResolver;
pub use runtime::{ChannelAdapter, PickerRuntime, PresentationAdapter};
