//! Shared type definitions for the attribute picker.
//!
//! The engine, catalog, and CLI crates exchange these types: the entity store
//! abstraction that feeds attribute snapshots into the picker, the inbound
//! signals a presentation adapter reports, the effects the controller hands
//! back, and the declarative view the adapter renders.

pub mod picker;
pub mod store;

pub use picker::{Affordance, CandidateItem, CandidateList, Effect, PickerEvent, PickerInput, PickerProperty, PickerView, ToggleAffordance};
pub use store::{AttributeSnapshot, EntityStore, MemoryStore, StoreLoadError};
