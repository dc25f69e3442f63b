//! Deferred outward notifications.
//!
//! User-driven value changes are announced after the handler that caused them
//! has finished. The queue holds the scheduled values until the host drains it,
//! at which point each value becomes a `value-changed` / `change` pair.

use std::collections::VecDeque;

use attrpick_types::PickerEvent;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: VecDeque<String>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, value: impl Into<String>) {
        self.pending.push_back(value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Take every scheduled notification as events, oldest first.
    ///
    /// When `disposed` is set the pending values are discarded instead.
    pub fn drain(&mut self, disposed: bool) -> Vec<PickerEvent> {
        if disposed {
            if !self.pending.is_empty() {
                debug!(dropped = self.pending.len(), "discarding notifications for disposed picker");
            }
            self.pending.clear();
            return Vec::new();
        }

        let mut events = Vec::with_capacity(self.pending.len() * 2);
        for value in self.pending.drain(..) {
            events.push(PickerEvent::ValueChanged { value });
            events.push(PickerEvent::Change);
        }
        events
    }
}
