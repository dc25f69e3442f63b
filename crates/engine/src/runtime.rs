//! Async host loop for a picker instance.
//!
//! [`PickerRuntime`] owns a [`PickerController`], carries out the effects it
//! returns, hands rendered views to a [`PresentationAdapter`], and delivers
//! outward notifications on a channel once the triggering input has been fully
//! handled.

use std::sync::Arc;

use attrpick_registry::{AttributeCatalog, BuiltinCatalog};
use attrpick_types::{Effect, EntityStore, PickerEvent, PickerInput, PickerView};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::controller::{PickerController, UpdateOutcome};
use crate::notify::NotificationQueue;

/// Draws picker views. `None` means render nothing.
pub trait PresentationAdapter: Send {
    fn render(&mut self, view: Option<&PickerView>);
}

/// Adapter that forwards every rendered view to a channel.
#[derive(Debug, Clone)]
pub struct ChannelAdapter {
    sender: UnboundedSender<Option<PickerView>>,
}

impl ChannelAdapter {
    pub fn new(sender: UnboundedSender<Option<PickerView>>) -> Self {
        Self { sender }
    }
}

impl PresentationAdapter for ChannelAdapter {
    fn render(&mut self, view: Option<&PickerView>) {
        if self.sender.send(view.cloned()).is_err() {
            trace!("view receiver dropped");
        }
    }
}

pub struct PickerRuntime<C = BuiltinCatalog, A = ChannelAdapter> {
    controller: PickerController<C>,
    adapter: A,
    notifications: NotificationQueue,
    events: UnboundedSender<PickerEvent>,
    cancellation_token: CancellationToken,
}

impl<C, A> PickerRuntime<C, A>
where
    C: AttributeCatalog,
    A: PresentationAdapter,
{
    pub fn new(controller: PickerController<C>, adapter: A, events: UnboundedSender<PickerEvent>) -> Self {
        Self {
            controller,
            adapter,
            notifications: NotificationQueue::new(),
            events,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Token that tears the picker down when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    pub fn controller(&self) -> &PickerController<C> {
        &self.controller
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub async fn set_store(&mut self, store: Option<Arc<dyn EntityStore>>) {
        let effects = self.controller.set_store(store);
        self.apply(effects).await;
    }

    /// Handle one input to completion, including its deferred notifications.
    pub async fn handle(&mut self, input: PickerInput) {
        if self.cancellation_token.is_cancelled() {
            self.controller.dispose();
        }
        let effects = self.controller.dispatch(input);
        self.apply(effects).await;
    }

    /// Process inputs until the channel closes or the token is cancelled.
    ///
    /// The controller is disposed on exit and handed back for inspection.
    pub async fn run(mut self, mut inputs: UnboundedReceiver<PickerInput>) -> PickerController<C> {
        let token = self.cancellation_token.clone();
        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                maybe_input = inputs.recv() => match maybe_input {
                    Some(input) => self.handle(input).await,
                    None => break,
                },
            }
        }
        self.dispose();
        self.controller
    }

    pub fn dispose(&mut self) {
        self.cancellation_token.cancel();
        self.controller.dispose();
        self.notifications.drain(true);
    }

    async fn apply(&mut self, effects: Vec<Effect>) {
        let mut needs_update = false;
        for effect in effects {
            match effect {
                Effect::RequestUpdate => needs_update = true,
                Effect::ScheduleNotification { value } => self.notifications.schedule(value),
                Effect::StopPropagation => trace!("interaction consumed by picker"),
            }
        }

        if needs_update {
            match self.controller.update() {
                UpdateOutcome::Rendered(view) => self.adapter.render(view.as_ref()),
                UpdateOutcome::Suppressed | UpdateOutcome::Idle => {}
            }
        }

        if !self.notifications.is_empty() {
            // Let the current handler finish before anyone hears about the change.
            tokio::task::yield_now().await;
            self.flush_notifications();
        }
    }

    fn flush_notifications(&mut self) {
        let disposed = self.controller.is_disposed() || self.cancellation_token.is_cancelled();
        for event in self.notifications.drain(disposed) {
            debug!(?event, "picker notification");
            if self.events.send(event).is_err() {
                debug!("notification receiver dropped");
                break;
            }
        }
    }
}
