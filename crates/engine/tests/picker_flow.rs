use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use attrpick_engine::{CacheStats, ChannelAdapter, PickerController, PickerRuntime, UpdateOutcome, filter_items};
use attrpick_registry::LayeredCatalog;
use attrpick_types::{Affordance, AttributeSnapshot, EntityStore, MemoryStore, PickerEvent, PickerInput, PickerView};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

fn load_store() -> MemoryStore {
    MemoryStore::from_json_str(include_str!("data/states.json")).expect("load store fixture")
}

/// Store wrapper that counts snapshot reads.
#[derive(Debug)]
struct CountingStore {
    inner: MemoryStore,
    reads: AtomicUsize,
}

impl EntityStore for CountingStore {
    fn snapshot(&self, entity_id: &str) -> Option<&AttributeSnapshot> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.snapshot(entity_id)
    }

    fn localize(&self, key: &str) -> Option<String> {
        self.inner.localize(key)
    }
}

fn picker(entity_id: &str) -> PickerController {
    let mut picker = PickerController::default().with_store(Arc::new(load_store()));
    picker.dispatch(PickerInput::SetEntityId {
        entity_id: Some(entity_id.into()),
    });
    picker.update();
    picker
}

fn open(picker: &mut PickerController) -> PickerView {
    picker.dispatch(PickerInput::OpenedChanged { opened: true });
    match picker.update() {
        UpdateOutcome::Rendered(Some(view)) => view,
        other => panic!("expected a render on open, got {other:?}"),
    }
}

fn keys(view: &PickerView) -> Vec<&str> {
    view.items.iter().map(|item| item.key.as_str()).collect()
}

fn drain<T>(receiver: &mut UnboundedReceiver<T>) -> Vec<T> {
    let mut items = Vec::new();
    while let Ok(item) = receiver.try_recv() {
        items.push(item);
    }
    items
}

#[test]
fn light_offers_only_catalog_attributes() {
    let mut picker = picker("light.kitchen");
    let view = open(&mut picker);
    assert_eq!(keys(&view), vec!["brightness"]);
    assert_eq!(view.items[0].display, "Brightness");
}

#[test]
fn climate_preserves_snapshot_order() {
    let mut picker = picker("climate.office");
    let view = open(&mut picker);
    assert_eq!(keys(&view), vec!["temperature", "humidity"]);
}

#[test]
fn unknown_domain_and_absent_entity_degrade_to_empty() {
    for entity_id in ["sensor.outdoor", "light.garage", "nodomain"] {
        let mut picker = picker(entity_id);
        let view = open(&mut picker);
        assert!(view.items.is_empty(), "{entity_id}: {:?}", view.items);
        assert!(picker.opened());
    }
}

#[test]
fn reopening_reads_store_once_per_entity() {
    let store = Arc::new(CountingStore {
        inner: load_store(),
        reads: AtomicUsize::new(0),
    });
    let mut picker = PickerController::default().with_store(store.clone());
    picker.dispatch(PickerInput::SetEntityId {
        entity_id: Some("climate.office".into()),
    });

    for _ in 0..3 {
        open(&mut picker);
        picker.dispatch(PickerInput::OpenedChanged { opened: false });
        picker.update();
    }
    assert_eq!(store.reads.load(Ordering::SeqCst), 1);
    assert_eq!(picker.cache_stats(), CacheStats { hits: 2, misses: 1 });

    // Identical content under another id still resolves again.
    picker.dispatch(PickerInput::SetEntityId {
        entity_id: Some("climate.bedroom".into()),
    });
    let view = open(&mut picker);
    assert_eq!(keys(&view), vec!["temperature", "humidity"]);
    assert_eq!(store.reads.load(Ordering::SeqCst), 2);
    assert_eq!(picker.cache_stats().misses, 2);
}

#[test]
fn label_change_while_open_keeps_list_and_open_state() {
    let mut picker = picker("climate.office");
    let opened_view = open(&mut picker);
    let renders = picker.render_count();

    picker.dispatch(PickerInput::SetLabel {
        label: Some("Climate attribute".into()),
    });
    assert_eq!(picker.update(), UpdateOutcome::Suppressed);

    assert!(picker.opened());
    assert_eq!(picker.render_count(), renders);
    assert_eq!(picker.cache_stats(), CacheStats { hits: 0, misses: 1 });
    assert_eq!(picker.view().map(|view| view.items), Some(opened_view.items));
}

#[test]
fn typed_query_filters_without_resolving() {
    let mut picker = picker("climate.office");
    let view = open(&mut picker);
    let matched: Vec<&str> = filter_items(&view.items, "hum").iter().map(|item| item.key.as_str()).collect();
    assert_eq!(matched, vec!["humidity"]);
    assert_eq!(picker.cache_stats().misses, 1);
}

#[test]
fn layered_catalog_opens_extra_domains() {
    let catalog = LayeredCatalog::new([("sensor", vec!["unit_of_measurement", "temperature"])]);
    let mut picker = PickerController::new(catalog).with_store(Arc::new(load_store()));
    picker.dispatch(PickerInput::SetEntityId {
        entity_id: Some("sensor.outdoor".into()),
    });
    picker.dispatch(PickerInput::OpenedChanged { opened: true });
    let UpdateOutcome::Rendered(Some(view)) = picker.update() else {
        panic!("expected a render on open");
    };
    assert_eq!(keys(&view), vec!["temperature", "unit_of_measurement"]);
    assert_eq!(view.items[1].display, "Unit of measurement");
}

#[tokio::test]
async fn clearing_emits_exactly_one_pair_and_no_toggle() {
    let (view_tx, mut view_rx) = unbounded_channel();
    let (event_tx, mut event_rx) = unbounded_channel();
    let mut runtime = PickerRuntime::new(picker("light.kitchen"), ChannelAdapter::new(view_tx), event_tx);

    runtime
        .handle(PickerInput::SetValue {
            value: Some("brightness".into()),
        })
        .await;
    let before = drain(&mut view_rx).into_iter().flatten().last().expect("value render");
    assert_eq!(before.input_text, "Brightness");
    assert_eq!(before.clear_button.as_deref(), Some("Clear"));

    runtime
        .handle(PickerInput::Pressed {
            affordance: Affordance::Clear,
        })
        .await;

    assert_eq!(
        drain(&mut event_rx),
        vec![PickerEvent::ValueChanged { value: String::new() }, PickerEvent::Change]
    );
    let after = drain(&mut view_rx).into_iter().flatten().collect::<Vec<_>>();
    assert_eq!(after.len(), 1);
    assert!(!after[0].opened);
    assert!(after[0].clear_button.is_none());
    assert!(!runtime.controller().opened());
}

#[tokio::test]
async fn selection_from_open_list_notifies_after_render() {
    let (view_tx, mut view_rx) = unbounded_channel();
    let (event_tx, mut event_rx) = unbounded_channel();
    let mut runtime = PickerRuntime::new(picker("climate.office"), ChannelAdapter::new(view_tx), event_tx);

    runtime.handle(PickerInput::OpenedChanged { opened: true }).await;
    runtime
        .handle(PickerInput::ValueEdited {
            value: "humidity".into(),
        })
        .await;
    runtime.handle(PickerInput::OpenedChanged { opened: false }).await;

    let views = drain(&mut view_rx).into_iter().flatten().collect::<Vec<_>>();
    // Open and close render; the edit while open is held back until close.
    assert_eq!(views.len(), 2);
    assert_eq!(keys(&views[0]), vec!["temperature", "humidity"]);
    assert_eq!(views[1].input_text, "Humidity");
    assert!(views[1].items.is_empty());

    assert_eq!(
        drain(&mut event_rx),
        vec![
            PickerEvent::ValueChanged {
                value: "humidity".into()
            },
            PickerEvent::Change
        ]
    );
}

#[tokio::test]
async fn missing_store_renders_nothing() {
    let (view_tx, mut view_rx) = unbounded_channel();
    let (event_tx, _event_rx) = unbounded_channel();
    let mut runtime = PickerRuntime::new(PickerController::default(), ChannelAdapter::new(view_tx), event_tx);

    runtime
        .handle(PickerInput::SetEntityId {
            entity_id: Some("light.kitchen".into()),
        })
        .await;
    assert_eq!(drain(&mut view_rx), vec![None]);

    runtime.set_store(Some(Arc::new(load_store()))).await;
    let views = drain(&mut view_rx);
    assert_eq!(views.len(), 1);
    assert!(views[0].as_ref().is_some_and(|view| !view.disabled));
}
