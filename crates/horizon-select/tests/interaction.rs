//! Integration tests for the popup, focus, and keyboard wiring.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use horizon_select::interaction::{
    AriaSelectMultipleOptions, ElementHandle, ElementId, FocusEvent, FocusReason,
    KeyboardEvent, SelectMultipleRefs, use_select_multiple,
};
use horizon_select::{
    FocusStrategy, KeySet, ListCollection, SelectMultipleOptions, SelectMultipleState,
};

/// A popup element owning ids 100..200.
struct Popup;

impl ElementHandle for Popup {
    fn element_id(&self) -> ElementId {
        ElementId::new(100)
    }

    fn contains(&self, other: ElementId) -> bool {
        (100..200).contains(&other.get())
    }

    fn focus(&self) {}
}

struct Trigger;

impl ElementHandle for Trigger {
    fn element_id(&self) -> ElementId {
        ElementId::new(1)
    }

    fn focus(&self) {}
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn widget() -> (Arc<SelectMultipleState<String>>, Arc<SelectMultipleRefs>) {
    let collection = ListCollection::from_texts(["apple", "banana", "cherry"]).unwrap();
    (
        SelectMultipleState::new_shared(SelectMultipleOptions::new(collection)),
        Arc::new(SelectMultipleRefs::new(Arc::new(Trigger))),
    )
}

fn keys(texts: &[&str]) -> KeySet {
    texts.iter().copied().collect()
}

fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    (count.clone(), count)
}

#[test]
fn test_open_twice_keeps_latest_strategy() {
    let (state, _) = widget();
    state.open(Some(FocusStrategy::First));
    state.open(Some(FocusStrategy::Last));
    assert!(state.is_open());
    assert_eq!(state.focus_strategy(), Some(FocusStrategy::Last));

    state.close();
    state.close();
    assert!(!state.is_open());
}

#[test]
fn test_type_ahead_replaces_selection() {
    init_tracing();
    let (state, refs) = widget();
    state.set_selected_keys(keys(&["apple", "banana"]));

    let aria = use_select_multiple(&AriaSelectMultipleOptions::new(), &state, &refs);
    let start = Instant::now();
    aria.trigger_props
        .on_key_down
        .call(&mut KeyboardEvent::character('c').at(start));
    aria.trigger_props
        .on_key_down
        .call(&mut KeyboardEvent::character('h').at(start + Duration::from_millis(50)));

    assert_eq!(state.selected_keys(), keys(&["cherry"]));
    assert_eq!(refs.type_select().search(), "ch");
}

#[test]
fn test_space_inside_search_does_not_open_popup() {
    let collection = ListCollection::from_texts(["new york", "newark"]).unwrap();
    let state = SelectMultipleState::new_shared(SelectMultipleOptions::new(collection));
    let refs = Arc::new(SelectMultipleRefs::new(Arc::new(Trigger)));
    let aria = use_select_multiple(&AriaSelectMultipleOptions::new(), &state, &refs);

    let start = Instant::now();
    for (offset, c) in "new y".chars().enumerate() {
        aria.trigger_props.on_key_down.call(
            &mut KeyboardEvent::character(c).at(start + Duration::from_millis(offset as u64 * 10)),
        );
    }
    assert!(!state.is_open());
    assert_eq!(state.selected_keys(), keys(&["new york"]));
}

#[test]
fn test_trigger_blur_suppressed_while_open() {
    init_tracing();
    let (state, refs) = widget();
    let (blurs, blurs_seen) = counter();
    let options = AriaSelectMultipleOptions::new().on_blur(move |_| {
        blurs.fetch_add(1, Ordering::SeqCst);
    });
    let aria = use_select_multiple(&options, &state, &refs);

    aria.trigger_props.on_focus.call(&mut FocusEvent::new(FocusReason::Tab));
    state.open(None);
    aria.trigger_props.on_blur.call(&mut FocusEvent::new(FocusReason::Other));
    assert!(state.is_focused());
    assert_eq!(blurs_seen.load(Ordering::SeqCst), 0);

    state.close();
    aria.trigger_props.on_blur.call(&mut FocusEvent::new(FocusReason::Tab));
    assert!(!state.is_focused());
    assert_eq!(blurs_seen.load(Ordering::SeqCst), 1);
}

#[test]
fn test_popup_blur_within_popup_is_ignored() {
    let (state, refs) = widget();
    let (blurs, blurs_seen) = counter();
    let options = AriaSelectMultipleOptions::new().on_blur(move |_| {
        blurs.fetch_add(1, Ordering::SeqCst);
    });
    state.set_focused(true);
    state.open(None);
    let aria = use_select_multiple(&options, &state, &refs);

    let popup: Arc<dyn ElementHandle> = Arc::new(Popup);
    let mut inside = FocusEvent::new(FocusReason::Tab)
        .with_current_target(popup.clone())
        .with_related_target(ElementId::new(150));
    aria.popup_props.on_blur.call(&mut inside);
    assert!(state.is_focused());
    assert_eq!(blurs_seen.load(Ordering::SeqCst), 0);

    let mut outside = FocusEvent::new(FocusReason::Mouse)
        .with_current_target(popup)
        .with_related_target(ElementId::new(7));
    aria.popup_props.on_blur.call(&mut outside);
    assert!(!state.is_focused());
    assert_eq!(blurs_seen.load(Ordering::SeqCst), 1);
}

#[test]
fn test_value_display_labels_trigger() {
    let (state, refs) = widget();
    let options = AriaSelectMultipleOptions::new()
        .with_label()
        .with_aria_labelledby("form-heading");
    let aria = use_select_multiple(&options, &state, &refs);

    let labelledby = aria.trigger_props.aria_labelledby.unwrap();
    let ids: Vec<_> = labelledby.split(' ').collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(ids[0], aria.value_props.id);
    assert_eq!(Some(ids[1]), aria.label_props.id.as_deref());
    assert_eq!(ids[2], "form-heading");
}
