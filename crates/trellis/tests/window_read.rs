//! Integration tests for the window read loop.

use std::thread;
use std::time::{Duration, Instant};

use serde_json::json;
use trellis::prelude::*;
use trellis::toolkit::{HeadlessToolkit, interactions};

fn open(layout: Layout) -> (Application, HeadlessToolkit, Window) {
    let (app, toolkit) = Application::headless();
    let window = Window::new(&app, "test", layout).unwrap();
    (app, toolkit, window)
}

#[test]
fn test_read_times_out_with_empty_values() {
    let (_app, _toolkit, mut window) = open(trellis::layout![[Input::new("x").key("-in-")]]);

    let started = Instant::now();
    let (event, values) = window.read(Some(Duration::from_millis(100)));
    let elapsed = started.elapsed();
    assert_eq!(event, TIMEOUT_KEY);
    assert!(values.is_empty());
    assert!(elapsed >= Duration::from_millis(100), "returned early after {elapsed:?}");
    assert!(elapsed < Duration::from_millis(200), "returned late after {elapsed:?}");

    let (event, _) = window.read_with_timeout_key(Some(Duration::from_millis(5)), "-idle-");
    assert_eq!(event, "-idle-");
}

#[test]
fn test_events_are_returned_in_fifo_order() {
    let (_app, _toolkit, mut window) = open(trellis::layout![[Text::new("t")]]);
    for name in ["A", "B", "C"] {
        window.write_event_value(name, Values::new());
    }
    let names: Vec<String> = (0..3).map(|_| window.read(None).0).collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[test]
fn test_button_click_carries_snapshot() {
    let (_app, toolkit, mut window) = open(trellis::layout![[
        Input::new("hello").key("-in-"),
        Button::new("OK"),
    ]]);
    let input = window.element_handle("-in-").unwrap();
    toolkit.type_text(input, "changed");
    toolkit.click(window.element_handle("OK").unwrap());

    let (event, values) = window.read(Some(Duration::from_secs(1)));
    assert_eq!(event, "OK");
    assert_eq!(values.get_str("-in-"), Some("changed"));
    assert_eq!(values.get_str("event_type"), Some("command"));
}

#[test]
fn test_stopping_hook_relabels_event_and_refreshes_values() {
    let (_app, toolkit, mut window) = open(trellis::layout![[
        Input::new("v").key("-in-"),
        Button::new("Save"),
    ]]);
    window.register_event_hook("Save", |window: &mut Window, _: &str, values: &Values| {
        assert_eq!(values.get_str("event_type"), Some("command"));
        assert_eq!(values.get_str("-in-"), Some("v"));
        if let Some(input) = window.element_as_mut::<Input>("-in-") {
            input.set_text("edited by hook").unwrap();
        }
        HookOutcome::Stop
    });
    window.register_event_hook("Save", |_: &mut Window, _: &str, _: &Values| {
        panic!("hooks after a stop must not run");
    });
    toolkit.click(window.element_handle("Save").unwrap());

    let (event, values) = window.read(Some(Duration::from_secs(1)));
    assert_eq!(event, "Save-stopped");
    assert_eq!(values.get_str("-in-"), Some("edited by hook"));
    assert!(!values.contains_key("event_type"));
}

#[test]
fn test_continuing_hooks_run_in_order() {
    let (_app, _toolkit, mut window) = open(trellis::layout![[Text::new("t")]]);
    let order = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    for label in ["first", "second"] {
        let order = order.clone();
        window.register_event_hook("-go-", move |_: &mut Window, _: &str, _: &Values| {
            order.borrow_mut().push(label);
            HookOutcome::Continue
        });
    }
    window.write_event_value("-go-", Values::new());
    assert_eq!(window.read(None).0, "-go-");
    assert_eq!(*order.borrow(), ["first", "second"]);
}

#[test]
fn test_system_binding_folds_values() {
    let (_app, toolkit, mut window) = open(trellis::layout![[
        Input::new("typed").key("-in-"),
        Text::new("label").key("-label-"),
    ]]);
    window
        .bind("-in-", interactions::RETURN, "return", true, EventMode::System)
        .unwrap();
    window
        .bind("-label-", interactions::BUTTON_3, "-rclick", true, EventMode::User)
        .unwrap();

    let input = window.element_handle("-in-").unwrap();
    assert!(toolkit.fire(input, interactions::RETURN, json!({"keysym": "Return"})));
    let (event, values) = window.read(Some(Duration::from_secs(1)));
    assert_eq!(event, "-in-");
    assert_eq!(values.get_str("event_type"), Some("return"));
    assert_eq!(values.get_str("-in-"), Some("typed"));
    assert_eq!(values.get("event"), Some(&json!({"keysym": "Return"})));

    let label = window.element_handle("-label-").unwrap();
    assert!(toolkit.fire(label, interactions::BUTTON_3, json!({"x": 3})));
    let (event, values) = window.read(Some(Duration::from_secs(1)));
    assert_eq!(event, "-label--rclick");
    assert_eq!(values, Values::new().with("event", json!({"x": 3})));
}

#[test]
fn test_unbound_interactions_are_not_delivered() {
    let (_app, toolkit, mut window) = open(trellis::layout![[Text::new("label").key("-label-")]]);
    let label = window.element_handle("-label-").unwrap();
    assert!(!toolkit.fire(label, interactions::BUTTON_3, Value::Null));
    assert_eq!(window.read(Some(Duration::from_millis(5))).0, TIMEOUT_KEY);
}

#[test]
fn test_radio_group_is_exclusive() {
    let (_app, toolkit, mut window) = open(trellis::layout![[
        Radio::new("A", "g").key("-a-"),
        Radio::new("B", "g").key("-b-").default(true),
        Radio::new("C", "other").key("-c-"),
    ]]);
    let values = window.get_values();
    assert_eq!(values.get("-a-"), Some(&Value::Bool(false)));
    assert_eq!(values.get("-b-"), Some(&Value::Bool(true)));
    assert_eq!(values.get("-c-"), Some(&Value::Bool(false)));
    assert_eq!(window.radio_group_count(), 2);

    toolkit.select(window.element_handle("-a-").unwrap());
    let (event, values) = window.read(Some(Duration::from_secs(1)));
    assert_eq!(event, "-a-");
    assert_eq!(values.get("-a-"), Some(&Value::Bool(true)));
    assert_eq!(values.get("-b-"), Some(&Value::Bool(false)));
    assert_eq!(values.get("-c-"), Some(&Value::Bool(false)));

    let radio = window.element_as::<Radio>("-b-").unwrap();
    assert!(!radio.is_selected());
}

#[test]
fn test_failed_read_falls_back_to_stale_snapshot() {
    let (_app, toolkit, mut window) = open(trellis::layout![[
        Input::new("first").key("-in-"),
        Checkbox::new("Agree").key("-agree-"),
    ]]);
    let fresh = window.get_snapshot();
    assert!(!fresh.is_stale());
    assert_eq!(fresh.values().get_str("-in-"), Some("first"));

    let input = window.element_handle("-in-").unwrap();
    toolkit.type_text(input, "second");
    toolkit.fail_get(input);
    let stale = window.get_snapshot();
    assert!(stale.is_stale());
    assert_eq!(stale.values().get_str("-in-"), Some("first"));
    assert_eq!(stale.values().get("-agree-"), Some(&Value::Bool(false)));

    toolkit.heal(input);
    assert_eq!(window.get_values().get_str("-in-"), Some("second"));
}

#[test]
fn test_close_request_then_close() {
    let (app, toolkit, mut window) = open(trellis::layout![[Button::new("OK")]]);
    let handle = window.handle();
    assert_eq!(app.window_count(), 1);

    toolkit.request_close(handle);
    let (event, values) = window.read(None);
    assert_eq!(event, WINDOW_CLOSED);
    assert!(values.is_empty());
    assert!(!window.is_alive());

    let started = Instant::now();
    assert_eq!(window.read(None).0, WINDOW_CLOSED);
    assert!(started.elapsed() < Duration::from_secs(1));

    window.close();
    assert!(toolkit.is_destroyed(handle));
    assert_eq!(app.window_count(), 0);
    assert!(toolkit.has_quit());
    window.close();
}

#[test]
fn test_close_button_returns_its_event_then_closes() {
    let (app, toolkit, mut window) = open(trellis::layout![[
        Input::new("kept").key("-in-"),
        CloseButton::new("Cancel"),
    ]]);
    toolkit.click(window.element_handle("Cancel").unwrap());

    let (event, values) = window.read(Some(Duration::from_secs(1)));
    assert_eq!(event, "Cancel");
    assert_eq!(values.get_str("-in-"), Some("kept"));
    assert!(!window.is_alive());
    assert!(toolkit.is_destroyed(window.handle()));
    assert_eq!(app.window_count(), 0);
    assert_eq!(window.read(None).0, WINDOW_CLOSED);
}

#[test]
fn test_drop_closes_the_window() {
    let (app, toolkit, window) = open(trellis::layout![[Text::new("t")]]);
    let handle = window.handle();
    drop(window);
    assert!(toolkit.is_destroyed(handle));
    assert_eq!(app.window_count(), 0);
}

#[test]
fn test_hidden_events_are_consumed() {
    let (_app, _toolkit, mut window) = open(trellis::layout![[Text::new("t")]]);
    let ran = std::rc::Rc::new(std::cell::Cell::new(false));
    let flag = ran.clone();
    window.register_event_hook("-work-/hide", move |_: &mut Window, _: &str, _: &Values| {
        flag.set(true);
        HookOutcome::Continue
    });
    window.write_event_value("-work-/hide", Values::new());
    window.write_event_value("after", Values::new());

    assert_eq!(window.read(None).0, "after");
    assert!(ran.get());
}

#[test]
fn test_events_from_other_threads() {
    let (_app, _toolkit, mut window) = open(trellis::layout![[Text::new("t")]]);
    let sender = window.event_sender();
    let worker = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        sender.send("-done-", Values::new().with("result", 42))
    });

    let (event, values) = window.read(Some(Duration::from_secs(2)));
    assert!(worker.join().unwrap());
    assert_eq!(event, "-done-");
    assert_eq!(values.get("result"), Some(&json!(42)));
}

#[test]
fn test_event_iter_stops_once_closed() {
    let (_app, toolkit, mut window) = open(trellis::layout![[Text::new("t")]]);
    let ticks: Vec<String> = window
        .event_iter(Some(Duration::from_millis(1)))
        .with_timeout_key("-tick-")
        .take(2)
        .map(|(event, _)| event)
        .collect();
    assert_eq!(ticks, ["-tick-", "-tick-"]);

    toolkit.request_close(window.handle());
    let events: Vec<String> = window.event_iter(None).map(|(event, _)| event).collect();
    assert_eq!(events, [WINDOW_CLOSED]);
}

#[test]
fn test_title_and_visibility() {
    let (_app, toolkit, mut window) = open(trellis::layout![[Text::new("t")]]);
    window.set_title("renamed");
    assert_eq!(window.title(), "renamed");
    assert_eq!(toolkit.window_spec(window.handle()).unwrap().title, "renamed");

    window.hide();
    assert!(window.is_hidden());
    let state = toolkit.widget(window.handle()).unwrap().props["state"].clone();
    assert_eq!(state, json!("withdrawn"));
    window.un_hide();
    assert!(!window.is_hidden());
}
