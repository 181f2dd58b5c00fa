//! Integration tests for element behavior inside a built window.

use std::time::Duration;

use serde_json::json;
use trellis::prelude::*;
use trellis::toolkit::HeadlessToolkit;

fn open(layout: Layout) -> (Application, HeadlessToolkit, Window) {
    let (app, toolkit) = Application::headless();
    let window = Window::new(&app, "elements", layout).unwrap();
    (app, toolkit, window)
}

#[test]
fn test_input_clipboard_round_trip() {
    let (app, _toolkit, mut window) = open(trellis::layout![
        [Input::new("copied").key("-src-")],
        [Input::new("pre-").key("-dst-")],
    ]);
    window.element_as::<Input>("-src-").unwrap().copy().unwrap();
    assert_eq!(app.clipboard_text().unwrap(), "copied");

    let dst = window.element_as_mut::<Input>("-dst-").unwrap();
    dst.paste().unwrap();
    assert_eq!(dst.get_text().unwrap(), "pre-copied");
}

#[test]
fn test_multiline_print_appends_lines() {
    let (_app, _toolkit, mut window) = open(trellis::layout![[Multiline::new("").key("-log-")]]);
    let log = window.element_as_mut::<Multiline>("-log-").unwrap();
    log.print("first").unwrap();
    log.print("second").unwrap();
    assert_eq!(window.get_values().get_str("-log-"), Some("first\nsecond\n"));
}

#[test]
fn test_checkbox_change_event() {
    let (_app, toolkit, mut window) = open(trellis::layout![[Checkbox::new("Agree").key("-agree-")]]);
    toolkit.set_user_value(window.element_handle("-agree-").unwrap(), Value::Bool(true));
    let (event, values) = window.read(Some(Duration::from_secs(1)));
    assert_eq!(event, "-agree-");
    assert_eq!(values.get("-agree-"), Some(&Value::Bool(true)));
    assert_eq!(values.get_str("event_type"), Some("change"));
}

#[test]
fn test_listbox_selection_and_cursor() {
    let (_app, toolkit, mut window) = open(trellis::layout![[Listbox::new(["red", "green", "blue"])
        .default_values(["green"])
        .enable_events(true)
        .key("-colors-")]]);
    assert_eq!(window.get_values().get("-colors-"), Some(&json!(["green"])));

    toolkit.set_selection(window.element_handle("-colors-").unwrap(), json!([0, 2]));
    let (event, values) = window.read(Some(Duration::from_secs(1)));
    assert_eq!(event, "-colors-");
    assert_eq!(values.get("-colors-"), Some(&json!(["red", "blue"])));
    assert_eq!(values.get_str("event_type"), Some("select"));

    let list = window.element_as_mut::<Listbox>("-colors-").unwrap();
    assert_eq!(list.get_cursor_index().unwrap(), Some(0));
    list.set_cursor_index(1).unwrap();
    assert!(list.set_cursor_index(3).is_err());
    assert_eq!(list.get().unwrap(), json!(["green"]));

    list.set_values(["one", "two"]).unwrap();
    assert_eq!(list.get().unwrap(), json!([]));
}

#[test]
fn test_table_reports_index_or_row() {
    let rows = vec![vec![json!("Ada"), json!(36)], vec![json!("Alan"), json!(41)]];
    let (_app, toolkit, mut window) = open(trellis::layout![
        [Table::new(rows.clone()).headings(["Name", "Age"]).key("-idx-")],
        [Table::new(rows).event_returns_values(true).enable_events(true).key("-row-")],
    ]);
    let values = window.get_values();
    assert_eq!(values.get("-idx-"), Some(&json!([])));

    window.element_as_mut::<Table>("-idx-").unwrap().select_row(1).unwrap();
    toolkit.set_selection(window.element_handle("-row-").unwrap(), json!(0));
    let (event, values) = window.read(Some(Duration::from_secs(1)));
    assert_eq!(event, "-row-");
    assert_eq!(values.get("-idx-"), Some(&json!([1])));
    assert_eq!(values.get("-row-"), Some(&json!(["Ada", 36])));
}

#[test]
fn test_slider_clamps_to_range() {
    let (_app, _toolkit, mut window) = open(trellis::layout![[Slider::new(0.0, 10.0)
        .default_value(4.0)
        .key("-level-")]]);
    assert_eq!(window.get_values().get("-level-"), Some(&json!(4.0)));

    let slider = window.element_as_mut::<Slider>("-level-").unwrap();
    slider.set(25.0).unwrap();
    assert_eq!(slider.get_value().unwrap(), 10.0);
    slider.set_value(json!("2.5")).unwrap();
    assert_eq!(slider.get_value().unwrap(), 2.5);
    assert!(slider.set_value(json!("loud")).is_err());
}

#[test]
fn test_combo_values_and_update() {
    let (_app, toolkit, mut window) = open(trellis::layout![[Combo::new(["a", "b"])
        .default_value("b")
        .key("-pick-")]]);
    assert_eq!(window.get_values().get_str("-pick-"), Some("b"));

    let handle = window.element_handle("-pick-").unwrap();
    let combo = window.element_as_mut::<Combo>("-pick-").unwrap();
    combo.set_values(["x", "y", "z"]).unwrap();
    combo.set_value(json!("z")).unwrap();
    assert_eq!(
        toolkit.widget(handle).unwrap().props.get("values"),
        Some(&json!(["x", "y", "z"]))
    );
    assert_eq!(window.get_values().get_str("-pick-"), Some("z"));
}

#[test]
fn test_properties_resolve_aliases_and_disabled_state() {
    let (_app, toolkit, mut window) = open(trellis::layout![[Button::new("Go").key("-go-")]]);
    let button = window.element_mut("-go-").unwrap();
    assert_eq!(button.base().property("ButtonText"), Some(json!("Go")));
    assert_eq!(button.base().property("key"), Some(json!("-go-")));
    assert_eq!(button.base().property("no-such-property"), None);

    button.base_mut().set_disabled(true).unwrap();
    let handle = button.handle().unwrap();
    assert_eq!(
        toolkit.widget(handle).unwrap().props.get("state"),
        Some(&json!("disabled"))
    );
}

#[test]
fn test_clickable_text_uses_system_binding() {
    let (_app, toolkit, mut window) = open(trellis::layout![
        [Text::new("Click me").enable_events(true).key("-link-")],
        [Input::new("typed").key("-in-")],
    ]);
    toolkit.click(window.element_handle("-link-").unwrap());
    let (event, values) = window.read(Some(Duration::from_secs(1)));
    assert_eq!(event, "-link-");
    assert_eq!(values.get_str("event_type"), Some("click"));
    assert_eq!(values.get_str("-in-"), Some("typed"));
}
