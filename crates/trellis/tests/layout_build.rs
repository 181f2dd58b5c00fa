//! Integration tests for window construction.

use std::time::Duration;

use trellis::prelude::*;
use trellis::toolkit::{Pad, Side, WidgetKind};
use trellis::{Error, Key};

#[test]
fn test_empty_layout_is_rejected() {
    let (app, toolkit) = Application::headless();
    let error = Window::new(&app, "empty", Vec::new()).unwrap_err();
    assert!(matches!(error, Error::InvalidLayout { .. }));
    assert!(toolkit.windows().is_empty());
}

#[test]
fn test_duplicate_key_fails_without_leaving_a_window() {
    let (app, toolkit) = Application::headless();
    let error = Window::new(
        &app,
        "dup",
        trellis::layout![[Input::new("").key("-x-")], [Checkbox::new("c").key("-x-")]],
    )
    .unwrap_err();
    match error {
        Error::DuplicateKey { key, element_type } => {
            assert_eq!(key, Key::from("-x-"));
            assert_eq!(element_type, "Checkbox");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(toolkit.windows().is_empty());
    assert_eq!(app.window_count(), 0);
}

#[test]
fn test_derived_keys_of_plain_elements_may_repeat() {
    let (app, _toolkit) = Application::headless();
    let window = Window::new(
        &app,
        "repeat",
        trellis::layout![[Button::new("OK"), Button::new("OK"), Text::new("note"), Text::new("note")]],
    )
    .unwrap();
    assert_eq!(window.elements_by_type("Button").len(), 2);
    assert!(window.element("OK").is_none());
    assert!(window.find_element("OK").is_some());
}

#[test]
fn test_key_index_membership() {
    let (app, _toolkit) = Application::headless();
    let window = Window::new(
        &app,
        "index",
        trellis::layout![
            [Text::new("Hello"), Text::new("caption").key("-caption-")],
            [Input::new("a"), Input::new("b").key("-b-")],
        ],
    )
    .unwrap();
    let index = window.key_index();
    assert!(!index.contains(&Key::from("Hello")));
    assert!(index.contains(&Key::from("-caption-")));
    assert!(index.contains(&Key::from("-element1-")));
    assert!(index.contains(&Key::from("-b-")));

    let values: Vec<String> = index
        .value_entries()
        .map(|(key, _)| key.to_string())
        .collect();
    assert_eq!(values, ["-element1-", "-b-"]);

    assert!(window.element("Hello").is_none());
    assert_eq!(window.find_element("Hello").unwrap().element_type(), "Text");
}

#[test]
fn test_traversal_links_and_positions() {
    let (app, _toolkit) = Application::headless();
    let window = Window::new(
        &app,
        "links",
        trellis::layout![
            [Text::new("Name"), Input::new("").key("-name-"), Button::new("OK")],
            [Button::new("Cancel")],
        ],
    )
    .unwrap();
    let rows = window.rows();
    assert_eq!(rows.len(), 2);
    let &[text, input, ok] = rows[0].as_slice() else {
        panic!("expected three elements in the first row");
    };

    let input = window.element_by_id(input).unwrap().base();
    assert_eq!(input.prev(), Some(text));
    assert_eq!(input.next(), Some(ok));
    assert_eq!(input.position(), Some((0, 1)));

    let ok = window.element_by_id(ok).unwrap().base();
    assert_eq!(ok.next(), None);
    let cancel = window.element_by_id(rows[1][0]).unwrap().base();
    assert_eq!(cancel.prev(), None);
    assert_eq!(cancel.position(), Some((1, 0)));
}

#[test]
fn test_right_aligned_rows_are_built_in_reverse() {
    let (app, toolkit) = Application::headless();
    let window = Window::new(
        &app,
        "right",
        trellis::layout![[Column::new(trellis::layout![[
            Text::new("a"),
            Text::new("b"),
        ]])
        .text_align(Align::Right)]],
    )
    .unwrap();
    let texts = window.elements_by_type("Text");
    let keys: Vec<String> = texts.iter().map(|t| t.base().key_label()).collect();
    assert_eq!(keys, ["b", "a"]);

    let a = window.find_element("a").unwrap().base();
    assert_eq!(a.prev(), window.find_element_id("b"));
    assert_eq!(a.position(), Some((0, 1)));

    let packed = toolkit.widget(texts[0].handle().unwrap()).unwrap().pack.unwrap();
    assert_eq!(packed.side, Side::Right);
}

#[test]
fn test_rows_use_row_padding_and_element_pady() {
    let (app, toolkit) = Application::headless();
    let config = WindowConfig::new("pad").with_row_padding(5);
    let _window = Window::with_config(
        &app,
        config,
        trellis::layout![
            [Text::new("plain")],
            [Text::new("padded").pad(Pad::Uniform(0), Pad::Uniform(9))],
        ],
    )
    .unwrap();
    let rows = toolkit.handles_of_kind(WidgetKind::Row);
    assert_eq!(rows.len(), 2);
    let first = toolkit.widget(rows[0]).unwrap().pack.unwrap();
    let second = toolkit.widget(rows[1]).unwrap().pack.unwrap();
    assert_eq!(first.side, Side::Top);
    assert_eq!(first.pady, Some(Pad::Uniform(5)));
    assert_eq!(second.pady, Some(Pad::Uniform(9)));
}

#[test]
fn test_initial_focus_is_consumed_by_first_read() {
    let (app, toolkit) = Application::headless();
    let mut window = Window::new(
        &app,
        "focus",
        trellis::layout![[Text::new("Name"), Input::new("").key("-in-"), Button::new("OK")]],
    )
    .unwrap();
    let input = window.element_handle("-in-");
    assert_eq!(window.focus_target(), input);

    window.read(Some(Duration::from_millis(1)));
    assert_eq!(toolkit.focused(), input);
    assert_eq!(window.focus_target(), None);
}

#[test]
fn test_initial_focus_keeps_earlier_default_action() {
    let (app, _toolkit) = Application::headless();
    let window = Window::new(
        &app,
        "focus",
        trellis::layout![[Button::new("OK")], [Input::new("").key("-in-")]],
    )
    .unwrap();
    assert_eq!(window.focus_target(), window.element_handle("OK"));

    let window = Window::new(
        &app,
        "focus",
        trellis::layout![[Button::new("OK"), Input::new("").key("-in-")]],
    )
    .unwrap();
    assert_eq!(window.focus_target(), window.element_handle("OK"));
}

#[test]
fn test_initial_focus_falls_back_to_default_action() {
    let (app, _toolkit) = Application::headless();
    let window = Window::new(
        &app,
        "focus",
        trellis::layout![[Text::new("Continue?")], [Button::new("Yes"), Button::new("No")]],
    )
    .unwrap();
    assert_eq!(window.focus_target(), window.element_handle("Yes"));
}

#[test]
fn test_creation_failures_are_annotated() {
    let (app, toolkit) = Application::headless();
    toolkit.fail_create(WidgetKind::Listbox);

    let error = Window::new(&app, "fail", trellis::layout![[Listbox::new(["a"]).key("-list-")]])
        .unwrap_err();
    match error {
        Error::ElementCreation { element_type, key, .. } => {
            assert_eq!(element_type, "Listbox");
            assert_eq!(key, "-list-");
        }
        other => panic!("unexpected error: {other}"),
    }

    let error = Window::new(
        &app,
        "nested",
        trellis::layout![[Frame::new("Box", trellis::layout![[Listbox::new(["a"])]])]],
    )
    .unwrap_err();
    match error {
        Error::ChildCreation { element_type, source, .. } => {
            assert_eq!(element_type, "Frame");
            assert!(matches!(*source, Error::ElementCreation { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(toolkit.windows().is_empty());
}

#[test]
fn test_tab_groups_hold_tabs_only() {
    let (app, toolkit) = Application::headless();
    let window = Window::new(
        &app,
        "tabs",
        trellis::layout![[TabGroup::new(trellis::layout![[
            Tab::new("One", trellis::layout![[Input::new("1").key("-one-")]]),
            Tab::new("Two", trellis::layout![[Input::new("2").key("-two-")]]),
        ]])
        .key("-tabs-")]],
    )
    .unwrap();
    let notebook = window.element_handle("-tabs-").unwrap();
    let titles: Vec<String> = toolkit
        .widget(notebook)
        .unwrap()
        .tabs
        .into_iter()
        .map(|(_, title)| title)
        .collect();
    assert_eq!(titles, ["One", "Two"]);
    drop(window);

    let error = Window::new(
        &app,
        "bad tabs",
        trellis::layout![[TabGroup::new(trellis::layout![[Text::new("stray")]])]],
    )
    .unwrap_err();
    assert!(matches!(error, Error::ChildCreation { .. }));
}

#[test]
fn test_window_from_json_layout() {
    let (app, _toolkit) = Application::headless();
    let mut window = Window::from_json(
        &app,
        WindowConfig::new("json"),
        r#"[
            [{"type": "Text", "text": "Name"}, {"type": "Input", "text": "Ada", "key": "-name-"}],
            [{"type": "Checkbox", "text": "Subscribe", "default": true, "key": "-sub-"}]
        ]"#,
    )
    .unwrap();
    let values = window.get_values();
    assert_eq!(values.get_str("-name-"), Some("Ada"));
    assert_eq!(values.get("-sub-"), Some(&Value::Bool(true)));
}

#[test]
fn test_window_config_from_toml() {
    let (app, toolkit) = Application::headless();
    let config = WindowConfig::from_toml_str(
        r#"
        title = "Settings"
        size = [320, 200]
        resizable = true
        row_padding = 4
        "#,
    )
    .unwrap();
    let window = Window::with_config(&app, config, trellis::layout![[Text::new("t")]]).unwrap();
    let spec = toolkit.window_spec(window.handle()).unwrap();
    assert_eq!(spec.title, "Settings");
    assert_eq!(spec.size, Some((320, 200)));
    assert!(spec.resizable);
    assert!(spec.center);
    assert_eq!(window.config().row_padding, 4);
}

#[test]
fn test_nested_windows_use_active_parent() {
    let (app, toolkit) = Application::headless();
    let main = Window::new(&app, "main", trellis::layout![[Text::new("main")]]).unwrap();
    let popup = Window::with_config(
        &app,
        WindowConfig::new("popup").with_modal(true),
        trellis::layout![[Button::new("OK")]],
    )
    .unwrap();
    let spec = toolkit.window_spec(popup.handle()).unwrap();
    assert_eq!(spec.parent, Some(main.handle()));
    assert!(spec.keep_on_top);
    assert_eq!(app.active_window().map(|entry| entry.id), Some(popup.id()));

    drop(popup);
    assert_eq!(app.active_window().map(|entry| entry.id), Some(main.id()));
    assert!(!toolkit.has_quit());
}
