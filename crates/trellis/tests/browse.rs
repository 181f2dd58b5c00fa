//! Integration tests for browse buttons and their dialogs.

use std::path::PathBuf;
use std::time::Duration;

use trellis::dialogs::{DialogRequest, DialogResponse, ScriptedDialogs};
use trellis::prelude::*;
use trellis::toolkit::HeadlessToolkit;

fn app_with_dialogs() -> (Application, HeadlessToolkit, ScriptedDialogs) {
    let toolkit = HeadlessToolkit::new();
    let dialogs = ScriptedDialogs::new();
    let app = Application::builder(toolkit.clone())
        .with_dialogs(dialogs.clone())
        .build();
    (app, toolkit, dialogs)
}

#[test]
fn test_folder_browse_fills_previous_element_without_an_event() {
    let (app, toolkit, dialogs) = app_with_dialogs();
    let mut window = Window::new(
        &app,
        "browse",
        trellis::layout![[Input::new("/srv/current").key("-dir-"), Browse::folder()]],
    )
    .unwrap();
    dialogs.answer(DialogResponse::Paths(vec![PathBuf::from("/srv/chosen")]));

    let button = window.element_handle("Browse1").unwrap();
    toolkit.click(button);
    let (event, _) = window.read(Some(Duration::from_millis(50)));
    assert_eq!(event, TIMEOUT_KEY);

    assert_eq!(window.get_values().get_str("-dir-"), Some("/srv/chosen"));
    assert_eq!(
        dialogs.requests(),
        [DialogRequest::Folder {
            title: String::new(),
            initial_folder: Some(PathBuf::from("/srv/current")),
        }]
    );
}

#[test]
fn test_browse_with_target_and_events() {
    let (app, toolkit, dialogs) = app_with_dialogs();
    let mut window = Window::new(
        &app,
        "browse",
        trellis::layout![
            [Input::new("").key("-file-")],
            [Text::new("pick"), Browse::file().target("-file-").enable_events(true).key("-pick-")],
        ],
    )
    .unwrap();
    dialogs.answer(DialogResponse::Paths(vec![PathBuf::from("notes.txt")]));

    toolkit.click(window.element_handle("-pick-").unwrap());
    let (event, values) = window.read(Some(Duration::from_secs(1)));
    assert_eq!(event, "-pick-");
    assert_eq!(values.get_str("event"), Some("notes.txt"));
    assert_eq!(values.get_str("event_type"), Some("change"));
    assert_eq!(values.get_str("-file-"), Some("notes.txt"));
}

#[test]
fn test_cancelled_dialog_leaves_target_alone() {
    let (app, toolkit, dialogs) = app_with_dialogs();
    let mut window = Window::new(
        &app,
        "browse",
        trellis::layout![[Input::new("keep").key("-in-"), Browse::color().enable_events(true)]],
    )
    .unwrap();
    dialogs.cancel();

    toolkit.click(window.element_handle("Browse1").unwrap());
    let (event, _) = window.read(Some(Duration::from_millis(50)));
    assert_eq!(event, TIMEOUT_KEY);
    assert_eq!(window.get_values().get_str("-in-"), Some("keep"));
    assert_eq!(
        dialogs.requests(),
        [DialogRequest::Color {
            title: String::new(),
            initial: Some("keep".to_string()),
        }]
    );
}

#[test]
fn test_failing_dialog_is_treated_as_cancel() {
    let (app, toolkit, dialogs) = app_with_dialogs();
    let mut window = Window::new(
        &app,
        "browse",
        trellis::layout![[Input::new("keep").key("-in-"), Browse::list(["a", "b"])]],
    )
    .unwrap();
    dialogs.fail("no display");

    toolkit.click(window.element_handle("Browse1").unwrap());
    assert_eq!(window.read(Some(Duration::from_millis(50))).0, TIMEOUT_KEY);
    assert_eq!(window.get_values().get_str("-in-"), Some("keep"));
}
