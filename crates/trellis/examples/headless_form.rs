//! A form driven through the headless toolkit.
//!
//! Run with `RUST_LOG=trellis=debug cargo run --example headless_form` to
//! see the engine's logs.

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use trellis::prelude::*;

fn main() -> Result<(), trellis::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (app, toolkit) = Application::headless();
    let config = WindowConfig::new("Sign up").with_key_events(true);
    let mut window = Window::with_config(
        &app,
        config,
        trellis::layout![
            [Text::new("Name"), Input::new("").key("-name-")],
            [Checkbox::new("Subscribe").key("-sub-")],
            [Button::new("OK"), CloseButton::new("Cancel")],
        ],
    )?;

    window.register_event_hook("OK", |window: &mut Window, _: &str, values: &Values| {
        if values.get_str("-name-").is_some_and(str::is_empty) {
            window.write_event_value("-missing-name-", Values::new());
            return HookOutcome::Stop;
        }
        HookOutcome::Continue
    });

    let (Some(ok), Some(name), Some(cancel)) = (
        window.element_handle("OK"),
        window.element_handle("-name-"),
        window.element_handle("Cancel"),
    ) else {
        return Ok(());
    };

    toolkit.click(ok);
    let (event, _) = window.read(Some(Duration::from_millis(200)));
    println!("first click: {event}");

    toolkit.type_text(name, "Ada");
    toolkit.click(ok);
    toolkit.click(cancel);
    for (event, values) in window.event_iter(Some(Duration::from_millis(200))) {
        println!("{event}: {}", serde_json::to_string(&values).unwrap_or_default());
        if event == TIMEOUT_KEY {
            break;
        }
    }
    Ok(())
}
