//! Window and document listeners that feed the command loop.

use crate::commands::AppCommand;
use aqi_chart_ui::browser::history_section;
use aqi_chart_ui::js_bridge;
use aqi_sections::router::{Connectivity, KeyInput};
use futures::channel::mpsc::UnboundedSender;
use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, KeyboardEvent};

fn listen(target: &EventTarget, name: &str, handler: impl FnMut(Event) + 'static) {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref()) {
        log::warn!("Could not listen for {}: {:?}", name, e);
    }
    // Listeners stay for the lifetime of the page.
    callback.forget();
}

fn send(tx: &UnboundedSender<AppCommand>, command: AppCommand) {
    if tx.unbounded_send(command).is_err() {
        log::warn!("Command loop has stopped");
    }
}

/// Install the global keyboard, history, connectivity, visibility and
/// resize listeners, plus the map's station-click callback.
pub fn install(tx: UnboundedSender<AppCommand>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let keys = tx.clone();
    listen(&window, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let input = KeyInput {
            key: key.key(),
            ctrl: key.ctrl_key(),
            meta: key.meta_key(),
            alt: key.alt_key(),
        };
        if aqi_sections::router::command_for_key(&input).is_some() {
            event.prevent_default();
            send(&keys, AppCommand::Key(input));
        }
    });

    let history = tx.clone();
    listen(&window, "popstate", move |event| {
        let section = Reflect::get(&event, &"state".into())
            .ok()
            .and_then(|state| history_section(&state));
        send(&history, AppCommand::PopState(section));
    });

    let online = tx.clone();
    listen(&window, "online", move |_| {
        send(&online, AppCommand::Connectivity(Connectivity::Online));
    });
    let offline = tx.clone();
    listen(&window, "offline", move |_| {
        send(&offline, AppCommand::Connectivity(Connectivity::Offline));
    });

    let resize = tx.clone();
    listen(&window, "resize", move |_| send(&resize, AppCommand::Resize));

    if let Some(document) = window.document() {
        let visible = tx.clone();
        let doc = document.clone();
        listen(&document, "visibilitychange", move |_| {
            if !doc.hidden() {
                send(&visible, AppCommand::Connectivity(Connectivity::Visible));
            }
        });
    }

    js_bridge::on_station_click(move |index| send(&tx, AppCommand::StationClicked(index)));
}
