//! Settings dialog: auto-refresh, interval, notifications and theme.

use crate::state::AppState;
use aqi_core::preferences::{AppSettings, Theme};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct SettingsPanelProps {
    pub on_save: EventHandler<AppSettings>,
}

const INTERVAL_CHOICES: [u32; 5] = [1, 5, 10, 15, 30];

#[component]
pub fn SettingsPanel(props: SettingsPanelProps) -> Element {
    let mut state = use_context::<AppState>();
    let mut draft = use_signal(|| (state.settings)());
    use_effect(move || {
        if (state.settings_open)() {
            draft.set((state.settings)());
        }
    });
    if !(state.settings_open)() {
        return rsx! {};
    }
    let current = draft();

    rsx! {
        div {
            class: "modal-backdrop",
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; justify-content: center; align-items: center; z-index: 2500;",
            div {
                class: "modal settings-modal",
                style: "background: #fff; padding: 20px; border-radius: 8px; min-width: 320px;",
                h3 { style: "margin-top: 0;", "Settings" }
                label {
                    style: "display: block; margin: 8px 0;",
                    input {
                        r#type: "checkbox",
                        checked: current.auto_refresh,
                        onchange: move |evt: Event<FormData>| draft.write().auto_refresh = evt.checked(),
                    }
                    " Auto-refresh"
                }
                label {
                    style: "display: block; margin: 8px 0;",
                    "Refresh every "
                    select {
                        onchange: move |evt: Event<FormData>| {
                            if let Ok(minutes) = evt.value().parse::<u32>() {
                                draft.write().refresh_interval_minutes = minutes;
                            }
                        },
                        for minutes in INTERVAL_CHOICES {
                            option {
                                value: "{minutes}",
                                selected: minutes == current.refresh_interval_minutes,
                                "{minutes} min"
                            }
                        }
                    }
                }
                label {
                    style: "display: block; margin: 8px 0;",
                    input {
                        r#type: "checkbox",
                        checked: current.notifications,
                        onchange: move |evt: Event<FormData>| draft.write().notifications = evt.checked(),
                    }
                    " Notifications"
                }
                label {
                    style: "display: block; margin: 8px 0;",
                    input {
                        r#type: "checkbox",
                        checked: current.theme == Theme::Dark,
                        onchange: move |evt: Event<FormData>| {
                            draft.write().theme = if evt.checked() { Theme::Dark } else { Theme::Light };
                        },
                    }
                    " Dark theme"
                }
                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 16px;",
                    button {
                        onclick: move |_| {
                            draft.set((state.settings)());
                            state.settings_open.set(false);
                        },
                        "Cancel"
                    }
                    button {
                        class: "primary",
                        onclick: move |_| {
                            let settings = draft();
                            state.settings.set(settings.clone());
                            state.settings_open.set(false);
                            props.on_save.call(settings);
                        },
                        "Save"
                    }
                }
            }
        }
    }
}
