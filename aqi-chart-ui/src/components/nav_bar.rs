//! Top navigation: section links plus refresh, export and settings buttons.

use crate::state::AppState;
use aqi_core::events::Section;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct NavBarProps {
    pub on_navigate: EventHandler<Section>,
    pub on_refresh: EventHandler<()>,
    pub on_export: EventHandler<()>,
}

fn nav_icon(section: Section) -> &'static str {
    match section {
        Section::Dashboard => "fas fa-tachometer-alt",
        Section::Forecast => "fas fa-chart-line",
        Section::Historical => "fas fa-history",
        Section::Health => "fas fa-heartbeat",
    }
}

#[component]
pub fn NavBar(props: NavBarProps) -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.section)();

    rsx! {
        nav {
            class: "navbar",
            style: "display: flex; align-items: center; gap: 16px; padding: 12px 16px; background: #1e293b; color: #fff;",
            div {
                class: "nav-brand",
                style: "font-weight: 600; margin-right: auto;",
                i { class: "fas fa-wind", style: "margin-right: 6px;" }
                "Air Quality Visualizer"
            }
            for section in Section::ALL {
                a {
                    key: "{section.id()}",
                    class: if section == current { "nav-link active" } else { "nav-link" },
                    href: "#{section.id()}",
                    style: if section == current { "color: #fff; font-weight: 600;" } else { "color: #cbd5e1;" },
                    onclick: move |evt: MouseEvent| {
                        evt.prevent_default();
                        props.on_navigate.call(section);
                    },
                    i { class: nav_icon(section), style: "margin-right: 4px;" }
                    "{section.nav_label()}"
                }
            }
            button {
                id: "refreshBtn",
                title: "Refresh (Ctrl+R)",
                onclick: move |_| props.on_refresh.call(()),
                i { class: "fas fa-sync-alt" }
            }
            button {
                id: "exportBtn",
                title: "Export data",
                onclick: move |_| props.on_export.call(()),
                i { class: "fas fa-download" }
            }
            button {
                id: "settingsBtn",
                title: "Settings",
                onclick: move |_| state.settings_open.set(true),
                i { class: "fas fa-cog" }
            }
        }
    }
}
