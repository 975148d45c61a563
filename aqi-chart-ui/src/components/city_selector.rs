//! Dropdown selector for choosing a city.

use aqi_core::geo::KNOWN_CITIES;
use aqi_core::models::CitySelection;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct CitySelectorProps {
    /// DOM id of the `select`
    pub id: String,
    pub selected: Option<CitySelection>,
    pub on_select: EventHandler<CitySelection>,
}

/// City dropdown over the known cities. Option values are `City,State`.
#[component]
pub fn CitySelector(props: CitySelectorProps) -> Element {
    let selected = props
        .selected
        .as_ref()
        .map(CitySelection::selector_value)
        .unwrap_or_default();

    let on_change = move |evt: Event<FormData>| {
        match CitySelection::parse(&evt.value()) {
            Some(city) => props.on_select.call(city),
            None => log::warn!("Ignoring city option {:?}", evt.value()),
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "{props.id}",
                style: "font-weight: bold; margin-right: 8px;",
                "City: "
            }
            select {
                id: "{props.id}",
                onchange: on_change,
                option { value: "", disabled: true, selected: selected.is_empty(), "Select a city" }
                for city in KNOWN_CITIES {
                    option {
                        value: "{city.selection().selector_value()}",
                        selected: city.selection().selector_value() == selected,
                        "{city.name}, {city.state}"
                    }
                }
            }
        }
    }
}
