//! Date range picker with start and end date inputs.

use aqi_core::dates::{iso_date, parse_iso_date};
use chrono::NaiveDate;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct DateRangePickerProps {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub on_start: EventHandler<NaiveDate>,
    pub on_end: EventHandler<NaiveDate>,
}

#[component]
pub fn DateRangePicker(props: DateRangePickerProps) -> Element {
    let start = iso_date(props.start);
    let end = iso_date(props.end);

    let on_start_change = move |evt: Event<FormData>| {
        if let Some(date) = parse_iso_date(&evt.value()) {
            props.on_start.call(date);
        }
    };

    let on_end_change = move |evt: Event<FormData>| {
        if let Some(date) = parse_iso_date(&evt.value()) {
            props.on_end.call(date);
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "From: "
                input {
                    id: "startDate",
                    r#type: "date",
                    value: "{start}",
                    onchange: on_start_change,
                }
            }
            label {
                style: "font-weight: bold;",
                "To: "
                input {
                    id: "endDate",
                    r#type: "date",
                    value: "{end}",
                    onchange: on_end_change,
                }
            }
        }
    }
}
