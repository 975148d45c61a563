//! Summary statistics for the loaded historical range.

use aqi_data::stats::HistoricalSummary;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct HistoricalStatsProps {
    pub summary: HistoricalSummary,
}

#[component]
pub fn HistoricalStats(props: HistoricalStatsProps) -> Element {
    let summary = props.summary;
    let direction = summary.direction();

    rsx! {
        div {
            id: "historicalStats",
            class: "stats-grid",
            style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(140px, 1fr)); gap: 12px; margin: 12px 0;",
            div { class: "stat-item", span { class: "stat-label", "Average AQI" } span { class: "stat-value", "{summary.average}" } }
            div { class: "stat-item", span { class: "stat-label", "Minimum" } span { class: "stat-value", "{summary.min}" } }
            div { class: "stat-item", span { class: "stat-label", "Maximum" } span { class: "stat-value", "{summary.max}" } }
            div { class: "stat-item", span { class: "stat-label", "Records" } span { class: "stat-value", "{summary.total_records}" } }
            div {
                class: "stat-item",
                span { class: "stat-label", "Trend" }
                span {
                    class: "stat-value",
                    style: "color: {direction.color()};",
                    i { class: "fas {direction.icon()}", style: "margin-right: 4px;" }
                    "{direction.label()}"
                }
            }
        }
        div {
            class: "distribution",
            style: "display: flex; flex-wrap: wrap; gap: 8px;",
            for share in summary.distribution {
                span {
                    key: "{share.category.label()}",
                    class: "distribution-item {share.category.css_class()}",
                    style: "padding: 4px 8px; border-radius: 4px; border-left: 4px solid {share.category.color()};",
                    "{share.category.label()}: {share.percent}% ({share.count})"
                }
            }
        }
    }
}
