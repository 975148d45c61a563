//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! Chart.js and Leaflet helpers live in `assets/js/*.js` and are loaded at
//! runtime once both libraries are on the page. They are evaluated as
//! globals (no ES modules) and exposed via `window.*`. This module
//! serializes configs and marker specs and calls those globals.

use aqi_core::geo::{DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM};
use aqi_core::models::Coordinates;
use aqi_data::map::{legend_entries, MarkerSpec};
use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

static CHARTS_JS: &str = include_str!("../assets/js/charts.js");
static MAP_JS: &str = include_str!("../assets/js/map.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('AQI JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote `text` as a JS string literal.
fn js_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "''".to_string())
}

/// Initialize the chart and map scripts once Chart.js and Leaflet are loaded.
///
/// The helper files define functions via `function` declarations. They are
/// evaluated at global scope with an indirect eval from the polling
/// callback and then promoted to `window.*` explicitly.
pub fn init_scripts() {
    let all_js = [CHARTS_JS, MAP_JS].join("\n");
    let _ = js_sys::eval(&format!("window.__aqiScripts = {};", js_string(&all_js)));

    let init_js = r#"
        (function() {
            if (window.__aqiScriptsReady || window.__aqiScriptsWaiting) return;
            window.__aqiScriptsWaiting = true;
            var waitForLibs = setInterval(function() {
                if (typeof Chart !== 'undefined' && typeof L !== 'undefined') {
                    clearInterval(waitForLibs);
                    (0, eval)(window.__aqiScripts);
                    delete window.__aqiScripts;
                    window.renderAqiChart = renderAqiChart;
                    window.destroyAqiChart = destroyAqiChart;
                    window.resizeAqiCharts = resizeAqiCharts;
                    window.initAqiMap = initAqiMap;
                    window.setAqiMarkers = setAqiMarkers;
                    window.setAqiUserMarker = setAqiUserMarker;
                    window.centerAqiMap = centerAqiMap;
                    window.invalidateAqiMap = invalidateAqiMap;
                    window.__aqiScriptsReady = true;
                    console.log('AQI charts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Run `call` once the scripts are ready and the element `element_id`
/// exists.
fn when_ready(element_id: &str, call: &str) {
    let element_id = js_string(element_id);
    call_js(&format!(
        r#"
        (function() {{
            var attempts = 0;
            var poll = setInterval(function() {{
                attempts += 1;
                if (window.__aqiScriptsReady && document.getElementById({element_id})) {{
                    clearInterval(poll);
                    try {{ {call}; }} catch(e) {{ console.error('[AQI] chart bridge error:', e); }}
                }} else if (attempts > 300) {{
                    clearInterval(poll);
                    console.warn('[AQI] gave up waiting for', {element_id});
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Draw `config` (from `aqi_data::chart`) into the canvas `canvas_id`,
/// replacing any chart already there.
pub fn render_chart(canvas_id: &str, config: &Value) {
    let config_json = js_string(&config.to_string());
    when_ready(
        canvas_id,
        &format!("window.renderAqiChart({}, {})", js_string(canvas_id), config_json),
    );
}

pub fn destroy_chart(canvas_id: &str) {
    call_js(&format!(
        "if (window.destroyAqiChart) window.destroyAqiChart({});",
        js_string(canvas_id)
    ));
}

pub fn resize_charts() {
    call_js("if (window.resizeAqiCharts) window.resizeAqiCharts();");
}

/// Create the Leaflet map with the category legend, replacing any earlier
/// instance.
pub fn init_map(container_id: &str) {
    let legend = serde_json::to_string(&legend_entries()).unwrap_or_else(|_| "[]".to_string());
    when_ready(
        container_id,
        &format!(
            "window.initAqiMap({}, {}, {}, {}, {})",
            js_string(container_id),
            DEFAULT_MAP_CENTER.lat,
            DEFAULT_MAP_CENTER.lng,
            DEFAULT_MAP_ZOOM,
            js_string(&legend)
        ),
    );
}

/// Replace the station markers.
pub fn set_markers(container_id: &str, markers: &[MarkerSpec]) {
    let markers = serde_json::to_string(markers).unwrap_or_else(|_| "[]".to_string());
    when_ready(
        container_id,
        &format!("window.setAqiMarkers({})", js_string(&markers)),
    );
}

pub fn set_user_marker(container_id: &str, position: Coordinates, label: &str) {
    when_ready(
        container_id,
        &format!(
            "window.setAqiUserMarker({}, {}, {})",
            position.lat,
            position.lng,
            js_string(label)
        ),
    );
}

/// Pan and zoom to `position` with animation.
pub fn center_map(container_id: &str, position: Coordinates, zoom: u8) {
    when_ready(
        container_id,
        &format!("window.centerAqiMap({}, {}, {})", position.lat, position.lng, zoom),
    );
}

/// Recompute the map size after its container was shown or resized.
pub fn invalidate_map() {
    call_js("if (window.invalidateAqiMap) window.invalidateAqiMap();");
}

/// Route marker clicks to `on_click` with the station index. The closure
/// lives for the rest of the page.
pub fn on_station_click(on_click: impl FnMut(usize) + 'static) {
    let mut on_click = on_click;
    let callback = Closure::<dyn FnMut(f64)>::new(move |index: f64| {
        if index >= 0.0 {
            on_click(index as usize);
        }
    });
    if let Some(window) = web_sys::window() {
        let _ = js_sys::Reflect::set(
            &window,
            &JsValue::from_str("__aqiStationClicked"),
            callback.as_ref(),
        );
    }
    callback.forget();
}
