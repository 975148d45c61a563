//! Browser implementations of the controller host traits, plus the few
//! page-level calls the shell needs (title, history, downloads).

use aqi_core::models::Coordinates;
use aqi_core::preferences::{PreferenceError, PreferenceStore};
use aqi_sections::platform::{Delay, GeoOptions, Geolocator};
use aqi_sections::GeolocationError;
use js_sys::{Array, Object, Promise, Reflect};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// [`PreferenceStore`] over `window.localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl PreferenceStore for LocalStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let storage = Self::storage()
            .ok_or_else(|| PreferenceError::Storage("localStorage is not available".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| PreferenceError::Storage(js_message(&e)))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// `setTimeout` as an awaitable sleep.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimerDelay;

impl Delay for TimerDelay {
    async fn sleep(&self, duration: Duration) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let promise = Promise::new(&mut |resolve, _reject| {
            if let Err(e) =
                window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            {
                log::warn!("setTimeout failed: {}", js_message(&e));
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        let _ = JsFuture::from(promise).await;
    }
}

/// `navigator.geolocation.getCurrentPosition`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserGeolocator;

fn position_options(options: &GeoOptions) -> web_sys::PositionOptions {
    let object = Object::new();
    let millis = |d: Duration| JsValue::from_f64(d.as_millis() as f64);
    let _ = Reflect::set(&object, &"enableHighAccuracy".into(), &options.enable_high_accuracy.into());
    let _ = Reflect::set(&object, &"timeout".into(), &millis(options.timeout));
    let _ = Reflect::set(&object, &"maximumAge".into(), &millis(options.maximum_age));
    object.unchecked_into()
}

/// Maps a `GeolocationPositionError` code.
fn geolocation_error(error: &JsValue) -> GeolocationError {
    let code = Reflect::get(error, &"code".into())
        .ok()
        .and_then(|c| c.as_f64())
        .unwrap_or(0.0) as u32;
    match code {
        1 => GeolocationError::PermissionDenied,
        3 => GeolocationError::Timeout,
        _ => GeolocationError::Unavailable,
    }
}

fn read_coordinates(position: &JsValue) -> Option<Coordinates> {
    let coords = Reflect::get(position, &"coords".into()).ok()?;
    let lat = Reflect::get(&coords, &"latitude".into()).ok()?.as_f64()?;
    let lng = Reflect::get(&coords, &"longitude".into()).ok()?.as_f64()?;
    Some(Coordinates::new(lat, lng))
}

impl Geolocator for BrowserGeolocator {
    async fn current_position(&self, options: &GeoOptions) -> Result<Coordinates, GeolocationError> {
        let geolocation = web_sys::window()
            .and_then(|w| w.navigator().geolocation().ok())
            .ok_or(GeolocationError::Unsupported)?;
        let options = position_options(options);

        let promise = Promise::new(&mut |resolve, reject| {
            let failed = reject.clone();
            let on_success = Closure::once_into_js(move |position: JsValue| {
                let _ = resolve.call1(&JsValue::NULL, &position);
            });
            let on_error = Closure::once_into_js(move |error: JsValue| {
                let _ = reject.call1(&JsValue::NULL, &error);
            });
            if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
                on_success.unchecked_ref(),
                Some(on_error.unchecked_ref()),
                &options,
            ) {
                let _ = failed.call1(&JsValue::NULL, &e);
            }
        });

        let position = JsFuture::from(promise)
            .await
            .map_err(|e| geolocation_error(&e))?;
        read_coordinates(&position).ok_or(GeolocationError::Unavailable)
    }
}

pub fn set_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

/// Current `location.hash`, including the leading `#`.
pub fn location_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

/// Record `hash` in the browser history with the section id as state.
pub fn push_history(section_id: &str, hash: &str, replace: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let state = Object::new();
    let _ = Reflect::set(&state, &"section".into(), &section_id.into());
    let result = if replace {
        history.replace_state_with_url(&state, "", Some(hash))
    } else {
        history.push_state_with_url(&state, "", Some(hash))
    };
    if let Err(e) = result {
        log::warn!("Could not update history: {}", js_message(&e));
    }
}

/// Section id stored in a `popstate` event's state, if any.
pub fn history_section(state: &JsValue) -> Option<String> {
    Reflect::get(state, &"section".into()).ok()?.as_string()
}

/// Offer `content` to the user as a file named `file_name`.
pub fn download_file(file_name: &str, content: &str, mime_type: &str) {
    if let Err(e) = try_download(file_name, content, mime_type) {
        log::error!("Download of {} failed: {}", file_name, js_message(&e));
    }
}

fn try_download(file_name: &str, content: &str, mime_type: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let parts = Array::of1(&JsValue::from_str(content));
    let bag = Object::new();
    Reflect::set(&bag, &"type".into(), &mime_type.into())?;
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, bag.unchecked_ref())?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    web_sys::Url::revoke_object_url(&url)?;
    Ok(())
}
