//! The data-refresh and view-coordination layer of the AQI dashboard.
//!
//! Each section of the app has a controller that owns its slice of state,
//! talks to the backend through [`aqi_api::AqiApi`] and falls back to local
//! data when the backend has nothing. Controllers never touch the DOM: the
//! UI reads their snapshots after every operation. Cross-section updates go
//! through the typed [`aqi_core::events::EventBus`], wired up by
//! [`shell::AppShell`].
//!
//! Every load takes a ticket from a [`aqi_core::sequence::RequestSequence`];
//! a response that arrives after a newer load was started is dropped.

pub mod dashboard;
pub mod error;
#[cfg(any(test, feature = "testing"))]
pub mod fakes;
pub mod forecast;
pub mod health;
pub mod historical;
pub mod platform;
pub mod refresh;
pub mod router;
pub mod shell;

pub use error::{GeolocationError, Result, SectionError};

use aqi_api::Notifier;
use aqi_core::events::{AppEvent, EventBus};
use aqi_core::preferences::PreferenceStore;
use platform::Clock;
use std::rc::Rc;

/// Where a section's data stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Uninitialized,
    Loading,
    Loaded,
    /// The load finished with nothing to show.
    Empty,
    Error(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded)
    }
}

/// Everything a controller needs from its host, constructed once by the app
/// and shared.
pub struct Services<A, G, D> {
    pub api: Rc<A>,
    pub geolocator: Rc<G>,
    pub delay: Rc<D>,
    pub notifier: Rc<dyn Notifier>,
    pub store: Rc<dyn PreferenceStore>,
    pub clock: Rc<dyn Clock>,
    pub events: Rc<EventBus<AppEvent>>,
}

impl<A, G, D> Clone for Services<A, G, D> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            geolocator: Rc::clone(&self.geolocator),
            delay: Rc::clone(&self.delay),
            notifier: Rc::clone(&self.notifier),
            store: Rc::clone(&self.store),
            clock: Rc::clone(&self.clock),
            events: Rc::clone(&self.events),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::fakes::{FixedGeolocator, InstantDelay, ScriptedApi};
    use crate::platform::FixedClock;
    use aqi_api::notify::RecordingNotifier;
    use aqi_core::models::Coordinates;
    use aqi_core::preferences::MemoryStore;
    use chrono::{TimeZone, Utc};

    pub type TestServices = Services<ScriptedApi, FixedGeolocator, InstantDelay>;

    pub struct Harness {
        pub services: TestServices,
        pub api: Rc<ScriptedApi>,
        pub notifier: Rc<RecordingNotifier>,
        pub store: Rc<MemoryStore>,
        pub delay: Rc<InstantDelay>,
    }

    /// Services around `api`, with the clock at 2024-05-10 12:00 UTC and the
    /// user in Mumbai.
    pub fn harness(api: ScriptedApi) -> Harness {
        harness_with(api, FixedGeolocator::at(Coordinates::new(19.0760, 72.8777)))
    }

    pub fn harness_with(api: ScriptedApi, geolocator: FixedGeolocator) -> Harness {
        let api = Rc::new(api);
        let notifier = Rc::new(RecordingNotifier::new());
        let store = Rc::new(MemoryStore::new());
        let delay = Rc::new(InstantDelay::new());
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap());
        let services = Services {
            api: Rc::clone(&api),
            geolocator: Rc::new(geolocator),
            delay: Rc::clone(&delay),
            notifier: notifier.clone(),
            store: store.clone(),
            clock: Rc::new(clock),
            events: Rc::new(EventBus::new()),
        };
        Harness {
            services,
            api,
            notifier,
            store,
            delay,
        }
    }
}
