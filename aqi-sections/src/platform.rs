//! Host services the controllers depend on: position, timers and time.

use crate::error::GeolocationError;
use aqi_core::models::Coordinates;
use chrono::{DateTime, NaiveDate, Utc};
use std::time::Duration;

/// Options for a single position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// How old a cached position may be.
    pub maximum_age: Duration,
}

impl Default for GeoOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(5 * 60),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait Geolocator {
    async fn current_position(&self, options: &GeoOptions) -> Result<Coordinates, GeolocationError>;
}

/// A timer. In the browser this is `setTimeout`.
#[allow(async_fn_in_trait)]
pub trait Delay {
    async fn sleep(&self, duration: Duration);
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar date in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
