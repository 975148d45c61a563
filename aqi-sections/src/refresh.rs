//! Cancelable timers: the dashboard auto-refresh and a trailing debounce.
//!
//! Both work on generations. Starting, restarting or stopping bumps the
//! generation, and a pending timer that wakes up under an older generation
//! does nothing.

use crate::platform::Delay;
use aqi_core::preferences::AppSettings;
use std::cell::Cell;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_REFRESH_MINUTES: u32 = 5;

/// Identifies one run of the auto-refresh loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshToken(u64);

#[derive(Debug)]
pub struct AutoRefresh {
    enabled: Cell<bool>,
    minutes: Cell<u32>,
    generation: Cell<u64>,
}

impl Default for AutoRefresh {
    fn default() -> Self {
        Self::new(true, DEFAULT_REFRESH_MINUTES)
    }
}

impl AutoRefresh {
    pub fn new(enabled: bool, minutes: u32) -> Self {
        Self {
            enabled: Cell::new(enabled),
            minutes: Cell::new(minutes.max(1)),
            generation: Cell::new(0),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(settings.auto_refresh, settings.refresh_interval_minutes)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.minutes.get()) * 60)
    }

    pub fn interval_minutes(&self) -> u32 {
        self.minutes.get()
    }

    /// Cancel any running loop and hand out a token for a new one, if
    /// auto-refresh is enabled.
    pub fn start(&self) -> Option<RefreshToken> {
        let token = self.bump();
        self.enabled.get().then_some(token)
    }

    /// Cancel the running loop. The enabled flag is left alone.
    pub fn stop(&self) {
        self.bump();
    }

    /// Flip the enabled flag and start or stop accordingly.
    pub fn toggle(&self) -> Option<RefreshToken> {
        self.enabled.set(!self.enabled.get());
        if self.enabled.get() {
            self.start()
        } else {
            self.stop();
            None
        }
    }

    /// Change the period, restarting the loop if enabled. Zero is raised to
    /// one minute.
    pub fn set_interval_minutes(&self, minutes: u32) -> Option<RefreshToken> {
        self.minutes.set(minutes.max(1));
        if self.enabled.get() {
            self.start()
        } else {
            None
        }
    }

    /// Turn auto-refresh off and cancel the running loop.
    pub fn disable(&self) {
        self.enabled.set(false);
        self.stop();
    }

    /// Re-enable with a new period, as applied from saved settings.
    pub fn enable_with_interval(&self, minutes: u32) -> Option<RefreshToken> {
        self.enabled.set(true);
        self.set_interval_minutes(minutes)
    }

    pub fn is_current(&self, token: RefreshToken) -> bool {
        self.generation.get() == token.0
    }

    /// Sleep one interval, then call `tick`, until `token` is superseded.
    pub async fn run<D, F, Fut>(&self, token: RefreshToken, delay: &D, mut tick: F)
    where
        D: Delay + ?Sized,
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        log::info!("Auto-refresh every {} min", self.minutes.get());
        loop {
            delay.sleep(self.interval()).await;
            if !self.is_current(token) {
                log::debug!("Auto-refresh loop {} ended", token.0);
                break;
            }
            tick().await;
        }
    }

    fn bump(&self) -> RefreshToken {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        RefreshToken(next)
    }
}

pub fn toggle_message(enabled: bool) -> &'static str {
    if enabled {
        "Auto-refresh enabled"
    } else {
        "Auto-refresh disabled"
    }
}

pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Trailing-edge debounce: of a burst of calls only the last one fires.
#[derive(Debug)]
pub struct Debounce {
    wait: Duration,
    generation: Cell<u64>,
}

impl Debounce {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            generation: Cell::new(0),
        }
    }

    /// Wait out the quiet period. Returns true if no later call arrived in
    /// the meantime, i.e. the caller should act.
    pub async fn settle<D: Delay + ?Sized>(&self, delay: &D) -> bool {
        let mine = self.generation.get() + 1;
        self.generation.set(mine);
        delay.sleep(self.wait).await;
        self.generation.get() == mine
    }

    /// Drop any pending call.
    pub fn cancel(&self) {
        self.generation.set(self.generation.get() + 1);
    }
}
