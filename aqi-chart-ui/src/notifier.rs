//! Toasts and the loading overlay, driven through [`aqi_api::Notifier`].

use crate::browser::TimerDelay;
use aqi_api::Notifier;
use aqi_sections::platform::Delay;
use dioxus::prelude::*;
use std::cell::Cell;
use std::time::Duration;

pub const ERROR_TOAST_DURATION: Duration = Duration::from_secs(5);
pub const SUCCESS_TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Success,
}

impl ToastKind {
    pub fn css_class(self) -> &'static str {
        match self {
            ToastKind::Error => "toast error-toast",
            ToastKind::Success => "toast success-toast",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Error => "fas fa-exclamation-circle",
            ToastKind::Success => "fas fa-check-circle",
        }
    }

    fn duration(self) -> Duration {
        match self {
            ToastKind::Error => ERROR_TOAST_DURATION,
            ToastKind::Success => SUCCESS_TOAST_DURATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Writes notifications into the [`crate::state::AppState`] signals. Each
/// toast removes itself once its display time is up.
pub struct SignalNotifier {
    loading: Signal<u32>,
    toasts: Signal<Vec<Toast>>,
    next_id: Cell<u64>,
}

impl SignalNotifier {
    pub fn new(loading: Signal<u32>, toasts: Signal<Vec<Toast>>) -> Self {
        Self {
            loading,
            toasts,
            next_id: Cell::new(0),
        }
    }

    fn push(&self, kind: ToastKind, message: &str) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let mut toasts = self.toasts;
        toasts.write().push(Toast {
            id,
            kind,
            message: message.to_string(),
        });
        spawn(async move {
            TimerDelay.sleep(kind.duration()).await;
            toasts.write().retain(|toast| toast.id != id);
        });
    }
}

impl Notifier for SignalNotifier {
    fn loading_started(&self) {
        let mut loading = self.loading;
        *loading.write() += 1;
    }

    fn loading_finished(&self) {
        let mut loading = self.loading;
        let mut count = loading.write();
        *count = count.saturating_sub(1);
    }

    fn error(&self, message: &str) {
        log::error!("{}", message);
        self.push(ToastKind::Error, message);
    }

    fn success(&self, message: &str) {
        log::info!("{}", message);
        self.push(ToastKind::Success, message);
    }
}

/// Hide every visible toast, as on Escape.
pub fn dismiss_all(mut toasts: Signal<Vec<Toast>>) {
    toasts.write().clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_kinds() {
        assert_eq!(ToastKind::Error.duration(), Duration::from_secs(5));
        assert_eq!(ToastKind::Success.duration(), Duration::from_secs(3));
        assert!(ToastKind::Error.css_class().contains("error-toast"));
        assert_eq!(ToastKind::Success.icon(), "fas fa-check-circle");
    }
}
