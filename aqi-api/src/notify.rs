//! User-facing side effects of API calls: the loading indicator and toasts.

use std::cell::RefCell;

/// Receives loading and toast notifications. The browser implementation
/// drives the overlay and toast signals; the CLI only logs.
pub trait Notifier {
    fn loading_started(&self);
    fn loading_finished(&self);
    fn error(&self, message: &str);
    fn success(&self, message: &str);
}

/// Writes every notification to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn loading_started(&self) {
        log::debug!("Loading...");
    }

    fn loading_finished(&self) {
        log::debug!("Loading finished");
    }

    fn error(&self, message: &str) {
        log::error!("{}", message);
    }

    fn success(&self, message: &str) {
        log::info!("{}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    LoadingStarted,
    LoadingFinished,
    Error(String),
    Success(String),
}

/// Keeps every notification in order, for tests and headless hosts.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.collect(|n| match n {
            Notice::Error(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn successes(&self) -> Vec<String> {
        self.collect(|n| match n {
            Notice::Success(m) => Some(m.clone()),
            _ => None,
        })
    }

    /// Whether every `LoadingStarted` has a matching `LoadingFinished`.
    pub fn loading_balanced(&self) -> bool {
        let notices = self.notices.borrow();
        let started = notices.iter().filter(|n| **n == Notice::LoadingStarted).count();
        let finished = notices.iter().filter(|n| **n == Notice::LoadingFinished).count();
        started == finished
    }

    pub fn clear(&self) {
        self.notices.borrow_mut().clear();
    }

    fn collect(&self, pick: impl Fn(&Notice) -> Option<String>) -> Vec<String> {
        self.notices.borrow().iter().filter_map(pick).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn loading_started(&self) {
        self.notices.borrow_mut().push(Notice::LoadingStarted);
    }

    fn loading_finished(&self) {
        self.notices.borrow_mut().push(Notice::LoadingFinished);
    }

    fn error(&self, message: &str) {
        self.notices.borrow_mut().push(Notice::Error(message.to_string()));
    }

    fn success(&self, message: &str) {
        self.notices.borrow_mut().push(Notice::Success(message.to_string()));
    }
}
