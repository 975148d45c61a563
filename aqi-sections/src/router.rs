//! Hash routing and the global keyboard and connectivity inputs.

use aqi_core::events::Section;
use std::time::Duration;

/// Delay before the map is resized after the dashboard becomes visible.
pub const MAP_RESIZE_DELAY: Duration = Duration::from_millis(100);
/// Delay before refreshing when the tab becomes visible again.
pub const VISIBILITY_REFRESH_DELAY: Duration = Duration::from_secs(1);

pub const CONNECTION_RESTORED: &str = "Connection restored";
pub const CONNECTION_LOST: &str = "Connection lost. Some features may not work.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Push,
    Replace,
    /// Leave the history alone, e.g. after a popstate.
    Keep,
}

/// What the page must do to show a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub section: Section,
    pub history: HistoryAction,
    pub changed: bool,
}

impl Navigation {
    pub fn hash(&self) -> String {
        format!("#{}", self.section.id())
    }

    pub fn title(&self) -> &'static str {
        self.section.page_title()
    }

    /// The map needs `invalidateSize` after its container was hidden.
    pub fn resize_map(&self) -> bool {
        self.section == Section::Dashboard
    }
}

/// Exactly one section is visible at a time.
#[derive(Debug, Default)]
pub struct Router {
    current: Section,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Section {
        self.current
    }

    /// Initial route from the URL hash; unknown hashes show the dashboard.
    pub fn start(&mut self, hash: &str) -> Navigation {
        let section = Section::from_id(hash).unwrap_or_default();
        self.current = section;
        Navigation {
            section,
            history: HistoryAction::Replace,
            changed: true,
        }
    }

    pub fn show(&mut self, section: Section) -> Navigation {
        let changed = section != self.current;
        self.current = section;
        log::info!("Showing section {}", section);
        Navigation {
            section,
            history: if changed {
                HistoryAction::Push
            } else {
                HistoryAction::Keep
            },
            changed,
        }
    }

    /// Back/forward: restore the section stored in the history entry.
    pub fn pop_state(&mut self, state: Option<&str>) -> Navigation {
        let section = state.and_then(Section::from_id).unwrap_or_default();
        let changed = section != self.current;
        self.current = section;
        Navigation {
            section,
            history: HistoryAction::Keep,
            changed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Refresh,
    DismissToasts,
    Show(Section),
}

/// Ctrl/Cmd+R refreshes, Escape dismisses toasts, Alt+1..4 switch sections.
pub fn command_for_key(input: &KeyInput) -> Option<ShellCommand> {
    if (input.ctrl || input.meta) && input.key.eq_ignore_ascii_case("r") {
        return Some(ShellCommand::Refresh);
    }
    if input.key == "Escape" {
        return Some(ShellCommand::DismissToasts);
    }
    if input.alt {
        let mut chars = input.key.chars();
        if let (Some(digit), None) = (chars.next(), chars.next()) {
            return Section::from_shortcut(digit).map(ShellCommand::Show);
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
    /// The tab became visible again.
    Visible,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: &str, ctrl: bool, meta: bool, alt: bool) -> KeyInput {
        KeyInput {
            key: key.to_string(),
            ctrl,
            meta,
            alt,
        }
    }

    #[test]
    fn test_start_replaces_history() {
        let mut router = Router::new();
        let nav = router.start("#historical");
        assert_eq!(nav.section, Section::Historical);
        assert_eq!(nav.history, HistoryAction::Replace);
        assert_eq!(nav.title(), "Historical Data - Air Quality Visualizer");
        assert_eq!(router.start("#nope").section, Section::Dashboard);
        assert_eq!(router.start("").hash(), "#dashboard");
    }

    #[test]
    fn test_show_pushes_only_on_change() {
        let mut router = Router::new();
        let nav = router.show(Section::Forecast);
        assert!(nav.changed);
        assert_eq!(nav.history, HistoryAction::Push);
        assert!(!nav.resize_map());
        let again = router.show(Section::Forecast);
        assert!(!again.changed);
        assert_eq!(again.history, HistoryAction::Keep);
        assert!(router.show(Section::Dashboard).resize_map());
    }

    #[test]
    fn test_pop_state_defaults_to_dashboard() {
        let mut router = Router::new();
        router.show(Section::Health);
        let nav = router.pop_state(Some("forecast"));
        assert_eq!(nav.section, Section::Forecast);
        assert_eq!(nav.history, HistoryAction::Keep);
        assert_eq!(router.pop_state(None).section, Section::Dashboard);
        assert_eq!(router.current(), Section::Dashboard);
    }

    #[test]
    fn test_keyboard_shortcuts() {
        assert_eq!(command_for_key(&key("r", true, false, false)), Some(ShellCommand::Refresh));
        assert_eq!(command_for_key(&key("R", false, true, false)), Some(ShellCommand::Refresh));
        assert_eq!(command_for_key(&key("r", false, false, false)), None);
        assert_eq!(
            command_for_key(&key("Escape", false, false, false)),
            Some(ShellCommand::DismissToasts)
        );
        assert_eq!(
            command_for_key(&key("3", false, false, true)),
            Some(ShellCommand::Show(Section::Historical))
        );
        assert_eq!(command_for_key(&key("5", false, false, true)), None);
        assert_eq!(command_for_key(&key("3", false, false, false)), None);
    }
}
