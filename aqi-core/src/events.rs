//! Sections of the app and the typed event bus that connects them.

use crate::models::CitySelection;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// One of the four mutually exclusive views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Dashboard,
    Forecast,
    Historical,
    Health,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Dashboard,
        Section::Forecast,
        Section::Historical,
        Section::Health,
    ];

    /// Identifier used in the URL hash and history state.
    pub fn id(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Forecast => "forecast",
            Section::Historical => "historical",
            Section::Health => "health",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().trim_start_matches('#');
        Self::ALL.into_iter().find(|section| section.id() == id)
    }

    /// Section bound to the `Alt+<digit>` shortcut, 1-based.
    pub fn from_shortcut(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Forecast => "Forecast",
            Section::Historical => "Historical",
            Section::Health => "Health",
        }
    }

    /// Document title while the section is visible.
    pub fn page_title(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard - Air Quality Visualizer",
            Section::Forecast => "Forecast - Air Quality Visualizer",
            Section::Historical => "Historical Data - Air Quality Visualizer",
            Section::Health => "Health Recommendations - Air Quality Visualizer",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Broadcast between sections.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The active city changed.
    CityChanged(CitySelection),
    /// A new current AQI value is known for the active city.
    AqiUpdated { city: CitySelection, aqi: u32 },
    /// A section became visible.
    SectionShown(Section),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<E> = Rc<dyn Fn(&E)>;

/// Single-threaded publish/subscribe bus.
///
/// Handlers are invoked in subscription order. A handler may subscribe or
/// unsubscribe while an event is being delivered; the change applies from the
/// next publish.
pub struct EventBus<E> {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(SubscriptionId, Handler<E>)>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            handlers: RefCell::new(Vec::new()),
        }
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: impl Fn(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Returns false if the subscription was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    pub fn publish(&self, event: &E) {
        let snapshot: Vec<Handler<E>> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in snapshot {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_ids() {
        for section in Section::ALL {
            assert_eq!(Section::from_id(section.id()), Some(section));
        }
        assert_eq!(Section::from_id("#forecast"), Some(Section::Forecast));
        assert_eq!(Section::from_id("settings"), None);
        assert_eq!(Section::default(), Section::Dashboard);
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(Section::from_shortcut('1'), Some(Section::Dashboard));
        assert_eq!(Section::from_shortcut('4'), Some(Section::Health));
        assert_eq!(Section::from_shortcut('5'), None);
        assert_eq!(Section::from_shortcut('0'), None);
        assert_eq!(Section::from_shortcut('x'), None);
    }

    #[test]
    fn test_publish_reaches_subscribers_in_order() {
        let bus = EventBus::<AppEvent>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        bus.subscribe(move |event| {
            if let AppEvent::SectionShown(section) = event {
                first.borrow_mut().push(format!("a:{section}"));
            }
        });
        let second = Rc::clone(&seen);
        let id = bus.subscribe(move |_| second.borrow_mut().push("b".to_string()));

        bus.publish(&AppEvent::SectionShown(Section::Health));
        assert_eq!(*seen.borrow(), vec!["a:health", "b"]);

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(&AppEvent::SectionShown(Section::Forecast));
        assert_eq!(seen.borrow().len(), 3);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn test_subscribe_during_publish() {
        let bus = Rc::new(EventBus::<u32>::new());
        let count = Rc::new(Cell::new(0));

        let inner_bus = Rc::clone(&bus);
        let inner_count = Rc::clone(&count);
        bus.subscribe(move |_| {
            let c = Rc::clone(&inner_count);
            inner_bus.subscribe(move |_| c.set(c.get() + 1));
        });

        bus.publish(&1);
        assert_eq!(count.get(), 0);
        bus.publish(&2);
        assert_eq!(count.get(), 1);
    }
}
