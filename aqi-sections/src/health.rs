//! Health recommendations for the current AQI.

use crate::error::Result;
use crate::{LoadState, Services};
use aqi_api::AqiApi;
use aqi_core::category::AqiCategory;
use aqi_core::preferences::{load_health_preferences, save, HealthPreferences, HEALTH_PREFERENCES_KEY};
use aqi_core::recommendation::{default_recommendations, local_recommendations, HealthRecommendation};
use aqi_core::sequence::RequestSequence;
use aqi_data::export::{health_report_file_name, to_pretty_json, HealthReport, HealthSnapshot};
use std::cell::{Cell, RefCell};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommendationSource {
    /// Generic tips while no AQI is known.
    #[default]
    Default,
    Backend,
    LocalTable,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthState {
    pub aqi: u32,
    pub sensitive_group: bool,
    pub recommendations: Vec<HealthRecommendation>,
    pub source: RecommendationSource,
    pub load_state: LoadState,
}

/// The "Current Air Quality" card above the recommendations.
#[derive(Debug, Clone, PartialEq)]
pub struct AqiContext {
    pub aqi: u32,
    pub category: AqiCategory,
    pub description: &'static str,
    pub sensitive_note: Option<&'static str>,
}

impl HealthState {
    pub fn context(&self) -> Option<AqiContext> {
        if self.aqi == 0 {
            return None;
        }
        let category = AqiCategory::from_aqi(f64::from(self.aqi));
        Some(AqiContext {
            aqi: self.aqi,
            category,
            description: category.description(),
            sensitive_note: self
                .sensitive_group
                .then_some("Sensitive group settings enabled"),
        })
    }

    pub fn as_snapshot(&self) -> HealthSnapshot {
        HealthSnapshot {
            current_aqi: self.aqi,
            is_sensitive_group: self.sensitive_group,
            recommendations: self.recommendations.clone(),
        }
    }
}

pub struct HealthController<A, G, D> {
    services: Services<A, G, D>,
    state: RefCell<HealthState>,
    requests: RequestSequence,
    stale: Cell<bool>,
}

impl<A: AqiApi, G, D> HealthController<A, G, D> {
    /// Starts with the saved sensitive-group preference.
    pub fn new(services: Services<A, G, D>) -> Self {
        let preferences = load_health_preferences(services.store.as_ref());
        let state = HealthState {
            sensitive_group: preferences.is_sensitive_group,
            ..Default::default()
        };
        Self {
            services,
            state: RefCell::new(state),
            requests: RequestSequence::new(),
            stale: Cell::new(false),
        }
    }

    pub fn snapshot(&self) -> HealthState {
        self.state.borrow().clone()
    }

    pub fn set_aqi(&self, aqi: u32) {
        let mut state = self.state.borrow_mut();
        if state.aqi != aqi {
            state.aqi = aqi;
            self.stale.set(true);
        }
    }

    pub fn is_stale(&self) -> bool {
        self.stale.get()
    }

    /// Save the flag and reload.
    pub async fn set_sensitive_group(&self, sensitive_group: bool) {
        self.state.borrow_mut().sensitive_group = sensitive_group;
        let preferences = HealthPreferences {
            is_sensitive_group: sensitive_group,
        };
        if let Err(e) = save(self.services.store.as_ref(), HEALTH_PREFERENCES_KEY, &preferences) {
            log::warn!("Could not save health preferences: {}", e);
        }
        self.load().await;
    }

    /// Backend recommendations if it has any, else the local table. With no
    /// AQI known yet, general tips are shown and nothing is requested.
    pub async fn load(&self) {
        self.stale.set(false);
        let (aqi, sensitive_group) = {
            let state = self.state.borrow();
            (state.aqi, state.sensitive_group)
        };
        if aqi == 0 {
            self.show(default_recommendations(), RecommendationSource::Default);
            return;
        }

        let ticket = self.requests.issue();
        self.state.borrow_mut().load_state = LoadState::Loading;
        let outcome = self
            .services
            .api
            .health_recommendations(aqi, sensitive_group)
            .await;
        if !self.requests.is_current(ticket) {
            log::debug!("Discarding stale recommendations for AQI {}", aqi);
            return;
        }
        match outcome {
            Ok(list) if !list.is_empty() => self.show(list, RecommendationSource::Backend),
            other => {
                if let Err(e) = other {
                    log::error!("Error loading health recommendations: {}", e);
                }
                let category = AqiCategory::from_aqi(f64::from(aqi));
                self.show(
                    local_recommendations(category, sensitive_group),
                    RecommendationSource::LocalTable,
                );
            }
        }
    }

    fn show(&self, recommendations: Vec<HealthRecommendation>, source: RecommendationSource) {
        let mut state = self.state.borrow_mut();
        state.load_state = if recommendations.is_empty() {
            LoadState::Empty
        } else {
            LoadState::Loaded
        };
        state.recommendations = recommendations;
        state.source = source;
    }

    pub fn report(&self) -> HealthReport {
        let state = self.state.borrow();
        HealthReport::new(
            state.aqi,
            state.sensitive_group,
            &state.recommendations,
            self.services.clock.now(),
        )
    }

    /// File name and pretty JSON of the health report.
    pub fn export_report(&self) -> Result<(String, String)> {
        let json = to_pretty_json(&self.report())?;
        Ok((health_report_file_name(self.services.clock.today()), json))
    }
}
