//! Data processing for AQI display.
//!
//! This crate turns raw API records into the shapes the front end renders:
//! summary statistics, placeholder series, chart and map configuration, and
//! export files. Nothing here touches the network or the DOM.

pub mod cache;
pub mod chart;
pub mod export;
pub mod map;
pub mod sample;

/// Summary statistics over historical and forecast records.
pub mod stats {
    use aqi_core::category::AqiCategory;
    use aqi_core::models::{ForecastEntry, HistoricalRecord};
    use serde::Serialize;

    /// Direction of the least-squares trend. Rising AQI means worsening air.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum TrendDirection {
        Worsening,
        Improving,
        Stable,
    }

    impl TrendDirection {
        pub fn from_slope(slope: f64) -> Self {
            if slope > 0.0 {
                TrendDirection::Worsening
            } else if slope < 0.0 {
                TrendDirection::Improving
            } else {
                TrendDirection::Stable
            }
        }

        pub fn label(self) -> &'static str {
            match self {
                TrendDirection::Worsening => "Worsening",
                TrendDirection::Improving => "Improving",
                TrendDirection::Stable => "Stable",
            }
        }

        /// Font Awesome icon class.
        pub fn icon(self) -> &'static str {
            match self {
                TrendDirection::Worsening => "fa-arrow-up",
                TrendDirection::Improving => "fa-arrow-down",
                TrendDirection::Stable => "fa-minus",
            }
        }

        pub fn color(self) -> &'static str {
            match self {
                TrendDirection::Worsening => "var(--error-color)",
                TrendDirection::Improving => "var(--success-color)",
                TrendDirection::Stable => "var(--gray-500)",
            }
        }
    }

    /// Least-squares slope of `values` against their index.
    ///
    /// Fewer than two points, or a constant series, yield exactly zero.
    pub fn linear_slope(values: &[f64]) -> f64 {
        if values.len() < 2 || values.windows(2).all(|w| w[0] == w[1]) {
            return 0.0;
        }
        let n = values.len() as f64;
        let mean_x = (n - 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / n;
        let (num, den) = values
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(num, den), (i, y)| {
                let dx = i as f64 - mean_x;
                (num + dx * (y - mean_y), den + dx * dx)
            });
        if den == 0.0 {
            0.0
        } else {
            num / den
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct CategoryShare {
        pub category: AqiCategory,
        pub count: usize,
        /// Rounded share of all counted records, 0..=100.
        pub percent: u32,
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct HistoricalSummary {
        pub average: u32,
        pub min: u32,
        pub max: u32,
        pub total_records: usize,
        /// Categories present in the data, in category order.
        pub distribution: Vec<CategoryShare>,
        pub slope: f64,
    }

    impl HistoricalSummary {
        pub fn direction(&self) -> TrendDirection {
            TrendDirection::from_slope(self.slope)
        }
    }

    /// Summarise records with a positive AQI. Returns `None` when there are
    /// none.
    pub fn summarize(records: &[HistoricalRecord]) -> Option<HistoricalSummary> {
        let values: Vec<u32> = records
            .iter()
            .map(HistoricalRecord::aqi)
            .filter(|aqi| *aqi > 0)
            .collect();
        let min = *values.iter().min()?;
        let max = *values.iter().max()?;
        let total = values.len();
        let sum: f64 = values.iter().map(|v| f64::from(*v)).sum();

        let mut counts = [0usize; 6];
        for value in &values {
            counts[AqiCategory::from_aqi(f64::from(*value)) as usize] += 1;
        }
        let distribution = AqiCategory::ALL
            .into_iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(category, count)| CategoryShare {
                category,
                count,
                percent: ((count as f64 / total as f64) * 100.0).round() as u32,
            })
            .collect();

        let series: Vec<f64> = values.iter().map(|v| f64::from(*v)).collect();
        Some(HistoricalSummary {
            average: (sum / total as f64).round() as u32,
            min,
            max,
            total_records: total,
            distribution,
            slope: linear_slope(&series),
        })
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct ForecastSummary {
        pub average_aqi: u32,
        pub most_common_category: AqiCategory,
        pub total_days: usize,
    }

    /// Mean predicted AQI and the most frequent category. On a tie the
    /// category that first appears later in the list wins.
    pub fn summarize_forecast(entries: &[ForecastEntry]) -> Option<ForecastSummary> {
        if entries.is_empty() {
            return None;
        }
        let sum: f64 = entries.iter().map(|e| f64::from(e.aqi())).sum();

        let mut counts: Vec<(AqiCategory, usize)> = Vec::new();
        for entry in entries {
            let category = entry.category();
            match counts.iter_mut().find(|(c, _)| *c == category) {
                Some((_, count)) => *count += 1,
                None => counts.push((category, 1)),
            }
        }
        let (most_common_category, _) = counts
            .iter()
            .copied()
            .reduce(|best, next| if best.1 > next.1 { best } else { next })?;

        Some(ForecastSummary {
            average_aqi: (sum / entries.len() as f64).round() as u32,
            most_common_category,
            total_days: entries.len(),
        })
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn record(aqi: u32) -> HistoricalRecord {
            HistoricalRecord {
                aqi_value: Some(aqi),
                ..Default::default()
            }
        }

        #[test]
        fn test_slope_sign() {
            assert!(linear_slope(&[10.0, 20.0, 35.0, 80.0]) > 0.0);
            assert!(linear_slope(&[300.0, 250.0, 120.0, 119.0]) < 0.0);
            assert_eq!(linear_slope(&[0.1, 0.1, 0.1, 0.1, 0.1]), 0.0);
            assert_eq!(linear_slope(&[42.0]), 0.0);
            assert_eq!(linear_slope(&[]), 0.0);
        }

        #[test]
        fn test_slope_of_line() {
            let slope = linear_slope(&[1.0, 3.0, 5.0, 7.0]);
            assert!((slope - 2.0).abs() < 1e-12);
        }

        #[test]
        fn test_summarize_ignores_zero_values() {
            let records = vec![record(0), record(40), record(120), record(0), record(260)];
            let summary = summarize(&records).unwrap();
            assert_eq!(summary.total_records, 3);
            assert_eq!(summary.average, 140);
            assert_eq!(summary.min, 40);
            assert_eq!(summary.max, 260);
            assert_eq!(summary.direction(), TrendDirection::Worsening);
            let categories: Vec<AqiCategory> =
                summary.distribution.iter().map(|s| s.category).collect();
            assert_eq!(
                categories,
                vec![AqiCategory::Good, AqiCategory::Moderate, AqiCategory::Poor]
            );
            assert!(summary.distribution.iter().all(|s| s.percent == 33));
        }

        #[test]
        fn test_summarize_empty() {
            assert!(summarize(&[]).is_none());
            assert!(summarize(&[record(0)]).is_none());
        }

        #[test]
        fn test_forecast_summary() {
            let entries: Vec<ForecastEntry> = [150, 160, 250, 90]
                .into_iter()
                .map(|aqi| ForecastEntry {
                    predicted_aqi: Some(aqi),
                    ..Default::default()
                })
                .collect();
            let summary = summarize_forecast(&entries).unwrap();
            assert_eq!(summary.average_aqi, 163);
            assert_eq!(summary.most_common_category, AqiCategory::Moderate);
            assert_eq!(summary.total_days, 4);
            assert!(summarize_forecast(&[]).is_none());
        }

        #[test]
        fn test_trend_labels() {
            assert_eq!(TrendDirection::from_slope(0.5).label(), "Worsening");
            assert_eq!(TrendDirection::from_slope(-0.5).label(), "Improving");
            assert_eq!(TrendDirection::from_slope(0.0).icon(), "fa-minus");
        }
    }
}
