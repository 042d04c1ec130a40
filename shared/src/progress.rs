//! Progress tracking across visits
//!
//! One [`ProgressEntry`] is recorded per visit. A [`ProgressHistory`] keeps
//! them in date order and extracts the per-metric series that progress
//! charts plot.

use crate::body_composition::CompositionResult;
use crate::intake::MeasurementValues;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Snapshot of a single visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub measurement_date: NaiveDate,
    #[serde(default)]
    pub body_weight: Option<f64>,
    #[serde(default)]
    pub fat_percentage: Option<f64>,
    #[serde(default)]
    pub ffm: Option<f64>,
    #[serde(default)]
    pub tbw: Option<f64>,
    #[serde(default)]
    pub bcm: Option<f64>,
    #[serde(default)]
    pub bmr: Option<f64>,
    #[serde(default)]
    pub chest: Option<f64>,
    #[serde(default)]
    pub waist: Option<f64>,
    #[serde(default)]
    pub hips: Option<f64>,
    #[serde(default)]
    pub arm: Option<f64>,
    #[serde(default)]
    pub upper_thigh: Option<f64>,
}

impl ProgressEntry {
    pub fn new(measurement_date: NaiveDate) -> Self {
        Self {
            measurement_date,
            body_weight: None,
            fat_percentage: None,
            ffm: None,
            tbw: None,
            bcm: None,
            bmr: None,
            chest: None,
            waist: None,
            hips: None,
            arm: None,
            upper_thigh: None,
        }
    }

    pub fn with_body(mut self, body_weight: Option<f64>, fat_percentage: Option<f64>) -> Self {
        self.body_weight = body_weight;
        self.fat_percentage = fat_percentage;
        self
    }

    pub fn with_composition(mut self, result: &CompositionResult) -> Self {
        self.ffm = Some(result.ffm);
        self.tbw = Some(result.tbw);
        self.bcm = Some(result.bcm);
        self.bmr = Some(result.bmr);
        self
    }

    pub fn with_measurements(mut self, measurements: &MeasurementValues) -> Self {
        self.chest = measurements.chest;
        self.waist = measurements.waist;
        self.hips = measurements.hips;
        self.arm = measurements.arm;
        self.upper_thigh = measurements.upper_thigh;
        self
    }
}

/// A tracked quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressMetric {
    BodyWeight,
    FatPercentage,
    Ffm,
    Tbw,
    Bcm,
    Bmr,
    Chest,
    Waist,
    Hips,
    Arm,
    UpperThigh,
}

impl ProgressMetric {
    pub fn value(&self, entry: &ProgressEntry) -> Option<f64> {
        match self {
            ProgressMetric::BodyWeight => entry.body_weight,
            ProgressMetric::FatPercentage => entry.fat_percentage,
            ProgressMetric::Ffm => entry.ffm,
            ProgressMetric::Tbw => entry.tbw,
            ProgressMetric::Bcm => entry.bcm,
            ProgressMetric::Bmr => entry.bmr,
            ProgressMetric::Chest => entry.chest,
            ProgressMetric::Waist => entry.waist,
            ProgressMetric::Hips => entry.hips,
            ProgressMetric::Arm => entry.arm,
            ProgressMetric::UpperThigh => entry.upper_thigh,
        }
    }
}

impl std::str::FromStr for ProgressMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "body_weight" => Ok(ProgressMetric::BodyWeight),
            "fat_percentage" => Ok(ProgressMetric::FatPercentage),
            "ffm" => Ok(ProgressMetric::Ffm),
            "tbw" => Ok(ProgressMetric::Tbw),
            "bcm" => Ok(ProgressMetric::Bcm),
            "bmr" => Ok(ProgressMetric::Bmr),
            "chest" => Ok(ProgressMetric::Chest),
            "waist" => Ok(ProgressMetric::Waist),
            "hips" => Ok(ProgressMetric::Hips),
            "arm" => Ok(ProgressMetric::Arm),
            "upper_thigh" => Ok(ProgressMetric::UpperThigh),
            _ => Err(format!("Unknown progress metric: {}", s)),
        }
    }
}

/// Visits in ascending date order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressHistory {
    entries: Vec<ProgressEntry>,
}

impl ProgressHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from unordered entries; same-date entries keep their order
    pub fn from_entries(entries: impl IntoIterator<Item = ProgressEntry>) -> Self {
        let mut entries: Vec<ProgressEntry> = entries.into_iter().collect();
        entries.sort_by_key(|e| e.measurement_date);
        Self { entries }
    }

    /// Insert after every entry on or before the same date
    pub fn insert(&mut self, entry: ProgressEntry) {
        let at = self
            .entries
            .partition_point(|e| e.measurement_date <= entry.measurement_date);
        self.entries.insert(at, entry);
    }

    pub fn entries(&self) -> &[ProgressEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&ProgressEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Chart points for a metric, skipping visits where it was not recorded
    pub fn series(&self, metric: ProgressMetric) -> Vec<(NaiveDate, f64)> {
        self.entries
            .iter()
            .filter_map(|e| metric.value(e).map(|v| (e.measurement_date, v)))
            .collect()
    }

    /// Last minus first recorded value of a metric
    pub fn change(&self, metric: ProgressMetric) -> Option<f64> {
        let series = self.series(metric);
        match (series.first(), series.last()) {
            (Some(first), Some(last)) if series.len() >= 2 => Some(last.1 - first.1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn visit(month: u32, weight: f64, waist: Option<f64>) -> ProgressEntry {
        let mut entry = ProgressEntry::new(date(month, 1)).with_body(Some(weight), None);
        entry.waist = waist;
        entry
    }

    #[test]
    fn test_entries_sorted_by_date() {
        let history = ProgressHistory::from_entries(vec![
            visit(3, 80.0, None),
            visit(1, 84.0, None),
            visit(2, 82.0, None),
        ]);
        let dates: Vec<NaiveDate> = history.entries().iter().map(|e| e.measurement_date).collect();
        assert_eq!(dates, vec![date(1, 1), date(2, 1), date(3, 1)]);
        assert_eq!(history.latest().unwrap().body_weight, Some(80.0));
    }

    #[test]
    fn test_insert_keeps_same_day_order() {
        let mut history = ProgressHistory::new();
        history.insert(visit(2, 82.0, None));
        history.insert(visit(1, 84.0, None));
        history.insert(visit(2, 81.5, None));

        let weights: Vec<f64> = history.series(ProgressMetric::BodyWeight).iter().map(|p| p.1).collect();
        assert_eq!(weights, vec![84.0, 82.0, 81.5]);
    }

    #[test]
    fn test_series_skips_missing_values() {
        let history = ProgressHistory::from_entries(vec![
            visit(1, 84.0, Some(90.0)),
            visit(2, 82.0, None),
            visit(3, 80.0, Some(86.5)),
        ]);
        assert_eq!(
            history.series(ProgressMetric::Waist),
            vec![(date(1, 1), 90.0), (date(3, 1), 86.5)]
        );
        assert_eq!(history.change(ProgressMetric::Waist), Some(-3.5));
        assert_eq!(history.change(ProgressMetric::Hips), None);
    }

    #[test]
    fn test_change_needs_two_points() {
        let history = ProgressHistory::from_entries(vec![visit(1, 84.0, None)]);
        assert_eq!(history.change(ProgressMetric::BodyWeight), None);
    }

    #[test]
    fn test_composition_fields_copied() {
        let result = CompositionResult {
            ffm: 58.3,
            tbw: 42.6,
            icw: 25.6,
            ecw: 17.0,
            bcm: 43.7,
            ecm: 14.6,
            bmr: 1783.0,
            bmi: None,
            ecw_icw_ratio: Some(0.67),
            tbw_ffm_ratio: Some(0.73),
        };
        let entry = ProgressEntry::new(date(1, 15)).with_composition(&result);
        assert_eq!(entry.ffm, Some(58.3));
        assert_eq!(ProgressMetric::Bmr.value(&entry), Some(1783.0));
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("upper_thigh".parse::<ProgressMetric>(), Ok(ProgressMetric::UpperThigh));
        assert_eq!("BMR".parse::<ProgressMetric>(), Ok(ProgressMetric::Bmr));
        assert!("shoe_size".parse::<ProgressMetric>().is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: insertion always leaves the history sorted
        #[test]
        fn prop_insert_preserves_order(days in prop::collection::vec(0i64..365, 1..30)) {
            let start = date(1, 1);
            let mut history = ProgressHistory::new();
            for d in &days {
                history.insert(ProgressEntry::new(start + chrono::Duration::days(*d)));
            }
            prop_assert_eq!(history.len(), days.len());
            prop_assert!(history
                .entries()
                .windows(2)
                .all(|w| w[0].measurement_date <= w[1].measurement_date));
        }
    }
}
