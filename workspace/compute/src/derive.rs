//! Result Deriver: display structures computed from a prediction.
//!
//! The card grid honours the category filter; the comparison series are
//! always built from the full, unfiltered prediction map.

use crate::error::DataConsistencyError;
use crate::prediction::PredictionResult;
use common::{Category, Disease};
use std::collections::BTreeMap;

/// Fixed threshold ladder over a predicted case count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SeverityTier {
    Low,
    Moderate,
    High,
    Critical,
}

impl SeverityTier {
    /// Thresholds are strict: exactly 150 is `High`.
    pub fn classify(count: i64) -> Self {
        if count > 150 {
            SeverityTier::Critical
        } else if count > 100 {
            SeverityTier::High
        } else if count > 60 {
            SeverityTier::Moderate
        } else {
            SeverityTier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeverityTier::Low => "Low",
            SeverityTier::Moderate => "Moderate",
            SeverityTier::High => "High",
            SeverityTier::Critical => "Critical",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            SeverityTier::Low => "sev-low",
            SeverityTier::Moderate => "sev-moderate",
            SeverityTier::High => "sev-high",
            SeverityTier::Critical => "sev-critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarPoint {
    pub name: String,
    pub value: i64,
    pub color_hint: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarPoint {
    pub subject: String,
    pub value: i64,
}

/// One card of the result grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseCard {
    pub disease: Disease,
    pub count: i64,
    pub severity: SeverityTier,
    /// Bar fill relative to the largest visible count, `0..=100`.
    pub fill_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    pub visible_entries: BTreeMap<Disease, i64>,
    pub max_count: i64,
    pub severity_by_disease: BTreeMap<Disease, SeverityTier>,
    pub bar_series: Vec<BarPoint>,
    pub radar_series: Vec<RadarPoint>,
}

impl DerivedView {
    /// Fill of a count relative to `max_count`; `0` whenever `max_count` is not positive.
    pub fn fill_percent(&self, count: i64) -> f64 {
        if self.max_count <= 0 {
            0.0
        } else {
            count as f64 / self.max_count as f64 * 100.0
        }
    }

    pub fn cards(&self) -> Vec<DiseaseCard> {
        self.visible_entries
            .iter()
            .map(|(disease, count)| DiseaseCard {
                disease: *disease,
                count: *count,
                severity: self
                    .severity_by_disease
                    .get(disease)
                    .copied()
                    .unwrap_or_else(|| SeverityTier::classify(*count)),
                fill_percent: self.fill_percent(*count),
            })
            .collect()
    }
}

/// Build the view of `result` scoped to `filter`.
///
/// Fails when `filter` names a disease the service did not predict.
pub fn derive(result: &PredictionResult, filter: Category) -> Result<DerivedView, DataConsistencyError> {
    let predictions = result.predictions_by_disease();

    let visible_entries = match filter {
        Category::All => predictions.clone(),
        Category::Disease(disease) => {
            let count = predictions
                .get(&disease)
                .ok_or(DataConsistencyError::MissingDisease { disease })?;
            BTreeMap::from([(disease, *count)])
        }
    };

    let max_count = visible_entries.values().copied().max().unwrap_or(0);

    let severity_by_disease = predictions
        .iter()
        .map(|(disease, count)| (*disease, SeverityTier::classify(*count)))
        .collect();

    let bar_series = predictions
        .iter()
        .map(|(disease, count)| BarPoint {
            name: disease.display_name(),
            value: *count,
            color_hint: disease.color_hint(),
        })
        .collect();

    let radar_series = predictions
        .iter()
        .map(|(disease, count)| RadarPoint {
            subject: disease.display_name(),
            value: *count,
        })
        .collect();

    Ok(DerivedView {
        visible_entries,
        max_count,
        severity_by_disease,
        bar_series,
        radar_series,
    })
}
