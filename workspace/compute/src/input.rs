//! Input Model: selection, environmental readings and social indicators.
//!
//! Every setter replaces exactly one field. Validation happens only when a
//! submission is attempted.

use crate::error::ValidationError;
use common::{Category, Month};
use tracing::{debug, warn};

/// Disease category and target month of a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub category: Category,
    pub month: Month,
}

impl Selection {
    pub fn new(month: Month) -> Self {
        Self {
            category: Category::All,
            month,
        }
    }
}

/// The three manually entered environmental readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingField {
    Humidity,
    Rainfall,
    Temperature,
}

impl ReadingField {
    pub const ALL: [ReadingField; 3] = [
        ReadingField::Humidity,
        ReadingField::Rainfall,
        ReadingField::Temperature,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReadingField::Humidity => "Humidity",
            ReadingField::Rainfall => "Rainfall",
            ReadingField::Temperature => "Temperature",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            ReadingField::Humidity => "%",
            ReadingField::Rainfall => "mm",
            ReadingField::Temperature => "°C",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            ReadingField::Humidity => "e.g. 78.5",
            ReadingField::Rainfall => "e.g. 215.4",
            ReadingField::Temperature => "e.g. 31.2",
        }
    }
}

/// Raw operator text for each reading. Empty means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentalReadings {
    humidity: String,
    rainfall: String,
    temperature: String,
}

/// Readings after type conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedReadings {
    pub humidity: f64,
    pub rainfall: f64,
    pub temperature: f64,
}

impl EnvironmentalReadings {
    pub fn raw(&self, field: ReadingField) -> &str {
        match field {
            ReadingField::Humidity => &self.humidity,
            ReadingField::Rainfall => &self.rainfall,
            ReadingField::Temperature => &self.temperature,
        }
    }

    fn slot(&mut self, field: ReadingField) -> &mut String {
        match field {
            ReadingField::Humidity => &mut self.humidity,
            ReadingField::Rainfall => &mut self.rainfall,
            ReadingField::Temperature => &mut self.temperature,
        }
    }

    /// Parsed value of one field, `None` when unset or not a finite number.
    pub fn value(&self, field: ReadingField) -> Option<f64> {
        self.raw(field)
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    pub fn parse(&self) -> Result<ParsedReadings, ValidationError> {
        match (
            self.value(ReadingField::Humidity),
            self.value(ReadingField::Rainfall),
            self.value(ReadingField::Temperature),
        ) {
            (Some(humidity), Some(rainfall), Some(temperature)) => Ok(ParsedReadings {
                humidity,
                rainfall,
                temperature,
            }),
            _ => Err(ValidationError::MissingEnvironmentalFields),
        }
    }
}

/// Display tier of the public awareness level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwarenessTier {
    Low,
    Moderate,
    High,
}

impl AwarenessTier {
    /// Lower bounds are inclusive: `0.34` is already `Moderate`.
    pub fn classify(awareness: f64) -> Self {
        if awareness < 0.34 {
            AwarenessTier::Low
        } else if awareness < 0.67 {
            AwarenessTier::Moderate
        } else {
            AwarenessTier::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AwarenessTier::Low => "Low",
            AwarenessTier::Moderate => "Moderate",
            AwarenessTier::High => "High",
        }
    }

    pub fn color_hint(self) -> &'static str {
        match self {
            AwarenessTier::Low => "#e63c3c",
            AwarenessTier::Moderate => "#f59e0b",
            AwarenessTier::High => "#10b981",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SocialIndicators {
    pub festive: bool,
    /// Always within `[0, 1]`.
    pub awareness: f64,
}

impl Default for SocialIndicators {
    fn default() -> Self {
        Self {
            festive: false,
            awareness: 0.5,
        }
    }
}

impl SocialIndicators {
    pub fn awareness_tier(&self) -> AwarenessTier {
        AwarenessTier::classify(self.awareness)
    }

    /// Wire encoding of the festival flag.
    pub fn festive_indicator(&self) -> u8 {
        u8::from(self.festive)
    }
}

/// Everything the operator has entered so far.
#[derive(Debug, Clone, PartialEq)]
pub struct InputModel {
    selection: Selection,
    readings: EnvironmentalReadings,
    indicators: SocialIndicators,
}

impl InputModel {
    pub fn new(month: Month) -> Self {
        Self {
            selection: Selection::new(month),
            readings: EnvironmentalReadings::default(),
            indicators: SocialIndicators::default(),
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn readings(&self) -> &EnvironmentalReadings {
        &self.readings
    }

    pub fn indicators(&self) -> SocialIndicators {
        self.indicators
    }

    pub fn set_category(&mut self, category: Category) {
        debug!(%category, "Category selected");
        self.selection.category = category;
    }

    /// Returns `true` when the month actually changed.
    pub fn set_month(&mut self, month: Month) -> bool {
        if self.selection.month == month {
            return false;
        }
        debug!(month = month.number(), "Month selected");
        self.selection.month = month;
        true
    }

    pub fn set_reading(&mut self, field: ReadingField, raw: impl Into<String>) {
        *self.readings.slot(field) = raw.into();
    }

    pub fn set_festive(&mut self, festive: bool) {
        self.indicators.festive = festive;
    }

    /// Clamped into `[0, 1]`; non-finite values are ignored.
    pub fn set_awareness(&mut self, awareness: f64) {
        if !awareness.is_finite() {
            warn!(awareness, "Ignoring non-finite awareness value");
            return;
        }
        self.indicators.awareness = awareness.clamp(0.0, 1.0);
    }

    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<ParsedReadings, ValidationError> {
        self.readings.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Disease;

    fn model() -> InputModel {
        InputModel::new(Month::new(7).unwrap())
    }

    fn filled() -> InputModel {
        let mut input = model();
        input.set_reading(ReadingField::Humidity, "78.5");
        input.set_reading(ReadingField::Rainfall, "215.4");
        input.set_reading(ReadingField::Temperature, "31.2");
        input
    }

    #[test]
    fn test_defaults() {
        let input = model();
        assert_eq!(input.selection().category, Category::All);
        assert_eq!(input.selection().month.number(), 7);
        assert!(!input.indicators().festive);
        assert_eq!(input.indicators().awareness, 0.5);
        for field in ReadingField::ALL {
            assert_eq!(input.readings().raw(field), "");
        }
    }

    #[test]
    fn test_submittable_only_when_all_readings_parse() {
        assert!(!model().is_submittable());
        assert!(filled().is_submittable());

        for field in ReadingField::ALL {
            let mut input = filled();
            input.set_reading(field, "");
            assert!(!input.is_submittable(), "{} unset", field.label());

            input.set_reading(field, "abc");
            assert!(!input.is_submittable(), "{} non-numeric", field.label());

            input.set_reading(field, "NaN");
            assert!(!input.is_submittable(), "{} not finite", field.label());
        }
    }

    #[test]
    fn test_submittable_ignores_indicators() {
        let mut input = filled();
        input.set_festive(true);
        input.set_awareness(0.0);
        assert!(input.is_submittable());

        let mut input = model();
        input.set_festive(true);
        input.set_awareness(1.0);
        assert_eq!(
            input.validate(),
            Err(ValidationError::MissingEnvironmentalFields)
        );
    }

    #[test]
    fn test_zero_reading_is_a_value() {
        let mut input = filled();
        input.set_reading(ReadingField::Rainfall, "0");
        assert_eq!(input.validate().unwrap().rainfall, 0.0);
    }

    #[test]
    fn test_setters_touch_one_field() {
        let mut input = filled();
        let before = input.clone();

        input.set_category(Category::Disease(Disease::Fever));
        assert_eq!(input.readings(), before.readings());
        assert_eq!(input.indicators(), before.indicators());
        assert_eq!(input.selection().month, before.selection().month);

        input.set_reading(ReadingField::Humidity, "60");
        assert_eq!(input.readings().raw(ReadingField::Rainfall), "215.4");
        assert_eq!(input.readings().raw(ReadingField::Temperature), "31.2");
        assert_eq!(input.selection().category, Category::Disease(Disease::Fever));
    }

    #[test]
    fn test_set_month_reports_change() {
        let mut input = model();
        assert!(!input.set_month(Month::new(7).unwrap()));
        assert!(input.set_month(Month::new(8).unwrap()));
        assert_eq!(input.selection().month.number(), 8);
    }

    #[test]
    fn test_awareness_tier_boundaries() {
        assert_eq!(AwarenessTier::classify(0.33), AwarenessTier::Low);
        assert_eq!(AwarenessTier::classify(0.34), AwarenessTier::Moderate);
        assert_eq!(AwarenessTier::classify(0.66), AwarenessTier::Moderate);
        assert_eq!(AwarenessTier::classify(0.67), AwarenessTier::High);
    }

    #[test]
    fn test_awareness_is_clamped() {
        let mut input = model();
        input.set_awareness(1.7);
        assert_eq!(input.indicators().awareness, 1.0);
        input.set_awareness(-0.2);
        assert_eq!(input.indicators().awareness, 0.0);
        input.set_awareness(f64::NAN);
        assert_eq!(input.indicators().awareness, 0.0);
    }
}
