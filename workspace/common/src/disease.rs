use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Wire token of the synthetic "every disease" filter value.
pub const ALL_TOKEN: &str = "all";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown disease identifier: {0}")]
pub struct UnknownDisease(pub String);

/// Closed set of diseases the prediction service forecasts.
///
/// Declaration order is the canonical display order; maps keyed by `Disease`
/// iterate in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Disease {
    Dengue,
    #[serde(rename = "Road_Accidents")]
    RoadAccidents,
    #[serde(rename = "Heart_Patients")]
    HeartPatients,
    #[serde(rename = "Hadisi_Anthuru")]
    HadisiAnthuru,
    Tuberculosis,
    Cold,
    Fever,
}

impl Disease {
    pub const ALL: [Disease; 7] = [
        Disease::Dengue,
        Disease::RoadAccidents,
        Disease::HeartPatients,
        Disease::HadisiAnthuru,
        Disease::Tuberculosis,
        Disease::Cold,
        Disease::Fever,
    ];

    /// Underscore-joined token exchanged with the service (`Road_Accidents`).
    pub fn wire_name(self) -> &'static str {
        match self {
            Disease::Dengue => "Dengue",
            Disease::RoadAccidents => "Road_Accidents",
            Disease::HeartPatients => "Heart_Patients",
            Disease::HadisiAnthuru => "Hadisi_Anthuru",
            Disease::Tuberculosis => "Tuberculosis",
            Disease::Cold => "Cold",
            Disease::Fever => "Fever",
        }
    }

    /// Wire token with underscores replaced by spaces (`Road Accidents`).
    pub fn display_name(self) -> String {
        self.wire_name().replace('_', " ")
    }

    /// Label shown on selection chips.
    pub fn label(self) -> &'static str {
        match self {
            Disease::Dengue => "Dengue",
            Disease::RoadAccidents => "Road Accidents",
            Disease::HeartPatients => "Heart Disease",
            Disease::HadisiAnthuru => "Gastroenteritis",
            Disease::Tuberculosis => "Tuberculosis",
            Disease::Cold => "Common Cold",
            Disease::Fever => "Fever",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Disease::Dengue => "🦟",
            Disease::RoadAccidents => "🚗",
            Disease::HeartPatients => "❤️",
            Disease::HadisiAnthuru => "🤢",
            Disease::Tuberculosis => "🫁",
            Disease::Cold => "🤧",
            Disease::Fever => "🌡️",
        }
    }

    pub fn color_hint(self) -> &'static str {
        match self {
            Disease::Dengue => "#e63c3c",
            Disease::RoadAccidents => "#f59e0b",
            Disease::HeartPatients => "#ef4444",
            Disease::HadisiAnthuru => "#8b5cf6",
            Disease::Tuberculosis => "#0a5c7f",
            Disease::Cold => "#3b82f6",
            Disease::Fever => "#10b981",
        }
    }

    /// Hospital ward that absorbs this disease's patients.
    pub fn ward(self) -> &'static str {
        match self {
            Disease::Dengue => "Infectious Disease Ward",
            Disease::RoadAccidents => "Emergency / Trauma Ward",
            Disease::HeartPatients => "Cardiac ICU",
            Disease::HadisiAnthuru => "General Medicine Ward",
            Disease::Tuberculosis => "Respiratory Ward",
            Disease::Cold => "OPD / Outpatient",
            Disease::Fever => "General Ward",
        }
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Disease {
    type Err = UnknownDisease;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Disease::ALL
            .into_iter()
            .find(|d| d.wire_name() == s)
            .ok_or_else(|| UnknownDisease(s.to_string()))
    }
}

/// Category filter: every disease, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    All,
    Disease(Disease),
}

impl Category {
    /// `all` followed by every disease, in chip order.
    pub fn choices() -> impl Iterator<Item = Category> {
        std::iter::once(Category::All).chain(Disease::ALL.into_iter().map(Category::Disease))
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            Category::All => ALL_TOKEN,
            Category::Disease(d) => d.wire_name(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All Diseases",
            Category::Disease(d) => d.label(),
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::All => "🏥",
            Category::Disease(d) => d.icon(),
        }
    }

    pub fn disease(self) -> Option<Disease> {
        match self {
            Category::All => None,
            Category::Disease(d) => Some(d),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl From<Disease> for Category {
    fn from(disease: Disease) -> Self {
        Category::Disease(disease)
    }
}

impl FromStr for Category {
    type Err = UnknownDisease;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_TOKEN {
            Ok(Category::All)
        } else {
            s.parse().map(Category::Disease)
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}
