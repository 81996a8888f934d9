//! Orchestration core of the disease forecast client.
//!
//! Holds no I/O of its own: async work goes through [`api::ForecastApi`] and
//! every completion is fed back into the owning [`session::Session`].

pub mod api;
pub mod derive;
pub mod error;
pub mod history;
pub mod input;
pub mod prediction;
pub mod session;

#[cfg(test)]
mod testing;

pub use api::{ApiError, ForecastApi};
pub use derive::{BarPoint, DerivedView, DiseaseCard, RadarPoint, SeverityTier, derive};
pub use error::{DataConsistencyError, ForecastError, ValidationError};
pub use history::{HistoryLoader, HistorySnapshot, HistoryState, HistoryTicket};
pub use input::{AwarenessTier, EnvironmentalReadings, InputModel, ReadingField, Selection, SocialIndicators};
pub use prediction::{PendingPrediction, PredictionClient, PredictionResult, SubmitState};
pub use session::{Session, SessionPhase};
