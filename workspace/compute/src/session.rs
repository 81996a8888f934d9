//! Session Controller: owns every piece of per-session state and decides
//! whether inputs or a result are on screen.

use crate::api::{ApiError, ForecastApi};
use crate::derive::{DerivedView, derive};
use crate::error::{ForecastError, Result};
use crate::history::{HistoryLoader, HistoryTicket};
use crate::input::{InputModel, ReadingField};
use crate::prediction::{PendingPrediction, PredictionClient, PredictionResult};
use common::{Category, HistoryResponse, Month, PredictResponse};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    /// Inputs and history are shown; no result exists.
    Collecting,
    /// A result is shown, scoped to `filter`.
    Reviewing {
        result: PredictionResult,
        filter: Category,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    input: InputModel,
    history: HistoryLoader,
    prediction: PredictionClient,
    phase: SessionPhase,
}

impl Session {
    /// A collecting session whose month defaults to `month`.
    pub fn new(month: Month) -> Self {
        Self {
            input: InputModel::new(month),
            history: HistoryLoader::new(),
            prediction: PredictionClient::new(),
            phase: SessionPhase::Collecting,
        }
    }

    /// A session targeting the current calendar month.
    pub fn for_current_month() -> Self {
        Self::new(Month::current())
    }

    pub fn input(&self) -> &InputModel {
        &self.input
    }

    pub fn history(&self) -> &HistoryLoader {
        &self.history
    }

    pub fn prediction(&self) -> &PredictionClient {
        &self.prediction
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn is_reviewing(&self) -> bool {
        matches!(self.phase, SessionPhase::Reviewing { .. })
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.phase {
            SessionPhase::Reviewing { result, .. } => Some(result),
            SessionPhase::Collecting => None,
        }
    }

    // ===================== Inputs =====================

    pub fn set_category(&mut self, category: Category) {
        self.input.set_category(category);
    }

    /// Returns a ticket for the history fetch this change requires.
    pub fn set_month(&mut self, month: Month) -> Option<HistoryTicket> {
        self.input.set_month(month).then(|| self.history.begin(month))
    }

    pub fn set_reading(&mut self, field: ReadingField, raw: impl Into<String>) {
        self.input.set_reading(field, raw);
    }

    pub fn set_festive(&mut self, festive: bool) {
        self.input.set_festive(festive);
    }

    pub fn set_awareness(&mut self, awareness: f64) {
        self.input.set_awareness(awareness);
    }

    // ===================== History =====================

    /// Initial fetch for the default month.
    pub fn start(&mut self) -> HistoryTicket {
        self.refresh_history()
    }

    pub fn refresh_history(&mut self) -> HistoryTicket {
        self.history.begin(self.input.selection().month)
    }

    pub fn complete_history(
        &mut self,
        ticket: HistoryTicket,
        outcome: std::result::Result<HistoryResponse, ApiError>,
    ) -> bool {
        self.history.complete(ticket, outcome)
    }

    /// Refresh and await history for the selected month.
    pub async fn load_history(&mut self, api: &dyn ForecastApi) {
        let ticket = self.refresh_history();
        let outcome = api.history(ticket.month()).await;
        self.complete_history(ticket, outcome);
    }

    // ===================== Prediction =====================

    pub fn begin_prediction(&mut self) -> Result<PendingPrediction> {
        if let SessionPhase::Reviewing { filter, .. } = &self.phase {
            return Err(ForecastError::NotCollecting(*filter));
        }
        self.prediction.begin(
            self.input.selection(),
            self.input.readings(),
            self.input.indicators(),
        )
    }

    /// On success the session moves to `Reviewing`.
    pub fn complete_prediction(
        &mut self,
        pending: PendingPrediction,
        outcome: std::result::Result<PredictResponse, ApiError>,
    ) -> Result<()> {
        let result = self.prediction.complete(pending, outcome)?;
        info!(
            month = result.month_label(),
            category = %result.requested_category(),
            "Switching to result review"
        );
        let filter = result.requested_category();
        self.phase = SessionPhase::Reviewing { result, filter };
        Ok(())
    }

    /// Submit the current inputs and await the outcome.
    pub async fn submit(&mut self, api: &dyn ForecastApi) -> Result<()> {
        let pending = self.begin_prediction()?;
        let outcome = api.predict(pending.request()).await;
        self.complete_prediction(pending, outcome)
    }

    // ===================== Review =====================

    /// Re-scope the card grid while reviewing.
    pub fn set_result_filter(&mut self, category: Category) {
        if let SessionPhase::Reviewing { filter, .. } = &mut self.phase {
            debug!(%category, "Result filter changed");
            *filter = category;
        }
    }

    /// Derived view of the current result, `None` while collecting.
    pub fn view(&self) -> Option<Result<DerivedView>> {
        match &self.phase {
            SessionPhase::Reviewing { result, filter } => {
                Some(derive(result, *filter).map_err(ForecastError::from))
            }
            SessionPhase::Collecting => None,
        }
    }

    /// Drop the result and return to collecting. Inputs keep their last values.
    pub fn reset(&mut self) {
        if self.is_reviewing() {
            info!("Discarding prediction result");
        }
        self.phase = SessionPhase::Collecting;
        self.prediction.clear_error();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::SeverityTier;
    use crate::error::{HISTORY_WARNING_MESSAGE, MISSING_READINGS_MESSAGE};
    use crate::testing::{MockForecastApi, dengue_response, full_response, history_for};
    use common::Disease;
    use pretty_assertions::assert_eq;

    fn month(n: u8) -> Month {
        Month::new(n).unwrap()
    }

    fn scenario_session() -> Session {
        let mut session = Session::new(month(7));
        session.set_category(Category::Disease(Disease::Dengue));
        session.set_reading(ReadingField::Humidity, "78.5");
        session.set_reading(ReadingField::Rainfall, "215.4");
        session.set_reading(ReadingField::Temperature, "31.2");
        session.set_festive(true);
        session.set_awareness(0.8);
        session
    }

    #[test]
    fn test_initial_state_is_collecting() {
        let session = Session::new(month(2));
        assert_eq!(session.phase(), &SessionPhase::Collecting);
        assert!(session.result().is_none());
        assert!(session.view().is_none());
    }

    #[test]
    fn test_month_change_issues_exactly_one_fetch() {
        let mut session = Session::new(month(1));
        for n in 2..=12 {
            let ticket = session.set_month(month(n)).unwrap();
            assert_eq!(ticket.month(), month(n));
            assert!(session.complete_history(ticket, Ok(history_for(n))));
        }
        assert!(session.set_month(month(12)).is_none());
    }

    #[test]
    fn test_navigating_away_discards_stale_history() {
        let mut session = Session::new(month(1));
        let start = session.start();
        let march = session.set_month(month(3)).unwrap();

        assert!(session.complete_history(march, Ok(history_for(3))));
        assert!(!session.complete_history(start, Ok(history_for(1))));
        assert_eq!(session.history().snapshot().unwrap().month, month(3));
    }

    #[test]
    fn test_history_failure_does_not_block_prediction() {
        let mut session = scenario_session();
        let ticket = session.start();
        session.complete_history(ticket, Err(ApiError::Transport("offline".into())));
        assert_eq!(session.history().warning(), Some(HISTORY_WARNING_MESSAGE));

        let pending = session.begin_prediction().unwrap();
        session.complete_prediction(pending, Ok(dengue_response())).unwrap();
        assert!(session.is_reviewing());
    }

    #[test]
    fn test_history_completing_while_reviewing_is_kept() {
        let mut session = scenario_session();
        let ticket = session.start();
        let pending = session.begin_prediction().unwrap();
        session.complete_prediction(pending, Ok(dengue_response())).unwrap();

        assert!(session.complete_history(ticket, Ok(history_for(7))));
        session.reset();
        assert_eq!(session.history().snapshot().unwrap().month, month(7));
    }

    #[test]
    fn test_validation_failure_stays_collecting() {
        let mut session = Session::new(month(7));
        let err = session.begin_prediction().unwrap_err();
        assert_eq!(err.to_string(), MISSING_READINGS_MESSAGE);
        assert_eq!(session.prediction().error(), Some(MISSING_READINGS_MESSAGE));
        assert_eq!(session.phase(), &SessionPhase::Collecting);
    }

    #[test]
    fn test_failed_prediction_stays_collecting() {
        let mut session = scenario_session();
        let pending = session.begin_prediction().unwrap();
        let outcome = Err(ApiError::Status {
            status: 503,
            message: Some("Model warming up".into()),
        });
        assert!(session.complete_prediction(pending, outcome).is_err());
        assert_eq!(session.phase(), &SessionPhase::Collecting);
        assert_eq!(session.prediction().error(), Some("Model warming up"));
    }

    #[test]
    fn test_no_prediction_while_reviewing() {
        let mut session = scenario_session();
        let pending = session.begin_prediction().unwrap();
        session.complete_prediction(pending, Ok(dengue_response())).unwrap();

        assert_eq!(
            session.begin_prediction(),
            Err(ForecastError::NotCollecting(Category::Disease(Disease::Dengue)))
        );
    }

    #[test]
    fn test_result_filter_rescopes_cards_only() {
        let mut session = Session::new(month(7));
        session.set_reading(ReadingField::Humidity, "70");
        session.set_reading(ReadingField::Rainfall, "100");
        session.set_reading(ReadingField::Temperature, "30");
        let pending = session.begin_prediction().unwrap();
        session.complete_prediction(pending, Ok(full_response())).unwrap();

        let all = session.view().unwrap().unwrap();
        assert_eq!(all.visible_entries.len(), 7);

        session.set_result_filter(Category::Disease(Disease::Fever));
        let fever = session.view().unwrap().unwrap();
        assert_eq!(fever.visible_entries.keys().collect::<Vec<_>>(), vec![&Disease::Fever]);
        assert_eq!(fever.bar_series, all.bar_series);
        assert_eq!(fever.radar_series, all.radar_series);
    }

    #[tokio::test]
    async fn test_end_to_end_dengue_scenario() {
        let api = MockForecastApi::new();
        let mut session = scenario_session();

        session.load_history(&api).await;
        session.submit(&api).await.unwrap();

        assert_eq!(api.history_calls(), vec![month(7)]);
        assert_eq!(
            serde_json::to_value(&api.predict_requests()[0]).unwrap(),
            serde_json::json!({
                "month": 7,
                "category": "Dengue",
                "humidity": 78.5,
                "rainfall": 215.4,
                "temperature": 31.2,
                "festive": 1,
                "awareness": 0.8,
            })
        );

        let view = session.view().unwrap().unwrap();
        assert_eq!(view.severity_by_disease[&Disease::Dengue], SeverityTier::Critical);
        assert_eq!(
            view.bar_series.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["Dengue"]
        );
        assert_eq!(
            view.radar_series.iter().map(|p| p.subject.as_str()).collect::<Vec<_>>(),
            vec!["Dengue"]
        );
    }

    #[test]
    fn test_refresh_while_fetch_is_stalled_supersedes_it() {
        let mut session = Session::new(month(5));
        let stalled = session.start();
        assert!(session.history().is_loading());

        let retry = session.refresh_history();
        assert_eq!(retry.month(), month(5));
        assert!(session.history().is_loading());

        assert!(session.complete_history(retry, Ok(history_for(5))));
        assert!(!session.history().is_loading());
        assert!(!session.complete_history(stalled, Err(ApiError::Transport("timed out".into()))));
        assert_eq!(session.history().snapshot().unwrap().month, month(5));
        assert_eq!(session.history().warning(), None);
    }

    #[tokio::test]
    async fn test_failed_history_load_keeps_session_submittable() {
        let api = MockForecastApi::new();
        let mut session = scenario_session();

        session.load_history(&api).await;
        assert!(session.history().snapshot().is_some());

        api.fail_next_history(ApiError::Status {
            status: 503,
            message: None,
        });
        session.load_history(&api).await;
        assert!(session.history().snapshot().is_none());
        assert_eq!(session.history().warning(), Some(HISTORY_WARNING_MESSAGE));
        assert!(session.input().is_submittable());

        session.submit(&api).await.unwrap();
        assert!(session.is_reviewing());
        assert_eq!(api.history_calls(), vec![month(7), month(7)]);
    }

    #[tokio::test]
    async fn test_reset_then_resubmit_is_deterministic() {
        let api = MockForecastApi::new();
        let mut session = scenario_session();

        session.submit(&api).await.unwrap();
        let first = session.view().unwrap().unwrap();

        session.reset();
        assert_eq!(session.phase(), &SessionPhase::Collecting);
        assert!(session.result().is_none());
        assert!(session.view().is_none());
        assert!(session.input().is_submittable());

        session.submit(&api).await.unwrap();
        let second = session.view().unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(api.predict_requests()[0], api.predict_requests()[1]);
    }

    #[tokio::test]
    async fn test_missing_filtered_disease_surfaces_consistency_error() {
        let api = MockForecastApi::new();
        api.push_prediction(Ok(dengue_response()));
        let mut session = scenario_session();
        session.set_category(Category::Disease(Disease::Cold));

        session.submit(&api).await.unwrap();
        assert!(matches!(
            session.view(),
            Some(Err(ForecastError::DataConsistency(_)))
        ));
    }
}
