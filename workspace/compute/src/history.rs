//! History Loader: past case counts for the selected month.
//!
//! Every `begin` supersedes whatever fetch came before it. A completion is
//! applied only when its ticket still carries the current generation, so a
//! slow response for a month the operator has navigated away from is dropped.

use crate::api::{ApiError, ForecastApi};
use crate::error::HISTORY_WARNING_MESSAGE;
use common::{Disease, HistoryResponse, Month};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Point-in-time result of one successful history fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    pub month: Month,
    pub average_cases_by_disease: BTreeMap<Disease, f64>,
}

impl HistorySnapshot {
    /// Averages rounded for display, in canonical disease order.
    pub fn rounded(&self) -> impl Iterator<Item = (Disease, i64)> + '_ {
        self.average_cases_by_disease
            .iter()
            .map(|(disease, avg)| (*disease, avg.round() as i64))
    }
}

/// Handle for one issued fetch. Only the newest ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a history fetch must be completed with its ticket"]
pub struct HistoryTicket {
    generation: u64,
    month: Month,
}

impl HistoryTicket {
    pub fn month(&self) -> Month {
        self.month
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryState {
    Idle,
    Loading { month: Month },
    Loaded(HistorySnapshot),
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLoader {
    generation: u64,
    loading: Option<Month>,
    snapshot: Option<HistorySnapshot>,
    warning: Option<String>,
}

impl Default for HistoryLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLoader {
    pub fn new() -> Self {
        Self {
            generation: 0,
            loading: None,
            snapshot: None,
            warning: None,
        }
    }

    /// Issue a fetch for `month`, superseding any fetch still in flight.
    pub fn begin(&mut self, month: Month) -> HistoryTicket {
        self.generation += 1;
        if let Some(previous) = self.loading.replace(month) {
            debug!(
                superseded = previous.number(),
                month = month.number(),
                "Superseding in-flight history fetch"
            );
        }
        self.warning = None;
        debug!(month = month.number(), generation = self.generation, "History fetch started");
        HistoryTicket {
            generation: self.generation,
            month,
        }
    }

    /// Apply a finished fetch. Returns `false` when the ticket is stale and
    /// the outcome was discarded.
    pub fn complete(&mut self, ticket: HistoryTicket, outcome: Result<HistoryResponse, ApiError>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                month = ticket.month.number(),
                generation = ticket.generation,
                current = self.generation,
                "Discarding stale history response"
            );
            return false;
        }

        self.loading = None;
        match outcome {
            Ok(response) => {
                info!(
                    month = ticket.month.number(),
                    diseases = response.avg_cases.len(),
                    "History loaded"
                );
                self.snapshot = Some(HistorySnapshot {
                    month: ticket.month,
                    average_cases_by_disease: response.avg_cases,
                });
                self.warning = None;
            }
            Err(err) => {
                warn!(month = ticket.month.number(), error = %err, "History fetch failed");
                self.snapshot = None;
                self.warning = Some(HISTORY_WARNING_MESSAGE.to_string());
            }
        }
        true
    }

    /// Fetch and apply in one step, for callers that do nothing in between.
    pub async fn load(&mut self, api: &dyn ForecastApi, month: Month) -> Option<&HistorySnapshot> {
        let ticket = self.begin(month);
        let outcome = api.history(month).await;
        self.complete(ticket, outcome);
        self.snapshot.as_ref()
    }

    pub fn state(&self) -> HistoryState {
        if let Some(month) = self.loading {
            HistoryState::Loading { month }
        } else if let Some(snapshot) = &self.snapshot {
            HistoryState::Loaded(snapshot.clone())
        } else if let Some(message) = &self.warning {
            HistoryState::Failed {
                message: message.clone(),
            }
        } else {
            HistoryState::Idle
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn snapshot(&self) -> Option<&HistorySnapshot> {
        self.snapshot.as_ref()
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockForecastApi, history_for};

    fn month(n: u8) -> Month {
        Month::new(n).unwrap()
    }

    #[test]
    fn test_success_replaces_snapshot() {
        let mut loader = HistoryLoader::new();
        assert_eq!(loader.state(), HistoryState::Idle);

        let ticket = loader.begin(month(3));
        assert_eq!(loader.state(), HistoryState::Loading { month: month(3) });

        assert!(loader.complete(ticket, Ok(history_for(3))));
        let snapshot = loader.snapshot().unwrap();
        assert_eq!(snapshot.month, month(3));
        assert_eq!(snapshot.average_cases_by_disease[&Disease::Dengue], 30.0);
        assert!(!loader.is_loading());
    }

    #[test]
    fn test_later_month_wins_when_earlier_resolves_last() {
        let mut loader = HistoryLoader::new();
        let march = loader.begin(month(3));
        let april = loader.begin(month(4));

        assert!(loader.complete(april, Ok(history_for(4))));
        assert!(!loader.complete(march, Ok(history_for(3))));

        assert_eq!(loader.snapshot().unwrap().month, month(4));
        assert_eq!(
            loader.snapshot().unwrap().average_cases_by_disease[&Disease::Dengue],
            40.0
        );
    }

    #[test]
    fn test_stale_response_does_not_end_loading() {
        let mut loader = HistoryLoader::new();
        let march = loader.begin(month(3));
        let _april = loader.begin(month(4));

        assert!(!loader.complete(march, Ok(history_for(3))));
        assert_eq!(loader.state(), HistoryState::Loading { month: month(4) });
        assert!(loader.snapshot().is_none());
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut loader = HistoryLoader::new();
        let march = loader.begin(month(3));
        let april = loader.begin(month(4));
        assert!(loader.complete(april, Ok(history_for(4))));
        assert!(!loader.complete(march, Err(ApiError::Transport("timeout".into()))));

        assert!(loader.warning().is_none());
        assert_eq!(loader.snapshot().unwrap().month, month(4));
    }

    #[test]
    fn test_failure_clears_snapshot_and_warns() {
        let mut loader = HistoryLoader::new();
        let ticket = loader.begin(month(5));
        loader.complete(ticket, Ok(history_for(5)));

        let ticket = loader.begin(month(6));
        loader.complete(ticket, Err(ApiError::Status { status: 500, message: None }));

        assert!(loader.snapshot().is_none());
        assert_eq!(loader.warning(), Some(HISTORY_WARNING_MESSAGE));
        assert_eq!(
            loader.state(),
            HistoryState::Failed {
                message: HISTORY_WARNING_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_refresh_of_same_month_supersedes() {
        let mut loader = HistoryLoader::new();
        let first = loader.begin(month(9));
        let refresh = loader.begin(month(9));
        assert_ne!(first.generation(), refresh.generation());
        assert!(!loader.complete(first, Ok(history_for(9))));
        assert!(loader.complete(refresh, Ok(history_for(9))));
    }

    #[test]
    fn test_rounded_counts() {
        let snapshot = HistorySnapshot {
            month: month(1),
            average_cases_by_disease: [(Disease::Fever, 88.6), (Disease::Cold, 12.2)].into(),
        };
        let rounded: Vec<_> = snapshot.rounded().collect();
        assert_eq!(rounded, vec![(Disease::Cold, 12), (Disease::Fever, 89)]);
    }

    #[tokio::test]
    async fn test_load_fetches_requested_month() {
        let api = MockForecastApi::new();
        let mut loader = HistoryLoader::new();

        for n in 1..=12 {
            let snapshot = loader.load(&api, month(n)).await.unwrap();
            assert_eq!(snapshot.month, month(n));
        }
        assert_eq!(api.history_calls(), (1..=12).map(month).collect::<Vec<_>>());
    }
}
