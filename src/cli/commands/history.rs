use anyhow::{Result, bail};
use common::Month;
use compute::{ForecastApi, HistoryLoader};
use tracing::{debug, info, trace};

use crate::report::render_history;

pub async fn history(api: &dyn ForecastApi, month: Month) -> Result<()> {
    trace!("Entering history command");
    info!("Loading past case counts for {}", month.label());

    let mut loader = HistoryLoader::new();
    loader.load(api, month).await;

    let Some(snapshot) = loader.snapshot() else {
        bail!(loader.warning().unwrap_or_default().to_string());
    };
    debug!("History snapshot has {} diseases", snapshot.average_cases_by_disease.len());
    print!("{}", render_history(snapshot));
    Ok(())
}
