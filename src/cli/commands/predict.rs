use anyhow::{Result, anyhow, bail};
use common::Month;
use compute::{ForecastApi, ReadingField, Session};
use tracing::{debug, error, info, trace, warn};

use crate::cli::PredictArgs;
use crate::report::{render_history, render_result};

/// Apply command-line inputs through the same setters the interface uses.
pub fn session_from_args(args: &PredictArgs) -> Session {
    let mut session = Session::new(args.month.unwrap_or_else(Month::current));
    session.set_category(args.category);

    let readings = [
        (ReadingField::Humidity, &args.humidity),
        (ReadingField::Rainfall, &args.rainfall),
        (ReadingField::Temperature, &args.temperature),
    ];
    for (field, raw) in readings {
        if let Some(raw) = raw {
            session.set_reading(field, raw.as_str());
        }
    }

    session.set_festive(args.festive);
    session.set_awareness(args.awareness);
    session
}

pub async fn predict(api: &dyn ForecastApi, args: PredictArgs) -> Result<()> {
    trace!("Entering predict command");
    let mut session = session_from_args(&args);
    let selection = session.input().selection();
    info!(
        "Predicting {} for {}",
        selection.category.label(),
        selection.month.label()
    );

    session.load_history(api).await;
    if let Some(snapshot) = session.history().snapshot() {
        print!("{}", render_history(snapshot));
        println!();
    } else if let Some(warning) = session.history().warning() {
        warn!("{}", warning);
        eprintln!("⚠ {}", warning);
    }

    let awareness = session.input().indicators();
    debug!(
        "Awareness {:.2} ({})",
        awareness.awareness,
        awareness.awareness_tier().label()
    );

    if let Err(e) = session.submit(api).await {
        error!("Prediction not completed: {}", e);
        bail!(e);
    }

    let result = session
        .result()
        .ok_or_else(|| anyhow!("Session did not switch to result review"))?;
    let view = session
        .view()
        .ok_or_else(|| anyhow!("No result to derive a view from"))??;

    print!("{}", render_result(result, &view));
    Ok(())
}
