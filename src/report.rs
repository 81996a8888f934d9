//! Plain-text rendering of history snapshots and prediction results.

use compute::{DerivedView, HistorySnapshot, PredictionResult};

const BAR_WIDTH: usize = 30;

fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round().clamp(0.0, BAR_WIDTH as f64) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Join rendered lines, terminating each with a newline.
fn join_lines(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

pub fn render_history(snapshot: &HistorySnapshot) -> String {
    let mut lines = vec![format!("Past case counts for {}", snapshot.month.label())];
    lines.extend(
        snapshot
            .rounded()
            .map(|(disease, count)| format!("  {:<16} {:>6}", disease.display_name(), count)),
    );
    if snapshot.average_cases_by_disease.is_empty() {
        lines.push("  (no historical data)".to_string());
    }
    join_lines(lines)
}

pub fn render_result(result: &PredictionResult, view: &DerivedView) -> String {
    let category = result.requested_category();
    let mut lines = vec![
        "Prediction Results".to_string(),
        format!("Target: {} · Category: {}", result.month_label(), category.label()),
        format!(
            "{} total expected patients ({} forecast)",
            result.total_expected_patients(),
            result.month_label()
        ),
        String::new(),
    ];

    lines.extend(view.cards().into_iter().map(|card| {
        format!(
            "{} {:<16} {:>6}  [{:<8}] {}  {}",
            card.disease.icon(),
            card.disease.display_name(),
            card.count,
            card.severity.label(),
            bar(card.fill_percent),
            card.disease.ward()
        )
    }));

    lines.push(String::new());
    lines.push("Case Count Comparison".to_string());
    lines.extend(
        view.bar_series
            .iter()
            .map(|point| format!("  {:<16} {:>6}", point.name, point.value)),
    );

    if !result.recommendations().is_empty() {
        lines.push(String::new());
        lines.push("Resource Allocation Recommendations".to_string());
        lines.extend(
            result
                .recommendations()
                .iter()
                .map(|recommendation| format!("  - {}", recommendation)),
        );
    }
    join_lines(lines)
}
