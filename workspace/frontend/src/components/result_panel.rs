use common::Category;
use compute::{DerivedView, PredictionResult, derive};
use yew::prelude::*;

use crate::widgets::alert::Alert;

#[derive(Properties, PartialEq)]
pub struct ResultPanelProps {
    pub result: PredictionResult,
    pub filter: Category,
    pub on_filter: Callback<Category>,
    pub on_reset: Callback<()>,
}

/// Chips for `all` and every disease the service actually predicted.
fn filter_chips(props: &ResultPanelProps) -> Html {
    let choices = std::iter::once(Category::All).chain(
        props
            .result
            .predictions_by_disease()
            .keys()
            .map(|disease| Category::Disease(*disease)),
    );

    html! {
        <div class="flex flex-wrap gap-2">
            {for choices.map(|category| {
                let on_filter = props.on_filter.clone();
                let onclick = Callback::from(move |_: MouseEvent| on_filter.emit(category));
                let active = category == props.filter;
                html! {
                    <button
                        key={category.wire_name()}
                        class={classes!("btn", "btn-xs", if active { "btn-primary" } else { "btn-outline" })}
                        {onclick}
                    >
                        {category.label()}
                    </button>
                }
            })}
        </div>
    }
}

fn disease_cards(view: &DerivedView) -> Html {
    html! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            {for view.cards().into_iter().map(|card| html! {
                <div class="card bg-base-100 shadow" key={card.disease.wire_name()}>
                    <div class="card-body p-4">
                        <div class="flex justify-between items-center">
                            <h3 class="font-semibold">
                                {format!("{} {}", card.disease.icon(), card.disease.label())}
                            </h3>
                            <span class={classes!("badge", card.severity.css_class())}>
                                {card.severity.label()}
                            </span>
                        </div>
                        <div class="text-3xl font-bold">{card.count.to_string()}</div>
                        <div class="text-xs text-gray-500">{card.disease.ward()}</div>
                        <div class="w-full bg-base-200 rounded h-2">
                            <div
                                class="h-2 rounded"
                                style={format!(
                                    "width: {:.1}%; background-color: {}",
                                    card.fill_percent,
                                    card.disease.color_hint()
                                )}
                            ></div>
                        </div>
                    </div>
                </div>
            })}
        </div>
    }
}

fn comparison(view: &DerivedView) -> Html {
    let max = view.bar_series.iter().map(|point| point.value).max().unwrap_or(0);
    let width = |value: i64| if max > 0 { value as f64 / max as f64 * 100.0 } else { 0.0 };

    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
            <div>
                <h3 class="font-semibold mb-2">{"Predicted cases by disease"}</h3>
                {for view.bar_series.iter().map(|point| html! {
                    <div class="flex items-center gap-2 mb-1" key={point.name.clone()}>
                        <span class="w-32 text-sm">{point.name.clone()}</span>
                        <div class="flex-1 bg-base-200 rounded h-3">
                            <div
                                class="h-3 rounded"
                                style={format!(
                                    "width: {:.1}%; background-color: {}",
                                    width(point.value),
                                    point.color_hint
                                )}
                            ></div>
                        </div>
                        <span class="w-12 text-right text-sm">{point.value.to_string()}</span>
                    </div>
                })}
            </div>
            <div>
                <h3 class="font-semibold mb-2">{"Case-load profile"}</h3>
                <ul class="text-sm space-y-1">
                    {for view.radar_series.iter().map(|point| html! {
                        <li key={point.subject.clone()} class="flex justify-between">
                            <span>{point.subject.clone()}</span>
                            <span class="font-mono">{point.value.to_string()}</span>
                        </li>
                    })}
                </ul>
            </div>
        </div>
    }
}

#[function_component(ResultPanel)]
pub fn result_panel(props: &ResultPanelProps) -> Html {
    let on_reset = {
        let on_reset = props.on_reset.clone();
        Callback::from(move |_: MouseEvent| on_reset.emit(()))
    };

    let body = match derive(&props.result, props.filter) {
        Ok(view) => html! {
            <>
                {disease_cards(&view)}
                {comparison(&view)}
            </>
        },
        Err(e) => {
            log::error!("Cannot display prediction: {}", e);
            html! { <Alert message={e.to_string()} /> }
        }
    };

    html! {
        <div class="space-y-6">
            <div class="flex justify-between items-center">
                <div>
                    <h2 class="text-2xl font-bold">
                        {format!("Forecast for {}", props.result.month_label())}
                    </h2>
                    <p class="text-sm text-gray-500">
                        {format!(
                            "{} {}",
                            props.result.requested_category().icon(),
                            props.result.requested_category().label()
                        )}
                    </p>
                </div>
                <button class="btn btn-outline" onclick={on_reset}>
                    <i class="fas fa-redo"></i>
                    {" New prediction"}
                </button>
            </div>

            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-title">{"Total expected patients"}</div>
                    <div class="stat-value">{props.result.total_expected_patients().to_string()}</div>
                </div>
            </div>

            {filter_chips(props)}
            {body}

            {if props.result.recommendations().is_empty() {
                html! {}
            } else {
                html! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <h3 class="card-title">{"Recommendations"}</h3>
                            <ul class="list-disc pl-5 space-y-1">
                                {for props.result.recommendations().iter().map(|line| html! {
                                    <li>{line.clone()}</li>
                                })}
                            </ul>
                        </div>
                    </div>
                }
            }}
        </div>
    }
}
