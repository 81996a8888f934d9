use common::{Category, Month};
use compute::{HistoryLoader, InputModel, ReadingField};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::history_panel::HistoryPanel;
use crate::widgets::alert::Alert;

#[derive(Properties, PartialEq)]
pub struct PredictionFormProps {
    pub input: InputModel,
    pub history: HistoryLoader,
    pub submitting: bool,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    pub on_category: Callback<Category>,
    pub on_month: Callback<Month>,
    pub on_refresh: Callback<()>,
    pub on_reading: Callback<(ReadingField, String)>,
    pub on_festive: Callback<bool>,
    pub on_awareness: Callback<f64>,
    pub on_submit: Callback<()>,
}

#[function_component(PredictionForm)]
pub fn prediction_form(props: &PredictionFormProps) -> Html {
    let selection = props.input.selection();
    let indicators = props.input.indicators();
    let tier = indicators.awareness_tier();

    let category_chips = Category::choices().map(|category| {
        let on_category = props.on_category.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_category.emit(category));
        let active = category == selection.category;
        html! {
            <button
                key={category.wire_name()}
                type="button"
                class={classes!("btn", "btn-sm", if active { "btn-primary" } else { "btn-outline" })}
                {onclick}
            >
                {format!("{} {}", category.icon(), category.label())}
            </button>
        }
    });

    let month_chips = Month::all().map(|month| {
        let on_month = props.on_month.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_month.emit(month));
        let active = month == selection.month;
        html! {
            <button
                key={month.number().to_string()}
                type="button"
                class={classes!("btn", "btn-xs", if active { "btn-secondary" } else { "btn-ghost" })}
                {onclick}
            >
                {month.short_label()}
            </button>
        }
    });

    let reading_inputs = ReadingField::ALL.into_iter().map(|field| {
        let on_reading = props.on_reading.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_reading.emit((field, input.value()));
        });
        html! {
            <div class="form-control" key={field.label()}>
                <label class="label">
                    <span class="label-text">{format!("{} ({})", field.label(), field.unit())}</span>
                </label>
                <input
                    type="number"
                    step="any"
                    class="input input-bordered w-full"
                    placeholder={field.placeholder()}
                    value={props.input.readings().raw(field).to_string()}
                    {oninput}
                />
            </div>
        }
    });

    let on_festive = {
        let on_festive = props.on_festive.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_festive.emit(input.checked());
        })
    };

    let on_awareness = {
        let on_awareness = props.on_awareness.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            match input.value().parse::<f64>() {
                Ok(value) => on_awareness.emit(value),
                Err(_) => log::warn!("Unreadable awareness value: {}", input.value()),
            }
        })
    };

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    html! {
        <form class="space-y-6" onsubmit={on_submit}>
            <section class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{"Disease category"}</h2>
                    <div class="flex flex-wrap gap-2">
                        {for category_chips}
                    </div>
                </div>
            </section>

            <section class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{format!("Month: {}", selection.month.label())}</h2>
                    <div class="flex flex-wrap gap-1">
                        {for month_chips}
                    </div>
                    <HistoryPanel
                        history={props.history.clone()}
                        on_refresh={props.on_refresh.clone()}
                    />
                </div>
            </section>

            <section class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{"Environmental factors"}</h2>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        {for reading_inputs}
                    </div>
                </div>
            </section>

            <section class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{"Social indicators"}</h2>
                    <label class="label cursor-pointer justify-start gap-3">
                        <input
                            type="checkbox"
                            class="toggle toggle-primary"
                            checked={indicators.festive}
                            onchange={on_festive}
                        />
                        <span class="label-text">{"Festival season"}</span>
                    </label>
                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">{"Public health awareness"}</span>
                            <span
                                class="badge text-white"
                                style={format!("background-color: {}", tier.color_hint())}
                            >
                                {format!("{} ({:.2})", tier.label(), indicators.awareness)}
                            </span>
                        </label>
                        <input
                            type="range"
                            min="0"
                            max="1"
                            step="0.01"
                            class="range range-primary"
                            value={indicators.awareness.to_string()}
                            oninput={on_awareness}
                        />
                    </div>
                </div>
            </section>

            {if let Some(error) = &props.error {
                html! { <Alert message={error.clone()} /> }
            } else {
                html! {}
            }}

            <button
                type="submit"
                class="btn btn-primary w-full"
                disabled={props.submitting}
            >
                {if props.submitting {
                    html! { <><span class="loading loading-spinner loading-sm"></span>{" Predicting..."}</> }
                } else {
                    html! { <><i class="fas fa-chart-line"></i>{" Predict case load"}</> }
                }}
            </button>
        </form>
    }
}
