use compute::{HistoryLoader, HistoryState};
use yew::prelude::*;

use crate::widgets::alert::{Alert, AlertKind};
use crate::widgets::loading::Loading;

#[derive(Properties, PartialEq)]
pub struct HistoryPanelProps {
    pub history: HistoryLoader,
    pub on_refresh: Callback<()>,
}

/// Refresh stays clickable while loading; a new fetch supersedes the pending one.
fn refresh_label(history: &HistoryLoader) -> &'static str {
    if history.is_loading() {
        " Loading..."
    } else {
        " Refresh"
    }
}

/// Past average cases for the selected month.
#[function_component(HistoryPanel)]
pub fn history_panel(props: &HistoryPanelProps) -> Html {
    let on_refresh = {
        let on_refresh = props.on_refresh.clone();
        Callback::from(move |_: MouseEvent| on_refresh.emit(()))
    };

    let content = match props.history.state() {
        HistoryState::Loading { month } => html! {
            <Loading text={AttrValue::from(format!("Loading past cases for {}...", month.label()))} />
        },
        HistoryState::Failed { message } => html! {
            <Alert message={message} kind={AlertKind::Warning} />
        },
        HistoryState::Idle => html! {
            <p class="text-sm text-gray-500">{"No past cases loaded yet."}</p>
        },
        HistoryState::Loaded(snapshot) => {
            if snapshot.average_cases_by_disease.is_empty() {
                html! {
                    <p class="text-sm text-gray-500">
                        {format!("No past cases recorded for {}.", snapshot.month.label())}
                    </p>
                }
            } else {
                html! {
                    <div class="grid grid-cols-2 md:grid-cols-4 gap-2">
                        {for snapshot.rounded().map(|(disease, cases)| html! {
                            <div class="stat bg-base-100 rounded-lg p-3" key={disease.wire_name()}>
                                <div class="stat-title text-xs">
                                    {format!("{} {}", disease.icon(), disease.label())}
                                </div>
                                <div class="stat-value text-lg">{cases.to_string()}</div>
                            </div>
                        })}
                    </div>
                }
            }
        }
    };

    html! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body p-4">
                <div class="flex justify-between items-center">
                    <h3 class="font-semibold">{"Past average cases"}</h3>
                    <button class="btn btn-ghost btn-xs" onclick={on_refresh}>
                        <i class={classes!("fas", "fa-sync-alt", props.history.is_loading().then_some("fa-spin"))}></i>
                        {refresh_label(&props.history)}
                    </button>
                </div>
                {content}
            </div>
        </div>
    }
}
