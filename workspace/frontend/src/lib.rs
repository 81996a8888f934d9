use std::cell::RefCell;
use std::rc::Rc;

use common::{Category, Month};
use compute::{ForecastApi, HistoryTicket, ReadingField, Session, SessionPhase};
use yew::prelude::*;

pub mod api_client;
mod components;
pub mod settings;
mod widgets;

use api_client::GlooForecastApi;
use components::prediction_form::PredictionForm;
use components::result_panel::ResultPanel;

/// Fire the history request for `ticket` and apply it if it is still current.
fn spawn_history_fetch(
    session: Rc<RefCell<Session>>,
    api: Rc<GlooForecastApi>,
    update: UseForceUpdateHandle,
    ticket: HistoryTicket,
) {
    log::debug!("Fetching history for {}", ticket.month());
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = api.history(ticket.month()).await;
        let applied = session.borrow_mut().complete_history(ticket, outcome);
        if applied {
            update.force_update();
        } else {
            log::trace!("Dropped stale history response for {}", ticket.month());
        }
    });
}

#[function_component(App)]
pub fn app() -> Html {
    let session = use_mut_ref(Session::for_current_month);
    let update = use_force_update();
    let api = use_memo((), |_| GlooForecastApi::from_settings());

    {
        let session = session.clone();
        let api = api.clone();
        let update = update.clone();
        use_effect_with((), move |_| {
            log::info!("Loading history for the default month");
            let ticket = session.borrow_mut().start();
            update.force_update();
            spawn_history_fetch(session, api, update, ticket);
            || ()
        });
    }

    let on_category = {
        let session = session.clone();
        let update = update.clone();
        Callback::from(move |category: Category| {
            session.borrow_mut().set_category(category);
            update.force_update();
        })
    };

    let on_month = {
        let session = session.clone();
        let api = api.clone();
        let update = update.clone();
        Callback::from(move |month: Month| {
            let ticket = session.borrow_mut().set_month(month);
            update.force_update();
            if let Some(ticket) = ticket {
                spawn_history_fetch(session.clone(), api.clone(), update.clone(), ticket);
            }
        })
    };

    let on_refresh = {
        let session = session.clone();
        let api = api.clone();
        let update = update.clone();
        Callback::from(move |_: ()| {
            let ticket = session.borrow_mut().refresh_history();
            update.force_update();
            spawn_history_fetch(session.clone(), api.clone(), update.clone(), ticket);
        })
    };

    let on_reading = {
        let session = session.clone();
        let update = update.clone();
        Callback::from(move |(field, raw): (ReadingField, String)| {
            session.borrow_mut().set_reading(field, raw);
            update.force_update();
        })
    };

    let on_festive = {
        let session = session.clone();
        let update = update.clone();
        Callback::from(move |festive: bool| {
            session.borrow_mut().set_festive(festive);
            update.force_update();
        })
    };

    let on_awareness = {
        let session = session.clone();
        let update = update.clone();
        Callback::from(move |awareness: f64| {
            session.borrow_mut().set_awareness(awareness);
            update.force_update();
        })
    };

    let on_submit = {
        let session = session.clone();
        let api = api.clone();
        let update = update.clone();
        Callback::from(move |_: ()| {
            let pending = session.borrow_mut().begin_prediction();
            update.force_update();

            let pending = match pending {
                Ok(pending) => pending,
                Err(e) => {
                    log::debug!("Prediction not submitted: {}", e);
                    return;
                }
            };

            let session = session.clone();
            let api = api.clone();
            let update = update.clone();
            wasm_bindgen_futures::spawn_local(async move {
                log::info!("Submitting prediction for {}", pending.request().category);
                let outcome = api.predict(pending.request()).await;
                if let Err(e) = session.borrow_mut().complete_prediction(pending, outcome) {
                    log::error!("Prediction failed: {}", e);
                }
                update.force_update();
            });
        })
    };

    let on_filter = {
        let session = session.clone();
        let update = update.clone();
        Callback::from(move |category: Category| {
            session.borrow_mut().set_result_filter(category);
            update.force_update();
        })
    };

    let on_reset = {
        let session = session.clone();
        let update = update.clone();
        Callback::from(move |_: ()| {
            log::info!("Starting a new prediction");
            session.borrow_mut().reset();
            update.force_update();
        })
    };

    let current = session.borrow();
    let body = match current.phase() {
        SessionPhase::Collecting => html! {
            <PredictionForm
                input={current.input().clone()}
                history={current.history().clone()}
                submitting={current.prediction().is_submitting()}
                error={current.prediction().error().map(|e| AttrValue::from(e.to_string()))}
                {on_category}
                {on_month}
                {on_refresh}
                {on_reading}
                {on_festive}
                {on_awareness}
                {on_submit}
            />
        },
        SessionPhase::Reviewing { result, filter } => html! {
            <ResultPanel
                result={result.clone()}
                filter={*filter}
                {on_filter}
                {on_reset}
            />
        },
    };

    html! {
        <div class="min-h-screen bg-base-200">
            <header class="navbar bg-primary text-primary-content px-6">
                <i class="fas fa-hospital mr-2"></i>
                <span class="text-xl font-bold">{"MediPredict"}</span>
                <span class="ml-4 text-sm opacity-80">{"Hospital case-load forecast"}</span>
            </header>
            <main class="container mx-auto p-6">
                {body}
            </main>
        </div>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== MediPredict Frontend Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("API base URL: {}", settings.api_base_url());
    log::debug!("Debug mode: {}", settings.debug_mode);

    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
