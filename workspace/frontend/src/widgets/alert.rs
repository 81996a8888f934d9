use yew::prelude::*;

#[derive(Clone, PartialEq, Default)]
pub enum AlertKind {
    #[default]
    Error,
    Warning,
}

impl AlertKind {
    fn alert_class(&self) -> &'static str {
        match self {
            AlertKind::Error => "alert-error",
            AlertKind::Warning => "alert-warning",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AlertProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub kind: AlertKind,
}

/// Inline banner for validation, history and prediction messages
#[function_component(Alert)]
pub fn alert(props: &AlertProps) -> Html {
    if props.kind == AlertKind::Error {
        log::warn!("Displaying error to user: {}", props.message);
    }

    html! {
        <div class={classes!("alert", props.kind.alert_class())}>
            <i class="fas fa-exclamation-triangle"></i>
            <span class="text-sm">{props.message.clone()}</span>
        </div>
    }
}
