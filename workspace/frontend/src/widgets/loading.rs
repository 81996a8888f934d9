use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or_default]
    pub text: Option<AttrValue>,
}

/// Inline spinner with an optional caption
#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="flex items-center gap-2 py-2">
            <span class="loading loading-spinner loading-sm"></span>
            {if let Some(text) = &props.text {
                html! { <span class="text-sm text-gray-500">{text.clone()}</span> }
            } else {
                html! {}
            }}
        </div>
    }
}
