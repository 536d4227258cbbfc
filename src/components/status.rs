use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    pub label: AttrValue,
}

#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="status loading">
            <div class="spinner"></div>
            <p>{&props.label}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorPanelProps {
    /// What was being loaded, e.g. "products"
    pub context: AttrValue,
    pub message: AttrValue,
}

#[function_component(ErrorPanel)]
pub fn error_panel(props: &ErrorPanelProps) -> Html {
    html! {
        <div class="status error">
            <p>{format!("Error loading {}: {}", props.context, props.message)}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub hint: Option<AttrValue>,
}

#[function_component(EmptyState)]
pub fn empty_state(props: &EmptyStateProps) -> Html {
    html! {
        <div class="status empty">
            <p>{&props.message}</p>
            if let Some(hint) = &props.hint {
                <p class="hint">{hint}</p>
            }
        </div>
    }
}
