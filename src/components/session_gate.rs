use yew::prelude::*;

use crate::components::{dashboard::Dashboard, login_form::LoginForm, status::Loading};
use crate::hooks::use_session::use_session;
use crate::models::session::SessionState;

/// Shows the dashboard to signed-in users and the login form to everyone else.
#[function_component(SessionGate)]
pub fn session_gate() -> Html {
    match use_session() {
        SessionState::Loading => html! { <Loading label="Loading..." /> },
        SessionState::SignedOut => html! { <LoginForm /> },
        SessionState::SignedIn(_) => html! { <Dashboard /> },
    }
}
