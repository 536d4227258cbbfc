use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_services::use_services;
use crate::models::session::SessionState;

/// Mirrors the session: loads the snapshot on mount, follows change
/// notifications, and unsubscribes on unmount.
#[hook]
pub fn use_session() -> SessionState {
    let services = use_services();
    let state = use_state(SessionState::default);

    {
        let services = services.clone();
        let setter = state.setter();

        use_effect_with((), move |_| {
            let subscription = services
                .session
                .subscribe(move |_event, next| setter.set(next.clone()));

            spawn_local(async move {
                services.session.initialize().await;
            });

            move || subscription.unsubscribe()
        });
    }

    // Refresh shortly before the access token expires
    {
        let expires_at = state.session().and_then(|s| s.expires_at);

        use_effect_with(expires_at, move |_| {
            let timer = services.session.refresh_due_in().map(|due| {
                let services = services.clone();
                let delay_ms = u32::try_from(due.num_milliseconds()).unwrap_or(u32::MAX);
                Timeout::new(delay_ms, move || {
                    spawn_local(async move {
                        // Failure already signs the mirror out
                        let _ = services.session.refresh().await;
                    });
                })
            });

            move || drop(timer)
        });
    }

    (*state).clone()
}
