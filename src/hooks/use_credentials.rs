use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::{use_notices::use_notices, use_services::use_services};
use crate::models::{
    credentials::{CredentialForm, CredentialMode},
    error::AppError,
    notice::Notice,
};

/// Handle returned by `use_credentials` hook
#[derive(Clone, PartialEq)]
pub struct CredentialsHandle {
    pub form: CredentialForm,
    pub mode: CredentialMode,
    pub submitting: bool,
    pub set_form: Callback<CredentialForm>,
    pub toggle_mode: Callback<()>,
    pub on_submit: Callback<()>,
}

/// Form state for the sign-in / sign-up screen.
#[hook]
pub fn use_credentials() -> CredentialsHandle {
    let services = use_services();
    let notices = use_notices();
    let form = use_state(CredentialForm::default);
    let mode = use_state(CredentialMode::default);
    let submitting = use_state(|| false);

    let set_form = {
        let form = form.clone();
        Callback::from(move |next| form.set(next))
    };

    let toggle_mode = {
        let mode = mode.clone();
        Callback::from(move |()| mode.set(mode.toggled()))
    };

    let on_submit = {
        let form = form.clone();
        let mode = mode.clone();
        let submitting = submitting.clone();

        Callback::from(move |()| {
            let services = services.clone();
            let notices = notices.clone();
            let submitting = submitting.clone();
            let current = (*form).clone();
            let mode = *mode;

            spawn_local(async move {
                submitting.set(true);
                let result = services
                    .credentials
                    .submit(&services.session, services.backend.as_ref(), mode, &current)
                    .await;
                // On success the session subscription swaps this view out
                match result {
                    Ok(outcome) => notices.push(outcome.notice()),
                    // The first submission still owns the spinner
                    Err(AppError::Busy) => return,
                    Err(e) => notices.push(Notice::from(&e)),
                }
                submitting.set(false);
            });
        })
    };

    CredentialsHandle {
        form: (*form).clone(),
        mode: *mode,
        submitting: *submitting,
        set_form,
        toggle_mode,
        on_submit,
    }
}
