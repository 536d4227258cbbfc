use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::{use_notices::use_notices, use_services::use_services};
use crate::models::{
    draft::{DraftField, PriceDraft},
    error::AppError,
    notice::Notice,
};

/// Handle returned by `use_price_recorder` hook
#[derive(Clone, PartialEq)]
pub struct RecorderHandle {
    pub draft: PriceDraft,
    pub submitting: bool,
    pub on_change: Callback<(DraftField, String)>,
    pub on_submit: Callback<()>,
}

/// Draft state for the price form plus its submit action.
///
/// The draft is cleared only after a successful insert.
#[hook]
pub fn use_price_recorder() -> RecorderHandle {
    let services = use_services();
    let notices = use_notices();
    let draft = use_state(PriceDraft::default);
    let submitting = use_state(|| false);

    let on_change = {
        let draft = draft.clone();
        Callback::from(move |(field, value): (DraftField, String)| {
            draft.set((*draft).clone().with(field, value));
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let submitting = submitting.clone();

        Callback::from(move |()| {
            let services = services.clone();
            let notices = notices.clone();
            let draft = draft.clone();
            let submitting = submitting.clone();
            let mut current = (*draft).clone();

            spawn_local(async move {
                submitting.set(true);
                match services.recorder.submit_draft(&mut current).await {
                    Ok(_) => {
                        draft.set(current);
                        notices.push(Notice::success(
                            "Price added successfully!",
                            "The price has been recorded in the database.",
                        ));
                    }
                    // The first submission still owns the spinner
                    Err(AppError::Busy) => return,
                    Err(e) => notices.push(Notice::from(&e)),
                }
                submitting.set(false);
            });
        })
    };

    RecorderHandle {
        draft: (*draft).clone(),
        submitting: *submitting,
        on_change,
        on_submit,
    }
}
