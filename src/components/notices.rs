use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config::Config;
use crate::hooks::use_notices::use_notices;
use crate::models::notice::{Notice, NoticeKind};

/// Stack of transient notices in the corner of the screen.
#[function_component(Notices)]
pub fn notices() -> Html {
    let handle = use_notices();

    let dismiss = {
        let handle = handle.clone();
        Callback::from(move |id| handle.dismiss(id))
    };

    html! {
        <div class="notices" aria-live="polite">
            {
                handle.items().into_iter().map(|(id, notice)| html! {
                    <NoticeItem key={id} {id} {notice} on_dismiss={dismiss.clone()} />
                }).collect::<Html>()
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct NoticeItemProps {
    id: u64,
    notice: Notice,
    on_dismiss: Callback<u64>,
}

#[function_component(NoticeItem)]
fn notice_item(props: &NoticeItemProps) -> Html {
    {
        let id = props.id;
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(id, move |id| {
            let id = *id;
            let timer = Timeout::new(Config::NOTICE_DISMISS_MS, move || on_dismiss.emit(id));
            move || drop(timer)
        });
    }

    let onclick = {
        let id = props.id;
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(id))
    };

    let class = match props.notice.kind {
        NoticeKind::Success => "notice success",
        NoticeKind::Error => "notice error",
    };

    html! {
        <div {class} {onclick} role="status">
            <strong>{&props.notice.title}</strong>
            if !props.notice.description.is_empty() {
                <p>{&props.notice.description}</p>
            }
        </div>
    }
}
