use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::BrowserRouter;

use price_tracker::components::{Notices, SessionGate};
use price_tracker::hooks::use_notices::{NoticeHandle, use_notice_stack};
use price_tracker::hooks::use_services::ServicesContext;
use price_tracker::logging::init_logging;
use price_tracker::services::{AppServices, supabase::SupabaseClient};

#[function_component(App)]
fn app() -> Html {
    let services = use_memo((), |_| {
        SupabaseClient::new()
            .map(|client| ServicesContext(Rc::new(AppServices::new(Rc::new(client)))))
    });
    let notices = use_notice_stack();

    let body = match &*services {
        Ok(context) => html! {
            <ContextProvider<ServicesContext> context={context.clone()}>
                <SessionGate />
            </ContextProvider<ServicesContext>>
        },
        Err(e) => {
            log::error!("Cannot start: {e}");
            html! {
                <div class="status error">
                    <p>{"Configuration error: "}{e.description()}</p>
                </div>
            }
        }
    };

    html! {
        <ContextProvider<NoticeHandle> context={notices}>
            <BrowserRouter>
                <div class="app-container">
                    {body}
                    <Notices />
                </div>
            </BrowserRouter>

            <style>
                {include_str!("style.css")}
            </style>
        </ContextProvider<NoticeHandle>>
    }
}

fn main() {
    init_logging();
    yew::Renderer::<App>::new().render();
}
