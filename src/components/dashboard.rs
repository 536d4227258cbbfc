use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::{Redirect, Switch};

use crate::components::{
    add_price_form::AddPriceForm, price_trends::PriceTrends, product_list::ProductList,
};
use crate::hooks::use_notices::use_notices;
use crate::hooks::use_route::{Route, remembered_route, use_dashboard_route};
use crate::hooks::use_services::use_services;
use crate::models::notice::Notice;

fn switch(route: Route) -> Html {
    match route {
        Route::Products => html! { <ProductList /> },
        Route::AddPrice => html! { <AddPriceForm /> },
        Route::Trends => html! { <PriceTrends /> },
        Route::NotFound => html! { <Redirect<Route> to={remembered_route()} /> },
    }
}

/// Authenticated layout: navigation, the active view, and logout.
#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let services = use_services();
    let notices = use_notices();
    let route = use_dashboard_route();

    let on_logout = Callback::from(move |_| {
        let services = services.clone();
        let notices = notices.clone();
        spawn_local(async move {
            // The session subscription takes us back to the login screen
            match services.session.sign_out().await {
                Ok(()) => notices.push(Notice::success(
                    "Logged out successfully",
                    "You have been logged out of your account.",
                )),
                Err(e) => notices.push(Notice::from(&e)),
            }
        });
    });

    html! {
        <div class="dashboard">
            <nav class="app-header">
                <h1>{"Price Tracker"}</h1>
                <div class="nav-links">
                    {
                        Route::all().iter().map(|r| {
                            let target = *r;
                            let active = route.route == Some(target);
                            let navigate = route.navigate.clone();
                            let onclick = Callback::from(move |_| navigate.emit(target));
                            html! {
                                <button key={target.label()}
                                    class={classes!("nav-link", active.then_some("active"))}
                                    aria-current={active.then_some("page")}
                                    {onclick}>
                                    {target.label()}
                                </button>
                            }
                        }).collect::<Html>()
                    }
                </div>
                <button class="logout" onclick={on_logout}>{"Logout"}</button>
            </nav>

            <main class="app-main">
                <Switch<Route> render={switch} />
            </main>
        </div>
    }
}
