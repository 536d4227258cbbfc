use gloo_storage::Storage;
use serde::{Deserialize, Serialize};
use yew::prelude::*;
use yew_router::prelude::{Routable, use_navigator, use_route};

use crate::config::Config;

/// Dashboard views, addressed by URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Routable, Serialize, Deserialize)]
pub enum Route {
    #[at("/dashboard")]
    Products,
    #[at("/dashboard/add-price")]
    AddPrice,
    #[at("/dashboard/trends")]
    Trends,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Default for Route {
    fn default() -> Self {
        Route::Products
    }
}

impl Route {
    /// Views shown in the navigation bar, in order.
    pub fn all() -> &'static [Route] {
        &[Route::Products, Route::AddPrice, Route::Trends]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Route::Products => "Products",
            Route::AddPrice => "Add Price",
            Route::Trends => "Price Trends",
            Route::NotFound => "Not Found",
        }
    }

    pub const fn is_view(self) -> bool {
        !matches!(self, Route::NotFound)
    }
}

/// Handle returned by `use_dashboard_route` hook
#[derive(Clone, PartialEq)]
pub struct RouteHandle {
    /// The routed view, `None` outside any router.
    pub route: Option<Route>,
    pub navigate: Callback<Route>,
}

/// Current dashboard view from the router. Every view visited is remembered
/// in localStorage so unknown URLs land back on it.
#[hook]
pub fn use_dashboard_route() -> RouteHandle {
    let route = use_route::<Route>();
    let navigator = use_navigator();

    use_effect_with(route, |route| {
        if let Some(route) = route.filter(|r| r.is_view()) {
            save_route(route);
        }
        || ()
    });

    let navigate = Callback::from(move |next: Route| match &navigator {
        Some(navigator) => navigator.push(&next),
        None => log::warn!("No router to navigate to {}", next.to_path()),
    });

    RouteHandle { route, navigate }
}

/// The last view visited, or the product list.
pub fn remembered_route() -> Route {
    gloo_storage::LocalStorage::get::<Route>(Config::ROUTE_STORAGE_KEY)
        .ok()
        .filter(|r| r.is_view())
        .unwrap_or_default()
}

fn save_route(route: Route) {
    if let Err(e) = gloo_storage::LocalStorage::set(Config::ROUTE_STORAGE_KEY, route) {
        log::warn!("Failed to save route: {e}");
    }
}
