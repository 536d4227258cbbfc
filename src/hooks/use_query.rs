use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_services::use_services;
use crate::models::{
    catalog::{Product, Supplier},
    error::AppError,
    prices::PriceHistory,
};
use crate::services::query_cache::QueryKey;

#[derive(Debug, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Loaded(Rc<T>),
    Error(String),
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Loading => Self::Loading,
            Self::Loaded(data) => Self::Loaded(data.clone()),
            Self::Error(msg) => Self::Error(msg.clone()),
        }
    }
}

/// Results that can come back empty.
pub trait Listing {
    fn is_empty(&self) -> bool;
}

impl<T> Listing for Vec<T> {
    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl Listing for PriceHistory {
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The one thing a reader view should render.
#[derive(Debug, PartialEq)]
pub enum QueryView<'a, T> {
    Loading,
    Error(&'a str),
    Empty,
    Ready(&'a Rc<T>),
}

impl<T> QueryState<T> {
    /// Returns true if the state is loading
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the data if it is loaded
    pub const fn data(&self) -> Option<&Rc<T>> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    fn from_result(result: Result<Rc<T>, AppError>) -> Self {
        match result {
            Ok(data) => Self::Loaded(data),
            Err(e) => Self::Error(e.description()),
        }
    }
}

impl<T: Listing> QueryState<T> {
    pub fn view(&self) -> QueryView<'_, T> {
        match self {
            Self::Loading => QueryView::Loading,
            Self::Error(msg) => QueryView::Error(msg),
            Self::Loaded(data) if data.is_empty() => QueryView::Empty,
            Self::Loaded(data) => QueryView::Ready(data),
        }
    }
}

/// Runs `fetch` once per `key` on mount; results arriving after unmount are dropped.
#[hook]
fn use_query<T, F, Fut>(key: QueryKey, fetch: F) -> QueryState<T>
where
    T: 'static,
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = Result<Rc<T>, AppError>> + 'static,
{
    let state = use_state(|| QueryState::Loading);

    {
        let state = state.clone();

        use_effect_with(key, move |_| {
            let aborted = Rc::new(Cell::new(false));
            let aborted_check = aborted.clone();

            spawn_local(async move {
                let result = fetch().await;
                if !aborted_check.get() {
                    state.set(QueryState::from_result(result));
                }
            });

            move || aborted.set(true)
        });
    }

    (*state).clone()
}

#[hook]
pub fn use_products() -> QueryState<Vec<Product>> {
    let services = use_services();
    use_query(QueryKey::Products, move || async move {
        services.queries.products().await
    })
}

#[hook]
pub fn use_suppliers() -> QueryState<Vec<Supplier>> {
    let services = use_services();
    use_query(QueryKey::Suppliers, move || async move {
        services.queries.suppliers().await
    })
}

#[hook]
pub fn use_price_history() -> QueryState<PriceHistory> {
    let services = use_services();
    use_query(QueryKey::PriceTrends, move || async move {
        services.queries.price_history().await
    })
}
