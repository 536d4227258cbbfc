use crate::models::{
    catalog::{Product, Supplier},
    error::AppError,
    prices::PriceHistory,
};
use crate::services::backend::StoreBackend;
use crate::services::query_cache::{QueryCache, QueryKey};
use std::rc::Rc;

/// Cached readers over the store. Every view asking for the same key shares
/// one request and one result.
pub struct Queries<S> {
    store: Rc<S>,
    cache: Rc<QueryCache>,
}

impl<S: StoreBackend + 'static> Queries<S> {
    pub fn new(store: Rc<S>, cache: Rc<QueryCache>) -> Self {
        Self { store, cache }
    }

    pub fn cache(&self) -> &Rc<QueryCache> {
        &self.cache
    }

    pub async fn products(&self) -> Result<Rc<Vec<Product>>, AppError> {
        let store = self.store.clone();
        self.cache
            .fetch(QueryKey::Products, move || async move {
                let products = store.select_products().await?;
                log::debug!("Fetched {} products", products.len());
                Ok::<_, AppError>(products)
            })
            .await
    }

    pub async fn suppliers(&self) -> Result<Rc<Vec<Supplier>>, AppError> {
        let store = self.store.clone();
        self.cache
            .fetch(QueryKey::Suppliers, move || async move {
                let suppliers = store.select_suppliers().await?;
                log::debug!("Fetched {} suppliers", suppliers.len());
                Ok::<_, AppError>(suppliers)
            })
            .await
    }

    pub async fn price_history(&self) -> Result<Rc<PriceHistory>, AppError> {
        let store = self.store.clone();
        self.cache
            .fetch(QueryKey::PriceTrends, move || async move {
                let records = store.select_price_history().await?;
                log::debug!("Fetched {} price records", records.len());
                Ok::<_, AppError>(PriceHistory::new(records))
            })
            .await
    }
}
