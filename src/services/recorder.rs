use crate::models::{draft::PriceDraft, error::AppError, prices::PriceObservation};
use crate::services::backend::StoreBackend;
use crate::services::query_cache::{QueryCache, QueryKey};
use crate::utils::in_flight::InFlight;
use std::rc::Rc;

/// The only writer: validates a draft, inserts it, and invalidates price history.
pub struct PriceRecorder<S> {
    store: Rc<S>,
    cache: Rc<QueryCache>,
    in_flight: InFlight,
}

impl<S: StoreBackend> PriceRecorder<S> {
    pub fn new(store: Rc<S>, cache: Rc<QueryCache>) -> Self {
        Self {
            store,
            cache,
            in_flight: InFlight::new(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Validation failures return before any request is made; the caller
    /// keeps the draft on every error so the user can retry.
    pub async fn submit(&self, draft: &PriceDraft) -> Result<Vec<PriceObservation>, AppError> {
        let row = draft.validate().inspect_err(|e| {
            log::debug!("Price draft rejected: {e}");
        })?;
        let _guard = self.in_flight.begin()?;

        let created = self.store.insert_price(&row).await?;
        log::info!(
            "Recorded price {:.2} for product {} from supplier {}",
            row.price,
            row.product_id,
            row.supplier_id
        );
        self.cache.invalidate(QueryKey::PriceTrends);
        Ok(created)
    }

    /// Submits `draft` and clears it once the insert succeeds. On any error
    /// the draft is left exactly as typed.
    pub async fn submit_draft(
        &self,
        draft: &mut PriceDraft,
    ) -> Result<Vec<PriceObservation>, AppError> {
        let created = self.submit(draft).await?;
        draft.clear();
        Ok(created)
    }
}
