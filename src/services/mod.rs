pub mod backend;
pub mod credentials;
pub mod queries;
pub mod query_cache;
pub mod recorder;
pub mod session;
pub mod supabase;

use std::rc::Rc;

use backend::{AuthBackend, StoreBackend};
use credentials::CredentialFlow;
use queries::Queries;
use query_cache::QueryCache;
use recorder::PriceRecorder;
use session::SessionContext;

/// Everything the views need, wired to a single backend and a single cache.
pub struct AppServices<B> {
    pub backend: Rc<B>,
    pub session: SessionContext<B>,
    pub queries: Queries<B>,
    pub recorder: PriceRecorder<B>,
    pub credentials: CredentialFlow,
}

impl<B> AppServices<B>
where
    B: AuthBackend + StoreBackend + 'static,
{
    pub fn new(backend: Rc<B>) -> Self {
        let cache = Rc::new(QueryCache::new());
        Self {
            session: SessionContext::new(backend.clone()),
            queries: Queries::new(backend.clone(), cache.clone()),
            recorder: PriceRecorder::new(backend.clone(), cache),
            credentials: CredentialFlow::new(),
            backend,
        }
    }

    pub fn cache(&self) -> &Rc<QueryCache> {
        self.queries.cache()
    }
}
