use std::rc::Rc;
use yew::prelude::*;

use crate::services::{AppServices, supabase::SupabaseClient};

/// Backend the browser build talks to.
pub type Backend = SupabaseClient;

/// Context carrying the app's services down the component tree.
#[derive(Clone)]
pub struct ServicesContext(pub Rc<AppServices<Backend>>);

impl PartialEq for ServicesContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[hook]
pub fn use_services() -> Rc<AppServices<Backend>> {
    use_context::<ServicesContext>()
        .expect("ServicesContext must be provided by the App component")
        .0
}
