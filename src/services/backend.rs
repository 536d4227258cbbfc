//! Seams to the managed backend: its auth service and its relational store.
//!
//! Futures are not `Send`; everything runs on the browser's event loop.
#![allow(async_fn_in_trait)]

use crate::models::{
    catalog::{Product, Supplier},
    credentials::{Credentials, Profile},
    error::AppError,
    prices::{NewPrice, PriceObservation, PriceRecord},
    session::Session,
};

pub trait AuthBackend {
    /// The session currently held by the client, if any.
    async fn get_session(&self) -> Result<Option<Session>, AppError>;

    /// Exchanges the session's refresh token for a new session.
    async fn refresh_session(&self, session: &Session) -> Result<Session, AppError>;

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AppError>;

    /// Creates an account. `None` means the account awaits e-mail confirmation.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        metadata: &Profile,
    ) -> Result<Option<Session>, AppError>;

    async fn sign_out(&self) -> Result<(), AppError>;
}

pub trait StoreBackend {
    /// All products ordered by name ascending.
    async fn select_products(&self) -> Result<Vec<Product>, AppError>;

    /// All suppliers ordered by name ascending.
    async fn select_suppliers(&self) -> Result<Vec<Supplier>, AppError>;

    /// All prices joined with product and supplier names, oldest first.
    async fn select_price_history(&self) -> Result<Vec<PriceRecord>, AppError>;

    async fn insert_price(&self, row: &NewPrice) -> Result<Vec<PriceObservation>, AppError>;

    async fn insert_profile(&self, row: &Profile) -> Result<(), AppError>;
}
