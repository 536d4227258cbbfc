pub mod use_credentials;
pub mod use_notices;
pub mod use_price_recorder;
pub mod use_query;
pub mod use_route;
pub mod use_services;
pub mod use_session;
