pub mod catalog;
pub mod credentials;
pub mod draft;
pub mod error;
pub mod notice;
pub mod prices;
pub mod session;
