pub mod components;
pub mod config;
pub mod hooks;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;
