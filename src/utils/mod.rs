pub mod debounce;
pub mod in_flight;
