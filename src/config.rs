/// Configuration constants for the application
pub struct Config;

impl Config {
    /// Backend base URL, baked in at build time
    pub const BACKEND_URL: Option<&'static str> = option_env!("PRICE_TRACKER_BACKEND_URL");

    /// Public (anonymous) API key for the backend
    pub const ANON_KEY: Option<&'static str> = option_env!("PRICE_TRACKER_ANON_KEY");

    /// Maximum log level, e.g. `debug` (defaults to `info`)
    pub const LOG_LEVEL: Option<&'static str> = option_env!("PRICE_TRACKER_LOG");

    /// Local storage key holding the persisted session
    pub const SESSION_STORAGE_KEY: &'static str = "price-tracker.auth.session";

    /// Local storage key holding the last dashboard route
    pub const ROUTE_STORAGE_KEY: &'static str = "price-tracker.route";

    /// Refresh the session this many seconds before it expires
    pub const SESSION_REFRESH_MARGIN_SECS: i64 = 60;

    /// How long a notice stays on screen (5 seconds)
    pub const NOTICE_DISMISS_MS: u32 = 5_000;

    /// Rows shown in the recent price records table
    pub const RECENT_RECORDS_LIMIT: usize = 10;

    /// Delay before the chart re-renders after a window resize
    pub const CHART_RESIZE_DEBOUNCE_MS: u32 = 150;
}
