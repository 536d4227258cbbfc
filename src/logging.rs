use crate::config::Config;
use log::Level;

/// Parses a level name, falling back to `info`.
pub fn level_from(name: Option<&str>) -> Level {
    name.and_then(|n| n.trim().parse().ok())
        .unwrap_or(Level::Info)
}

/// Routes `log` records to the browser console at the build-time configured level.
pub fn init_logging() {
    let level = level_from(Config::LOG_LEVEL);
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("Logging initialised at {level}");
}
