//! Browser console logging.

use log::{Level, LevelFilter};
use wasm_bindgen::prelude::*;

use crate::error::to_js_error;

/// Route `log` records to the browser console at `Warn`. Later calls are
/// no-ops.
pub(crate) fn install() {
    if console_log::init_with_level(Level::Warn).is_err() {
        log::debug!("console logger already installed");
    }
}

pub(crate) fn parse_level(level: &str) -> Option<LevelFilter> {
    level.trim().parse().ok()
}

/// Set the console log level: "off", "error", "warn", "info", "debug" or "trace".
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter =
        parse_level(level).ok_or_else(|| to_js_error(format!("Unknown log level: {level}")))?;
    log::set_max_level(filter);
    Ok(())
}
