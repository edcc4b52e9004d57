//! Best-score persistence
//!
//! A single integer under the `highScore` key, stored in internal ticks.

use crate::platform::storage;

/// Storage key for the best score
pub const STORAGE_KEY: &str = "highScore";

/// Read the stored best score (0 when absent or unreadable)
pub fn load() -> u64 {
    match storage::get_item(STORAGE_KEY) {
        Some(raw) => parse(&raw).unwrap_or_else(|| {
            log::warn!("Stored high score `{}` unreadable, starting from 0", raw);
            0
        }),
        None => {
            log::info!("No high score found, starting fresh");
            0
        }
    }
}

/// Persist a new best score
pub fn save(ticks: u64) {
    storage::set_item(STORAGE_KEY, &ticks.to_string());
    log::info!("High score saved ({} ticks)", ticks);
}

/// Accepts integers and the float strings older pages wrote (e.g. "1234.0")
fn parse(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok()?;
    (v.is_finite() && v >= 0.0).then(|| v.floor() as u64)
}
