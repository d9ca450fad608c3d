//! Localized text lookup.

/// Oracle resolving localized-text keys to display strings.
///
/// Core code emits text keys (e.g. `"readyToLock"`); display layers resolve
/// them through this oracle and fall back to the raw key when a translation
/// is missing.
pub trait TextOracle: Send + Sync {
    fn localized_text(&self, key: &str) -> Option<&str>;
}
