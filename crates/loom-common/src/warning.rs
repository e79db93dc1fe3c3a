//! Parser warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the HTML and CSS parsers to report input that parses but is
//! probably not what the author meant.
//!
//! The registry is process-wide. Hosts that parse more than one document
//! should call [`clear_warnings`] before each one so that earlier documents
//! neither suppress nor inflate its warnings. At most [`MAX_RECORDED`]
//! distinct warnings are kept; later ones are still printed.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Distinct warnings kept in the registry between clears.
pub const MAX_RECORDED: usize = 4096;

/// Warnings already reported, in the order they were first seen.
#[derive(Default)]
struct Registry {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl Registry {
    /// Record `key`, returning false if it was already reported.
    ///
    /// Once full, new keys are reported every time and not stored.
    fn record(&mut self, key: String) -> bool {
        if self.seen.contains(&key) {
            return false;
        }
        if self.order.len() < MAX_RECORDED {
            let _ = self.seen.insert(key.clone());
            self.order.push(key);
        }
        true
    }

    fn clear(&mut self) {
        self.seen.clear();
        self.order.clear();
    }
}

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<Registry>> = Mutex::new(None);

/// When set, warnings are recorded but not printed.
static QUIET: AtomicBool = AtomicBool::new(false);

fn registry() -> MutexGuard<'static, Option<Registry>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Warn about suspicious input (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML", "duplicate attribute 'id' on <div>, keeping the last value");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let fresh = registry()
        .get_or_insert_with(Registry::default)
        .record(key);
    if !fresh {
        return;
    }

    if !QUIET.load(Ordering::Relaxed) {
        eprintln!("{}", format!("[Loom {component}] ⚠ {message}").yellow());
    }
}

/// Suppress or re-enable printing of warnings. Recording is unaffected.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Every distinct warning reported since the last clear, oldest first.
#[must_use]
pub fn recorded_warnings() -> Vec<String> {
    registry()
        .as_ref()
        .map(|registry| registry.order.clone())
        .unwrap_or_default()
}

/// Clear all recorded warnings (call when loading a new document)
pub fn clear_warnings() {
    if let Some(registry) = registry().as_mut() {
        registry.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_are_deduplicated() {
        set_quiet(true);
        warn_once("Test", "dedup check");
        warn_once("Test", "dedup check");
        let count = recorded_warnings()
            .iter()
            .filter(|w| w.as_str() == "[Test] dedup check")
            .count();
        assert_eq!(count, 1);

        clear_warnings();
        assert!(!recorded_warnings().contains(&"[Test] dedup check".to_string()));
    }

    #[test]
    fn test_registry_stops_growing_when_full() {
        let mut registry = Registry::default();
        for i in 0..MAX_RECORDED + 10 {
            assert!(registry.record(format!("w{i}")));
        }
        assert_eq!(registry.order.len(), MAX_RECORDED);
        assert_eq!(registry.seen.len(), MAX_RECORDED);

        // Stored keys are still deduplicated.
        assert!(!registry.record("w0".to_string()));

        registry.clear();
        assert!(registry.order.is_empty());
        assert!(registry.record("w0".to_string()));
    }
}
