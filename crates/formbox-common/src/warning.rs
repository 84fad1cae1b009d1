//! Layout warnings routed through `tracing`.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the projection and resolution passes to report style fields that
//! were ignored because they were missing a magnitude, used an unknown unit,
//! or had the wrong JSON shape. None of these are errors: the engine degrades
//! to "no directive" and keeps going.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about ignored input (emits once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("style", "unknown unit 'em' in width_unit");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_emit {
        tracing::warn!(target: "formbox", component, "{message}");
    }
}

/// Whether a given warning has been emitted since the last clear.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Clear all recorded warnings (call when loading a new form definition)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
