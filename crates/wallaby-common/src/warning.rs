//! Degradation warnings with deduplication.
//!
//! Layout never aborts on a numeric degeneracy or an unsupported input; it
//! clamps to a safe value and keeps going. These warnings are how such
//! recoveries get reported. A layout pass over a large tree tends to hit the
//! same problem many times, so each distinct message is emitted once.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a degraded or unsupported input (emitted once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Geometry", "non-invertible transform, mapping through identity");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_emit {
        tracing::warn!(target: "wallaby", component, "{message}");
    }
}

/// Whether `message` has been reported for `component` since the last clear.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Clear all recorded warnings (call when loading a new scene)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
