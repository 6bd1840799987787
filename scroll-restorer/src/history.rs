//! The navigation-history side-channel codec.
//!
//! Each history entry carries an application-defined key/value bag. This
//! module owns the namespaced key layout and the defensive reads over it:
//! the bag is shared with the host navigation system, so every value is
//! parsed under the assumption that it may be absent, foreign, or corrupt.
//! Malformed data degrades to "no saved state", never to an error.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;

use crate::ScrollPosition;

/// Namespace prefix for every key this crate stores in a history entry.
pub const STATE_PREFIX: &str = "scroll_restorer";

/// The key/value bag attached to one navigation history entry.
///
/// The bag is owned by the host's history mechanism; this crate only ever
/// merges into it and replaces the current entry in place.
pub type HistoryState = BTreeMap<String, StateValue>;

/// A primitive value stored in the side-channel.
///
/// `Unset` models an explicitly cleared field: clearing writes `Unset`
/// instead of removing the key, so the entry keeps a stable key layout.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Unset,
}

impl StateValue {
    /// Numeric coercion: finite numbers pass through, numeric text parses
    /// ("100" reads as 100). Anything else is absent.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.is_finite().then_some(*n),
            Self::Text(s) => s.parse::<f64>().ok().filter(|n| n.is_finite()),
            Self::Bool(_) | Self::Unset => None,
        }
    }

    /// Truthiness over the primitive values the bag can hold.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Bool(b) => *b,
            Self::Text(s) => !s.is_empty(),
            Self::Unset => false,
        }
    }
}

impl From<f64> for StateValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for StateValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for StateValue {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

/// Returns the namespaced side-channel key for `key`.
pub fn state_key(key: &str) -> String {
    format!("{STATE_PREFIX}_{key}")
}

/// Reads the saved scroll position out of a side-channel bag.
///
/// Returns `Some` only when both coordinate fields coerce to finite
/// numbers; a missing bag, missing key, or non-numeric value is absent.
pub fn scroll_from_state(state: Option<&HistoryState>) -> Option<ScrollPosition> {
    let state = state?;
    let x = state.get(&state_key("x"))?.as_number()?;
    let y = state.get(&state_key("y"))?.as_number()?;
    Some(ScrollPosition::new(x, y))
}

/// Reads a timestamp field (`<prefix>_<key>`) under the numeric guard.
pub fn timestamp_from_state(key: &str, state: Option<&HistoryState>) -> Option<f64> {
    state?.get(&state_key(key))?.as_number()
}

/// Whether the bag flags the current transition as a back/forward navigation.
pub fn is_navigating_history(state: Option<&HistoryState>) -> bool {
    state
        .and_then(|s| s.get(&state_key("is_navigating_history")))
        .is_some_and(StateValue::is_truthy)
}
