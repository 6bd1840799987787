//! A headless scroll-restoration engine for client-side navigations.
//!
//! On every completed navigation the engine decides whether to scroll to an
//! in-page anchor, restore a previously saved position, or reset to the
//! top, and it waits out asynchronously rendered content when the target is
//! not reachable yet: anchor lookups retry on DOM mutations, saved
//! positions wait for the document to grow, and both give up at a bounded
//! deadline with a best-effort scroll.
//!
//! It is platform-agnostic. A host layer is expected to provide:
//! - the navigation history entry's key/value side-channel
//! - viewport scroll offsets and document/viewport heights
//! - anchor element lookup
//!
//! and to forward navigation-finish, popstate, scroll, and DOM-mutation
//! events into the engine with timestamps.
//!
//! For session lifecycle wiring (singleton activation, locking), see the
//! `scroll-restorer-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod history;
mod host;
mod options;
mod restorer;
mod types;


pub use history::{
    HistoryState, STATE_PREFIX, StateValue, is_navigating_history, scroll_from_state, state_key,
    timestamp_from_state,
};
pub use host::RestorerHost;
pub use options::{AnchorOffset, MEMO_INTERVAL_MS, OnRestoreCallback, RestorerOptions};
pub use restorer::{HEIGHT_SLACK_PX, QUIRK_WINDOW_MS, ScrollRestorer};
pub use types::{RestoreEvent, RestorePhase, ScrollBehavior, ScrollPosition, WaitStatus};
