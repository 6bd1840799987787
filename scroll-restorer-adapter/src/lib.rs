//! Session lifecycle wiring for the `scroll-restorer` crate.
//!
//! The core crate is platform-agnostic and single-owner: a `ScrollRestorer`
//! is driven through `&mut self` calls. This crate provides the pattern an
//! application shell needs around it:
//!
//! - a [`Session`] registry guaranteeing one active engine per application
//!   session, no matter how many times activation is requested
//! - a cloneable [`SessionHandle`] that serializes access behind a single
//!   mutex, so event sources on different call paths can share the engine
//!
//! This crate is intentionally framework-agnostic (no DOM bindings).
#![forbid(unsafe_code)]

mod session;

#[cfg(test)]
mod tests;

pub use session::{Session, SessionHandle};
