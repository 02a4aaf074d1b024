#![cfg_attr(not(test), forbid(unsafe_code))]
#![deny(warnings, clippy::pedantic)]

//! Types shared between the Fitness Tracker web client and its tooling.
//!
//! The crate is deliberately free of browser APIs so that everything in it can
//! be exercised with plain `cargo test` on the host.

/// Wire models and presentation helpers.
pub mod models;
/// Access token payload decoding.
pub mod token;
