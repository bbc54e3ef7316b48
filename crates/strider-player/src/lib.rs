//! Strider Player - runs the walking-character loop
//!
//! This crate provides the layered `StriderConfig` and the `Session` that
//! ties the clock, input, background scene loads and the locomotion state
//! together. Hosts feed key events into `Session::input_mut` and call
//! `Session::frame` once per display refresh.

mod config;
mod session;

pub use config::StriderConfig;
pub use session::Session;
