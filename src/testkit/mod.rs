//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`]: `ScriptedSource`, an in-memory
//!   [`TransactionSource`](crate::port::outbound::source::TransactionSource)
//!   with scripted failures and call counting.
//! - [`domain`]: Builders for raw rows and records.
//! - [`config`]: Canonical test configurations.

pub mod config;
pub mod domain;
pub mod source;
