//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the engine's external collaborators: the
//! government transaction data source and the market-rate cache.

pub mod cache;
pub mod source;
