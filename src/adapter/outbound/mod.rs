//! Outbound adapters (driven side).

pub mod file;
pub mod molit;
