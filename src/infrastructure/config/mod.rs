//! Infrastructure configuration modules.

pub mod analysis;
pub mod cache;
pub mod logging;
pub mod settings;
