//! Rental-market domain logic. Pure and synchronous.

pub mod assessment;
pub mod error;
pub mod estimate;
pub mod money;
pub mod negotiation;
pub mod normalize;
pub mod outlier;
pub mod quote;
pub mod rate;
pub mod region;
pub mod scope;
pub mod stats;
pub mod transaction;
pub mod trend;
pub mod window;
