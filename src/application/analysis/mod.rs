//! Wolse quote analysis use case.
//!
//! [`service::RentAnalyzer`] runs the full pipeline for one request:
//! region resolution, fetch (with one retry), normalization, sample
//! selection, outlier filtering, estimation for the recent and the prior
//! window, quote assessment and negotiation options.

pub mod policy;
pub mod report;
pub mod request;
pub mod service;
