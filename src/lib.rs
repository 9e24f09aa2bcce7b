//! krent - wolse (monthly rent) market-rate analysis.
//!
//! Checks a landlord's deposit/rent quote against recent real transactions
//! published by MOLIT (국토교통부 실거래가 공개시스템) and proposes
//! negotiation targets.
//!
//! # Architecture
//!
//! - [`domain`] - Pure rate math: normalization, outlier filter, weighted
//!   estimator, trend, quote assessment, negotiation options
//! - [`port`] - `TransactionSource` and `RateCache` traits
//! - [`application`] - `RentAnalyzer` use case and the in-memory cache
//! - [`adapter`] - MOLIT HTTP client, JSON file source, CLI
//! - [`infrastructure`] - Configuration, logging, wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use krent::adapter::outbound::file::JsonFileSource;
//! use krent::application::analysis::policy::AnalysisPolicy;
//! use krent::application::analysis::request::AnalysisRequest;
//! use krent::application::analysis::service::RentAnalyzer;
//! use krent::application::cache::rate::NoopRateCache;
//! use rust_decimal_macros::dec;
//!
//! # async fn run() -> Result<(), krent::error::AnalysisError> {
//! let analyzer = RentAnalyzer::new(
//!     Arc::new(JsonFileSource::new("rows.json")),
//!     Arc::new(NoopRateCache),
//!     AnalysisPolicy::default(),
//! );
//! let request = AnalysisRequest::new("마포구", dec!(50_000_000), dec!(1_500_000));
//! let result = analyzer.analyze(&request).await?;
//! println!("{}", result.assessment.category);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
