//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points of the analysis engine. Adapters
//! implement them to plug in the government data API, caches, and test
//! doubles.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │   (RentAnalyzer)        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                                                       ▼
//! ┌───────────────────┐                               ┌─────────────┐
//! │ TransactionSource │                               │  RateCache  │
//! │ (MOLIT, file)     │                               │ (in-memory) │
//! └───────────────────┘                               └─────────────┘
//! ```

pub mod outbound;
