//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for the analyzer
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
