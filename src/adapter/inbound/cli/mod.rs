//! CLI module graph.

pub mod analyze;
pub mod command;
pub mod config;
pub mod diagnostic;
pub mod legal;
pub mod output;
pub mod paths;
pub mod regions;
pub mod run;
