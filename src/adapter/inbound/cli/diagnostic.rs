//! Miette-based error diagnostics for CLI error presentation.
//!
//! Configuration syntax errors are shown against the file content with the
//! offending span labeled; analysis errors carry a help line pointing at the
//! likely fix.

use std::fmt::Display;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::domain::error::DomainError;
use crate::error::{AnalysisError, ConfigError, Error, FetchError};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(krent::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    /// Source content (the configuration file).
    #[source_code]
    pub src: miette::NamedSource<String>,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    /// Build a diagnostic from a TOML parse error, if it has a location.
    #[must_use]
    pub fn from_toml(name: &str, src: &str, err: &toml::de::Error) -> Option<Self> {
        let span = err.span()?;
        Some(Self {
            message: format!("invalid configuration: {}", err.message()),
            src: miette::NamedSource::new(name, src.to_string()),
            span: (span.start, span.end.saturating_sub(span.start)).into(),
            help: Some("see `krent config init` for a documented template".into()),
        })
    }
}

/// Analysis or runtime error with an optional suggestion.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CommandDiagnostic {
    pub message: String,
    pub code: &'static str,
    pub help: Option<&'static str>,
}

impl Diagnostic for CommandDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.help.map(|help| Box::new(help) as Box<dyn Display + 'a>)
    }
}

fn help_for(err: &Error) -> Option<&'static str> {
    match err {
        Error::Analysis(AnalysisError::InsufficientData { .. }) => Some(
            "drop --apartment or --dong, or widen the unit size, to include more contracts",
        ),
        Error::Analysis(AnalysisError::InvalidQuote { .. })
        | Error::Domain(DomainError::InvalidQuote { .. }) => {
            Some("deposit and rent are whole won amounts greater than 0, e.g. --deposit 50000000")
        }
        Error::Analysis(AnalysisError::UnknownRegion { .. })
        | Error::Domain(DomainError::UnknownRegion { .. }) => {
            Some("run `krent regions` for built-in districts, or pass a 5-digit district code")
        }
        Error::Fetch(FetchError::MissingCredentials { .. }) => {
            Some("request a key for the MOLIT rent API at data.go.kr and export MOLIT_SERVICE_KEY")
        }
        Error::Analysis(AnalysisError::FetchFailure { .. }) => {
            Some("check your network connection, or pass --file with saved transactions")
        }
        Error::Config(_) => Some("run `krent config validate` to check the file"),
        _ => None,
    }
}

fn code_for(err: &Error) -> &'static str {
    match err {
        Error::Analysis(AnalysisError::InsufficientData { .. }) => "krent::insufficient_data",
        Error::Analysis(AnalysisError::FetchFailure { .. }) | Error::Fetch(_) | Error::Http(_) => {
            "krent::fetch"
        }
        Error::Analysis(AnalysisError::InvalidQuote { .. })
        | Error::Domain(DomainError::InvalidQuote { .. }) => "krent::invalid_quote",
        Error::Analysis(AnalysisError::UnknownRegion { .. })
        | Error::Domain(DomainError::UnknownRegion { .. }) => "krent::region",
        Error::Config(_) => "krent::config",
        _ => "krent::error",
    }
}

/// Render a crate error as a miette report.
#[must_use]
pub fn report(err: Error) -> miette::Report {
    miette::Report::new(CommandDiagnostic {
        message: err.to_string(),
        code: code_for(&err),
        help: help_for(&err),
    })
}

/// Render a configuration load error, pointing into the file when possible.
#[must_use]
pub fn config_report(name: &str, src: &str, err: Error) -> miette::Report {
    if let Error::Config(ConfigError::Parse(parse)) = &err {
        if let Some(diagnostic) = ConfigDiagnostic::from_toml(name, src, parse) {
            return miette::Report::new(diagnostic);
        }
    }
    report(err)
}
