use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Transaction source failures.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    #[error("{source_name} unreachable: {reason}")]
    Unreachable {
        source_name: &'static str,
        reason: String,
    },

    #[error("{source_name} returned malformed data: {reason}")]
    Malformed {
        source_name: &'static str,
        reason: String,
    },

    #[error("{source_name} rejected the request ({code}): {message}")]
    Rejected {
        source_name: &'static str,
        code: String,
        message: String,
    },

    #[error("{source_name} credentials missing: set {variable}")]
    MissingCredentials {
        source_name: &'static str,
        variable: &'static str,
    },
}

/// Terminal failures of one analysis request.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// No usable transactions for the area and window.
    #[error("insufficient data: {context}")]
    InsufficientData { context: String },

    /// The transaction source failed on every attempt.
    #[error("{source_name} fetch failed after {attempts} attempt(s): {source}")]
    FetchFailure {
        source_name: &'static str,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("invalid quote {field}: {reason}")]
    InvalidQuote { field: &'static str, reason: String },

    #[error("unknown region: {city} {district}")]
    UnknownRegion { city: String, district: String },

    /// Any other domain invariant violation.
    #[error(transparent)]
    Domain(DomainError),
}

impl From<DomainError> for AnalysisError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InsufficientData { context } => Self::InsufficientData { context },
            DomainError::InvalidQuote { field, reason } => Self::InvalidQuote { field, reason },
            DomainError::UnknownRegion { city, district } => {
                Self::UnknownRegion { city, district }
            }
            other => Self::Domain(other),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// True for failures a single immediate retry may resolve.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch(FetchError::MissingCredentials { .. }) => false,
            Self::Fetch(FetchError::Rejected { .. }) => false,
            Self::Fetch(_) | Self::Http(_) => true,
            _ => false,
        }
    }

    /// True when the area/window had no usable transactions.
    #[must_use]
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            Self::Domain(DomainError::InsufficientData { .. })
                | Self::Analysis(AnalysisError::InsufficientData { .. })
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_source_is_retryable() {
        let err = Error::from(FetchError::Unreachable {
            source_name: "molit",
            reason: "timeout".into(),
        });
        assert!(err.is_retryable());
    }

    #[test]
    fn rejected_and_domain_errors_are_not_retryable() {
        let rejected = Error::from(FetchError::Rejected {
            source_name: "molit",
            code: "30".into(),
            message: "SERVICE KEY IS NOT REGISTERED".into(),
        });
        assert!(!rejected.is_retryable());

        let insufficient = Error::from(DomainError::insufficient("empty"));
        assert!(!insufficient.is_retryable());
        assert!(insufficient.is_insufficient_data());
    }

    #[test]
    fn domain_errors_map_onto_analysis_taxonomy() {
        let err = AnalysisError::from(DomainError::InvalidQuote {
            field: "monthly_rent",
            reason: "must be positive".into(),
        });
        assert!(matches!(err, AnalysisError::InvalidQuote { field: "monthly_rent", .. }));

        let err = AnalysisError::from(DomainError::EmptyWindow);
        assert!(matches!(err, AnalysisError::Domain(DomainError::EmptyWindow)));

        let err = Error::from(AnalysisError::from(DomainError::insufficient("none")));
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn fetch_failure_reports_attempts() {
        let err = AnalysisError::FetchFailure {
            source_name: "molit",
            attempts: 2,
            source: Box::new(Error::from(FetchError::Unreachable {
                source_name: "molit",
                reason: "connection reset".into(),
            })),
        };
        assert!(err.to_string().contains("after 2 attempt(s)"));
    }
}
