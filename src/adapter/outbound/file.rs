//! Transaction source backed by a local JSON file.
//!
//! Accepts either a bare array of MOLIT items or a saved MOLIT response.
//! Rows are not region-tagged, so the whole file is returned for any
//! region; the analyzer drops rows outside the requested window.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::molit::dto::{MolitItem, MolitResponse};
use crate::domain::region::RegionCode;
use crate::domain::transaction::RawTransaction;
use crate::domain::window::TimeWindow;
use crate::error::{FetchError, Result};
use crate::port::outbound::source::TransactionSource;

const SOURCE_NAME: &str = "file";

#[derive(Deserialize)]
#[serde(untagged)]
enum FileContents {
    Items(Vec<MolitItem>),
    Response(MolitResponse),
}

/// Reads raw transactions from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_rows(text: &str) -> Result<Vec<RawTransaction>> {
    let contents: FileContents = serde_json::from_str(text).map_err(|err| FetchError::Malformed {
        source_name: SOURCE_NAME,
        reason: err.to_string(),
    })?;
    let items = match contents {
        FileContents::Items(items) => items,
        FileContents::Response(response) => response
            .response
            .body
            .map(|body| body.items)
            .unwrap_or_default(),
    };
    Ok(items.into_iter().map(RawTransaction::from).collect())
}

#[async_trait]
impl TransactionSource for JsonFileSource {
    async fn fetch_transactions(
        &self,
        region: &RegionCode,
        window: &TimeWindow,
    ) -> Result<Vec<RawTransaction>> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let rows = parse_rows(&text)?;
        info!(
            path = %self.path.display(),
            region = %region,
            window = %window,
            rows = rows.len(),
            "Loaded transactions from file"
        );
        Ok(rows)
    }

    fn source_name(&self) -> &'static str {
        SOURCE_NAME
    }
}
