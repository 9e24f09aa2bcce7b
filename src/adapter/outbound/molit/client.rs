//! MOLIT REST API client.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::try_join_all;
use reqwest::Client as HttpClient;
use tracing::{debug, info, warn};
use url::Url;

use super::dto::{xml_tag, MolitBody, MolitResponse};
use super::settings::{MolitConfig, SERVICE_KEY_ENV};
use crate::domain::region::RegionCode;
use crate::domain::transaction::RawTransaction;
use crate::domain::window::{TimeWindow, YearMonth};
use crate::error::{FetchError, Result};
use crate::port::outbound::source::TransactionSource;

const SOURCE_NAME: &str = "molit";

/// Hard stop for paging through one month.
const MAX_PAGES: u32 = 50;

/// HTTP client for the MOLIT apartment rent API.
///
/// One request per page per month; the months of a window are fetched
/// concurrently. Each request is a single attempt bounded by the configured
/// timeout. Retrying is left to the caller.
pub struct MolitClient {
    http: HttpClient,
    api_url: Url,
    service_key: String,
    rows_per_page: u32,
}

impl MolitClient {
    /// Create a client with default HTTP settings.
    #[must_use]
    pub fn new(api_url: Url, service_key: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            api_url,
            service_key: service_key.into(),
            rows_per_page: MolitConfig::default().rows_per_page,
        }
    }

    /// Create a client from configuration and the service key in the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingCredentials`] if `MOLIT_SERVICE_KEY` is
    /// unset, or a URL error if `api_url` is invalid.
    pub fn from_config(config: &MolitConfig) -> Result<Self> {
        let service_key = MolitConfig::service_key().ok_or(FetchError::MissingCredentials {
            source_name: SOURCE_NAME,
            variable: SERVICE_KEY_ENV,
        })?;
        let api_url = Url::parse(&config.api_url)?;

        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Ok(Self {
            http,
            api_url,
            service_key,
            rows_per_page: config.rows_per_page.max(1),
        })
    }

    fn page_url(&self, region: &RegionCode, month: YearMonth, page: u32) -> Result<Url> {
        let url = Url::parse_with_params(
            self.api_url.as_str(),
            &[
                ("serviceKey", self.service_key.clone()),
                ("LAWD_CD", region.to_string()),
                ("DEAL_YMD", month.as_deal_ymd()),
                ("pageNo", page.to_string()),
                ("numOfRows", self.rows_per_page.to_string()),
                ("_type", "json".to_string()),
            ],
        )?;
        Ok(url)
    }

    async fn fetch_page(&self, region: &RegionCode, month: YearMonth, page: u32) -> Result<MolitBody> {
        let url = self.page_url(region, month, page)?;
        let response = self.http.get(url).send().await.map_err(|err| {
            FetchError::Unreachable {
                source_name: SOURCE_NAME,
                reason: err.to_string(),
            }
        })?;
        let text = response.error_for_status()?.text().await?;
        parse_body(&text)
    }

    /// Fetch every page of one contract month.
    pub async fn fetch_month(&self, region: &RegionCode, month: YearMonth) -> Result<Vec<RawTransaction>> {
        let mut rows = Vec::new();
        for page in 1..=MAX_PAGES {
            let body = self.fetch_page(region, month, page).await?;
            let received = body.items.len();
            rows.extend(body.items.into_iter().map(RawTransaction::from));

            debug!(
                region = %region,
                month = %month,
                page,
                received,
                total = body.total_count,
                "Fetched MOLIT page"
            );

            let page_short = received < self.rows_per_page as usize;
            if received == 0 || page_short || rows.len() >= body.total_count as usize {
                break;
            }
        }
        Ok(rows)
    }
}

/// Parse a response body, mapping API-level errors.
fn parse_body(text: &str) -> Result<MolitBody> {
    if text.trim_start().starts_with('<') {
        return Err(match xml_tag(text, "returnReasonCode") {
            Some(code) => FetchError::Rejected {
                source_name: SOURCE_NAME,
                code: code.to_string(),
                message: xml_tag(text, "returnAuthMsg")
                    .or_else(|| xml_tag(text, "errMsg"))
                    .unwrap_or_default()
                    .to_string(),
            },
            None => FetchError::Malformed {
                source_name: SOURCE_NAME,
                reason: "unexpected XML response".into(),
            },
        }
        .into());
    }

    let response: MolitResponse =
        serde_json::from_str(text).map_err(|err| FetchError::Malformed {
            source_name: SOURCE_NAME,
            reason: err.to_string(),
        })?;
    let envelope = response.response;
    if !envelope.header.is_success() {
        return Err(FetchError::Rejected {
            source_name: SOURCE_NAME,
            code: envelope.header.result_code,
            message: envelope.header.result_msg,
        }
        .into());
    }
    Ok(envelope.body.unwrap_or_default())
}

#[async_trait]
impl TransactionSource for MolitClient {
    async fn fetch_transactions(
        &self,
        region: &RegionCode,
        window: &TimeWindow,
    ) -> Result<Vec<RawTransaction>> {
        let months = window.months();
        let per_month = try_join_all(
            months
                .iter()
                .map(|month| self.fetch_month(region, *month)),
        )
        .await?;
        let rows: Vec<RawTransaction> = per_month.into_iter().flatten().collect();

        info!(
            region = %region,
            window = %window,
            months = months.len(),
            rows = rows.len(),
            "Fetched MOLIT transactions"
        );
        Ok(rows)
    }

    fn source_name(&self) -> &'static str {
        SOURCE_NAME
    }
}
