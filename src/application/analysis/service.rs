//! Rent analysis service.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::policy::AnalysisPolicy;
use super::report::AssessmentResult;
use super::request::AnalysisRequest;
use crate::domain::assessment::assess_quote;
use crate::domain::estimate::estimate_market_rate;
use crate::domain::negotiation::generate_options;
use crate::domain::normalize::normalize;
use crate::domain::outlier::filter_outliers;
use crate::domain::quote::UserQuote;
use crate::domain::region::{resolve_region, RegionCode};
use crate::domain::scope::{select_sample, ScopeTarget};
use crate::domain::transaction::{RawTransaction, TransactionRecord};
use crate::domain::trend::detect_trend;
use crate::domain::window::TimeWindow;
use crate::error::AnalysisError;
use crate::port::outbound::cache::{CachedMarket, RateCache, RateCacheKey};
use crate::port::outbound::source::TransactionSource;

/// Attempts per fetch: the first call plus one immediate retry.
const FETCH_ATTEMPTS: u32 = 2;

/// Analyzes wolse quotes against the local market.
pub struct RentAnalyzer {
    source: Arc<dyn TransactionSource>,
    cache: Arc<dyn RateCache>,
    policy: AnalysisPolicy,
    region_overrides: HashMap<String, String>,
}

impl RentAnalyzer {
    #[must_use]
    pub fn new(
        source: Arc<dyn TransactionSource>,
        cache: Arc<dyn RateCache>,
        policy: AnalysisPolicy,
    ) -> Self {
        Self {
            source,
            cache,
            policy,
            region_overrides: HashMap::new(),
        }
    }

    /// Extra `"city/district"` or `"district"` to region code mappings.
    #[must_use]
    pub fn with_region_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.region_overrides = overrides;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> &AnalysisPolicy {
        &self.policy
    }

    /// Analyze one quote.
    ///
    /// The quote is validated before anything is fetched. The recent and
    /// the prior window are computed concurrently; a prior window without
    /// usable data yields no trend rather than an error.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::InvalidQuote`] for non-positive amounts.
    /// - [`AnalysisError::UnknownRegion`] if the district cannot be resolved.
    /// - [`AnalysisError::FetchFailure`] if the source fails twice.
    /// - [`AnalysisError::InsufficientData`] if the recent window has no
    ///   usable contracts.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AssessmentResult, AnalysisError> {
        let quote = UserQuote::try_new(request.deposit_amount, request.monthly_rent)?;
        let region = resolve_region(&request.city, &request.district, &self.region_overrides)?;

        let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
        let window = TimeWindow::trailing(as_of, self.policy.window_months)?;
        let prior_window = window.previous();
        let target = request.scope_target();

        info!(
            region = %region,
            window = %window,
            dong = ?target.dong,
            apartment = ?target.apartment_name,
            "Analyzing quote"
        );

        let (recent, prior) = futures_util::future::join(
            self.market_for_window(&region, &target, &window),
            self.market_for_window(&region, &target, &prior_window),
        )
        .await;
        let recent = recent?;

        let trend = match prior {
            Ok(prior) => Some(detect_trend(
                &recent.estimate,
                &prior.estimate,
                self.policy.trend_stable_threshold,
            )),
            Err(AnalysisError::InsufficientData { context }) => {
                debug!(window = %prior_window, %context, "No trend: prior window has no usable data");
                None
            }
            Err(err) => return Err(err),
        };

        let legal_max_rate = self.policy.legal.max_rate();
        let assessment = assess_quote(&quote, &recent.estimate, legal_max_rate)?;
        let negotiation_options = generate_options(&quote, &assessment);

        if assessment.is_low_confidence() {
            warn!(
                clean_count = recent.estimate.clean_count(),
                "Market estimate rests on few contracts"
            );
        }
        info!(
            category = %assessment.category,
            quote_rate = %assessment.quote_rate,
            market_rate = %assessment.market_rate,
            legal_max_rate = %legal_max_rate,
            "Quote assessed"
        );

        let analyzed_at = Utc::now();
        Ok(AssessmentResult {
            analysis_id: Uuid::new_v4(),
            analyzed_at,
            expires_at: analyzed_at + self.policy.report_validity,
            region,
            window,
            scope: recent.scope,
            deposit_amount: quote.deposit_amount(),
            monthly_rent: quote.monthly_rent(),
            low_confidence: recent.estimate.is_low_confidence(),
            market: recent.estimate,
            trend,
            legal_cap: self.policy.legal,
            assessment,
            negotiation_options,
            recent_transactions: recent.recent_transactions,
            normalization: recent.normalization,
        })
    }

    /// Compute (or reuse) the market picture for one window.
    async fn market_for_window(
        &self,
        region: &RegionCode,
        target: &ScopeTarget,
        window: &TimeWindow,
    ) -> Result<CachedMarket, AnalysisError> {
        let key = RateCacheKey::new(region, target, window);
        if let Some(hit) = self.cache.get(&key).await {
            debug!(key = %key, "Market estimate cache hit");
            return Ok(hit);
        }

        let raw = self.fetch_with_retry(region, window).await?;
        let (records, normalization) = normalize(&raw);
        debug!(
            window = %window,
            accepted = normalization.accepted,
            rejected_malformed = normalization.rejected_malformed,
            skipped_jeonse = normalization.skipped_jeonse,
            "Normalized transactions"
        );

        let in_window: Vec<TransactionRecord> = records
            .into_iter()
            .filter(|record| window.contains(record.contract_date()))
            .collect();
        let (sample, scope) = select_sample(&in_window, target, &self.policy.scope);
        if sample.is_empty() {
            return Err(AnalysisError::InsufficientData {
                context: format!("no usable rent contracts in {region} for {window}"),
            });
        }

        let outcome = filter_outliers(&sample, &self.policy.outlier)?;
        if outcome.fell_back {
            debug!(window = %window, sample = sample.len(), "Outlier filter fell back to the full sample");
        }
        let estimate = estimate_market_rate(
            &outcome,
            sample.len(),
            &self.policy.weighting,
            target.exclusive_area_sqm,
        )?;
        debug!(
            window = %window,
            scope = %scope,
            central_rate = %estimate.central_rate(),
            clean_count = estimate.clean_count(),
            outlier_count = estimate.outlier_count(),
            "Estimated market rate"
        );

        let mut recent_transactions = outcome.clean;
        recent_transactions.sort_by(|a, b| b.contract_date().cmp(&a.contract_date()));
        recent_transactions.truncate(self.policy.recent_transaction_limit);

        let market = CachedMarket {
            estimate,
            scope,
            normalization,
            recent_transactions,
        };
        self.cache.put(key, market.clone()).await;
        Ok(market)
    }

    /// Fetch a window, retrying once immediately on retryable failures.
    async fn fetch_with_retry(
        &self,
        region: &RegionCode,
        window: &TimeWindow,
    ) -> Result<Vec<RawTransaction>, AnalysisError> {
        let source_name = self.source.source_name();
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.source.fetch_transactions(region, window).await {
                Ok(rows) => {
                    debug!(source = source_name, rows = rows.len(), attempts, "Fetched transactions");
                    return Ok(rows);
                }
                Err(err) if err.is_retryable() && attempts < FETCH_ATTEMPTS => {
                    warn!(source = source_name, error = %err, "Fetch failed, retrying once");
                }
                Err(err) => {
                    warn!(source = source_name, error = %err, attempts, "Fetch failed");
                    return Err(AnalysisError::FetchFailure {
                        source_name,
                        attempts,
                        source: Box::new(err),
                    });
                }
            }
        }
    }
}
