//! Analysis output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::assessment::QuoteAssessment;
use crate::domain::estimate::MarketRateEstimate;
use crate::domain::money::Won;
use crate::domain::negotiation::NegotiationOption;
use crate::domain::normalize::NormalizationReport;
use crate::domain::rate::LegalRateCap;
use crate::domain::region::RegionCode;
use crate::domain::scope::SampleScope;
use crate::domain::transaction::TransactionRecord;
use crate::domain::trend::TrendResult;
use crate::domain::window::TimeWindow;

/// Full result of one analysis, serialized as camelCase JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub region: RegionCode,
    pub window: TimeWindow,
    pub scope: SampleScope,
    pub deposit_amount: Won,
    pub monthly_rent: Won,
    pub market: MarketRateEstimate,
    /// Absent when the prior window had no usable data.
    pub trend: Option<TrendResult>,
    pub legal_cap: LegalRateCap,
    #[serde(flatten)]
    pub assessment: QuoteAssessment,
    pub negotiation_options: Vec<NegotiationOption>,
    /// Most recent clean contracts, newest first.
    pub recent_transactions: Vec<TransactionRecord>,
    /// Set when the estimate rests on fewer than five clean contracts.
    pub low_confidence: bool,
    pub normalization: NormalizationReport,
}

impl AssessmentResult {
    /// The option marked as recommended.
    #[must_use]
    pub fn recommended_option(&self) -> Option<&NegotiationOption> {
        self.negotiation_options.iter().find(|o| o.is_recommended)
    }

    /// True once `now` is past the report's validity.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
