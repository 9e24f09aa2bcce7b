//! Transaction source port.

use async_trait::async_trait;

use crate::domain::region::RegionCode;
use crate::domain::transaction::RawTransaction;
use crate::domain::window::TimeWindow;
use crate::error::Result;

/// Provider of raw monthly-rent transactions.
///
/// Implementations return rows as published, without validation; the
/// engine coerces or excludes malformed rows itself. A source may return
/// jeonse rows and rows from other dongs of the district.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch all rent contracts of `region` signed within `window`.
    async fn fetch_transactions(
        &self,
        region: &RegionCode,
        window: &TimeWindow,
    ) -> Result<Vec<RawTransaction>>;

    /// Short name for logs and error messages.
    fn source_name(&self) -> &'static str;
}
