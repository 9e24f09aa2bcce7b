//! In-memory transaction source for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;

use crate::domain::region::RegionCode;
use crate::domain::transaction::RawTransaction;
use crate::domain::window::TimeWindow;
use crate::error::{FetchError, Result};
use crate::port::outbound::source::TransactionSource;

/// A source holding a fixed set of rows.
///
/// Each fetch first pops the next scripted failure, if any; otherwise it
/// returns the rows whose contract date falls in the requested window, the
/// way the MOLIT API answers per month. Rows with unparseable dates are
/// always returned.
pub struct ScriptedSource {
    rows: Vec<RawTransaction>,
    failures: Mutex<VecDeque<FetchError>>,
    calls: Arc<AtomicU32>,
}

impl ScriptedSource {
    pub fn new(rows: Vec<RawTransaction>) -> Self {
        Self {
            rows,
            failures: Mutex::new(VecDeque::new()),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Fail the next `failures.len()` fetches with these errors, in order.
    pub fn with_failures(self, failures: Vec<FetchError>) -> Self {
        *self.failures.lock() = failures.into();
        self
    }

    /// Shared counter for asserting fetch counts after the source is moved.
    pub fn call_counter(&self) -> Arc<AtomicU32> {
        self.calls.clone()
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

/// An unreachable-source error for scripting.
pub fn unreachable(reason: &str) -> FetchError {
    FetchError::Unreachable {
        source_name: "scripted",
        reason: reason.to_string(),
    }
}

fn row_date(row: &RawTransaction) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        row.year.trim().parse().ok()?,
        row.month.trim().parse().ok()?,
        row.day.trim().parse().ok()?,
    )
}

#[async_trait]
impl TransactionSource for ScriptedSource {
    async fn fetch_transactions(
        &self,
        _region: &RegionCode,
        window: &TimeWindow,
    ) -> Result<Vec<RawTransaction>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.failures.lock().pop_front() {
            return Err(failure.into());
        }
        Ok(self
            .rows
            .iter()
            .filter(|row| row_date(row).map_or(true, |date| window.contains(date)))
            .cloned()
            .collect())
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}
