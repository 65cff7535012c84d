//! Fix cycle run between failed export attempts.
//!
//! A fix cycle takes the aggregated data and the failing report and returns
//! revised data for the next attempt. Implementations typically call out to
//! reviewer agents, so the trait is async.

use async_trait::async_trait;
use deepspec_quality::QualityGateReport;
use tracing::debug;

use crate::error::ExportResult;
use crate::render::AggregatedData;

/// Revises aggregated data after a failed quality gate.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one exporter can be shared
/// across tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FixCycle: Send + Sync {
    /// Produce data for attempt `attempt + 1`.
    ///
    /// `attempt` is the 1-based number of the attempt that just failed.
    async fn revise(
        &self,
        data: &AggregatedData,
        report: &QualityGateReport,
        attempt: u32,
    ) -> ExportResult<AggregatedData>;
}

/// Fix cycle that hands the data back unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFixCycle;

#[async_trait]
impl FixCycle for NoopFixCycle {
    async fn revise(
        &self,
        data: &AggregatedData,
        _report: &QualityGateReport,
        attempt: u32,
    ) -> ExportResult<AggregatedData> {
        debug!(attempt, "No fix cycle configured, retrying with unchanged data");
        Ok(data.clone())
    }
}
