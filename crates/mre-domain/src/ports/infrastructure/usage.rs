//! Usage Sink Port

use crate::error::Result;
use crate::value_objects::usage::UsageRecord;
use async_trait::async_trait;

/// External append-only metering sink
///
/// Fire-and-forget from the dispatcher's perspective: a failed append is
/// logged as metering loss and never fails the response path.
#[async_trait]
pub trait UsageSink: Send + Sync {
    /// Append one usage record
    async fn append(&self, record: UsageRecord) -> Result<()>;
}
