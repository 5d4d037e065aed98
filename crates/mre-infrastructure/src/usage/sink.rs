//! Usage Sink Implementations
//!
//! The tracing sink turns records into structured log lines for the
//! external metering pipeline to scrape; the in-memory and null sinks
//! serve tests and embedded wiring.

use async_trait::async_trait;
use mre_domain::error::Result;
use mre_domain::ports::infrastructure::usage::UsageSink;
use mre_domain::value_objects::usage::UsageRecord;
use std::sync::Mutex;
use tracing::info;

/// Sink emitting one structured log line per record
pub struct TracingUsageSink;

impl TracingUsageSink {
    /// Create the sink
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingUsageSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsageSink for TracingUsageSink {
    async fn append(&self, record: UsageRecord) -> Result<()> {
        info!(
            target: "mre::usage",
            request_id = %record.request_id,
            user_id = %record.user_id,
            provider = record.provider.as_deref().unwrap_or("-"),
            model = record.model.as_deref().unwrap_or("-"),
            status = ?record.status,
            error_class = ?record.error_class,
            input_tokens = record.usage.input_tokens,
            output_tokens = record.usage.output_tokens,
            cost = record.cost,
            latency_ms = record.latency_ms,
            attempts = record.attempts,
            "usage recorded"
        );
        Ok(())
    }
}

/// Sink collecting records in memory for assertions
pub struct InMemoryUsageSink {
    records: Mutex<Vec<UsageRecord>>,
}

impl InMemoryUsageSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the collected records
    pub fn records(&self) -> Vec<UsageRecord> {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Default for InMemoryUsageSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsageSink for InMemoryUsageSink {
    async fn append(&self, record: UsageRecord) -> Result<()> {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(record);
        Ok(())
    }
}

/// Sink discarding every record
pub struct NullUsageSink;

#[async_trait]
impl UsageSink for NullUsageSink {
    async fn append(&self, _record: UsageRecord) -> Result<()> {
        Ok(())
    }
}
