//! Usage metering sinks

/// Shipped sink implementations
pub mod sink;

pub use sink::{InMemoryUsageSink, NullUsageSink, TracingUsageSink};
