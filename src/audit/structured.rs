use chrono::Local;

use super::{AuditResult, AuditSink, TIMESTAMP_FORMAT};

/// Sends each entry to the `aedrecords::audit` tracing target instead of a file.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&mut self, description: &str) -> AuditResult<()> {
        tracing::info!(
            target: "aedrecords::audit",
            timestamp = %Local::now().format(TIMESTAMP_FORMAT),
            description,
            "audit"
        );
        Ok(())
    }
}
