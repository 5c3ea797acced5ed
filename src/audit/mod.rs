//! Append-only audit trail of user actions.

/// Timestamped lines appended to a flat file.
pub mod file;
/// Entries emitted as `tracing` events.
pub mod structured;

pub use file::FileAuditLog;
pub use structured::TracingAuditSink;

/// `strftime` pattern of the timestamp prefix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Failure to record an audit entry.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The log file could not be opened or written.
    #[error("audit log io: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for audit calls.
pub type AuditResult<T> = Result<T, AuditError>;

/// Write-only destination for audit entries. Entries are never read back.
pub trait AuditSink: Send {
    /// Appends one entry stamped with the current local time.
    fn record(&mut self, description: &str) -> AuditResult<()>;
}
