use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Local;

use super::{AuditResult, AuditSink, TIMESTAMP_FORMAT};

/// Appends `[YYYY-MM-DD HH:MM:SS] description` lines to a file.
///
/// The file is opened in append mode and closed again for every entry;
/// nothing is buffered between calls.
#[derive(Debug, Clone)]
pub struct FileAuditLog {
    path: PathBuf,
}

impl FileAuditLog {
    /// Logs to `path`, creating it on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Log file location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileAuditLog {
    fn record(&mut self, description: &str) -> AuditResult<()> {
        // one entry per line
        let description = description.replace(['\r', '\n'], " ");
        let line = format!("[{}] {}\n", Local::now().format(TIMESTAMP_FORMAT), description);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}
