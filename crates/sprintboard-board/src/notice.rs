//! User-visible success and error messages raised by board actions.

use parking_lot::Mutex;
use sprintboard_core::{LogEntry, Loggable};
use std::sync::Arc;

/// Most recent notices, oldest first. Holds at most
/// [`NoticeLog::CAPACITY`] entries.
#[derive(Debug, Default)]
pub struct NoticeLog {
    entries: Vec<LogEntry>,
}

impl NoticeLog {
    pub const CAPACITY: usize = 16;
}

impl Loggable for NoticeLog {
    fn add_log(&mut self, entry: LogEntry) {
        self.entries.push(entry);
        if self.entries.len() > Self::CAPACITY {
            let excess = self.entries.len() - Self::CAPACITY;
            self.entries.drain(..excess);
        }
    }

    fn get_logs(&self) -> &[LogEntry] {
        &self.entries
    }
}

/// Shared handle to a board's notice log.
#[derive(Debug, Clone, Default)]
pub struct Notices(Arc<Mutex<NoticeLog>>);

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.0.lock().add_log(LogEntry::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        let entry = LogEntry::error(message);
        tracing::debug!("Board error notice: {}", entry.message);
        self.0.lock().add_log(entry);
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.0.lock().get_logs().to_vec()
    }

    pub fn last(&self) -> Option<LogEntry> {
        self.0.lock().last_log().cloned()
    }
}
