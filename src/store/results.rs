//! ResultLog: one append-only CSV file of completed tests per user.
//!
//! Rows are never rewritten. The header goes in exactly once, when the
//! file is created (or found empty); the header check and the write are
//! covered by one lock so concurrent finalizes cannot interleave rows or
//! duplicate the header.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::StorageError;
use crate::scoring::TestResult;

/// Fixed CSV header, written once per file.
pub const HEADER: &str = "Date,UserID,Wellbeing,Activity,Mood,OpenAnswer1,OpenAnswer2";

/// One finalized test, as persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TestRecord {
    pub recorded_at: DateTime<Local>,
    pub user_id: String,
    pub wellbeing: f64,
    pub activity: f64,
    pub mood: f64,
    pub open_answer_1: String,
    pub open_answer_2: String,
}

impl TestRecord {
    /// Build a record from a scored test, stamped with the current
    /// wall-clock time.
    pub fn from_result(user_id: impl Into<String>, result: &TestResult) -> Self {
        Self {
            recorded_at: Local::now(),
            user_id: user_id.into(),
            wellbeing: result.scores.wellbeing,
            activity: result.scores.activity,
            mood: result.scores.mood,
            open_answer_1: result.open_1.clone(),
            open_answer_2: result.open_2.clone(),
        }
    }

    /// Render the record as one CSV row (no trailing newline).
    ///
    /// Scores print with one decimal; they are means of two integers, so
    /// one decimal is exact. Text fields are quoted only when they need
    /// to be.
    fn to_csv_row(&self) -> String {
        format!(
            "{},{},{:.1},{:.1},{:.1},{},{}",
            self.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            csv_field(&self.user_id),
            self.wellbeing,
            self.activity,
            self.mood,
            csv_field(&self.open_answer_1),
            csv_field(&self.open_answer_2),
        )
    }
}

/// Quote a CSV field if it contains a separator, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Per-user append-only result storage rooted at a data directory.
pub struct ResultLog {
    base_dir: PathBuf,
    // Serializes header-check + append. One file per user would allow a
    // finer grain, but finalizes are rare enough that a single lock does.
    append_lock: Mutex<()>,
}

impl ResultLog {
    /// Create a log rooted at `base_dir`. The directory is created lazily
    /// on first append.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            append_lock: Mutex::new(()),
        }
    }

    /// The CSV path for a user. Identifier characters outside
    /// `[A-Za-z0-9_-]` are replaced so ids can never escape the data
    /// directory.
    pub fn log_path(&self, user_id: &str) -> PathBuf {
        let sanitized: String = user_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_dir.join(format!("user_{sanitized}.csv"))
    }

    /// Append one record to the user's log, writing the header first if
    /// the file is new or empty.
    pub async fn append(&self, record: &TestRecord) -> Result<(), StorageError> {
        let _guard = self.append_lock.lock().await;

        fs::create_dir_all(&self.base_dir).await?;
        let path = self.log_path(&record.user_id);
        let needs_header = match fs::metadata(&path).await {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .await?;
        let mut row = String::new();
        if needs_header {
            row.push_str(HEADER);
            row.push('\n');
        }
        row.push_str(&record.to_csv_row());
        row.push('\n');
        file.write_all(row.as_bytes()).await?;
        file.flush().await?;

        debug!(path = %path.display(), user_id = %record.user_id, "Result appended");
        Ok(())
    }
}
