//! Retention policy and archive operation DTOs shared across the workspace.

use std::fmt;
use std::path::PathBuf;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyResult};

/// Cadence class of an archive, encoded into its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchivePeriod {
    /// Taken on every run.
    Daily,
    /// Taken on the configured weekday.
    Weekly,
    /// Taken on the first occurrence of the configured weekday each month.
    Monthly,
}

impl ArchivePeriod {
    /// Wire spelling of the period as it appears in archive names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for ArchivePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which archives to take and how many of each class to keep.
///
/// Constructed once per run; the scheduler never mutates it. The weekday is
/// held as [`chrono::Weekday`], so out-of-range values are unrepresentable
/// here; numeric range checks happen at the parsing edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionPolicy {
    /// Identifier prefixed to every generated archive name.
    pub archive_name: String,
    /// Day on which weekly and monthly archives are taken.
    pub weekday: Weekday,
    /// Number of consecutive daily archives retained. Must be positive.
    pub num_days: u32,
    /// Number of consecutive weekly archives retained; 0 disables weekly
    /// archiving.
    pub num_weeks: u32,
    /// Number of consecutive monthly archives retained; 0 disables monthly
    /// archiving.
    pub num_months: u32,
    /// When set, no deletion operations are emitted. Useful when the
    /// store's key does not permit deletion.
    pub skip_delete: bool,
}

impl RetentionPolicy {
    /// Derive the archive name for the given period and date.
    ///
    /// The `{prefix}_{period}_{YYYY-MM-DD}` format is a wire contract:
    /// retirement only works if today's names line up with the names
    /// produced by earlier runs.
    #[must_use]
    pub fn archive_label(&self, period: ArchivePeriod, date: NaiveDate) -> String {
        format!("{}_{}_{}", self.archive_name, period, date)
    }

    /// Check the preconditions the scheduler assumes.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] when the archive name is empty or the
    /// daily retention count is zero.
    pub fn validate(&self) -> PolicyResult<()> {
        if self.archive_name.is_empty() {
            return Err(PolicyError::MissingField {
                field: "archive_name",
            });
        }
        if self.num_days == 0 {
            return Err(PolicyError::InvalidField {
                field: "num_days",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// A single scheduled action against the archive store.
///
/// Operations are constructed fresh on every run, never persisted, and
/// consumed immediately by the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Create an archive from the given input paths.
    Create {
        /// Derived archive name.
        name: String,
        /// Input paths snapshotted into the archive.
        paths: Vec<PathBuf>,
    },
    /// Delete the archive with the given name.
    Delete {
        /// Derived archive name.
        name: String,
    },
}

impl Operation {
    /// Convenience constructor for creation operations.
    #[must_use]
    pub fn create(name: impl Into<String>, paths: impl Into<Vec<PathBuf>>) -> Self {
        Self::Create {
            name: name.into(),
            paths: paths.into(),
        }
    }

    /// Convenience constructor for deletion operations.
    #[must_use]
    pub fn delete(name: impl Into<String>) -> Self {
        Self::Delete { name: name.into() }
    }

    /// Archive name targeted by this operation.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Create { name, .. } | Self::Delete { name } => name,
        }
    }
}
