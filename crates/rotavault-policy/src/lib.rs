//! Store-agnostic retention scheduling for rotating backup archives.
//!
//! Given a retention policy and a calendar date, the scheduler computes the
//! ordered list of archive operations for that day: one daily archive is
//! always taken, weekly and monthly archives are taken on the configured
//! weekday, and the oldest archive of each class is retired once its
//! retention count is exceeded. The computation is pure; executing the
//! resulting plan against a concrete store happens behind the
//! [`ArchiveStore`] trait.

pub mod error;
pub mod model;
pub mod schedule;
pub mod service;

pub use error::{PolicyError, PolicyResult};
pub use model::{ArchivePeriod, Operation, RetentionPolicy};
pub use schedule::{daily_ops, monthly_ops, months_back, plan, weekly_ops};
pub use service::{ArchiveStore, run_plan};
