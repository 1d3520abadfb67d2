//! Pure scheduling computation: from a policy and a date to an operation
//! plan.
//!
//! The scheduler is stateless. It re-derives which archives should exist
//! from the current date alone, never from the store's actual inventory,
//! so retirement targets are only correct when the schedule has run on
//! every intended day.

use std::path::PathBuf;

use chrono::{Datelike, Days, NaiveDate};

use crate::model::{ArchivePeriod, Operation, RetentionPolicy};

/// A date in the first week of a month has a day-of-month of at most 7;
/// equivalently, it is the first occurrence of its weekday that month.
const FIRST_WEEK_MAX_DAY: u32 = 7;

/// Compute the full operation plan for `today`.
///
/// Daily, weekly, and monthly computations run in that fixed order and
/// their results are concatenated. Every creation carries the same input
/// path list.
#[must_use]
pub fn plan(policy: &RetentionPolicy, paths: &[PathBuf], today: NaiveDate) -> Vec<Operation> {
    let mut operations = daily_ops(policy, paths, today);
    operations.extend(weekly_ops(policy, paths, today));
    operations.extend(monthly_ops(policy, paths, today));
    operations
}

/// Daily operations: one creation on every run, plus retirement of the
/// archive taken `num_days` days ago unless deletion is disabled.
#[must_use]
pub fn daily_ops(policy: &RetentionPolicy, paths: &[PathBuf], today: NaiveDate) -> Vec<Operation> {
    let mut operations = vec![Operation::create(
        policy.archive_label(ArchivePeriod::Daily, today),
        paths.to_vec(),
    )];
    if !policy.skip_delete {
        let oldest = today - Days::new(u64::from(policy.num_days));
        operations.push(Operation::delete(
            policy.archive_label(ArchivePeriod::Daily, oldest),
        ));
    }
    operations
}

/// Weekly operations: fire only on the configured weekday and only when
/// weekly archiving is enabled.
#[must_use]
pub fn weekly_ops(policy: &RetentionPolicy, paths: &[PathBuf], today: NaiveDate) -> Vec<Operation> {
    if policy.num_weeks == 0 || today.weekday() != policy.weekday {
        return Vec::new();
    }
    let mut operations = vec![Operation::create(
        policy.archive_label(ArchivePeriod::Weekly, today),
        paths.to_vec(),
    )];
    if !policy.skip_delete {
        let oldest = today - Days::new(7 * u64::from(policy.num_weeks));
        operations.push(Operation::delete(
            policy.archive_label(ArchivePeriod::Weekly, oldest),
        ));
    }
    operations
}

/// Monthly operations: fire only on the first occurrence of the configured
/// weekday in the current month, and only when monthly archiving is
/// enabled.
#[must_use]
pub fn monthly_ops(
    policy: &RetentionPolicy,
    paths: &[PathBuf],
    today: NaiveDate,
) -> Vec<Operation> {
    if policy.num_months == 0
        || today.weekday() != policy.weekday
        || today.day() > FIRST_WEEK_MAX_DAY
    {
        return Vec::new();
    }
    let mut operations = vec![Operation::create(
        policy.archive_label(ArchivePeriod::Monthly, today),
        paths.to_vec(),
    )];
    if !policy.skip_delete {
        let oldest = months_back(today, policy.num_months);
        operations.push(Operation::delete(
            policy.archive_label(ArchivePeriod::Monthly, oldest),
        ));
    }
    operations
}

/// Walk back `months` first-week occurrences of `date`'s weekday slot.
///
/// Steps backward a week at a time, counting a month each time the cursor
/// lands on a day-of-month of at most 7. This is deliberately not
/// calendar-month subtraction: the result is itself a date that satisfies
/// the monthly-creation predicate, so the retirement name matches a name
/// an earlier run of the same policy would have created. Returns `date`
/// unchanged when `months` is 0.
#[must_use]
pub fn months_back(date: NaiveDate, months: u32) -> NaiveDate {
    let mut cursor = date;
    let mut counted = 0;
    while counted < months {
        let previous = cursor - Days::new(7);
        if previous.day() <= FIRST_WEEK_MAX_DAY {
            counted += 1;
        }
        cursor = previous;
    }
    cursor
}
