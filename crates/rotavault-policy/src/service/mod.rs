//! Store trait implemented by archive adapters, and the plan runner.

use std::path::PathBuf;

use crate::model::Operation;

/// Archive store driven by the scheduler, implemented by adapters
/// (e.g. tarsnap).
///
/// Operations are issued synchronously and sequentially; creation and
/// deletion against the same remote store must never overlap.
pub trait ArchiveStore {
    /// Create an archive with the given name from the given input paths.
    ///
    /// # Errors
    ///
    /// Returns an error when the store could not be driven at all; an
    /// archive the store itself rejects is the store's failure to report.
    fn create_archive(&self, name: &str, paths: &[PathBuf]) -> anyhow::Result<()>;

    /// Delete the archive with the given name.
    ///
    /// Deleting a name the store does not know is delegated to the store's
    /// own error handling.
    ///
    /// # Errors
    ///
    /// Returns an error when the store could not be driven at all.
    fn delete_archive(&self, name: &str) -> anyhow::Result<()>;
}

/// Drive `store` over `operations` in order, stopping at the first error.
///
/// # Errors
///
/// Propagates the first adapter error; already-issued operations are not
/// rolled back.
pub fn run_plan<S>(store: &S, operations: &[Operation]) -> anyhow::Result<()>
where
    S: ArchiveStore + ?Sized,
{
    for operation in operations {
        match operation {
            Operation::Create { name, paths } => store.create_archive(name, paths)?,
            Operation::Delete { name } => store.delete_archive(name)?,
        }
    }
    Ok(())
}

/// Test double recording every call in issue order.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingStore {
    calls: std::sync::Mutex<Vec<String>>,
    fail_on: Option<String>,
}

#[cfg(test)]
impl RecordingStore {
    pub(crate) fn failing_on(name: impl Into<String>) -> Self {
        Self {
            calls: std::sync::Mutex::new(Vec::new()),
            fail_on: Some(name.into()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("store mutex poisoned").clone()
    }

    fn record(&self, verb: &str, name: &str) -> anyhow::Result<()> {
        self.calls
            .lock()
            .expect("store mutex poisoned")
            .push(format!("{verb} {name}"));
        if self.fail_on.as_deref() == Some(name) {
            anyhow::bail!("store rejected '{name}'");
        }
        Ok(())
    }
}

#[cfg(test)]
impl ArchiveStore for RecordingStore {
    fn create_archive(&self, name: &str, _paths: &[PathBuf]) -> anyhow::Result<()> {
        self.record("create", name)
    }

    fn delete_archive(&self, name: &str) -> anyhow::Result<()> {
        self.record("delete", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_plan_issues_operations_in_order() {
        let store = RecordingStore::default();
        let operations = vec![
            Operation::create("db_daily_2024-01-01", vec![PathBuf::from("/etc")]),
            Operation::delete("db_daily_2023-12-29"),
            Operation::create("db_weekly_2024-01-01", vec![PathBuf::from("/etc")]),
        ];

        run_plan(&store, &operations).expect("plan runs");

        assert_eq!(
            store.calls(),
            vec![
                "create db_daily_2024-01-01",
                "delete db_daily_2023-12-29",
                "create db_weekly_2024-01-01",
            ]
        );
    }

    #[test]
    fn run_plan_stops_at_first_store_error() {
        let store = RecordingStore::failing_on("db_daily_2023-12-29");
        let operations = vec![
            Operation::create("db_daily_2024-01-01", Vec::new()),
            Operation::delete("db_daily_2023-12-29"),
            Operation::create("db_weekly_2024-01-01", Vec::new()),
        ];

        let err = run_plan(&store, &operations).expect_err("plan fails");
        assert!(err.to_string().contains("db_daily_2023-12-29"));
        assert_eq!(store.calls().len(), 2);
    }

    #[test]
    fn run_plan_on_empty_plan_is_a_no_op() {
        let store = RecordingStore::default();
        run_plan(&store, &[]).expect("empty plan runs");
        assert!(store.calls().is_empty());
    }
}
