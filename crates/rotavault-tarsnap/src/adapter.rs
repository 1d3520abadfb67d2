//! [`ArchiveStore`] implementation spawning the tarsnap executable.

use std::path::PathBuf;
use std::process::Command;

use rotavault_policy::ArchiveStore;
use tracing::{debug, warn};

use crate::command::{Invocation, TarsnapSettings};
use crate::error::{TarsnapError, TarsnapResult};

/// Archive store backed by the external tarsnap binary.
#[derive(Debug, Clone)]
pub struct TarsnapStore {
    settings: TarsnapSettings,
}

impl TarsnapStore {
    /// Wrap the given pass-through settings.
    #[must_use]
    pub const fn new(settings: TarsnapSettings) -> Self {
        Self { settings }
    }

    /// Spawn the invocation, or print it when dry-run is active.
    ///
    /// A non-zero exit is logged and swallowed: rotation is best effort
    /// with no rollback, and a failed creation must not block the paired
    /// deletion. Only a failure to launch the binary aborts the run.
    fn dispatch(&self, invocation: &Invocation) -> TarsnapResult<()> {
        if self.settings.dry_run {
            println!("{invocation}");
            return Ok(());
        }

        debug!(command = %invocation, "spawning tarsnap");
        let status = Command::new(invocation.program())
            .args(invocation.args())
            .status()
            .map_err(|source| TarsnapError::Spawn {
                program: invocation.program().to_path_buf(),
                source,
            })?;

        if !status.success() {
            warn!(command = %invocation, %status, "tarsnap exited with failure status");
        }
        Ok(())
    }
}

impl ArchiveStore for TarsnapStore {
    fn create_archive(&self, name: &str, paths: &[PathBuf]) -> anyhow::Result<()> {
        self.dispatch(&Invocation::create(&self.settings, name, paths))?;
        Ok(())
    }

    fn delete_archive(&self, name: &str) -> anyhow::Result<()> {
        self.dispatch(&Invocation::delete(&self.settings, name))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(binary: &str) -> TarsnapSettings {
        TarsnapSettings {
            binary: PathBuf::from(binary),
            key_file: PathBuf::from("/root/tarsnap.key"),
            cache_dir: PathBuf::from("/usr/tarsnap-cache"),
            verbosity: 0,
            dry_run: false,
        }
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let store = TarsnapStore::new(settings("/nonexistent/tarsnap-test-binary"));
        let err = store
            .delete_archive("db_daily_2024-01-01")
            .expect_err("spawn fails");
        assert!(err.to_string().contains("failed to launch"));
    }

    #[test]
    fn dry_run_never_spawns() {
        let mut settings = settings("/nonexistent/tarsnap-test-binary");
        settings.dry_run = true;
        let store = TarsnapStore::new(settings);
        store
            .create_archive("db_daily_2024-01-01", &[PathBuf::from("/etc")])
            .expect("dry run succeeds without a binary");
    }
}
