//! Invocation construction: from a scheduled operation to a tarsnap argv.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Pass-through configuration handed to every tarsnap invocation.
///
/// None of these fields influence the scheduling computation; they only
/// shape how the external tool is driven.
#[derive(Debug, Clone)]
pub struct TarsnapSettings {
    /// Location of the tarsnap executable.
    pub binary: PathBuf,
    /// Key file for encryption.
    pub key_file: PathBuf,
    /// Tarsnap cache directory.
    pub cache_dir: PathBuf,
    /// Verbosity level forwarded as a single `-v…` token; 0 forwards
    /// nothing.
    pub verbosity: u8,
    /// Print invocations instead of executing them.
    pub dry_run: bool,
}

/// A fully built tarsnap command line, ready to spawn or print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
}

impl Invocation {
    /// Build the invocation creating `name` from `paths`.
    ///
    /// Argv shape is a wire contract shared with prior runs:
    /// `--keyfile <key> --cachedir <cache> -c -f <name> [-v…] <path>…`.
    #[must_use]
    pub fn create(settings: &TarsnapSettings, name: &str, paths: &[PathBuf]) -> Self {
        let mut invocation = Self::base(settings);
        invocation.args.push("-c".into());
        invocation.push_filename(name);
        if settings.verbosity > 0 {
            let mut token = String::with_capacity(1 + usize::from(settings.verbosity));
            token.push('-');
            for _ in 0..settings.verbosity {
                token.push('v');
            }
            invocation.args.push(token.into());
        }
        for path in paths {
            invocation.args.push(path.clone().into_os_string());
        }
        invocation
    }

    /// Build the invocation deleting `name`:
    /// `--keyfile <key> --cachedir <cache> -d -f <name>`.
    #[must_use]
    pub fn delete(settings: &TarsnapSettings, name: &str) -> Self {
        let mut invocation = Self::base(settings);
        invocation.args.push("-d".into());
        invocation.push_filename(name);
        invocation
    }

    fn base(settings: &TarsnapSettings) -> Self {
        Self {
            program: settings.binary.clone(),
            args: vec![
                "--keyfile".into(),
                settings.key_file.clone().into_os_string(),
                "--cachedir".into(),
                settings.cache_dir.clone().into_os_string(),
            ],
        }
    }

    fn push_filename(&mut self, name: &str) {
        self.args.push("-f".into());
        self.args.push(name.into());
    }

    /// Binary to spawn.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments following the binary, in order.
    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }
}

impl fmt::Display for Invocation {
    /// Space-joined command line, as printed in dry-run mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
