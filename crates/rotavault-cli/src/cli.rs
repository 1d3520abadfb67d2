//! Argument parsing, validation, and run wiring for the rotavault binary.

use std::path::PathBuf;

use chrono::{Local, Weekday};
use clap::{ArgAction, Parser};
use rotavault_policy::{RetentionPolicy, plan, run_plan};
use rotavault_tarsnap::{TarsnapSettings, TarsnapStore};
use tracing::info;

use crate::telemetry;

/// Cache directory handed to tarsnap when none is given. An entry-point
/// default, deliberately not known to the scheduler core.
const DEFAULT_CACHE_DIR: &str = "/usr/tarsnap-cache";
const DEFAULT_TARSNAP_LOCATION: &str = "tarsnap";
const DEFAULT_NUM_DAYS: u32 = 3;
const DEFAULT_NUM_WEEKS: u32 = 2;
const DEFAULT_NUM_MONTHS: u32 = 1;

/// Parses CLI arguments, executes today's rotation plan, and reports
/// user-facing errors. Returns the process exit code.
pub fn run() -> i32 {
    let cli = Cli::parse();
    match execute(&cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

fn execute(cli: &Cli) -> CliResult<()> {
    telemetry::init_logging().map_err(CliError::Failure)?;

    let policy = cli.policy();
    policy
        .validate()
        .map_err(|err| CliError::Validation(err.to_string()))?;

    // Read the date once so the three sub-computations stay consistent
    // across a midnight boundary.
    let today = Local::now().date_naive();
    let operations = plan(&policy, &cli.paths, today);
    info!(
        date = %today,
        operations = operations.len(),
        archive = %policy.archive_name,
        "computed rotation plan"
    );

    let store = TarsnapStore::new(cli.tarsnap_settings());
    run_plan(&store, &operations).map_err(CliError::Failure)
}

#[derive(Parser)]
#[command(
    name = "rotavault",
    about = "Rotates daily, weekly, and monthly tarsnap archives"
)]
struct Cli {
    /// Name prefixed to every generated archive.
    #[arg(long)]
    archive_name: String,

    /// Key file for encryption.
    #[arg(long)]
    key_file: PathBuf,

    /// Tarsnap cache directory.
    #[arg(long, default_value = DEFAULT_CACHE_DIR)]
    cache_dir: PathBuf,

    /// Day for weekly and monthly archives, where Monday is 1 and Sunday
    /// is 7.
    #[arg(long, value_parser = parse_weekday)]
    weekday: Weekday,

    /// Number of consecutive daily archives to keep.
    #[arg(long, default_value_t = DEFAULT_NUM_DAYS, value_parser = parse_num_days)]
    num_days: u32,

    /// Number of consecutive weekly archives to keep; 0 disables weekly
    /// archives.
    #[arg(long, default_value_t = DEFAULT_NUM_WEEKS)]
    num_weeks: u32,

    /// Number of consecutive monthly archives to keep; 0 disables monthly
    /// archives.
    #[arg(long, default_value_t = DEFAULT_NUM_MONTHS)]
    num_months: u32,

    /// Keep the oldest archives instead of retiring them, useful when the
    /// key does not permit deletion.
    #[arg(long)]
    skip_delete: bool,

    /// Print tarsnap invocations instead of executing them.
    #[arg(long)]
    dry_run: bool,

    /// Verbosity level passed through to tarsnap.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Location of the tarsnap executable.
    #[arg(long, default_value = DEFAULT_TARSNAP_LOCATION)]
    tarsnap_location: PathBuf,

    /// Paths snapshotted into every created archive.
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,
}

impl Cli {
    fn policy(&self) -> RetentionPolicy {
        RetentionPolicy {
            archive_name: self.archive_name.clone(),
            weekday: self.weekday,
            num_days: self.num_days,
            num_weeks: self.num_weeks,
            num_months: self.num_months,
            skip_delete: self.skip_delete,
        }
    }

    fn tarsnap_settings(&self) -> TarsnapSettings {
        TarsnapSettings {
            binary: self.tarsnap_location.clone(),
            key_file: self.key_file.clone(),
            cache_dir: self.cache_dir.clone(),
            verbosity: self.verbose,
            dry_run: self.dry_run,
        }
    }
}

#[derive(Debug)]
enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

type CliResult<T> = Result<T, CliError>;

impl CliError {
    const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

fn parse_weekday(input: &str) -> Result<Weekday, String> {
    let number: u8 = input
        .parse()
        .map_err(|_| format!("invalid weekday '{input}': must be an integer"))?;
    match number {
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        7 => Ok(Weekday::Sun),
        _ => Err(format!(
            "invalid weekday '{input}': must be >= 1 and <= 7, where Monday is 1"
        )),
    }
}

fn parse_num_days(input: &str) -> Result<u32, String> {
    let value: u32 = input
        .parse()
        .map_err(|_| format!("invalid count '{input}': must be a non-negative integer"))?;
    if value == 0 {
        return Err("must be > 0".to_string());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args.iter().copied())
    }

    const REQUIRED: &[&str] = &[
        "rotavault",
        "--archive-name",
        "db",
        "--key-file",
        "/root/tarsnap.key",
        "--weekday",
        "1",
    ];

    fn with_required<'a>(extra: &[&'a str]) -> Vec<&'a str> {
        let mut args = REQUIRED.to_vec();
        args.extend_from_slice(extra);
        args
    }

    #[test]
    fn defaults_mirror_the_wire_contract() {
        let cli = parse(REQUIRED).expect("parses");
        assert_eq!(cli.cache_dir, PathBuf::from("/usr/tarsnap-cache"));
        assert_eq!(cli.tarsnap_location, PathBuf::from("tarsnap"));
        assert_eq!(cli.num_days, 3);
        assert_eq!(cli.num_weeks, 2);
        assert_eq!(cli.num_months, 1);
        assert!(!cli.skip_delete);
        assert!(!cli.dry_run);
        assert_eq!(cli.verbose, 0);
        assert!(cli.paths.is_empty());
    }

    #[test]
    fn policy_assembles_from_arguments() {
        let cli = parse(&with_required(&[
            "--num-days",
            "5",
            "--num-weeks",
            "0",
            "--skip-delete",
            "/etc",
            "/home",
        ]))
        .expect("parses");
        let policy = cli.policy();
        assert_eq!(policy.archive_name, "db");
        assert_eq!(policy.weekday, Weekday::Mon);
        assert_eq!(policy.num_days, 5);
        assert_eq!(policy.num_weeks, 0);
        assert_eq!(policy.num_months, 1);
        assert!(policy.skip_delete);
        assert!(policy.validate().is_ok());
        assert_eq!(cli.paths, vec![PathBuf::from("/etc"), PathBuf::from("/home")]);
    }

    #[test]
    fn settings_assemble_from_arguments() {
        let cli = parse(&with_required(&["--dry-run", "-vv"])).expect("parses");
        let settings = cli.tarsnap_settings();
        assert_eq!(settings.binary, PathBuf::from("tarsnap"));
        assert_eq!(settings.key_file, PathBuf::from("/root/tarsnap.key"));
        assert_eq!(settings.verbosity, 2);
        assert!(settings.dry_run);
    }

    #[test]
    fn weekday_out_of_range_is_rejected() {
        assert!(parse(&["rotavault", "--archive-name", "db", "--key-file", "k", "--weekday", "0"]).is_err());
        assert!(parse(&["rotavault", "--archive-name", "db", "--key-file", "k", "--weekday", "8"]).is_err());
    }

    #[test]
    fn weekday_numbers_follow_iso_order() {
        assert_eq!(parse_weekday("1"), Ok(Weekday::Mon));
        assert_eq!(parse_weekday("4"), Ok(Weekday::Thu));
        assert_eq!(parse_weekday("7"), Ok(Weekday::Sun));
        assert!(parse_weekday("monday").is_err());
    }

    #[test]
    fn zero_daily_retention_is_rejected() {
        assert!(parse(&with_required(&["--num-days", "0"])).is_err());
    }

    #[test]
    fn negative_counts_are_rejected() {
        assert!(parse(&with_required(&["--num-weeks", "-1"])).is_err());
        assert!(parse(&with_required(&["--num-months", "-2"])).is_err());
    }

    #[test]
    fn required_flags_are_enforced() {
        assert!(parse(&["rotavault", "--key-file", "k", "--weekday", "1"]).is_err());
        assert!(parse(&["rotavault", "--archive-name", "db", "--weekday", "1"]).is_err());
        assert!(parse(&["rotavault", "--archive-name", "db", "--key-file", "k"]).is_err());
    }

    #[test]
    fn validation_errors_exit_with_usage_code() {
        let err = CliError::Validation("bad".to_string());
        assert_eq!(err.exit_code(), 2);
        let err = CliError::Failure(anyhow::anyhow!("boom"));
        assert_eq!(err.exit_code(), 3);
    }
}
