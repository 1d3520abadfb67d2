#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::redundant_pub_crate)]

//! Command-line frontend for the rotavault rotation scheduler.
//!
//! Layout:
//! - `cli.rs`: argument parsing, validation, and the run wiring
//! - `telemetry.rs`: tracing subscriber bootstrap
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod telemetry;

pub use cli::run;
