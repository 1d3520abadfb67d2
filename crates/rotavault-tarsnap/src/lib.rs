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

//! Tarsnap adapter binding the store-agnostic scheduler to the `tarsnap`
//! executable.
//!
//! The adapter owns everything the scheduler never reads: the binary
//! location, the key file, the cache directory, the verbosity level, and
//! the dry-run flag. Each scheduled operation maps to a single tarsnap
//! invocation with a fixed argv shape; in dry-run mode the invocation is
//! printed to stdout instead of being spawned.

pub mod adapter;
pub mod command;
pub mod error;

pub use adapter::TarsnapStore;
pub use command::{Invocation, TarsnapSettings};
pub use error::{TarsnapError, TarsnapResult};
