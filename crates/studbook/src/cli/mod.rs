//! # CLI Behavior
//!
//! This is **one possible UI client** for studbook, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and
//! output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## Naked Execution
//!
//! Running `studbook` with no command lists every record.
//!
//! ## Where Records Live
//!
//! Records are kept in a single JSON file. In order of precedence:
//!
//! 1. `--data FILE`
//! 2. `data_file` from `studbook.toml` or `STUDBOOK_DATA_FILE`
//! 3. `records.json` in the platform data directory
//!
//! ## Output
//!
//! `--output term` (default) prints styled tables and messages.
//! `--output json` prints the command result as JSON on stdout, for scripts.
//!
//! ## Module Structure
//!
//! - `commands`: context setup and per-command dispatch
//! - `render`: output formatting (tables, detail views, messages)
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styling constants

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
