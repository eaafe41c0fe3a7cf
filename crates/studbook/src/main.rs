//! # Studbook CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/studbookapp/`: core library with UI-agnostic record logic
//! - `crates/studbook/`: this CLI, a client of the library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/studbook/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal / JSON rendering (render.rs, styles.rs)         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/studbookapp/src/api.rs)                  │
//! │  - Dispatches to command modules, persists snapshots        │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (crates/studbookapp/src/commands/*)          │
//! │  - Business logic over the record board                     │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI layer is responsible for **all** user-facing concerns: argument
//! parsing, context initialization, dispatch, error handling, and rendering.
//!
//! ## Testing Approach
//!
//! - **Commands layer**: heavy unit testing of the business logic.
//! - **API layer**: dispatch and persistence tests against `MemBackend`.
//! - **CLI layer**: unit tests for argument mapping and rendering, plus
//!   end-to-end runs of the binary in `tests/` against a temporary data file.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
