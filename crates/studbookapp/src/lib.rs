//! # Studbook Architecture
//!
//! Studbook keeps breeding and medical records for a horse stud: medications,
//! appointments, veterinary checkups, ultrasounds, breedings, pregnancies,
//! foalings, health assessments and heat cycles. It is a **UI-agnostic
//! library**; the `studbook` CLI is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, persists snapshots            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Operations returning structured CmdResult values         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Record Board (board.rs)                                    │
//! │  - Store + active filter → filtered view → statistics       │
//! │  - Full synchronous recompute on every change               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - In-memory RecordStore, snapshot backends (JSON file/mem) │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Nothing in this crate writes to stdout/stderr or exits the process. Logging
//! goes through the `log` facade; the binary decides where it ends up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business operations
//! - [`board`]: Reactive view over a store
//! - [`store`]: Record store and snapshot backends
//! - [`model`]: Records, kinds, statuses, priorities, patches
//! - [`filter`]: Filter specification and matching
//! - [`stats`]: Statistics and overdue/upcoming classification
//! - [`sort`]: Listing order
//! - [`forms`]: Drafts and required-field validation
//! - [`ids`]: Record id generation
//! - [`config`]: Configuration loading
//! - [`logging`]: Logger bootstrap for binaries
//! - [`error`]: Error types

pub mod api;
pub mod board;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod forms;
pub mod ids;
pub mod logging;
pub mod model;
pub mod sort;
pub mod stats;
pub mod store;
