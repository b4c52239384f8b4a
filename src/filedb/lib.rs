//! # Filedb Architecture
//!
//! Filedb is a deliberately small record store for a lending library: books,
//! members and loans, each kept in its own CSV file. There are no
//! transactions, locks or indexes. Updates rewrite whole files and the book
//! `status` column is a cache of the loan ledger, so the gaps such a design
//! leaves are easy to see and, where it matters, to repair.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                           │
//! │  - Parses arguments, renders tables, maps errors to exits   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns store + config, supplies today's date               │
//! │  - Wraps command results in CmdResult with messages         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - checkout / return / validate / reconcile rules           │
//! │  - Each command is its own sequence of store calls          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore trait: full scans, full rewrites, appends    │
//! │  - FileStore (CSV on disk), InMemoryStore (testing)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency model
//!
//! A full rewrite goes through a temporary file and a rename, so readers never
//! see half a file. That is the only guarantee. Appends can interleave under
//! concurrent writers, two rewrites of the same file race with the last one
//! winning, and a checkout's two writes (new loan, book flag) are not atomic
//! as a pair. [`commands::validate`] audits the ledger after the fact and
//! [`commands::reconcile`] recomputes book status from it.
//!
//! ## Logging
//!
//! The library emits [`tracing`] events and never installs a subscriber; the
//! binary does that.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade used by the CLI
//! - [`commands`]: lending workflow
//! - [`store`]: record file engine
//! - [`model`]: entities, status vocabularies, header lists
//! - [`config`]: per data directory settings
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
