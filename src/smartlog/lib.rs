//! # Smartlog
//!
//! A log book for short, timestamped text entries, persisted in a local
//! key-value store. The library holds every rule; the bundled CLI only parses
//! arguments, asks for confirmations and draws what the library returns.
//!
//! ```text
//! user intent ──▶ LogbookApi ──▶ commands/* ──▶ Logbook ──▶ Persistence ──▶ KeyValueStore
//!                     │                            │
//!                     └──── view::build_view ◀─────┘ (sorted, filtered snapshot)
//! ```
//!
//! ## Module Overview
//!
//! - [`api`]: the facade a front end drives, including sort and search state
//! - [`commands`]: one module per user intent, returning `CmdResult`
//! - [`logbook`]: the record store, sole owner of the collection and id counter
//! - [`persistence`]: load/save of the two stored keys, with soft recovery
//! - [`store`]: key-value storage trait, file and in-memory implementations
//! - [`codec`]: JSON, text and CSV export and import
//! - [`view`]: sort, filter and highlight
//! - [`model`]: the `LogRecord` type and timestamps
//! - [`config`]: user configuration
//! - [`clipboard`]: platform clipboard support
//! - [`error`]: error types

pub mod api;
pub mod clipboard;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod logbook;
pub mod model;
pub mod persistence;
pub mod store;
pub mod view;
