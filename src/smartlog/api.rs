//! # API Facade
//!
//! `LogbookApi` is the one object a front end talks to. It owns the record store
//! and the view state the front end toggles (sort order and search term), and
//! dispatches each user intent to its command in `commands/*.rs`.
//!
//! Like the commands beneath it, the API never prints and never prompts:
//! confirmation of destructive actions is the front end's job, done before it
//! calls [`LogbookApi::delete_logs`] or [`LogbookApi::clear_all`]. After any
//! mutation a front end redraws by calling [`LogbookApi::list`] again.

use crate::codec::ExportFormat;
use crate::commands;
use crate::error::{Result, SmartlogError};
use crate::logbook::Logbook;
use crate::model::LogRecord;
use crate::store::KeyValueStore;
use crate::view::{SortOrder, ViewQuery};
use std::path::{Path, PathBuf};

pub struct LogbookApi<S: KeyValueStore> {
    book: Logbook<S>,
    query: ViewQuery,
}

impl<S: KeyValueStore> LogbookApi<S> {
    pub fn new(book: Logbook<S>, order: SortOrder) -> Self {
        Self {
            book,
            query: ViewQuery::new(order, ""),
        }
    }

    pub fn create_log(&mut self, title: &str, content: &str) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.book, title, content)
    }

    pub fn delete_logs(&mut self, ids: &[u64]) -> Result<commands::CmdResult> {
        if ids.is_empty() {
            return Err(SmartlogError::Api("No log ids given".to_string()));
        }
        commands::delete::run(&mut self.book, ids)
    }

    pub fn clear_all(&mut self) -> Result<commands::CmdResult> {
        commands::clear::run(&mut self.book)
    }

    /// The current view: every log in the active sort order, flagged visible or
    /// hidden by the active search term.
    pub fn list(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.book, &self.query)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.term = term.into();
    }

    pub fn clear_search(&mut self) {
        self.query.term.clear();
    }

    pub fn search_term(&self) -> &str {
        &self.query.term
    }

    pub fn toggle_sort(&mut self) -> SortOrder {
        self.query.order = self.query.order.toggled();
        self.query.order
    }

    pub fn sort_order(&self) -> SortOrder {
        self.query.order
    }

    pub fn export_logs(
        &self,
        format: ExportFormat,
        destination: Option<PathBuf>,
        default_dir: &Path,
    ) -> Result<commands::CmdResult> {
        commands::export::run(&self.book, format, destination, default_dir)
    }

    pub fn render_export(&self, format: ExportFormat) -> Result<String> {
        commands::export::render(&self.book, format)
    }

    pub fn import_logs(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.book, path)
    }

    pub fn backup(
        &self,
        destination: Option<PathBuf>,
        default_dir: &Path,
    ) -> Result<commands::CmdResult> {
        commands::backup::run(&self.book, destination, default_dir)
    }

    pub fn restore(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::restore::run(&mut self.book, path)
    }

    pub fn copy_log(&self, id: u64) -> Result<commands::CmdResult> {
        commands::copy::run(&self.book, id)
    }

    pub fn find(&self, id: u64) -> Result<&LogRecord> {
        self.book.find(id)
    }

    pub fn all(&self) -> &[LogRecord] {
        self.book.all()
    }

    pub fn logbook(&self) -> &Logbook<S> {
        &self.book
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
