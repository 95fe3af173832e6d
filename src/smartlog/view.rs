//! # Search, Sort and Filter
//!
//! Pure functions that derive a disposable [`View`] from a snapshot of the
//! record store. Nothing here mutates the canonical collection.
//!
//! Sorting and filtering are independent: the sort decides the order of every
//! entry, the filter only flips each entry's `visible` flag.

use crate::model::LogRecord;
use regex::RegexBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "Oldest First",
            SortOrder::Descending => "Newest First",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    pub order: SortOrder,
    pub term: String,
}

impl ViewQuery {
    pub fn new(order: SortOrder, term: impl Into<String>) -> Self {
        Self {
            order,
            term: term.into(),
        }
    }

    pub fn is_searching(&self) -> bool {
        !self.term.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ViewEntry {
    pub record: LogRecord,
    /// 1-based rank by ascending id, whatever the display order
    pub number: usize,
    pub visible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct View {
    pub entries: Vec<ViewEntry>,
    /// Number of visible entries, only when a search term is active
    pub match_count: Option<usize>,
}

impl View {
    pub fn visible(&self) -> impl Iterator<Item = &ViewEntry> {
        self.entries.iter().filter(|e| e.visible)
    }

    /// `"N match(es) found"` while searching.
    pub fn summary(&self) -> Option<String> {
        self.match_count.map(|n| {
            let suffix = if n == 1 { "" } else { "es" };
            format!("{} match{} found", n, suffix)
        })
    }
}

/// Order records by id. Ids are unique, so no tie-break is needed.
pub fn sorted(records: &[LogRecord], order: SortOrder) -> Vec<&LogRecord> {
    let mut out: Vec<&LogRecord> = records.iter().collect();
    match order {
        SortOrder::Ascending => out.sort_by_key(|r| r.id),
        SortOrder::Descending => out.sort_by(|a, b| b.id.cmp(&a.id)),
    }
    out
}

/// Case-insensitive substring match over title, content and timestamp.
/// A blank term matches everything.
pub fn matches(record: &LogRecord, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    [&record.title, &record.content, &record.timestamp]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

pub fn build_view(records: &[LogRecord], query: &ViewQuery) -> View {
    let ordered = sorted(records, query.order);
    let total = ordered.len();

    let entries: Vec<ViewEntry> = ordered
        .into_iter()
        .enumerate()
        .map(|(index, record)| ViewEntry {
            record: record.clone(),
            number: match query.order {
                SortOrder::Ascending => index + 1,
                SortOrder::Descending => total - index,
            },
            visible: matches(record, &query.term),
        })
        .collect();

    let match_count = query
        .is_searching()
        .then(|| entries.iter().filter(|e| e.visible).count());

    View {
        entries,
        match_count,
    }
}

/// Wrap every case-insensitive occurrence of `term` in `open`/`close`.
///
/// The term is matched literally: regex metacharacters in it are escaped.
pub fn highlight(text: &str, term: &str, open: &str, close: &str) -> String {
    let term = term.trim();
    if term.is_empty() || text.is_empty() {
        return text.to_string();
    }

    let re = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(e) => {
            tracing::debug!(error = %e, "could not build highlight pattern");
            return text.to_string();
        }
    };

    re.replace_all(text, |caps: &regex::Captures| {
        format!("{}{}{}", open, &caps[0], close)
    })
    .into_owned()
}
