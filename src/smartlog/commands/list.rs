use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::logbook::Logbook;
use crate::store::KeyValueStore;
use crate::view::{build_view, ViewQuery};

pub fn run<S: KeyValueStore>(book: &Logbook<S>, query: &ViewQuery) -> Result<CmdResult> {
    let view = build_view(book.all(), query);

    let mut result = CmdResult::default();
    if let Some(summary) = view.summary() {
        result.add_message(CmdMessage::info(summary));
    }
    result.add_message(CmdMessage::info(format!(
        "{} logs, {}",
        view.entries.len(),
        query.order.label()
    )));
    Ok(result.with_view(view))
}
