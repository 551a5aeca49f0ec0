//! Shared output formatting for list and search.

use color_eyre::eyre::Result;
use memov2_core::search::{ListEntry, SearchHit};
use serde::Serialize;

/// Print `items` as a pretty JSON array.
pub fn print_json<T: Serialize>(items: &[T]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(items)?);
    Ok(())
}

/// `title<TAB>path` per entry.
pub fn print_entries(entries: &[ListEntry]) {
    for entry in entries {
        println!("{entry}");
    }
}

/// Search hits, with the match location when `context` is set.
pub fn print_hits(hits: &[SearchHit], context: bool) {
    for hit in hits {
        if context {
            println!("{}", hit.context_line());
        } else {
            println!("{}", hit.list_entry());
        }
    }
}
