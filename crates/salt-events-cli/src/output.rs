//! Output formatting utilities.

use salt_events_core::EventKind;

/// Formats a classified tag as `<tag>\t<kind>`, or `<tag>\tno match`.
///
/// The tag is written in full so the row can be split on the tab.
pub fn format_classify_row(tag: &str, kind: Option<EventKind>) -> String {
    format!("{}\t{}", tag, kind.map_or("no match", EventKind::name))
}

/// Formats a catalog entry as a table row.
pub fn format_kind_row(position: usize, kind: EventKind, pattern: &str) -> String {
    format!("{:<4} {:<18} {}", position, kind.name(), pattern)
}

/// Prints the catalog table header.
#[allow(clippy::print_literal)]
pub fn print_kinds_header() {
    println!("{:<4} {:<18} {}", "#", "KIND", "PATTERN");
    println!("{}", "-".repeat(80));
}
