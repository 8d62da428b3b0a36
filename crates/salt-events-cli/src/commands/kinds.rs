//! Kinds command implementation.

use crate::error::CliError;
use crate::output;
use salt_events_core::Catalog;
use serde_json::json;

pub fn run(json: bool) -> Result<(), CliError> {
    let catalog = Catalog::standard();

    if json {
        let entries: Vec<_> = catalog
            .entries()
            .iter()
            .map(|entry| {
                json!({
                    "kind": entry.kind(),
                    "pattern": entry.pattern().as_str(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    output::print_kinds_header();
    for (position, entry) in catalog.entries().iter().enumerate() {
        println!(
            "{}",
            output::format_kind_row(position + 1, entry.kind(), entry.pattern().as_str())
        );
    }
    Ok(())
}
