//! Classify command implementation.

use crate::error::CliError;
use crate::output;
use salt_events_core::{Classification, Classifier};
use serde_json::json;

pub fn run(tags: Vec<String>, json: bool) -> Result<(), CliError> {
    let classifier = Classifier::standard();

    for tag in &tags {
        let classification = classifier.classify(tag);
        if json {
            let value = match &classification {
                Classification::Matched(m) => json!({
                    "tag": tag,
                    "kind": m.kind(),
                    "captures": m.captures(),
                }),
                Classification::NoMatch => json!({ "tag": tag, "kind": null }),
            };
            println!("{}", serde_json::to_string(&value)?);
        } else {
            println!(
                "{}",
                output::format_classify_row(tag, classification.kind())
            );
        }
    }

    Ok(())
}
