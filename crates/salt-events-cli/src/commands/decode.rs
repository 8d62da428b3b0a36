//! Decode command implementation.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use crate::error::CliError;
use salt_events_core::{Classification, Classifier, EventEnvelope};
use serde_json::json;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct Tally {
    decoded: u64,
    unknown: u64,
    failed: u64,
}

pub fn run(
    input: Option<String>,
    strict: bool,
    show_unknown: bool,
    max_events: Option<u64>,
) -> Result<(), CliError> {
    let mut reader: Box<dyn BufRead> = match input {
        Some(path) => {
            let file = File::open(&path).map_err(|source| CliError::Open { path, source })?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let classifier = Classifier::standard();
    let mut tally = Tally::default();
    let mut line_no: u64 = 0;
    let mut line = Vec::new();

    // Lines stay raw bytes so a non-UTF-8 line is one bad envelope, not a fatal read error.
    loop {
        if let Some(max) = max_events {
            if line_no >= max {
                break;
            }
        }
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        line_no += 1;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let envelope: EventEnvelope = match serde_json::from_slice(&line) {
            Ok(envelope) => envelope,
            Err(source) if strict => {
                return Err(CliError::InvalidEnvelope {
                    line: line_no,
                    source,
                })
            }
            Err(error) => {
                warn!(line = line_no, %error, "skipping invalid envelope");
                tally.failed += 1;
                continue;
            }
        };

        let m = match classifier.classify(&envelope.tag) {
            Classification::Matched(m) => m,
            Classification::NoMatch => {
                debug!(line = line_no, tag = %envelope.tag, "unknown event tag");
                tally.unknown += 1;
                if show_unknown {
                    let value = json!({ "tag": envelope.tag, "kind": null, "data": envelope.data });
                    println!("{}", serde_json::to_string(&value)?);
                }
                continue;
            }
        };

        match m.decode_value(envelope.data) {
            Ok(event) => {
                tally.decoded += 1;
                let value = json!({
                    "tag": envelope.tag,
                    "kind": event.kind(),
                    "event": event,
                });
                println!("{}", serde_json::to_string(&value)?);
            }
            Err(source) if strict => {
                return Err(CliError::Decode {
                    line: line_no,
                    source,
                })
            }
            Err(error) => {
                warn!(
                    line = line_no,
                    tag = %envelope.tag,
                    kind = %error.kind,
                    %error,
                    "failed to decode event payload"
                );
                tally.failed += 1;
            }
        }
    }

    info!(
        decoded = tally.decoded,
        unknown = tally.unknown,
        failed = tally.failed,
        "finished decoding event stream"
    );
    Ok(())
}
