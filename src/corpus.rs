//! Reads (category, sentence) training records from header-less CSV.

use crate::error::ClassifierError;
use csv::{ReaderBuilder, StringRecord};
use log::warn;
use std::io::Read;

/// Streams training records out of `reader`.
///
/// Each row must hold at least a category and a sentence; anything past the second field is
/// ignored. Rows are yielded lazily so a bad row surfaces exactly where it occurs.
pub fn records<R: Read>(
    reader: R,
) -> impl Iterator<Item = Result<(String, String), ClassifierError>> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
        .into_records()
        .map(|record| to_pair(record?))
}

fn to_pair(record: StringRecord) -> Result<(String, String), ClassifierError> {
    let line = record.position().map_or(0, |pos| pos.line());

    match (record.get(0), record.get(1)) {
        (Some(category), Some(sentence)) => {
            if record.len() > 2 {
                warn!(
                    "ignoring {} extra field(s) on line {line}",
                    record.len() - 2
                );
            }
            Ok((category.to_string(), sentence.to_string()))
        }
        _ => Err(ClassifierError::InputFormat {
            line,
            fields: record.len(),
        }),
    }
}
