use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    models::entry::{JournalEntry, DATE_FORMAT},
    services::month::MonthRange,
};

const HEADER: [&str; 9] = [
    "id",
    "entry_date",
    "created_at",
    "reading",
    "exercise",
    "flossing",
    "no_meat",
    "health",
    "notes",
];

#[derive(Serialize)]
struct CsvRow<'a> {
    id: i64,
    entry_date: String,
    created_at: String,
    reading: bool,
    exercise: bool,
    flossing: bool,
    no_meat: i64,
    health: &'a str,
    notes: &'a str,
}

/// Export range: missing bounds fall back to the first/last day of the month containing `today`.
pub fn resolve_bounds(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> anyhow::Result<(NaiveDate, NaiveDate)> {
    let current = MonthRange::containing(today)?;
    let from = from.unwrap_or(current.start_date);
    let to = to.unwrap_or(current.end_date);
    anyhow::ensure!(from <= to, "--from {} is after --to {}", from, to);
    Ok((from, to))
}

/// Write entries as CSV with a header row, even when there are none.
/// Returns the number of data rows written.
pub fn write_csv<W: Write>(out: W, entries: &[JournalEntry]) -> anyhow::Result<usize> {
    let mut writer = csv::Writer::from_writer(out);
    // serialize() emits the header together with the first record only.
    if entries.is_empty() {
        writer.write_record(HEADER)?;
    }
    for entry in entries {
        writer.serialize(CsvRow {
            id: entry.id,
            entry_date: entry.entry_date.format(DATE_FORMAT).to_string(),
            created_at: entry.created_at.to_rfc3339(),
            reading: entry.reading,
            exercise: entry.exercise,
            flossing: entry.flossing,
            no_meat: entry.no_meat,
            health: &entry.health,
            notes: &entry.notes,
        })?;
    }
    writer.flush()?;
    Ok(entries.len())
}
