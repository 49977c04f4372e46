use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// Format accepted for `entry_date`, both in forms and in the CLI.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One day's journal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub entry_date: NaiveDate,
    pub reading: bool,
    pub exercise: bool,
    pub no_meat: i64,
    pub flossing: bool,
    pub health: String,
    pub notes: String,
}

impl JournalEntry {
    pub fn fields(&self) -> EntryFields {
        EntryFields {
            entry_date: self.entry_date,
            reading: self.reading,
            exercise: self.exercise,
            no_meat: self.no_meat,
            flossing: self.flossing,
            health: self.health.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Every mutable column of an entry. Updates replace all of them at once.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFields {
    pub entry_date: NaiveDate,
    pub reading: bool,
    pub exercise: bool,
    pub no_meat: i64,
    pub flossing: bool,
    pub health: String,
    pub notes: String,
}

impl EntryFields {
    pub fn new(entry_date: NaiveDate) -> Self {
        Self {
            entry_date,
            reading: false,
            exercise: false,
            no_meat: 0,
            flossing: false,
            health: String::new(),
            notes: String::new(),
        }
    }
}

/// Body for POST /submit and POST /edit/{id}, exactly as the browser sends it.
/// Unchecked checkboxes are simply missing from the body.
#[derive(Debug, Default, Deserialize)]
pub struct EntryForm {
    pub entry_date: Option<String>,
    pub reading: Option<String>,
    pub exercise: Option<String>,
    pub no_meat: Option<String>,
    pub flossing: Option<String>,
    pub health: Option<String>,
    pub notes: Option<String>,
}

impl EntryForm {
    /// Validate the submission.
    ///
    /// `fallback_date` is used when `entry_date` is missing; pass `None` where the
    /// date is mandatory.
    pub fn into_fields(
        self,
        fallback_date: Option<NaiveDate>,
        default_health: &str,
    ) -> Result<EntryFields, AppError> {
        let entry_date = match self.entry_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_date(raw)?,
            _ => fallback_date.ok_or_else(|| AppError::malformed("entry_date is required"))?,
        };

        let no_meat = match self.no_meat.as_deref().map(str::trim) {
            None | Some("") => 0,
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::malformed(format!("no_meat must be a whole number, got {raw:?}")))?,
        };

        let health = match self.health {
            Some(h) if !h.trim().is_empty() => h.trim().to_string(),
            _ => default_health.to_string(),
        };

        Ok(EntryFields {
            entry_date,
            reading: parse_checkbox("reading", self.reading.as_deref())?,
            exercise: parse_checkbox("exercise", self.exercise.as_deref())?,
            no_meat,
            flossing: parse_checkbox("flossing", self.flossing.as_deref())?,
            health,
            notes: self.notes.unwrap_or_default(),
        })
    }
}

/// Strict `YYYY-MM-DD`: four-digit year, zero-padded month and day, no sign.
pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    let malformed = || AppError::malformed(format!("entry_date must be YYYY-MM-DD, got {raw:?}"));

    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(malformed());
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| malformed())
}

fn parse_checkbox(name: &str, value: Option<&str>) -> Result<bool, AppError> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" | "" => Ok(false),
        other => Err(AppError::malformed(format!("{name} must be a checkbox value, got {other:?}"))),
    }
}

/// Row order for entry listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    IdDesc,
    DateDesc,
    DateAsc,
}

impl ListOrder {
    pub(crate) fn sql(self) -> &'static str {
        match self {
            ListOrder::IdDesc => "id DESC",
            ListOrder::DateDesc => "entry_date DESC, id DESC",
            ListOrder::DateAsc => "entry_date ASC, id ASC",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Id,
    Date,
}

/// Query params for GET /entries.
#[derive(Debug, Default, Deserialize)]
pub struct EntriesQuery {
    #[serde(default)]
    pub sort: SortKey,
}

impl EntriesQuery {
    pub fn order(&self) -> ListOrder {
        match self.sort {
            SortKey::Id => ListOrder::IdDesc,
            SortKey::Date => ListOrder::DateDesc,
        }
    }
}

/// Query params for GET /visualization. Kept as strings so `?year=&month=` means "current".
#[derive(Debug, Default, Deserialize)]
pub struct VisualizationQuery {
    pub year: Option<String>,
    pub month: Option<String>,
}
