//! Server-side HTML for every page the journal serves.

use chrono::NaiveDate;

use crate::{
    models::entry::{EntryFields, JournalEntry, ListOrder, DATE_FORMAT},
    services::month::MonthRange,
};

/// Suggestions offered for the free-text health field.
pub const HEALTH_SUGGESTIONS: &[&str] = &["good", "okay", "tired", "sick"];

const STYLE: &str = "body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,Helvetica,Arial,sans-serif;max-width:820px;margin:24px auto;padding:0 16px;color:#1f2937;background:#f9fafb}\
nav a{margin-right:16px;color:#2563eb;text-decoration:none;font-weight:600}\
table{width:100%;border-collapse:collapse;font-size:14px;background:#fff}\
th,td{padding:6px 8px;border-bottom:1px solid #e5e7eb;text-align:left;vertical-align:top}\
form.entry label{display:block;margin:10px 0 4px}\
.muted{color:#6b7280}.error{color:#b91c1c}";

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width,initial-scale=1">
  <title>{title}</title>
  <style>{STYLE}</style>
</head>
<body>
  <nav><a href="/">New entry</a><a href="/entries">Entries</a><a href="/visualization">Month</a></nav>
  <h1>{title}</h1>
  {content}
</body>
</html>"#,
        title = escape(title),
    )
}

fn check(flag: bool) -> &'static str {
    if flag {
        "✓"
    } else {
        ""
    }
}

fn checked(flag: bool) -> &'static str {
    if flag {
        " checked"
    } else {
        ""
    }
}

fn entry_form(action: &str, fields: &EntryFields, submit_label: &str) -> String {
    let suggestions: String = HEALTH_SUGGESTIONS
        .iter()
        .map(|h| format!(r#"<option value="{h}">"#))
        .collect();

    format!(
        r#"<form class="entry" method="post" action="{action}">
    <label for="entry_date">Date</label>
    <input type="date" id="entry_date" name="entry_date" value="{date}" required>
    <label><input type="checkbox" name="reading"{reading}> Reading</label>
    <label><input type="checkbox" name="exercise"{exercise}> Exercise</label>
    <label><input type="checkbox" name="flossing"{flossing}> Flossing</label>
    <label for="no_meat">Meat-free meals</label>
    <input type="number" id="no_meat" name="no_meat" min="0" value="{no_meat}">
    <label for="health">Health</label>
    <input type="text" id="health" name="health" list="health-options" value="{health}">
    <datalist id="health-options">{suggestions}</datalist>
    <label for="notes">Notes</label>
    <textarea id="notes" name="notes" rows="5" cols="60">{notes}</textarea>
    <p><button type="submit">{submit_label}</button></p>
  </form>"#,
        date = fields.entry_date.format(DATE_FORMAT),
        reading = checked(fields.reading),
        exercise = checked(fields.exercise),
        flossing = checked(fields.flossing),
        no_meat = fields.no_meat,
        health = escape(&fields.health),
        notes = escape(&fields.notes),
    )
}

/// GET / — empty form, dated today.
pub fn new_entry_page(today: NaiveDate, default_health: &str) -> String {
    let mut fields = EntryFields::new(today);
    fields.health = default_health.to_string();
    layout("Daily journal", &entry_form("/submit", &fields, "Save entry"))
}

/// GET /edit/{id}
pub fn edit_entry_page(entry: &JournalEntry) -> String {
    let content = format!(
        r#"<p class="muted">Created {created}</p>
  {form}
  <form method="post" action="/delete/{id}">
    <button type="submit">Delete entry</button>
  </form>"#,
        created = entry.created_at.format("%Y-%m-%d %H:%M UTC"),
        form = entry_form(&format!("/edit/{}", entry.id), &entry.fields(), "Update entry"),
        id = entry.id,
    );
    layout(&format!("Edit entry for {}", entry.entry_date.format(DATE_FORMAT)), &content)
}

/// GET /entries
pub fn entries_page(entries: &[JournalEntry], order: ListOrder) -> String {
    let sort_links = match order {
        ListOrder::IdDesc => r#"<p class="muted">Newest first · <a href="/entries?sort=date">sort by date</a></p>"#,
        _ => r#"<p class="muted">By date · <a href="/entries">sort by newest</a></p>"#,
    };

    if entries.is_empty() {
        return layout(
            "Entries",
            &format!(r#"{sort_links}<p class="muted">No entries yet. <a href="/">Write the first one.</a></p>"#),
        );
    }

    let mut rows = String::new();
    for entry in entries {
        rows.push_str(&format!(
            r#"<tr><td><a href="/edit/{id}">{date}</a></td><td>{reading}</td><td>{exercise}</td><td>{flossing}</td><td>{no_meat}</td><td>{health}</td><td>{notes}</td></tr>"#,
            id = entry.id,
            date = entry.entry_date.format(DATE_FORMAT),
            reading = check(entry.reading),
            exercise = check(entry.exercise),
            flossing = check(entry.flossing),
            no_meat = entry.no_meat,
            health = escape(&entry.health),
            notes = escape(&entry.notes),
        ));
    }

    layout(
        "Entries",
        &format!(
            r#"{sort_links}
  <table>
    <tr><th>Date</th><th>Reading</th><th>Exercise</th><th>Flossing</th><th>No meat</th><th>Health</th><th>Notes</th></tr>
    {rows}
  </table>"#
        ),
    )
}

/// Habit counts over one month.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MonthSummary {
    pub days_with_entries: usize,
    pub reading_days: usize,
    pub exercise_days: usize,
    pub flossing_days: usize,
    pub no_meat_total: i64,
}

impl MonthSummary {
    /// A day counts for a habit when any of its entries has the flag set.
    pub fn from_entries(range: &MonthRange, entries: &[JournalEntry]) -> Self {
        let mut summary = Self::default();
        for day in range.days() {
            let todays: Vec<&JournalEntry> = entries.iter().filter(|e| e.entry_date == day).collect();
            if todays.is_empty() {
                continue;
            }
            summary.days_with_entries += 1;
            summary.reading_days += usize::from(todays.iter().any(|e| e.reading));
            summary.exercise_days += usize::from(todays.iter().any(|e| e.exercise));
            summary.flossing_days += usize::from(todays.iter().any(|e| e.flossing));
            summary.no_meat_total += todays.iter().map(|e| e.no_meat).sum::<i64>();
        }
        summary
    }
}

/// GET /visualization — one row per day of the month, entries in date order.
pub fn visualization_page(range: &MonthRange, entries: &[JournalEntry]) -> String {
    let nav = format!(
        r#"<p><a href="/visualization?year={py}&amp;month={pm}">&larr; previous</a> · <strong>{label}</strong> · <a href="/visualization?year={ny}&amp;month={nm}">next &rarr;</a></p>"#,
        py = range.prev_year,
        pm = range.prev_month,
        ny = range.next_year,
        nm = range.next_month,
        label = escape(&range.label()),
    );

    let mut rows = String::new();
    for day in range.days() {
        let todays: Vec<&JournalEntry> = entries.iter().filter(|e| e.entry_date == day).collect();
        if todays.is_empty() {
            rows.push_str(&format!(
                r#"<tr class="muted"><td>{}</td><td></td><td></td><td></td><td></td><td></td></tr>"#,
                day.format("%a %d")
            ));
            continue;
        }
        for entry in todays {
            rows.push_str(&format!(
                r#"<tr><td><a href="/edit/{id}">{day}</a></td><td>{reading}</td><td>{exercise}</td><td>{flossing}</td><td>{no_meat}</td><td>{health}</td></tr>"#,
                id = entry.id,
                day = day.format("%a %d"),
                reading = check(entry.reading),
                exercise = check(entry.exercise),
                flossing = check(entry.flossing),
                no_meat = entry.no_meat,
                health = escape(&entry.health),
            ));
        }
    }

    let summary = MonthSummary::from_entries(range, entries);
    let totals = format!(
        r#"<p>{days} days logged · reading {reading} · exercise {exercise} · flossing {flossing} · meat-free meals {no_meat}</p>"#,
        days = summary.days_with_entries,
        reading = summary.reading_days,
        exercise = summary.exercise_days,
        flossing = summary.flossing_days,
        no_meat = summary.no_meat_total,
    );

    layout(
        &format!("Month of {}", range.label()),
        &format!(
            r#"{nav}
  {totals}
  <table>
    <tr><th>Day</th><th>Reading</th><th>Exercise</th><th>Flossing</th><th>No meat</th><th>Health</th></tr>
    {rows}
  </table>"#
        ),
    )
}

pub fn error_page(title: &str, message: &str) -> String {
    layout(
        title,
        &format!(
            r#"<p class="error">{}</p><p><a href="/">Back to the journal</a></p>"#,
            escape(message)
        ),
    )
}
