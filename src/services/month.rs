use chrono::{Datelike, Duration, NaiveDate};

use crate::error::AppError;

/// Calendar span of one month plus the coordinates of its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub year: i32,
    pub month: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub prev_year: i32,
    pub prev_month: u32,
    pub next_year: i32,
    pub next_month: u32,
}

impl MonthRange {
    /// Resolve `(year, month)`, month being 1-12.
    /// The last day is the day before the 1st of the following month, so leap years need no table.
    pub fn resolve(year: i32, month: u32) -> Result<Self, AppError> {
        if !(1..=12).contains(&month) {
            return Err(AppError::malformed(format!("month must be between 1 and 12, got {month}")));
        }

        let start_date = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| AppError::malformed(format!("year {year} is out of range")))?;

        let (prev_year, prev_month) = if month == 1 { (year - 1, 12) } else { (year, month - 1) };
        let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };

        let end_date = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .ok_or_else(|| AppError::malformed(format!("year {year} is out of range")))?
            - Duration::days(1);

        Ok(Self {
            year,
            month,
            start_date,
            end_date,
            prev_year,
            prev_month,
            next_year,
            next_month,
        })
    }

    /// Month containing `date`.
    pub fn containing(date: NaiveDate) -> Result<Self, AppError> {
        Self::resolve(date.year(), date.month())
    }

    /// Resolve optional query values, falling back to the month containing `today`.
    pub fn from_query(
        year: Option<&str>,
        month: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, AppError> {
        let year = match blank_to_none(year) {
            Some(raw) => raw
                .parse::<i32>()
                .map_err(|_| AppError::malformed(format!("year must be a number, got {raw:?}")))?,
            None => today.year(),
        };
        let month = match blank_to_none(month) {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| AppError::malformed(format!("month must be a number, got {raw:?}")))?,
            None => today.month(),
        };
        Self::resolve(year, month)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |d| *d <= end)
    }

    pub fn label(&self) -> String {
        self.start_date.format("%B %Y").to_string()
    }
}

fn blank_to_none(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn every_month_spans_first_to_day_before_next_first() {
        for year in [1999, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                let r = MonthRange::resolve(year, month).unwrap();
                assert_eq!(r.start_date, date(year, month, 1));
                let next_first = date(r.next_year, r.next_month, 1);
                assert_eq!(r.end_date, next_first - Duration::days(1));
                assert_eq!(r.end_date.month(), month);
            }
        }
    }

    #[test]
    fn january_wraps_back_to_december() {
        let r = MonthRange::resolve(2024, 1).unwrap();
        assert_eq!((r.prev_year, r.prev_month), (2023, 12));
        assert_eq!((r.next_year, r.next_month), (2024, 2));
    }

    #[test]
    fn december_wraps_forward_to_january() {
        let r = MonthRange::resolve(2024, 12).unwrap();
        assert_eq!((r.next_year, r.next_month), (2025, 1));
        assert_eq!((r.prev_year, r.prev_month), (2024, 11));
        assert_eq!(r.end_date, date(2024, 12, 31));
    }

    #[test]
    fn middle_months_shift_within_year() {
        let r = MonthRange::resolve(2024, 6).unwrap();
        assert_eq!((r.prev_year, r.prev_month), (2024, 5));
        assert_eq!((r.next_year, r.next_month), (2024, 7));
    }

    #[test]
    fn february_follows_leap_years() {
        assert_eq!(MonthRange::resolve(2024, 2).unwrap().end_date, date(2024, 2, 29));
        assert_eq!(MonthRange::resolve(2023, 2).unwrap().end_date, date(2023, 2, 28));
        assert_eq!(MonthRange::resolve(1900, 2).unwrap().end_date, date(1900, 2, 28));
        assert_eq!(MonthRange::resolve(2000, 2).unwrap().end_date, date(2000, 2, 29));
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(MonthRange::resolve(2024, 0).is_err());
        assert!(MonthRange::resolve(2024, 13).is_err());
    }

    #[test]
    fn query_defaults_to_month_of_today() {
        let today = date(2026, 10, 19);
        let r = MonthRange::from_query(None, Some(""), today).unwrap();
        assert_eq!((r.year, r.month), (2026, 10));
        assert_eq!(r.end_date, date(2026, 10, 31));

        let r = MonthRange::from_query(Some("2023"), None, today).unwrap();
        assert_eq!((r.year, r.month), (2023, 10));
    }

    #[test]
    fn query_rejects_garbage() {
        let today = date(2026, 10, 19);
        assert!(MonthRange::from_query(Some("twenty"), None, today).is_err());
        assert!(MonthRange::from_query(None, Some("-1"), today).is_err());
        assert!(MonthRange::from_query(Some("2147483647"), Some("12"), today).is_err());
    }

    #[test]
    fn days_cover_the_whole_month() {
        let r = MonthRange::resolve(2024, 2).unwrap();
        let days: Vec<_> = r.days().collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days.first(), Some(&date(2024, 2, 1)));
        assert_eq!(days.last(), Some(&date(2024, 2, 29)));
    }

    #[test]
    fn containing_matches_resolve() {
        assert_eq!(
            MonthRange::containing(date(2024, 2, 14)).unwrap(),
            MonthRange::resolve(2024, 2).unwrap()
        );
    }
}
