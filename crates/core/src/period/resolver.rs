//! Keyword-driven period resolution.
//!
//! Rules are checked in a fixed priority order; the first keyword found wins:
//! `today`, `yesterday`, `week`, `month`, `year`. For the week/month/year rules
//! the words `last` or `previous` select the preceding unit. Text that matches
//! no rule resolves to the current month.
//!
//! Every rule also matches its Ukrainian forms, so untranslated queries such as
//! "скільки я витратив минулого місяця" resolve the same way.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::error::PeriodError;
use super::types::{DateRange, PeriodKind, ResolvedPeriod};

const TODAY: &[&str] = &["today", "сьогодн"];
const YESTERDAY: &[&str] = &["yesterday", "day before", "вчора", "учора"];
const WEEK: &[&str] = &["week", "тиждень", "тижн"];
const MONTH: &[&str] = &["month", "місяц"];
const YEAR: &[&str] = &["year", "рік", "року", "році"];
const PREVIOUS: &[&str] = &["last", "previous", "минул", "попередн"];

fn mentions(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Resolves free-text time references to date ranges.
pub struct PeriodResolver;

impl PeriodResolver {
    /// Resolves `text` relative to `now`.
    ///
    /// Never fails: unmatched text yields the current month.
    #[must_use]
    pub fn resolve(text: &str, now: NaiveDateTime) -> ResolvedPeriod {
        let text = text.to_lowercase();
        let kind = Self::classify(&text);
        ResolvedPeriod {
            kind,
            range: Self::range_for(kind, now),
        }
    }

    /// Picks the rule for already lowercased text.
    #[must_use]
    pub fn classify(text: &str) -> PeriodKind {
        let previous = mentions(text, PREVIOUS);

        if mentions(text, TODAY) {
            PeriodKind::Today
        } else if mentions(text, YESTERDAY) {
            PeriodKind::Yesterday
        } else if mentions(text, WEEK) {
            if previous {
                PeriodKind::LastWeek
            } else {
                PeriodKind::ThisWeek
            }
        } else if mentions(text, MONTH) {
            if previous {
                PeriodKind::LastMonth
            } else {
                PeriodKind::ThisMonth
            }
        } else if mentions(text, YEAR) {
            if previous {
                PeriodKind::LastYear
            } else {
                PeriodKind::ThisYear
            }
        } else {
            PeriodKind::ThisMonth
        }
    }

    /// Computes the concrete range of `kind` relative to `now`.
    #[must_use]
    pub fn range_for(kind: PeriodKind, now: NaiveDateTime) -> DateRange {
        let today = now.date();

        match kind {
            PeriodKind::Today => DateRange::open(midnight(today)),
            PeriodKind::Yesterday => {
                let yesterday = today - Duration::days(1);
                DateRange::closed(midnight(yesterday), end_of_day(yesterday))
            }
            PeriodKind::ThisWeek => DateRange::open(midnight(week_start(today))),
            PeriodKind::LastWeek => {
                let start = week_start(today) - Duration::days(7);
                DateRange::closed(midnight(start), end_of_day(start + Duration::days(6)))
            }
            PeriodKind::ThisMonth => DateRange::open(midnight(month_start(today))),
            PeriodKind::LastMonth => {
                let current = month_start(today);
                let start = month_start(current - Duration::days(1));
                DateRange::closed(midnight(start), midnight(current) - Duration::seconds(1))
            }
            PeriodKind::ThisYear => DateRange::open(midnight(year_start(today))),
            PeriodKind::LastYear => {
                let current = year_start(today);
                let start = year_start(current - Duration::days(1));
                DateRange::closed(midnight(start), midnight(current) - Duration::seconds(1))
            }
        }
    }
}

/// Returns `[first instant of the month, first instant of the next month)`.
///
/// # Errors
///
/// Returns `PeriodError::InvalidMonth` if `month` is not in 1..=12 or the
/// year is out of the supported calendar range.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDateTime, NaiveDateTime), PeriodError> {
    let invalid = || PeriodError::InvalidMonth { year, month };

    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1).ok_or_else(invalid)?, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;

    Ok((midnight(start), midnight(next)))
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    midnight(date) + Duration::days(1) - Duration::seconds(1)
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

fn year_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.ordinal0()))
}
