//! Period types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%d.%m.%Y";

/// A date range with an inclusive start and an optional inclusive end.
///
/// `end = None` means "open-ended, up to now". All timestamps are naive local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First instant of the range.
    pub start: NaiveDateTime,
    /// Last instant of the range, if bounded.
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    /// A range from `start` up to the reference "now".
    #[must_use]
    pub const fn open(start: NaiveDateTime) -> Self {
        Self { start, end: None }
    }

    /// A range bounded on both sides.
    #[must_use]
    pub const fn closed(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Returns the end of the range, substituting `now` for an open end.
    #[must_use]
    pub fn effective_end(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.end.unwrap_or(now)
    }

    /// Returns true if `ts` lies within the range (both ends inclusive).
    #[must_use]
    pub fn contains(&self, ts: NaiveDateTime, now: NaiveDateTime) -> bool {
        ts >= self.start && ts <= self.effective_end(now)
    }
}

/// Which keyword rule produced a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// Since midnight today.
    Today,
    /// The whole of yesterday.
    Yesterday,
    /// Since Monday of the current week.
    ThisWeek,
    /// Monday through Sunday of the previous week.
    LastWeek,
    /// Since the first of the current month. Also the default.
    ThisMonth,
    /// The whole previous calendar month.
    LastMonth,
    /// Since January 1 of the current year.
    ThisYear,
    /// The whole previous calendar year.
    LastYear,
}

impl PeriodKind {
    /// Human-readable name of the period.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::ThisWeek => "this week",
            Self::LastWeek => "last week",
            Self::ThisMonth => "this month",
            Self::LastMonth => "last month",
            Self::ThisYear => "this year",
            Self::LastYear => "last year",
        }
    }
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A resolved period: the matched rule plus the concrete range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPeriod {
    /// The rule that matched.
    pub kind: PeriodKind,
    /// The concrete range.
    pub range: DateRange,
}

impl ResolvedPeriod {
    /// Short label, e.g. "last month".
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.kind.label()
    }

    /// Explicit dates, e.g. "01.04.2025 - 30.04.2025" or "since 05.05.2025".
    #[must_use]
    pub fn range_text(&self) -> String {
        let start = self.range.start.format(DATE_FORMAT);
        match self.range.end {
            Some(end) => format!("{start} - {}", end.format(DATE_FORMAT)),
            None => format!("since {start}"),
        }
    }
}

impl std::fmt::Display for ResolvedPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.range_text())
    }
}
