//! Civil timezone bucketing
//!
//! Classifies UTC timestamps into calendar day/week/month/year buckets under
//! a fixed civil offset. The offset is not a DST-aware named zone: boundary
//! results near a DST transition may be off by the DST delta. That is a
//! documented limitation of the data contract, not something this module
//! papers over.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};

use crate::types::{CreatrackError, DateBucket, Result};

/// Timestamp classifier for one fixed civil offset.
///
/// "Now" is injected at construction so preset buckets are deterministic
/// under test.
#[derive(Debug, Clone, Copy)]
pub struct Bucketing {
    offset: FixedOffset,
    now: DateTime<Utc>,
}

impl Bucketing {
    pub fn new(offset: FixedOffset) -> Self {
        Self::with_now(offset, Utc::now())
    }

    pub fn with_now(offset: FixedOffset, now: DateTime<Utc>) -> Self {
        Self { offset, now }
    }

    /// Build from a whole-hour UTC offset (e.g. 9 for UTC+09:00)
    pub fn from_offset_hours(hours: i32) -> Result<Self> {
        let offset = FixedOffset::east_opt(hours * 3600)
            .ok_or_else(|| CreatrackError::Config(format!("invalid utc offset: {hours}")))?;
        Ok(Self::new(offset))
    }

    /// Local calendar date of a UTC timestamp under the fixed offset
    pub fn local_date(&self, ts: DateTime<Utc>) -> NaiveDate {
        ts.with_timezone(&self.offset).date_naive()
    }

    fn today(&self) -> NaiveDate {
        self.local_date(self.now)
    }

    pub fn is_today(&self, ts: DateTime<Utc>) -> bool {
        self.local_date(ts) == self.today()
    }

    pub fn is_yesterday(&self, ts: DateTime<Utc>) -> bool {
        self.local_date(ts) == self.today() - chrono::Duration::days(1)
    }

    /// Same ISO week (year + week number) as now, in local time
    pub fn same_iso_week(&self, ts: DateTime<Utc>) -> bool {
        self.local_date(ts).iso_week() == self.today().iso_week()
    }

    pub fn same_month(&self, ts: DateTime<Utc>) -> bool {
        let (date, today) = (self.local_date(ts), self.today());
        date.year() == today.year() && date.month() == today.month()
    }

    pub fn same_year(&self, ts: DateTime<Utc>) -> bool {
        self.local_date(ts).year() == self.today().year()
    }

    /// Inclusive custom range: local day-start of `from` through local
    /// day-end of `to` (comparing truncated local dates is equivalent).
    pub fn in_range(&self, ts: DateTime<Utc>, from: NaiveDate, to: NaiveDate) -> bool {
        let date = self.local_date(ts);
        date >= from && date <= to
    }

    /// Single entry point used by the date filter stage
    pub fn matches(&self, bucket: DateBucket, ts: DateTime<Utc>) -> bool {
        match bucket {
            DateBucket::All => true,
            DateBucket::Today => self.is_today(ts),
            DateBucket::Yesterday => self.is_yesterday(ts),
            DateBucket::ThisWeek => self.same_iso_week(ts),
            DateBucket::ThisMonth => self.same_month(ts),
            DateBucket::ThisYear => self.same_year(ts),
            DateBucket::Range { from, to } => self.in_range(ts, from, to),
        }
    }
}
