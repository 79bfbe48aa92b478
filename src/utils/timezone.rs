use chrono::offset::Offset;
use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::AppError;

/// Calendar used for date keys, weekdays and year filtering
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) enum Timezone {
    #[default]
    Local,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    pub(crate) fn to_fixed_offset(self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = utc.with_timezone(&Local);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
            Timezone::Named(tz) => {
                let local = utc.with_timezone(&tz);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
        }
    }

    /// Local calendar date of an epoch-millisecond timestamp
    pub(crate) fn local_date(self, timestamp_ms: i64) -> Option<NaiveDate> {
        let utc = DateTime::<Utc>::from_timestamp_millis(timestamp_ms)?;
        Some(self.to_fixed_offset(utc).date_naive())
    }

    pub(crate) fn year_of(self, timestamp_ms: i64) -> Option<i32> {
        self.local_date(timestamp_ms).map(|d| d.year())
    }

    /// True when no year filter is set or the timestamp falls in that year
    pub(crate) fn in_year(self, year: Option<i32>, timestamp_ms: i64) -> bool {
        match year {
            None => true,
            Some(year) => self.year_of(timestamp_ms) == Some(year),
        }
    }

    pub(crate) fn today(self, now: DateTime<Utc>) -> NaiveDate {
        self.to_fixed_offset(now).date_naive()
    }
}
