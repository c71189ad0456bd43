use chrono::{DateTime, Days, Duration, LocalResult, NaiveDateTime, Offset, TimeZone};
use std::fmt::Display;

/// Move an instant forward by whole local calendar days.
///
/// The local date advances by `days` and the wall-clock time is kept, so the
/// elapsed time is 23 or 25 hours across a daylight-saving change. Returns
/// `None` only past the end of the representable calendar.
pub fn add_local_days<Tz: TimeZone>(instant: &DateTime<Tz>, days: u64) -> Option<DateTime<Tz>> {
    let local = instant.naive_local().checked_add_days(Days::new(days))?;
    resolve_local(&instant.timezone(), local)
}

/// Map a wall-clock time to an instant in `tz`.
///
/// Ambiguous times (clocks going back) take the earlier instant. Times that
/// do not exist (clocks going forward) are read with the offset in force
/// before the gap, so 02:30 on a one-hour spring-forward day becomes 03:30.
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let before = local.checked_sub_signed(Duration::days(1))?;
            let offset = tz.from_local_datetime(&before).earliest()?.offset().fix();
            let utc = local.checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))?;
            Some(tz.from_utc_datetime(&utc))
        }
    }
}

pub fn format_timestamp<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    instant.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// e.g. "Sunday, October 18, 2026"
pub fn format_long_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    instant.format("%A, %B %-d, %Y").to_string()
}

/// e.g. "Sun Oct 18"
pub fn format_short_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    instant.format("%a %b %-d").to_string()
}

#[cfg(test)]
pub(crate) mod test_zone {
    use chrono::{FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

    /// A zone at UTC-5 that springs forward to UTC-4 at 02:00 local on
    /// 2024-03-10 and falls back at 02:00 local on 2024-11-03.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EasternLike;

    fn standard() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn daylight() -> FixedOffset {
        FixedOffset::west_opt(4 * 3600).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    impl TimeZone for EasternLike {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            EasternLike
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let spring = at(2024, 3, 10, 2);
            let fall = at(2024, 11, 3, 1);
            if *local < spring {
                LocalResult::Single(standard())
            } else if *local < at(2024, 3, 10, 3) {
                LocalResult::None
            } else if *local < fall {
                LocalResult::Single(daylight())
            } else if *local < at(2024, 11, 3, 2) {
                LocalResult::Ambiguous(daylight(), standard())
            } else {
                LocalResult::Single(standard())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc >= at(2024, 3, 10, 7) && *utc < at(2024, 11, 3, 6) {
                daylight()
            } else {
                standard()
            }
        }
    }
}
