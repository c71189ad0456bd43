use chrono::{DateTime, NaiveDate, TimeZone};

use crate::astronomical::{compute_phase, PhaseName, PhaseReading};
use crate::date_utils::add_local_days;

/// One upcoming day in the forecast.
#[derive(Debug, Clone)]
pub struct ForecastDay<Tz: TimeZone> {
    /// Days after the base date, starting at 1.
    pub offset: u32,
    /// Local calendar date the entry belongs to.
    pub date: NaiveDate,
    /// The base instant moved forward `offset` local days.
    pub instant: DateTime<Tz>,
    pub reading: PhaseReading,
    pub name: PhaseName,
}

/// Readings for the `days` local calendar days following `base`.
///
/// Each entry keeps the base wall-clock time on its own date; the date, not
/// the elapsed time, identifies the entry.
pub fn forecast<Tz: TimeZone>(base: &DateTime<Tz>, days: u32) -> Vec<ForecastDay<Tz>> {
    (1..=days)
        .filter_map(|offset| {
            let instant = add_local_days(base, u64::from(offset))?;
            let reading = compute_phase(&instant);
            Some(ForecastDay {
                offset,
                date: instant.date_naive(),
                name: reading.name(),
                reading,
                instant,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_utils::test_zone::EasternLike;
    use chrono::{Days, FixedOffset, Utc};

    #[test]
    fn test_seven_consecutive_dates() {
        let tz = FixedOffset::west_opt(7 * 3600).unwrap();
        let base = tz.with_ymd_and_hms(2026, 10, 28, 23, 30, 0).unwrap();
        let days = forecast(&base, 7);

        assert_eq!(days.len(), 7);
        for (i, day) in days.iter().enumerate() {
            let expected = base.date_naive() + Days::new(i as u64 + 1);
            assert_eq!(day.offset, i as u32 + 1);
            assert_eq!(day.date, expected);
        }
        assert_eq!(days[6].date, NaiveDate::from_ymd_opt(2026, 11, 4).unwrap());
    }

    #[test]
    fn test_dates_stay_consecutive_across_dst() {
        let base = EasternLike.with_ymd_and_hms(2024, 3, 7, 0, 30, 0).unwrap();
        let days = forecast(&base, 7);

        let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
        let expected: Vec<NaiveDate> = (8..=14)
            .map(|d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap())
            .collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn test_readings_match_instants() {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        for day in forecast(&base, 7) {
            assert_eq!(day.reading, compute_phase(&day.instant));
            assert_eq!(day.name, day.reading.name());
        }
    }

    #[test]
    fn test_phase_advances_about_one_thirtieth_per_day() {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let start = compute_phase(&base).phase_fraction;
        let days = forecast(&base, 7);
        let step = (days[0].reading.phase_fraction - start).rem_euclid(1.0);
        assert!((step - 1.0 / crate::astronomical::SYNODIC_MONTH_DAYS).abs() < 1e-9);
    }
}
