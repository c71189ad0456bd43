use chrono::{DateTime, Duration, Local, TimeZone, Utc};

use crate::config::Config;
use crate::error::MoonError;

/// Source of the current instant.
pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;
}

/// The host's wall clock in its local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ManualClock<Tz: TimeZone> {
    now: DateTime<Tz>,
}

#[cfg(test)]
impl<Tz: TimeZone> ManualClock<Tz> {
    pub fn new(now: DateTime<Tz>) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, by: Duration) {
        self.now = self.now.clone() + by;
    }
}

#[cfg(test)]
impl<Tz: TimeZone> Clock for ManualClock<Tz> {
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.now.clone()
    }
}

/// A repeating task polled from the frame loop.
///
/// Fires at most once per poll. After firing it re-arms one interval after
/// the poll instant, so late polls push the schedule back instead of
/// bursting.
#[derive(Debug, Clone)]
pub struct RefreshTask {
    interval: Duration,
    next_due: Option<DateTime<Utc>>,
}

impl RefreshTask {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, MoonError> {
        let interval = Duration::from_std(config.refresh_interval)
            .map_err(|_| MoonError::InvalidRefreshInterval)?;
        if interval <= Duration::zero() {
            return Err(MoonError::InvalidRefreshInterval);
        }
        Ok(Self::new(interval))
    }

    pub fn start(&mut self, now: DateTime<Utc>) {
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true when the task is due, and re-arms it.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next firing; zero when overdue, `None` when stopped.
    pub fn time_until_due(&self, now: DateTime<Utc>) -> Option<std::time::Duration> {
        self.next_due
            .map(|due| (due - now).to_std().unwrap_or(std::time::Duration::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{PanelState, Presenter};

    fn start_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_not_due_before_interval() {
        let mut clock = ManualClock::new(start_instant());
        let mut task = RefreshTask::new(Duration::seconds(60));
        task.start(clock.now());

        clock.advance(Duration::seconds(59));
        assert!(!task.poll(clock.now()));
        assert_eq!(
            task.time_until_due(clock.now()),
            Some(std::time::Duration::from_secs(1))
        );

        clock.advance(Duration::seconds(1));
        assert!(task.poll(clock.now()));
        assert!(!task.poll(clock.now()));
    }

    #[test]
    fn test_late_poll_fires_once_and_rearms_from_poll_time() {
        let mut clock = ManualClock::new(start_instant());
        let mut task = RefreshTask::new(Duration::seconds(60));
        task.start(clock.now());

        clock.advance(Duration::seconds(200));
        assert!(task.poll(clock.now()));
        assert!(!task.poll(clock.now()));
        assert_eq!(
            task.time_until_due(clock.now()),
            Some(std::time::Duration::from_secs(60))
        );
    }

    #[test]
    fn test_stopped_task_never_fires() {
        let mut clock = ManualClock::new(start_instant());
        let mut task = RefreshTask::new(Duration::seconds(60));
        assert!(!task.is_running());

        task.start(clock.now());
        assert!(task.is_running());
        task.stop();
        clock.advance(Duration::minutes(10));
        assert!(!task.poll(clock.now()));
        assert_eq!(task.time_until_due(clock.now()), None);
    }

    #[test]
    fn test_from_config() {
        let task = RefreshTask::from_config(&Config::default()).unwrap();
        assert_eq!(task.interval, Duration::seconds(60));

        let zero = Config {
            refresh_interval: std::time::Duration::ZERO,
            ..Config::default()
        };
        assert!(matches!(
            RefreshTask::from_config(&zero),
            Err(MoonError::InvalidRefreshInterval)
        ));
    }

    #[test]
    fn test_simulated_hour_drives_presenter() {
        let mut clock = ManualClock::new(start_instant());
        let mut task = RefreshTask::from_config(&Config::default()).unwrap();
        let mut presenter = Presenter::new(Config::default());
        presenter.render_current(&clock.now());
        task.start(clock.now());

        let mut ticks = 0;
        for _ in 0..3600 {
            clock.advance(Duration::seconds(1));
            if task.poll(clock.now()) {
                presenter.tick(&clock.now());
                ticks += 1;
            }
            if ticks == 30 && presenter.state() == PanelState::Collapsed {
                presenter.toggle(&clock.now());
            }
        }

        assert_eq!(ticks, 60);
        assert_eq!(presenter.page().timestamp, "2026-10-18 10:00:00");
        assert_eq!(presenter.state(), PanelState::Expanded);
        assert_eq!(presenter.page().forecast.cards.len(), 7);
    }
}
