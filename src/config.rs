use std::time::Duration;

use crate::error::MoonError;
use crate::icon::{IconSize, DEFAULT_ICON_SIZE};

/// Configuration for the moon phase window
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// How often the current reading (and an open forecast) is recomputed.
    pub refresh_interval: Duration,
    /// Number of days shown in the forecast panel.
    pub forecast_days: u32,
    pub icon_size: f64,
    pub forecast_icon_size: f64,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(60),
            forecast_days: 7,
            icon_size: DEFAULT_ICON_SIZE,
            forecast_icon_size: 56.0,
            window_size: [520.0, 640.0],
            min_window_size: [360.0, 420.0],
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), MoonError> {
        if self.refresh_interval.is_zero()
            || chrono::Duration::from_std(self.refresh_interval).is_err()
        {
            return Err(MoonError::InvalidRefreshInterval);
        }
        if self.forecast_days == 0 {
            return Err(MoonError::InvalidForecastDays(self.forecast_days));
        }
        IconSize::new(self.icon_size)?;
        IconSize::new(self.forecast_icon_size)?;
        Ok(())
    }

    pub fn today_icon_size(&self) -> IconSize {
        IconSize::or_default(Some(self.icon_size))
    }

    pub fn card_icon_size(&self) -> IconSize {
        IconSize::or_default(Some(self.forecast_icon_size))
    }
}
