/// Errors raised while configuring or launching the viewer.
///
/// The phase model, icon builder and presenter are total; only configuration
/// and window creation can fail.
#[derive(Debug, thiserror::Error)]
pub enum MoonError {
    #[error("Invalid icon size: {0}, expected a positive finite number")]
    InvalidIconSize(f64),

    #[error("Refresh interval must be non-zero and fit a calendar duration")]
    InvalidRefreshInterval,

    #[error("Forecast must cover at least one day, got {0}")]
    InvalidForecastDays(u32),

    #[error("Failed to run the window: {0}")]
    Gui(#[from] eframe::Error),
}
