use chrono::NaiveDate;

use crate::astronomical::PhaseName;
use crate::icon::MoonIcon;

/// Every region the window paints, written only by the presenter.
#[derive(Debug, Clone, Default)]
pub struct PageModel {
    pub timestamp: String,
    pub today: TodaySection,
    pub toggle_label: String,
    pub forecast: ForecastPanel,
}

#[derive(Debug, Clone, Default)]
pub struct TodaySection {
    pub icon: Option<MoonIcon>,
    pub phase_name: String,
    pub date: String,
    pub illumination: String,
    pub age: String,
    pub next_full: String,
    pub next_new: String,
}

#[derive(Debug, Clone, Default)]
pub struct ForecastPanel {
    pub visible: bool,
    pub cards: Vec<ForecastCard>,
}

#[derive(Debug, Clone)]
pub struct ForecastCard {
    pub date: NaiveDate,
    pub icon: MoonIcon,
    pub phase_name: String,
    pub short_date: String,
    pub illumination: String,
}

/// "🌔 Waxing Gibbous"
pub fn phase_label(name: PhaseName) -> String {
    format!("{} {}", name.emoji(), name.label())
}

/// Percentage of a `[0, 1]` fraction, with `decimals` places.
pub fn format_percent(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}

pub fn format_days(days: f64) -> String {
    format!("{days:.1} days")
}
