use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use tracing::{debug, info};

use crate::astronomical::compute_phase;
use crate::config::Config;
use crate::date_utils::{format_long_date, format_short_date, format_timestamp};
use crate::forecast::forecast;
use crate::icon::build_icon;
use crate::page::{format_days, format_percent, phase_label, ForecastCard, PageModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Collapsed,
    Expanded,
}

impl PanelState {
    fn flipped(self) -> Self {
        match self {
            PanelState::Collapsed => PanelState::Expanded,
            PanelState::Expanded => PanelState::Collapsed,
        }
    }
}

/// Owns the panel state and the page model, and is the only writer of both.
pub struct Presenter {
    config: Config,
    state: PanelState,
    page: PageModel,
}

impl Presenter {
    pub fn new(config: Config) -> Self {
        let mut presenter = Self {
            config,
            state: PanelState::Collapsed,
            page: PageModel::default(),
        };
        presenter.page.toggle_label = presenter.toggle_label();
        presenter
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn page(&self) -> &PageModel {
        &self.page
    }

    /// Recompute today's reading and rewrite the current-phase regions.
    pub fn render_current<Tz: TimeZone>(&mut self, now: &DateTime<Tz>)
    where
        Tz::Offset: Display,
    {
        let reading = compute_phase(now);
        let name = reading.name();
        let today = &mut self.page.today;

        self.page.timestamp = format_timestamp(now);
        today.icon = Some(build_icon(
            reading.phase_fraction,
            self.config.today_icon_size(),
            "today",
        ));
        today.phase_name = phase_label(name);
        today.date = format_long_date(now);
        today.illumination = format_percent(reading.illuminated_fraction, 1);
        today.age = format_days(reading.age_days);
        today.next_full = format!("in {}", format_days(reading.days_until_full()));
        today.next_new = format!("in {}", format_days(reading.days_until_new()));

        debug!(
            phase = reading.phase_fraction,
            illumination = reading.illuminated_fraction,
            "Rendered {}",
            name
        );
    }

    /// Rebuild the forecast cards for the days following `now`.
    pub fn render_forecast<Tz: TimeZone>(&mut self, now: &DateTime<Tz>)
    where
        Tz::Offset: Display,
    {
        let size = self.config.card_icon_size();
        self.page.forecast.cards = forecast(now, self.config.forecast_days)
            .into_iter()
            .map(|day| ForecastCard {
                date: day.date,
                icon: build_icon(
                    day.reading.phase_fraction,
                    size,
                    &format!("day-{}", day.offset),
                ),
                phase_name: phase_label(day.name),
                short_date: format_short_date(&day.instant),
                illumination: format_percent(day.reading.illuminated_fraction, 0),
            })
            .collect();

        debug!(cards = self.page.forecast.cards.len(), "Rendered forecast");
    }

    /// Flip between collapsed and expanded; expanding renders the forecast.
    pub fn toggle<Tz: TimeZone>(&mut self, now: &DateTime<Tz>)
    where
        Tz::Offset: Display,
    {
        self.state = self.state.flipped();
        if self.state == PanelState::Expanded {
            self.render_forecast(now);
        }
        self.page.forecast.visible = self.state == PanelState::Expanded;
        self.page.toggle_label = self.toggle_label();

        info!(state = ?self.state, "Forecast panel toggled");
    }

    /// Periodic refresh.
    pub fn tick<Tz: TimeZone>(&mut self, now: &DateTime<Tz>)
    where
        Tz::Offset: Display,
    {
        self.render_current(now);
        if self.state == PanelState::Expanded {
            self.render_forecast(now);
        }
    }

    fn toggle_label(&self) -> String {
        match self.state {
            PanelState::Collapsed => format!("Show {}-day forecast", self.config.forecast_days),
            PanelState::Expanded => "Hide forecast".to_string(),
        }
    }
}
