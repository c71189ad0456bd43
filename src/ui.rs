use std::num::NonZeroUsize;

use chrono::Utc;
use eframe::{App, Frame};
use egui::{self, Context, RichText, Ui, Vec2};
use lru::LruCache;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::MoonError;
use crate::icon::MoonIcon;
use crate::page::ForecastCard;
use crate::presenter::Presenter;
use crate::scheduler::{Clock, RefreshTask, SystemClock};

/// Image URIs recently handed to egui's loaders.
///
/// Every refresh produces new icon documents; the loaders keep each decoded
/// URI until told otherwise, so the least recently painted ones are released.
pub struct IconUriCache {
    recent: LruCache<String, ()>,
}

impl IconUriCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            recent: LruCache::new(capacity),
        }
    }

    /// Marks `uri` as painted; returns the URI evicted to make room, if any.
    pub fn touch(&mut self, uri: &str) -> Option<String> {
        if self.recent.get(uri).is_some() {
            return None;
        }
        self.recent.push(uri.to_owned(), ()).map(|(evicted, _)| evicted)
    }
}

pub struct MoonPhaseApp {
    config: Config,
    clock: SystemClock,
    task: RefreshTask,
    presenter: Presenter,
    uris: IconUriCache,
}

impl MoonPhaseApp {
    pub fn new(config: Config) -> Result<Self, MoonError> {
        config.validate()?;
        let clock = SystemClock;
        let mut task = RefreshTask::from_config(&config)?;
        let mut presenter = Presenter::new(config.clone());

        let now = clock.now();
        presenter.render_current(&now);
        task.start(now.with_timezone(&Utc));
        info!(interval = ?config.refresh_interval, "Refresh task started");

        // Today plus every card, twice over, so one refresh never evicts
        // an icon that is still on screen.
        let capacity = NonZeroUsize::new(2 * (config.forecast_days as usize + 1))
            .unwrap_or(NonZeroUsize::MIN);

        Ok(Self {
            config,
            clock,
            task,
            presenter,
            uris: IconUriCache::new(capacity),
        })
    }

    pub fn is_refreshing(&self) -> bool {
        self.task.is_running()
    }

    /// Stops the refresh task; later frames no longer tick the presenter.
    pub fn shutdown(&mut self) {
        if self.task.is_running() {
            self.task.stop();
            info!("Refresh task stopped");
        }
    }

    pub fn render(&mut self, ctx: &Context) -> bool {
        let mut toggled = false;
        let page = self.presenter.page();
        let uris = &mut self.uris;
        let today_size = self.config.icon_size as f32;
        let card_size = self.config.forecast_icon_size as f32;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("Moon Phase");
                    ui.label(RichText::new(&page.timestamp).monospace());
                    ui.add_space(8.0);
                    if let Some(icon) = &page.today.icon {
                        paint_icon(ui, uris, icon, today_size);
                    }
                    ui.label(RichText::new(&page.today.phase_name).size(22.0));
                    ui.label(&page.today.date);
                });

                ui.separator();
                egui::Grid::new("today_details")
                    .num_columns(2)
                    .spacing([24.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Illumination");
                        ui.label(&page.today.illumination);
                        ui.end_row();
                        ui.label("Age");
                        ui.label(&page.today.age);
                        ui.end_row();
                        ui.label("Next full moon");
                        ui.label(&page.today.next_full);
                        ui.end_row();
                        ui.label("Next new moon");
                        ui.label(&page.today.next_new);
                        ui.end_row();
                    });

                ui.separator();
                if ui.button(&page.toggle_label).clicked() {
                    toggled = true;
                }
                if page.forecast.visible {
                    render_forecast(ui, uris, &page.forecast.cards, card_size);
                }
            });
        });

        toggled
    }
}

fn render_forecast(ui: &mut Ui, uris: &mut IconUriCache, cards: &[ForecastCard], size: f32) {
    ui.add_space(8.0);
    egui::ScrollArea::horizontal()
        .id_source("forecast_cards")
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                for card in cards {
                    ui.group(|ui| {
                        ui.vertical_centered(|ui| {
                            paint_icon(ui, uris, &card.icon, size);
                            ui.label(RichText::new(&card.phase_name).small());
                            ui.label(&card.short_date);
                            ui.label(RichText::new(&card.illumination).weak());
                        });
                    });
                }
            });
        });
}

fn paint_icon(ui: &mut Ui, uris: &mut IconUriCache, icon: &MoonIcon, size: f32) {
    let uri = icon.uri();
    if let Some(stale) = uris.touch(&uri) {
        debug!(uri = %stale, "Releasing icon image");
        ui.ctx().forget_image(&stale);
    }
    ui.add(
        egui::Image::from_bytes(uri, icon.svg.clone().into_bytes())
            .fit_to_exact_size(Vec2::splat(size)),
    );
}

impl App for MoonPhaseApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        let now = self.clock.now();
        let now_utc = now.with_timezone(&Utc);

        if self.task.poll(now_utc) {
            self.presenter.tick(&now);
        }
        if self.render(ctx) {
            self.presenter.toggle(&now);
            ctx.request_repaint();
        }
        if let Some(wait) = self.task.time_until_due(now_utc) {
            ctx.request_repaint_after(wait);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.shutdown();
    }
}
