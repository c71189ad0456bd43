//! Lunar phase viewer: a closed-form phase model, SVG moon icons, and an
//! egui window that refreshes every minute and can show a short forecast.

pub mod astronomical;
pub mod config;
pub mod date_utils;
pub mod error;
pub mod forecast;
pub mod icon;
pub mod logging;
pub mod page;
pub mod presenter;
pub mod scheduler;
pub mod ui;
