//! egui renderer for the dashboard.
use std::time::Duration;

use crate::animation;
use crate::egui_app::controller::DashboardController;
use crate::egui_app::state::{AnimationState, Page};
use crate::resources::AppResources;
use crate::settings::{self, Settings};
use eframe::egui::{self, Frame, Margin, RichText};

mod animation_card;
mod charts;
mod city_tab;
mod correlation_tab;
mod eda_panel;
mod overview_tab;
mod particles;
mod prediction_panel;
pub mod style;
mod visualizations_tab;

/// Minimum window size that keeps the three input columns and charts readable.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(960.0, 640.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: DashboardController,
    visuals_set: bool,
    /// Celebration counter already seen and when the current burst started.
    celebration: (u64, Option<f64>),
}

impl EguiApp {
    /// Load settings, resources and start the animation fetch.
    pub fn new() -> Result<Self, String> {
        let settings =
            settings::load_or_default().map_err(|err| format!("Failed to load config: {err}"))?;
        let resources = AppResources::load(&settings, &settings::data_search_dirs());
        Ok(Self::from_parts(&settings, resources))
    }

    fn from_parts(settings: &Settings, resources: AppResources) -> Self {
        let mut controller = DashboardController::new(resources, settings.eda.clone());
        controller.attach_animation(animation::spawn_fetch(&settings.animation));
        Self {
            controller,
            visuals_set: false,
            celebration: (0, None),
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("header")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.heading(RichText::new("Air Quality Prediction App").color(palette.text_primary));
                ui.label(
                    RichText::new(
                        "Predict the Air Quality Index from pollutant readings and explore the historical data.",
                    )
                    .color(palette.text_muted),
                );
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::new().fill(egui::Color32::from_rgb(0, 0, 0)))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(9.0, 11.0),
                        9.0,
                        status.badge_color,
                    );
                    ui.add_space(24.0);
                    ui.label(RichText::new(&status.badge_label).color(egui::Color32::WHITE));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(egui::Color32::WHITE));
                });
            });
    }

    fn render_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("navigation")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading("Navigation");
                ui.add_space(6.0);
                self.render_animation_card(ui);
                ui.separator();
                ui.label("Go to");
                let current = self.controller.ui.page;
                for candidate in Page::ALL {
                    if ui.radio(current == candidate, candidate.label()).clicked() {
                        self.controller.select_choice(candidate.label());
                    }
                }
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        if self.controller.poll_animation() {
            ctx.request_repaint();
        }
        if self.controller.ui.animation == AnimationState::Loading {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
        self.render_header(ctx);
        self.render_status(ctx);
        self.render_sidebar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| match self.controller.ui.page {
            Page::Prediction => self.render_prediction_page(ui),
            Page::Eda => self.render_eda_page(ui),
        });
    }
}
