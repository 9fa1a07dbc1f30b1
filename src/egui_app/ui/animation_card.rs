use super::style;
use super::*;
use crate::animation::AnimationInfo;
use eframe::egui::{RichText, Sense, Stroke, Ui};

const MIN_CARD_HEIGHT: f32 = 64.0;
const MAX_CARD_HEIGHT: f32 = 150.0;
const RINGS: usize = 3;

impl EguiApp {
    pub(super) fn render_animation_card(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        match &self.controller.ui.animation {
            AnimationState::Disabled => {}
            AnimationState::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Loading animation…").color(palette.text_muted));
                });
            }
            AnimationState::Failed(reason) => {
                ui.label(RichText::new("Animation failed to load.").color(palette.warning))
                    .on_hover_text(reason);
            }
            AnimationState::Ready(info) => render_pulse(ui, info),
        }
    }
}

/// Looping pulse sized by the animation's aspect ratio and timed by its frame range.
fn render_pulse(ui: &mut Ui, info: &AnimationInfo) {
    let palette = style::palette();
    let width = ui.available_width();
    let height = (width / info.aspect()).clamp(MIN_CARD_HEIGHT, MAX_CARD_HEIGHT);
    let (rect, response) = ui.allocate_exact_size(egui::vec2(width, height), Sense::hover());
    let painter = ui.painter_at(rect);
    let time = ui.ctx().input(|i| i.time);
    let phase = info.phase(time);
    let max_radius = rect.height().min(rect.width()) * 0.45;
    for ring in 0..RINGS {
        let t = (phase + ring as f32 / RINGS as f32).fract();
        let alpha = ((1.0 - t) * 200.0).round() as u8;
        let color = egui::Color32::from_rgba_unmultiplied(
            palette.accent_mint.r(),
            palette.accent_mint.g(),
            palette.accent_mint.b(),
            alpha,
        );
        painter.circle_stroke(rect.center(), 6.0 + t * max_radius, Stroke::new(2.0, color));
    }
    painter.circle_filled(rect.center(), 6.0, palette.accent_mint);
    if let Some(name) = &info.name {
        response.on_hover_text(name);
    }
    ui.ctx().request_repaint();
}
