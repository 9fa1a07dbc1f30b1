use super::particles::{self, BURST_SECS};
use super::style;
use super::*;
use crate::egui_app::state::PredictionOutcome;
use crate::pollutant::Pollutant;
use eframe::egui::{RichText, Ui};

/// Input layout: three columns, pollutants top to bottom.
const INPUT_COLUMNS: [&[Pollutant]; 3] = [
    &[Pollutant::Co, Pollutant::Co2],
    &[Pollutant::No2, Pollutant::So2],
    &[Pollutant::O3, Pollutant::Pm25, Pollutant::Pm10],
];

impl EguiApp {
    pub(super) fn render_prediction_page(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.heading("Predict AQI");
        ui.label(
            RichText::new("Enter pollutant readings and press Predict Now.")
                .color(palette.text_muted),
        );
        ui.add_space(4.0);
        if let Some(summary) = self.controller.model_summary() {
            ui.label(RichText::new(format!("Model: {summary}")).color(palette.text_muted));
        } else if let Err(err) = self.controller.predictor() {
            ui.label(RichText::new(format!("Model unavailable: {err}")).color(palette.danger));
        }
        ui.add_space(12.0);
        ui.columns(INPUT_COLUMNS.len(), |columns| {
            for (column, pollutants) in columns.iter_mut().zip(INPUT_COLUMNS) {
                for pollutant in pollutants {
                    self.render_input(column, *pollutant);
                }
            }
        });
        ui.add_space(12.0);
        if ui.button(RichText::new("Predict Now").strong()).clicked() {
            self.controller.submit_prediction();
        }
        ui.add_space(12.0);
        self.render_outcome(ui);
        self.render_celebration(ui);
    }

    fn render_input(&mut self, ui: &mut Ui, pollutant: Pollutant) {
        ui.label(pollutant.column_name());
        let value = self.controller.inputs_mut().get_mut(pollutant);
        ui.add(
            egui::DragValue::new(value)
                .speed(0.5)
                .max_decimals(2)
                .update_while_editing(false),
        );
        ui.add_space(8.0);
    }

    fn render_outcome(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        match &self.controller.ui.prediction.outcome {
            None => {}
            Some(PredictionOutcome::Scored(prediction)) => {
                let color = style::bucket_color(prediction.bucket);
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(egui::Stroke::new(2.0, color))
                    .inner_margin(Margin::same(12))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(prediction.headline())
                                .size(22.0)
                                .strong()
                                .color(palette.text_primary),
                        );
                        ui.label(
                            RichText::new(prediction.bucket.message())
                                .size(16.0)
                                .color(color),
                        );
                    });
            }
            Some(PredictionOutcome::Failed(message)) => {
                ui.label(RichText::new(message).color(palette.danger));
            }
        }
    }

    fn render_celebration(&mut self, ui: &mut Ui) {
        let now = ui.ctx().input(|i| i.time);
        let seen = self.controller.ui.prediction.celebrations;
        if seen != self.celebration.0 {
            self.celebration = (seen, Some(now));
        }
        let Some(started) = self.celebration.1 else {
            return;
        };
        let elapsed = now - started;
        if elapsed > BURST_SECS {
            self.celebration.1 = None;
            return;
        }
        let area = ui.max_rect();
        let painter = ui.painter_at(area);
        for particle in particles::burst(area, (elapsed / BURST_SECS) as f32) {
            painter.circle_filled(particle.pos, particle.radius, particle.color);
        }
        ui.ctx().request_repaint();
    }
}
