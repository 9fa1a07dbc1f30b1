use super::charts::{self, muted};
use super::*;
use eframe::egui::Ui;

impl EguiApp {
    pub(super) fn render_correlation_tab(&self, ui: &mut Ui) {
        let Some(matrix) = self.controller.correlation() else {
            return;
        };
        ui.strong("Correlation heatmap");
        ui.label(muted("Pearson correlation over rows where both columns are present."));
        ui.add_space(6.0);
        charts::heatmap(ui, matrix);
    }
}
