use super::charts::{self, muted};
use super::style;
use super::*;
use eframe::egui::Ui;

impl EguiApp {
    pub(super) fn render_visualizations_tab(&self, ui: &mut Ui) {
        ui.heading("Feature Distributions");
        let distributions = self.controller.distributions().unwrap_or_default();
        if distributions.is_empty() {
            ui.label(muted("No pollutant or target columns with values."));
        }
        for (index, distribution) in distributions.iter().enumerate() {
            ui.add_space(10.0);
            ui.strong(format!(
                "Distribution of {} ({} values)",
                distribution.column, distribution.count
            ));
            charts::distribution_chart(ui, distribution, style::series_color(index));
        }

        ui.add_space(16.0);
        ui.heading("Scatter Plots vs Target");
        let plots = self.controller.scatter_plots().unwrap_or_default();
        if plots.is_empty() {
            ui.label(muted("The dataset has no numeric target column."));
        }
        for plot in plots {
            ui.add_space(10.0);
            ui.strong(format!("{} vs {}", plot.pollutant, plot.target));
            charts::scatter_chart(ui, plot);
            charts::legend(ui, plot.groups.iter().map(|group| group.key.as_str()));
        }
    }
}
