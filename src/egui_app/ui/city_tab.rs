use super::charts::{self, muted};
use super::style;
use super::*;
use eframe::egui::Ui;

impl EguiApp {
    pub(super) fn render_city_tab(&self, ui: &mut Ui) {
        let Some(breakdown) = self.controller.city_breakdown() else {
            ui.label(muted("The dataset has no grouping column."));
            return;
        };
        let group = &breakdown.group_column;
        ui.strong(format!("{group}-wise Record Count"));
        if breakdown.counts.is_empty() {
            ui.label(muted("No records to group."));
            return;
        }
        let counts: Vec<(String, f64)> = breakdown
            .counts
            .iter()
            .map(|count| (count.key.clone(), count.count as f64))
            .collect();
        charts::bar_chart(ui, &counts, style::palette().accent_ice);

        for (index, means) in breakdown.means.iter().enumerate() {
            ui.add_space(14.0);
            ui.strong(format!("Average {} Levels by {group}", means.pollutant));
            if means.means.is_empty() {
                ui.label(muted("No values recorded."));
                continue;
            }
            charts::bar_chart(ui, &means.means, style::series_color(index));
        }
    }
}
