use super::style;
use super::*;
use crate::egui_app::state::EdaTab;
use eframe::egui::{RichText, Ui};

impl EguiApp {
    pub(super) fn render_eda_page(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.heading("Exploratory Data Analysis");
        let dataset = match self.controller.dataset() {
            Ok(dataset) => dataset,
            Err(err) => {
                ui.add_space(8.0);
                ui.label(RichText::new(err.to_string()).color(palette.danger));
                ui.label(
                    RichText::new("Fix the dataset path in config.toml and restart.")
                        .color(palette.text_muted),
                );
                return;
            }
        };
        ui.label(
            RichText::new(format!(
                "{}: {} rows × {} columns",
                dataset.source().display(),
                dataset.row_count(),
                dataset.column_count()
            ))
            .color(palette.text_muted),
        );
        ui.add_space(6.0);
        let mut tab = self.controller.ui.eda_tab;
        ui.horizontal(|ui| {
            for candidate in EdaTab::ALL {
                ui.selectable_value(&mut tab, candidate, candidate.label());
            }
        });
        self.controller.select_tab(tab);
        ui.separator();
        egui::ScrollArea::vertical()
            .id_salt(("eda_scroll", tab.label()))
            .auto_shrink([false, false])
            .show(ui, |ui| match tab {
                EdaTab::Overview => self.render_overview_tab(ui),
                EdaTab::CityWise => self.render_city_tab(ui),
                EdaTab::Correlation => self.render_correlation_tab(ui),
                EdaTab::Visualizations => self.render_visualizations_tab(ui),
            });
    }
}
