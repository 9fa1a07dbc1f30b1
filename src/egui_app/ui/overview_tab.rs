use super::charts::muted;
use super::*;
use crate::egui_app::view_model::{self, PROFILE_HEADERS, SUMMARY_HEADERS};
use eframe::egui::{RichText, Ui};

impl EguiApp {
    pub(super) fn render_overview_tab(&self, ui: &mut Ui) {
        let Some(overview) = self.controller.overview() else {
            return;
        };
        ui.strong("Dataset Preview");
        egui::ScrollArea::horizontal()
            .id_salt("overview_preview")
            .show(ui, |ui| {
                text_table(
                    ui,
                    "preview",
                    overview.preview.headers.as_slice(),
                    &overview.preview.rows,
                );
            });
        ui.add_space(12.0);

        ui.strong("Summary Statistics");
        if overview.summaries.is_empty() {
            ui.label(muted("No numeric columns."));
        } else {
            let rows: Vec<Vec<String>> = overview
                .summaries
                .iter()
                .map(view_model::summary_row)
                .collect();
            egui::ScrollArea::horizontal()
                .id_salt("overview_summary")
                .show(ui, |ui| text_table(ui, "summary", SUMMARY_HEADERS.as_slice(), &rows));
        }
        ui.add_space(12.0);

        ui.strong("Missing Values, Data Types and Unique Values");
        let rows: Vec<Vec<String>> = overview
            .profiles
            .iter()
            .map(view_model::profile_row)
            .collect();
        text_table(ui, "profiles", PROFILE_HEADERS.as_slice(), &rows);
        ui.label(muted(&format!("{} rows in total", overview.row_count)));
    }
}

fn text_table<H: AsRef<str>>(ui: &mut Ui, id: &str, headers: &[H], rows: &[Vec<String>]) {
    egui::Grid::new(id)
        .striped(true)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            for header in headers {
                ui.label(RichText::new(header.as_ref()).strong());
            }
            ui.end_row();
            for row in rows {
                for cell in row {
                    ui.label(cell);
                }
                ui.end_row();
            }
        });
}
