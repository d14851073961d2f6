use eframe::egui::{CentralPanel, Context, Frame, Grid, RichText, ScrollArea, SidePanel, Ui};

use crate::domain::TrendMethod;
use crate::models::SeriesAnalysis;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::PanelUiExt;

use super::app::TrendsApp;

impl TrendsApp {
    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new().fill(UI_CONFIG.colors.side_panel);
        SidePanel::left("left_panel")
            .min_width(UI_CONFIG.side_panel_min_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    ui.section_heading(UI_TEXT.layers_heading);
                    self.layer_toggles(ui);

                    ui.separator();
                    ui.section_heading(UI_TEXT.metrics_heading);
                    for analysis in self.report.analyses() {
                        metrics_table(ui, analysis);
                        ui.add_space(8.0);
                    }
                });
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new().fill(UI_CONFIG.colors.central_panel);
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(self.report.title.as_str())
                        .color(UI_CONFIG.colors.subsection_heading),
                );
                self.plot_view
                    .show_plot(ui, &self.report, &self.visibility, self.focus);
            });
    }

    fn layer_toggles(&mut self, ui: &mut Ui) {
        let visibility = &mut self.visibility;
        ui.checkbox(&mut visibility.local, self.report.local.label.as_str());
        ui.checkbox(&mut visibility.reference, self.report.reference.label.as_str());
        ui.checkbox(&mut visibility.polynomial, TrendMethod::Polynomial.legend_label());
        ui.checkbox(&mut visibility.loess, TrendMethod::Loess.legend_label());
        ui.checkbox(&mut visibility.rolling_mean, TrendMethod::RollingMean.legend_label());
    }
}

fn metrics_table(ui: &mut Ui, analysis: &SeriesAnalysis) {
    ui.series_heading(&analysis.label, &analysis.series.name);

    Grid::new(("metrics", analysis.label.as_str()))
        .striped(true)
        .show(ui, |ui| {
            ui.metrics_header_row();
            for (method, metrics) in &analysis.metrics {
                ui.metrics_row(*method, metrics, analysis.best_method == Some(*method));
            }
        });

    ui.best_fit_line(analysis.best_method);
    for (method, reason) in &analysis.skipped {
        ui.skipped_line(*method, reason);
    }
}
