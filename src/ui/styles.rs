use eframe::egui::{Color32, RichText, Ui};

use crate::domain::TrendMethod;
use crate::models::EvaluationMetrics;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::utils::format_metric;

/// Column titles of the per-series metrics grid.
const METRIC_COLUMNS: [&str; 5] = ["Method", "R2", "MAE", "RMSE", "n"];

/// Styled pieces of the side panel, added directly to `egui::Ui`.
pub trait PanelUiExt {
    /// Upper-case monospace title of a panel section.
    fn section_heading(&mut self, text: &str);

    /// Series label with the source column it was read from.
    fn series_heading(&mut self, label: &str, column: &str);

    /// Title row of the metrics grid. Call inside `Grid::show`.
    fn metrics_header_row(&mut self);

    /// One method's scores. Call inside `Grid::show`.
    fn metrics_row(&mut self, method: TrendMethod, metrics: &EvaluationMetrics, is_best: bool);

    fn best_fit_line(&mut self, best: Option<TrendMethod>);

    fn skipped_line(&mut self, method: TrendMethod, reason: &str);
}

impl PanelUiExt for Ui {
    fn section_heading(&mut self, text: &str) {
        self.heading(
            RichText::new(text.to_uppercase())
                .color(UI_CONFIG.colors.heading)
                .monospace(),
        );
    }

    fn series_heading(&mut self, label: &str, column: &str) {
        self.horizontal(|ui| {
            ui.label(RichText::new(label).color(UI_CONFIG.colors.subsection_heading));
            ui.label(RichText::new(format!("({})", column)).small().color(UI_CONFIG.colors.label));
        });
    }

    fn metrics_header_row(&mut self) {
        for title in METRIC_COLUMNS {
            self.label(RichText::new(title).small().color(UI_CONFIG.colors.label));
        }
        self.end_row();
    }

    fn metrics_row(&mut self, method: TrendMethod, metrics: &EvaluationMetrics, is_best: bool) {
        let color = metrics_row_color(is_best);
        let cell = |text: String| RichText::new(text).monospace().color(color);

        self.label(RichText::new(method.metrics_label()).color(color));
        self.label(cell(format_metric(metrics.r2)));
        self.label(cell(format_metric(metrics.mae)));
        self.label(cell(format_metric(metrics.rmse)));
        self.label(cell(metrics.n.to_string()));
        self.end_row();
    }

    fn best_fit_line(&mut self, best: Option<TrendMethod>) {
        let color = match best {
            Some(_) => UI_CONFIG.colors.best_method,
            None => UI_CONFIG.colors.label,
        };
        self.label(RichText::new(best_fit_text(best)).small().color(color));
    }

    fn skipped_line(&mut self, method: TrendMethod, reason: &str) {
        self.label(
            RichText::new(format!("{} {}: {}", UI_TEXT.skipped_label, method, reason))
                .small()
                .color(UI_CONFIG.colors.skipped_method),
        );
    }
}

fn metrics_row_color(is_best: bool) -> Color32 {
    if is_best {
        UI_CONFIG.colors.best_method
    } else {
        UI_CONFIG.colors.label
    }
}

/// "Best fit: LOESS", or "Best fit: none" when no method had comparable scores.
pub fn best_fit_text(best: Option<TrendMethod>) -> String {
    let method = best.map_or("none", TrendMethod::metrics_label);
    format!("{}: {}", UI_TEXT.best_fit_label, method)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_fit_text() {
        assert_eq!(best_fit_text(Some(TrendMethod::Loess)), "Best fit: LOESS");
        assert_eq!(best_fit_text(None), "Best fit: none");
    }

    #[test]
    fn test_best_row_is_highlighted() {
        assert_eq!(metrics_row_color(true), UI_CONFIG.colors.best_method);
        assert_ne!(metrics_row_color(true), metrics_row_color(false));
    }
}
