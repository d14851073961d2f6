use eframe::egui;
use egui_plot::{AxisHints, Corner, HPlacement, Legend, Plot};

use crate::config::plot::PLOT_CONFIG;
use crate::engine::{Focus, resolve_focus};
use crate::models::{ComparisonReport, SeriesAnalysis};
use crate::ui::app::PlotVisibility;
use crate::ui::config::UI_TEXT;
use crate::ui::plot_layers::{LayerContext, series_layers};
use crate::utils::maths_utils;

/// Y bounds covering the raw series and every fitted value of the shown series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotBounds {
    pub y_min: f64,
    pub y_max: f64,
}

impl PlotBounds {
    pub fn from_report(report: &ComparisonReport, visibility: &PlotVisibility) -> Option<Self> {
        let values: Vec<f64> = visibility
            .visible_analyses(report)
            .into_iter()
            .flat_map(analysis_values)
            .collect();
        if values.is_empty() {
            return None;
        }

        let (y_min, y_max) = maths_utils::get_min_max(&values);
        let margin = ((y_max - y_min) * PLOT_CONFIG.y_margin_pct).max(f64::EPSILON);
        Some(Self {
            y_min: y_min - margin,
            y_max: y_max + margin,
        })
    }
}

fn analysis_values(analysis: &SeriesAnalysis) -> Vec<f64> {
    analysis
        .series
        .values()
        .iter()
        .copied()
        .chain(
            analysis
                .trends
                .iter()
                .filter(|t| t.method.is_evaluated())
                .flat_map(|t| t.values.iter().flatten().copied()),
        )
        .collect()
}

#[derive(Default)]
pub struct PlotView;

impl PlotView {
    pub fn new() -> Self {
        Self
    }

    pub fn show_plot(
        &mut self,
        ui: &mut egui::Ui,
        report: &ComparisonReport,
        visibility: &PlotVisibility,
        focus: Option<Focus>,
    ) {
        let legend = Legend::default().position(Corner::LeftTop);
        let mut plot = Plot::new("trend_plot")
            .legend(legend)
            .custom_x_axes(vec![create_x_axis()])
            .custom_y_axes(vec![create_y_axis(&report.y_axis_title)]);

        if let Some(bounds) = PlotBounds::from_report(report, visibility) {
            plot = plot.include_y(bounds.y_min).include_y(bounds.y_max);
        }

        plot.show(ui, |plot_ui| {
            let layers = series_layers();
            for (shown, analysis, colors) in [
                (visibility.local, &report.local, &PLOT_CONFIG.local_colors),
                (visibility.reference, &report.reference, &PLOT_CONFIG.reference_colors),
            ] {
                if !shown {
                    continue;
                }
                let methods = resolve_focus(analysis, focus);
                let ctx = LayerContext {
                    analysis,
                    colors,
                    visibility,
                    methods: &methods,
                };
                for layer in &layers {
                    layer.render(plot_ui, &ctx);
                }
            }
        });
    }
}

fn create_x_axis() -> AxisHints<'static> {
    AxisHints::new_x()
        .label(UI_TEXT.plot_x_axis)
        .formatter(|grid_mark, _range| format!("{:.0}", grid_mark.value))
}

fn create_y_axis(title: &str) -> AxisHints<'static> {
    AxisHints::new_y()
        .label(title.to_string())
        .formatter(|grid_mark, _range| format!("{:.2}", grid_mark.value))
        .placement(HPlacement::Left)
}
