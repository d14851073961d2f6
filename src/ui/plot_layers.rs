use egui_plot::{Line, LineStyle, PlotPoints, PlotUi};

use crate::config::plot::{PLOT_CONFIG, SeriesColors};
use crate::domain::TrendMethod;
use crate::models::SeriesAnalysis;
use crate::ui::app::PlotVisibility;

/// Context passed to every layer during rendering.
/// This prevents argument explosion.
pub struct LayerContext<'a> {
    pub analysis: &'a SeriesAnalysis,
    pub colors: &'a SeriesColors,
    pub visibility: &'a PlotVisibility,
    /// Trend methods the chart is restricted to (focus mode) or all evaluated methods.
    pub methods: &'a [TrendMethod],
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, ui: &mut PlotUi, ctx: &LayerContext);
}

// ============================================================================
// 1. RAW SERIES LAYER
// ============================================================================
pub struct RawSeriesLayer;

impl PlotLayer for RawSeriesLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let series = &ctx.analysis.series;
        let points: Vec<[f64; 2]> = series
            .points()
            .map(|(year, value)| [year as f64, value])
            .collect();

        // Legend shows the column name, e.g. "Israel Anomaly"
        plot_ui.line(
            Line::new(series.name.as_str(), PlotPoints::new(points))
                .color(ctx.colors.raw)
                .width(PLOT_CONFIG.raw_line_width),
        );
    }
}

// ============================================================================
// 2. TREND LAYER (one fitted curve)
// ============================================================================
pub struct TrendLayer {
    pub method: TrendMethod,
}

impl PlotLayer for TrendLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if !ctx.methods.contains(&self.method) || !ctx.visibility.shows(self.method) {
            return;
        }
        let Some(trend) = ctx.analysis.trend(self.method) else {
            return;
        };

        let points: Vec<[f64; 2]> = trend
            .defined_points(ctx.analysis.series.years())
            .map(|(year, value)| [year as f64, value])
            .collect();
        if points.is_empty() {
            return;
        }

        let label = format!("{} {}", ctx.analysis.label, self.method.legend_label());
        let (color, style) = trend_style(self.method, ctx.colors);

        plot_ui.line(
            Line::new(label, PlotPoints::new(points))
                .color(color)
                .width(PLOT_CONFIG.trend_line_width)
                .style(style),
        );
    }
}

// ============================================================================
// HELPER FUNCTIONS (Private to this module)
// ============================================================================

fn trend_style(method: TrendMethod, colors: &SeriesColors) -> (eframe::egui::Color32, LineStyle) {
    match method {
        TrendMethod::Polynomial => (colors.polynomial, LineStyle::dashed_loose()),
        TrendMethod::Loess => (colors.loess, LineStyle::dotted_dense()),
        TrendMethod::RollingMean | TrendMethod::RollingStd => {
            (colors.rolling_mean, LineStyle::dashed_dense())
        }
    }
}

/// Layer stack for one series, bottom to top.
pub fn series_layers() -> Vec<Box<dyn PlotLayer>> {
    vec![
        Box::new(RawSeriesLayer),
        Box::new(TrendLayer {
            method: TrendMethod::Polynomial,
        }),
        Box::new(TrendLayer {
            method: TrendMethod::Loess,
        }),
        Box::new(TrendLayer {
            method: TrendMethod::RollingMean,
        }),
    ]
}
