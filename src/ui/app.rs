use eframe::{Frame, egui};
use serde::Serialize;

use crate::config::DEBUG_FLAGS;
use crate::domain::TrendMethod;
use crate::engine::Focus;
use crate::models::{ComparisonReport, SeriesAnalysis};
use crate::ui::ui_plot_view::PlotView;
use crate::ui::utils::setup_custom_visuals;

/// Which series and trend lines are drawn. Toggled from the side panel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlotVisibility {
    pub local: bool,
    pub reference: bool,
    pub polynomial: bool,
    pub loess: bool,
    pub rolling_mean: bool,
}

impl Default for PlotVisibility {
    fn default() -> Self {
        Self {
            local: true,
            reference: true,
            polynomial: true,
            loess: true,
            rolling_mean: true,
        }
    }
}

impl PlotVisibility {
    pub fn shows(&self, method: TrendMethod) -> bool {
        match method {
            TrendMethod::Polynomial => self.polynomial,
            TrendMethod::Loess => self.loess,
            TrendMethod::RollingMean => self.rolling_mean,
            TrendMethod::RollingStd => false,
        }
    }

    pub fn visible_analyses<'a>(&self, report: &'a ComparisonReport) -> Vec<&'a SeriesAnalysis> {
        let mut shown = Vec::with_capacity(2);
        if self.local {
            shown.push(&report.local);
        }
        if self.reference {
            shown.push(&report.reference);
        }
        shown
    }
}

/// Read-only chart window over a finished comparison.
pub struct TrendsApp {
    pub(super) report: ComparisonReport,
    pub(super) focus: Option<Focus>,
    pub(super) visibility: PlotVisibility,
    pub(super) plot_view: PlotView,
}

impl TrendsApp {
    pub fn new(_cc: &eframe::CreationContext, report: ComparisonReport, focus: Option<Focus>) -> Self {
        Self {
            report,
            focus,
            visibility: PlotVisibility::default(),
            plot_view: PlotView::new(),
        }
    }
}

impl eframe::App for TrendsApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Chart window closed.");
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.render_side_panel(ctx);
        self.render_central_panel(ctx);
    }
}
