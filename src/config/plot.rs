//! Plot visualization configuration

use eframe::egui::Color32;

pub struct SeriesColors {
    pub raw: Color32,
    pub polynomial: Color32,
    pub loess: Color32,
    pub rolling_mean: Color32,
}

pub struct PlotConfig {
    pub local_colors: SeriesColors,
    pub reference_colors: SeriesColors,
    /// Width of the raw observation lines
    pub raw_line_width: f32,
    /// Width of every fitted trend line
    pub trend_line_width: f32,
    /// Extra space above/below the data range, as a fraction of that range
    pub y_margin_pct: f64,
    /// Initial native window size
    pub window_width: f32,
    pub window_height: f32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    local_colors: SeriesColors {
        raw: Color32::from_rgb(31, 119, 180),         // Blue
        polynomial: Color32::from_rgb(23, 190, 207),  // Cyan
        loess: Color32::from_rgb(44, 160, 44),        // Green
        rolling_mean: Color32::from_rgb(148, 103, 189), // Purple
    },
    reference_colors: SeriesColors {
        raw: Color32::from_rgb(214, 39, 40),          // Red
        polynomial: Color32::from_rgb(255, 127, 14),  // Orange
        loess: Color32::from_rgb(227, 119, 194),      // Pink
        rolling_mean: Color32::from_rgb(188, 189, 34), // Olive
    },
    raw_line_width: 1.5,
    trend_line_width: 2.0,
    y_margin_pct: 0.05,
    window_width: 1200.0,
    window_height: 700.0,
};
