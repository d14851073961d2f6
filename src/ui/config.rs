use eframe::egui::Color32;

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub best_method: Color32,
    pub skipped_method: Color32,
}

/// Static strings shown in the chart window
#[derive(Clone, Copy)]
pub struct UiText {
    pub window_title: &'static str,
    pub plot_x_axis: &'static str,
    pub metrics_heading: &'static str,
    pub layers_heading: &'static str,
    pub best_fit_label: &'static str,
    pub skipped_label: &'static str,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub side_panel_min_width: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::YELLOW,
        subsection_heading: Color32::ORANGE,
        central_panel: Color32::from_rgb(20, 20, 24),
        side_panel: Color32::from_rgb(25, 25, 25),
        best_method: Color32::from_rgb(130, 200, 140),
        skipped_method: Color32::from_rgb(255, 100, 100),
    },
    side_panel_min_width: 260.0,
};

pub static UI_TEXT: UiText = UiText {
    window_title: "Climate Trends",
    plot_x_axis: "Year",
    metrics_heading: "Metrics",
    layers_heading: "Layers",
    best_fit_label: "Best fit",
    skipped_label: "Skipped",
};
