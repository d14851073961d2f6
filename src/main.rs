use anyhow::Result;
use clap::Parser;
use eframe::NativeOptions;
use eframe::egui::ViewportBuilder;

use climate_trends::config::plot::PLOT_CONFIG;
use climate_trends::data::{write_report_json, write_trends_csv};
use climate_trends::engine::print_report;
use climate_trends::ui::config::UI_TEXT;
use climate_trends::{Cli, run_analysis, run_app};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Compute (aborts on loader errors)
    let report = run_analysis(&args)?;
    print_report(&report);

    // D. Optional exports
    if let Some(path) = &args.report_json {
        write_report_json(path, &report)?;
        log::info!("Report written to {}", path.display());
    }
    if let Some(path) = &args.trends_csv {
        write_trends_csv(path, &report)?;
        log::info!("Trends written to {}", path.display());
    }

    // E. Optional chart window
    if args.plot {
        let options = NativeOptions {
            viewport: ViewportBuilder::default()
                .with_inner_size([PLOT_CONFIG.window_width, PLOT_CONFIG.window_height]),
            ..Default::default()
        };
        let focus = args.focus;
        eframe::run_native(
            UI_TEXT.window_title,
            options,
            Box::new(move |cc| Ok(run_app(cc, report, focus))),
        )
        .map_err(|e| anyhow::anyhow!("Chart window failed: {}", e))?;
    }

    Ok(())
}
