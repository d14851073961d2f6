use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use climate_trends::data::{prepare_precipitation, write_precipitation_csv};

/// Turn the per-country precipitation table into the year / global / local CSV
/// read by `climate-trends precipitation`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Wide table: code, name, then one column per year (YYYY or YYYY-MM)
    #[arg(long)]
    input: PathBuf,

    /// Output CSV
    #[arg(long, default_value = "data/Precipitation_analysis.csv")]
    output: PathBuf,

    /// Value of the `name` column selecting the local series
    #[arg(long, default_value = "Israel")]
    local_name: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let rows = prepare_precipitation(&args.input, &args.local_name)
        .with_context(|| format!("Failed to prepare precipitation from {:?}", args.input))?;
    write_precipitation_csv(&args.output, &rows)
        .with_context(|| format!("Failed to write {:?}", args.output))?;

    println!("File saved to {}", args.output.display());
    Ok(())
}
