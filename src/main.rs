use clap::Parser;
use geo_layer_map::build_map;
use geo_layer_map::utils::config::MapConfig;
use geo_layer_map::utils::error::Result;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Generates an interactive map page from local GeoJSON layers.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file with datasets, palette and styling. Paths in it are relative to the file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where to write the page, overriding the configured output.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Compute layer extents on a thread pool.
    #[arg(long)]
    parallel: bool,
}

fn run(args: Args) -> Result<PathBuf> {
    let (mut config, base_dir) = match &args.config {
        Some(path) => (
            MapConfig::from_path(path)?,
            path.parent().map(Path::to_path_buf).unwrap_or_default(),
        ),
        None => (MapConfig::default(), PathBuf::new()),
    };
    if let Some(output) = args.output {
        // Relative to where the command runs, not to the config file.
        config.output = std::env::current_dir()?.join(output);
    }
    config.parallel |= args.parallel;

    let output = build_map(&config, &base_dir)?;
    Ok(output.canonicalize().unwrap_or(output))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(output) => {
            println!("[OK] Map written to {}", output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
