//! Radar plotter command line.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use netcdf_parser::{silence_hdf5_errors, NetCdfSource};
use radar_common::{derive_title, RadarVariable, VolumeSource};
use radar_plotter::logging::{self, LogFormat};
use radar_plotter::{Plotter, PlotterConfig, RunOptions, DEFAULT_CONFIG_PATH};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "radar-plotter")]
#[command(about = "Render IMN X-band radar scans to PNG maps")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    run: RunArgs,

    /// Log level
    #[arg(long, global = true, env = "RADAR_PLOTTER_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every configured variable and preset (default)
    Run(RunArgs),

    /// List the variables stored in a scan file
    Inspect {
        file: PathBuf,
    },

    /// Print the title and image name derived from a scan file name
    Title {
        file: String,

        /// Variable tag (VELH, DBZV, DBZH, VELV)
        #[arg(short, long)]
        variable: String,
    },
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Configuration file; built-in defaults are used if it does not exist
    #[arg(short, long, env = "RADAR_PLOTTER_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory with scan files
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory for rendered images
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Logo image
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Only render these presets (repeatable)
    #[arg(long = "preset")]
    presets: Vec<String>,

    /// Stop at the first failing item
    #[arg(long)]
    fail_fast: bool,
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_format)?;

    match cli.command.unwrap_or(Command::Run(cli.run)) {
        Command::Run(args) => run(args),
        Command::Inspect { file } => inspect(file),
        Command::Title { file, variable } => title(&file, &variable),
    }
}

fn run(args: RunArgs) -> Result<ExitCode> {
    silence_hdf5_errors();

    let mut config = PlotterConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(dir) = args.input_dir {
        config.input_dir = dir;
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if let Some(logo) = args.logo {
        config.logo = logo;
    }

    info!(
        input_dir = %config.input_dir.display(),
        output_dir = %config.output_dir.display(),
        variables = ?config.variables,
        "Starting radar plotter"
    );

    let source = NetCdfSource::new();
    let options = RunOptions {
        fail_fast: args.fail_fast,
        presets: args.presets,
    };
    let plotter = Plotter::new(config, &source, options)?;
    let report = match plotter.run() {
        Ok(report) => report,
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Run aborted");
            return Ok(ExitCode::FAILURE);
        }
    };

    report.log_summary();
    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn inspect(file: PathBuf) -> Result<ExitCode> {
    silence_hdf5_errors();

    let names = NetCdfSource::new()
        .variable_names(&file)
        .with_context(|| format!("inspecting {}", file.display()))?;
    println!("{}", file.display());
    for name in &names {
        println!("  {}", name);
    }
    let known: Vec<&str> = RadarVariable::ALL
        .iter()
        .map(|v| v.tag())
        .filter(|tag| names.iter().any(|n| n == tag))
        .collect();
    println!("radar variables: {}", if known.is_empty() { "none".to_string() } else { known.join(", ") });
    Ok(ExitCode::SUCCESS)
}

fn title(file: &str, variable: &str) -> Result<ExitCode> {
    let derived = derive_title(variable, file)?;
    println!("{}", derived.title);
    println!("{}", derived.image_name);
    Ok(ExitCode::SUCCESS)
}
