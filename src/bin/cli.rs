use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use relprov::config::Config;
use relprov::output::OutputFormat;
use relprov::rules::ProbeEngine;
use relprov::ScanOptions;

#[derive(Parser)]
#[command(
    name = "relprov",
    about = "Checks whether a project's releases ship build provenance",
    version,
    author
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the provenance probe over a release snapshot
    Scan {
        /// Path to the release snapshot (JSON)
        snapshot: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json, sarif)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Override the look-back bound (0 = scan every release)
        #[arg(long, env = "RELPROV_LOOKBACK")]
        lookback: Option<usize>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List all available probes
    ListProbes {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .relprov.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Scan {
            snapshot,
            config,
            format,
            lookback,
            output,
        } => cmd_scan(snapshot, config, format, lookback, output),
        Commands::ListProbes { format } => cmd_list_probes(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn cmd_scan(
    snapshot: PathBuf,
    config: Option<PathBuf>,
    format_str: String,
    lookback: Option<usize>,
    output_path: Option<PathBuf>,
) -> Result<i32, relprov::error::ProbeError> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        tracing::warn!(format = %format_str, "unknown format, using console");
        OutputFormat::Console
    });

    let options = ScanOptions {
        config_path: config,
        format,
        lookback_override: lookback,
    };

    let report = relprov::scan(&snapshot, &options)?;
    let rendered = relprov::render_report(&report, format)?;

    match output_path {
        Some(out) => relprov::output::write_report(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // Exit code: 0 = pass, 1 = policy failed
    Ok(if report.verdict.pass { 0 } else { 1 })
}

fn cmd_list_probes(format_str: String) -> Result<i32, relprov::error::ProbeError> {
    let probes = ProbeEngine::new().list_probes()?;

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&probes)?;
            println!("{}", json);
        }
        _ => {
            println!("{:<26} DESCRIPTION", "ID");
            println!("{}", "-".repeat(80));
            for probe in &probes {
                println!("{:<26} {}", probe.id, probe.short);
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, relprov::error::ProbeError> {
    let path = PathBuf::from(".relprov.toml");

    if path.exists() && !force {
        eprintln!(".relprov.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .relprov.toml");

    Ok(0)
}
