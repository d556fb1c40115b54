//! polybench-report CLI - renders benchmark result tables as log-log charts
//!
//! Usage:
//!   polybench-report render [--config <file>] [--input <file>...] [--output <dir>] [--format svg|png]
//!   polybench-report summary [--config <file>] [--input <file>...]
//!
//! `render` writes `benchmark-1` (absolute time) and `benchmark-2` (time per
//! vertex) into the output directory. `summary` loads the same inputs and
//! prints what was measured without drawing anything.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use polybench_report::{
    BenchmarkTable, OutputFormat, ReportConfig, Result, build_report, generate_report,
};

#[derive(Parser)]
#[command(name = "polybench-report")]
#[command(about = "Render polygon benchmark results as log-log charts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct InputArgs {
    /// JSON configuration file (defaults are used for missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Result files to plot, replacing the configured inputs
    #[arg(short, long = "input")]
    inputs: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write both charts
    Render {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output directory for the chart images
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Image format (svg or png)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Print a per-file summary of the loaded results
    Summary {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let result = match cli.command {
        Commands::Render {
            inputs,
            output,
            format,
        } => run_render(&inputs, output, format),
        Commands::Summary { inputs } => run_summary(&inputs),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Build the configuration from the config file and command-line overrides.
fn load_config(args: &InputArgs) -> Result<ReportConfig> {
    let mut config = match &args.config {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };
    if !args.inputs.is_empty() {
        config = config.with_inputs(args.inputs.iter().cloned());
    }
    Ok(config)
}

fn run_render(
    args: &InputArgs,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let mut config = load_config(args)?;
    if let Some(dir) = output {
        config.output_dir = dir;
    }
    if let Some(format) = format {
        config.format = format;
    }

    println!("\n{}", "=".repeat(60));
    println!("BENCHMARK REPORT");
    println!("{}", "=".repeat(60));
    for input in config.enabled_inputs() {
        println!("  Input: {}", input.display());
    }

    let written = generate_report(&config)?;

    println!("\n{}", "-".repeat(60));
    for path in &written {
        println!("  Written: {}", path.display());
    }
    Ok(())
}

fn run_summary(args: &InputArgs) -> Result<()> {
    let config = load_config(args)?;
    let report = build_report(&config)?;

    for (run, table) in report.dataset.iter().enumerate() {
        println!("\n{}", "=".repeat(60));
        println!("Run {}: {}", run + 1, table.source.display());
        println!("{}", "=".repeat(60));
        print_table_summary(table, &config.series_names);
    }
    Ok(())
}

fn print_table_summary(table: &BenchmarkTable, names: &[String]) {
    let (min_size, max_size) = table
        .input_sizes()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    println!("  Rows: {}", table.len());
    println!("  Vertices: {:.0} .. {:.0}", min_size, max_size);
    println!();
    println!(
        "  {:<16} {:>9} {:>14} {:>16}",
        "Series", "Measured", "Max vertices", "Time/vertex"
    );

    for (competitor, name) in names.iter().enumerate() {
        let measured: Vec<(f64, f64)> = table
            .timings(competitor)
            .filter(|(_, t)| !t.is_nan())
            .collect();

        // Largest input that was still measured
        let largest = measured
            .iter()
            .copied()
            .max_by(|a, b| a.0.total_cmp(&b.0));

        match largest {
            Some((size, elapsed)) => println!(
                "  {:<16} {:>5}/{:<3} {:>14.0} {:>16.3e}",
                name,
                measured.len(),
                table.len(),
                size,
                elapsed / size
            ),
            None => println!(
                "  {:<16} {:>5}/{:<3} {:>14} {:>16}",
                name,
                0,
                table.len(),
                "-",
                "-"
            ),
        }
    }
}
