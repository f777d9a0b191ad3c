use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use statboard::formatting::{Format, OutputFormat, render_analysis};
use statboard::{AnalysisMode, BinningRule, StatsError, analyze, parsing, plot};

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Mode {
    /// One class per distinct value
    #[value(name = "discrete")]
    Discrete,
    /// Values grouped into intervals
    #[value(name = "grouped")]
    Grouped,
}

#[derive(Parser)]
#[command(about = "Frequency tables and descriptive statistics for a sample", version)]
struct Args {
    /// Input file (stdin if not specified)
    input: Option<PathBuf>,

    /// Inline sample, values separated by spaces or commas
    #[arg(short = 'e', long, conflicts_with = "input")]
    values: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Analysis mode
    #[arg(short, long, value_enum, default_value_t = Mode::Discrete)]
    mode: Mode,

    /// Binning rule for grouped mode: sqrt, sturges, scott or a bin count
    #[arg(short, long, default_value = "sturges")]
    bins: BinningRule,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Decimal places in table output
    #[arg(short, long, default_value_t = 2)]
    precision: usize,

    /// Skip the histogram
    #[arg(long)]
    no_plot: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "statboard=warn",
        1 => "statboard=info",
        _ => "statboard=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_sample(args: &Args) -> anyhow::Result<Vec<f64>> {
    if let Some(text) = &args.values {
        return Ok(parsing::parse_values(text)?);
    }
    match &args.input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("error opening {}", path.display()))?;
            parsing::read_file_mmap(&file)
                .with_context(|| format!("error reading {}", path.display()))
        }
        None => Ok(parsing::read_all(io::stdin().lock()).context("error reading stdin")?),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let data = read_sample(&args)?;
    info!(n = data.len(), "read sample");

    let mode = match args.mode {
        Mode::Discrete => AnalysisMode::Discrete,
        Mode::Grouped => AnalysisMode::Grouped(args.bins),
    };

    let analysis = match analyze(&data, mode) {
        Ok(analysis) => analysis,
        Err(StatsError::EmptySample) => {
            eprintln!("no input");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(io::BufWriter::new(
            File::create(path).with_context(|| format!("error creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        OutputFormat::Table => {
            let format = Format {
                precision: args.precision,
            };
            write!(writer, "{}", render_analysis(&analysis, format))?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &analysis)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    drop(writer);

    // The chart only makes sense next to a human-readable table on a terminal
    if args.format == OutputFormat::Table && args.output.is_none() && !args.no_plot {
        println!();
        plot::plot_histogram(&analysis.table);
    }

    Ok(())
}
