use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::info;

use deadfunc::report::{JsonReporter, Report, TerminalReporter};
use deadfunc::{Analyzer, Settings, SnapshotLoader};

/// deadfunc - Whole-program dead function detection
#[derive(Parser, Debug)]
#[command(name = "deadfunc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Program snapshot file, or a directory of snapshot files
    #[arg(default_value = ".")]
    snapshot: PathBuf,

    /// Path to configuration file (TOML, YAML, or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Package-path filter (regular expression). Default: only packages
    /// at or under the root module's path
    #[arg(short, long)]
    filter: Option<String>,

    /// Include test-only packages and their entry points
    #[arg(long)]
    tests: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(report) => {
            if !report.is_empty() {
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("{:?}", err);
            std::process::exit(2);
        }
    }
}

fn run(cli: &Cli) -> Result<Report> {
    info!("deadfunc v{}", env!("CARGO_PKG_VERSION"));

    let settings = load_settings(cli)?;

    let loader = SnapshotLoader::new(&cli.snapshot);
    let report = Analyzer::new(settings).run(&loader).into_diagnostic()?;

    match cli.format {
        OutputFormat::Terminal => TerminalReporter::new().report(&report)?,
        OutputFormat::Json => JsonReporter::new(cli.output.clone()).report(&report)?,
    }

    Ok(report)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = if let Some(config_path) = &cli.config {
        Settings::from_file(config_path)?
    } else {
        Settings::default()
    };

    // CLI arguments override config values.
    if let Some(filter) = &cli.filter {
        settings.filter = filter.clone();
    }
    if cli.tests {
        settings.tests = true;
    }

    // Relative paths in the report are computed against the invocation
    // directory unless the config says otherwise.
    if settings.working_dir == PathBuf::from(".") {
        settings.working_dir = std::env::current_dir().into_diagnostic()?;
    }

    Ok(settings)
}
