use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use spec_map_scan::config::{ConfigFile, ScanConfig};
use spec_map_scan::output::{OutputFormat, format_report, store_markdown};
use spec_map_scan::tag::TagMode;
use spec_map_scan::{ScanError, build_report};

#[derive(Debug, Parser)]
#[command(name = "spec-map")]
#[command(about = "Map tagged test descriptions to requirements")]
#[command(override_usage = "spec-map [OPTIONS] <TEST_FILES>...")]
struct Cli {
    /// Test source files to scan, in order.
    test_files: Vec<PathBuf>,
    /// Path to file with requirements.
    #[arg(long, value_name = "PATH")]
    reqs: Option<PathBuf>,
    /// Filepath for output of specification map [default: docs/specifications-map.md].
    #[arg(long, value_name = "PATH")]
    spec_map: Option<PathBuf>,
    /// Whether to store the specification map to disk.
    #[arg(long)]
    store: bool,
    /// YAML configuration file; flags override its values.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Test function whose first string argument is a description (repeatable).
    #[arg(long = "test-fn", value_name = "NAME")]
    test_functions: Vec<String>,
    /// How tags are detected in descriptions.
    #[arg(long, value_enum)]
    tag_mode: Option<TagMode>,
    /// Format of the report printed to stdout.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => exit_with(err),
    };
    if config.test_files.is_empty() {
        Cli::command()
            .error(ErrorKind::MissingRequiredArgument, "Please specify test files")
            .exit();
    }

    if let Err(err) = run(&config, cli.format) {
        exit_with(err);
    }
}

fn run(config: &ScanConfig, format: OutputFormat) -> Result<(), ScanError> {
    let report = build_report(config)?;
    print!("{}", format_report(&report, format)?);

    if config.store {
        eprintln!(
            "Storing specification map in {}",
            config.spec_map_output.display()
        );
        store_markdown(&config.spec_map_output, &report)?;
    }
    Ok(())
}

/// Layers defaults, the optional config file and command-line flags.
fn resolve_config(cli: &Cli) -> Result<ScanConfig, ScanError> {
    let mut config = ScanConfig::default();
    if let Some(path) = &cli.config {
        config = config.with_file(ConfigFile::load(path)?);
    }

    config.test_files.extend(cli.test_files.iter().cloned());
    if let Some(reqs) = &cli.reqs {
        config.requirements_file = Some(reqs.clone());
    }
    if let Some(spec_map) = &cli.spec_map {
        config.spec_map_output = spec_map.clone();
    }
    if cli.store {
        config.store = true;
    }
    if !cli.test_functions.is_empty() {
        config.test_functions = cli.test_functions.clone();
    }
    if let Some(tag_mode) = cli.tag_mode {
        config.tag_mode = tag_mode;
    }
    Ok(config)
}

fn exit_with(err: ScanError) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = match cli.verbose {
        0 if cli.quiet => EnvFilter::new("error"),
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(cli.verbose >= 2),
        )
        .init();
}
