//! `check-cov` binary
//!
//! ```text
//! check-cov [OPTIONS] <CRATE_NAME> [FILES]...
//! ```
//!
//! Prints foreign link names, then one line per missing mono-item body.

use clap::builder::FalseyValueParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use monocov_coverage::{render_failure, run, CheckConfig, DiagnosticMode, OutputFormat};
use monocov_metadata::DiscoveryRequest;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter
const LOG_ENV: &str = "MONOCOV_LOG";

fn cli() -> Command {
    Command::new("check-cov")
        .version(monocov_coverage::VERSION)
        .about("Print mono-items whose bodies were not found in compiled crate metadata")
        .arg(
            Arg::new("crate-name")
                .required(true)
                .help("Crate whose metadata document is analysed"),
        )
        .arg(
            Arg::new("files")
                .num_args(0..)
                .value_parser(value_parser!(PathBuf))
                .help("Metadata documents to load; exactly one must name the crate"),
        )
        .arg(
            Arg::new("search-dir")
                .long("search-dir")
                .default_value(".")
                .value_parser(value_parser!(PathBuf))
                .help("Directory searched when no files are given"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .arg(
            Arg::new("sequential")
                .long("sequential")
                .action(ArgAction::SetTrue)
                .help("Process crates one at a time"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .env("DEBUG")
                .action(ArgAction::SetTrue)
                .value_parser(FalseyValueParser::new())
                .help("Show full error detail on failure"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log progress to stderr"),
        )
}

fn init_tracing(matches: &ArgMatches) {
    let default_level = if matches.get_flag("debug") {
        "debug"
    } else if matches.get_flag("verbose") {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn request_from(matches: &ArgMatches) -> DiscoveryRequest {
    let name = matches
        .get_one::<String>("crate-name")
        .cloned()
        .unwrap_or_default();
    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .map(|files| files.cloned().collect())
        .unwrap_or_default();
    let mut request = DiscoveryRequest::new(name).with_files(files);
    if let Some(dir) = matches.get_one::<PathBuf>("search-dir") {
        request = request.with_search_dir(dir.clone());
    }
    request
}

fn config_from(matches: &ArgMatches) -> CheckConfig {
    let diagnostics = if matches.get_flag("debug") {
        DiagnosticMode::Verbose
    } else {
        DiagnosticMode::Brief
    };
    let output = if matches.get_flag("json") {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    CheckConfig::new()
        .with_parallel(!matches.get_flag("sequential"))
        .with_diagnostics(diagnostics)
        .with_output(output)
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_tracing(&matches);

    let request = request_from(&matches);
    let config = config_from(&matches);

    match run(&request, &config) {
        Ok(report) => {
            print!("{}", report.render(config.output));
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", render_failure(&error, config.diagnostics));
            ExitCode::FAILURE
        }
    }
}
