mod platform;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use triage_engine::ServiceConfig;

use platform::app::AppConfig;
use platform::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "eml_triage")]
#[command(about = "Upload an .eml file, pick its content and classify it", long_about = None)]
struct Cli {
    /// Base URL of the email service (endpoints live under /email/...).
    #[arg(long, env = "EML_TRIAGE_API_BASE_URL")]
    api_base_url: String,

    /// Choose this file at startup, as if typed with `open`.
    #[arg(long)]
    file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    log_destination: LogDestination,

    #[arg(long, default_value = "info", value_parser = parse_log_level)]
    log_level: LevelFilter,

    /// Disable ANSI styling in the terminal view.
    #[arg(long)]
    no_color: bool,
}

fn parse_log_level(raw: &str) -> Result<LevelFilter, String> {
    engine_logging::parse_level(raw).ok_or_else(|| format!("unknown log level {raw:?}"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    platform::logging::initialize(cli.log_destination, cli.log_level);

    let service = ServiceConfig::new(&cli.api_base_url).context("invalid --api-base-url")?;
    platform::app::run_app(AppConfig {
        service,
        initial_file: cli.file,
        color: !cli.no_color,
    })
}
