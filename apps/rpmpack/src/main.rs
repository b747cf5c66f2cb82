//! rpmpack - stage files into an rpmbuild tree and package them as an RPM
//!
//! Configuration comes from `rpmpack.toml`, `RPMPACK_*` environment
//! variables and command line flags, in increasing order of precedence.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{BuildArgs, Cli, Commands};
use crate::display::{CommandResult, OutputRenderer};
use crate::error::CliError;
use crate::events::{execute_with_events, TracingEventHandler};
use clap::Parser;
use rpmpack_builder::{BuildContext, Builder};
use rpmpack_config::{BuildConfig, BuildOptions};
use rpmpack_types::OutputFormat;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let format = cli.global.output_format();

    init_tracing(format == OutputFormat::Json, cli.global.verbose);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting rpmpack v{}", env!("CARGO_PKG_VERSION"));

    let (stage_only, args) = match &cli.command {
        Commands::Build(args) => (false, args),
        Commands::Stage(args) => (true, args),
    };
    let config = load_config(&cli, args).await?;

    let (event_sender, event_receiver) = rpmpack_events::channel();
    let context = BuildContext::new()
        .with_event_sender(event_sender)
        .with_verbose(config.verbose);
    let builder = Builder::new();

    let mut handler = TracingEventHandler;
    let result = execute_with_events(
        async {
            if stage_only {
                builder
                    .prepare(&config, &context)
                    .await
                    .map(CommandResult::Staged)
            } else {
                builder
                    .build(&config, &context)
                    .await
                    .map(CommandResult::Built)
            }
        },
        event_receiver,
        &mut handler,
    )
    .await?;

    OutputRenderer::new(cli.global.output_format()).render_result(&result)?;
    info!("Command completed successfully");
    Ok(())
}

/// File, then environment, then flags, laid over the defaults
async fn load_config(cli: &Cli, args: &BuildArgs) -> Result<BuildConfig, CliError> {
    let mut options = BuildOptions::load_or_default(cli.global.config.as_deref()).await?;
    options.merge_env()?;
    let options = options.merge(args.to_options(cli.global.verbose));

    let mut config = BuildConfig::from_options(options);
    args.apply_program(&mut config.exec_opts);
    Ok(config)
}

fn init_tracing(json_mode: bool, verbose: bool) {
    let default_filter = if verbose {
        "warn,rpmpack=trace"
    } else {
        "warn,rpmpack=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if json_mode {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(filter)
            .init();
    }
}
