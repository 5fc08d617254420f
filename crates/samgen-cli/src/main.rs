//! samgen CLI entrypoint
//! Parses the positional arguments and runs the base and environment injection passes.

// Internal imports (std, crate)
use std::path::PathBuf;
use std::process;

// External imports (alphabetized)
use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use samgen_core::{Config, Invocation};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "samgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Endpoint manifest of the deployable artifact (YAML or JSON)
    artifact: PathBuf,
    /// Directory with sam.yml and samx.yml; outputs are written here
    template_dir: PathBuf,
    /// Target environment (e.g. staging, prod)
    environment: String,
    /// Build counter (non-negative integer)
    build_counter: String,
    /// "0" when the environment stack does not exist yet, anything else otherwise
    stack_flag: String,
    /// Configuration file (default: <template_dir>/samgen.yaml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // stdout is reserved for the failure line
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Parse everything before touching the file system
    let invocation = Invocation::from_args(
        cli.artifact,
        cli.template_dir,
        &cli.environment,
        &cli.build_counter,
        &cli.stack_flag,
    )?;

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::discover(&invocation.template_dir).await?,
    };

    let report = samgen_core::generate(&invocation, &config).await?;
    tracing::info!(
        endpoints = report.endpoints,
        base = %report.base_output.display(),
        environment = %report.environment_output.display(),
        "injection complete"
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let message = e.to_string();
            println!("{}", message.lines().next().unwrap_or_default());
            process::exit(-1);
        }
    };
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        println!("{e:#}");
        process::exit(-1);
    }
}
