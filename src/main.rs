use anyhow::Result;
use autoupdate_catalog::cli::{Cli, Commands};
use autoupdate_catalog::commands;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Init => commands::init::run(&cli),
        Commands::Check => commands::check::run(&cli),
        Commands::List => commands::list::run(&cli).await,
        Commands::Show { names } => commands::show::run(&cli, names).await,
        Commands::Icon { name, output } => commands::icon::run(&cli, name, output).await,
        Commands::Snapshot { output, names } => {
            commands::snapshot::run(&cli, output, names).await
        }
    }
}
