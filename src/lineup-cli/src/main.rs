mod cli;
mod commands;
mod config;
mod dispatch;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "lineup=debug,lineup_cli=debug,warn",
        _ => "lineup=trace,lineup_cli=trace,info",
    };

    // RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = cli.catalog.as_deref();

    match cli.command {
        Commands::Configure {
            default_catalog,
            storage,
            show,
        } => commands::configure::handle(default_catalog, storage, show)?,

        Commands::Items {
            category,
            kind,
            owned,
        } => commands::items::list(catalog, category, kind, owned)?,

        Commands::Item { id } => commands::items::show(catalog, &id)?,

        Commands::Level { command } => dispatch::dispatch_level(catalog, command)?,

        Commands::Best {
            category,
            mode,
            cap,
        } => commands::build::best(catalog, category, mode, cap)?,

        Commands::Build(args) => commands::build::build(catalog, &args)?,
    }

    Ok(())
}
