use clap::Parser;
use tracing_subscriber::EnvFilter;

use gear_solver::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("gear_solver=debug,info")
    } else {
        EnvFilter::new("gear_solver=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Table(args) => {
            cli::table::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Find(args) => {
            cli::find::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Trains(args) => {
            cli::trains::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Profile(args) => {
            cli::profile::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
