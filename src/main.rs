use clap::Parser;
use miette::Result;
use scenesync::cli::{Cli, Commands, ExitStatus};
use tracing::Level;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let printer = scenesync::output::Printer::new();

    let status = match cli.command {
        Commands::Sync(args) => scenesync::cli::sync::run(args, &printer)?,
        Commands::Pad(args) => scenesync::cli::pad::run(args, &printer)?,
        Commands::Convert(args) => scenesync::cli::convert::run(args, &printer)?,
        Commands::Init(args) => {
            scenesync::cli::init::run(args, &printer)?;
            ExitStatus::Success
        }
        Commands::Completions(args) => {
            scenesync::cli::completions::run(args)?;
            ExitStatus::Success
        }
    };

    if status != ExitStatus::Success {
        std::process::exit(status.code());
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}
