mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::{error, Level};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate the accessible surface area (or contact area) of each atom
    Atoms(cli::atoms::Args),
    /// Calculate absolute and relative accessibilities of each residue
    Residues(cli::residues::Args),
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match &args.command {
        Commands::Atoms(args) => cli::atoms::run(args),
        Commands::Residues(args) => cli::residues::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
