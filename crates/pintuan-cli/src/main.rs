mod cli;
mod cmd;
mod error;
mod format;
mod io;

pub use cli::{Cli, Command, OutputFormat, PathOrStdin};

use clap::Parser;

use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("{}", err.message());
        std::process::exit(err.exit_code());
    }
}

/// Reads the input for the active subcommand and dispatches to it.
fn run(cli: &Cli) -> Result<(), CliError> {
    let sheet = cli.sheet.as_deref();
    match &cli.command {
        Command::Inspect { file } => {
            let bytes = io::read_input(file, cli.max_file_size)?;
            cmd::inspect::run(&bytes, sheet, &cli.format)
        }
        Command::Convert { file, output } => {
            let bytes = io::read_input(file, cli.max_file_size)?;
            cmd::convert::run(&bytes, sheet, output.as_deref())
        }
        Command::Check { file } => {
            let bytes = io::read_input(file, cli.max_file_size)?;
            cmd::check::run(
                &bytes,
                sheet,
                &cli.format,
                cli.quiet,
                cli.verbose,
                cli.no_color,
            )
        }
    }
}
