use clap::Parser;

use latbox::cli::{check, enumerate, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Enumerate(args) => enumerate::run(args),
        Commands::Check(args) => check::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
