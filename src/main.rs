use clap::Parser;

use caseback::cli::{self, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fields { sales } => cli::fields::run(sales),
        Commands::Preview { file, mapping, sales } => cli::preview::run(&file, &mapping, sales),
        Commands::Report { file, mapping } => cli::report::run(&file, &mapping),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
