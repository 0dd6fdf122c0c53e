use clap::Parser;

use cli::Commands;

mod cli;
mod scan;
mod util;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    match cli.command {
        Commands::Scan(args) => scan::scan_action(&args),
        Commands::Watch(args) => scan::watch_action(&args),
    }
}
