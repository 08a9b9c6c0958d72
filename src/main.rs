use anyhow::Result;
use clap::{Parser, Subcommand};
use xgreedy::algorithm::align;

#[derive(Parser)]
#[command(name = "xgreedy")]
#[command(version = "0.1.0")]
#[command(about = "X-drop greedy alignment of high-identity nucleotide sequences", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Align every query against every subject from a seed
    Align(align::AlignArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Align(args) => {
            align::run(args)?;
        }
    }
    Ok(())
}
