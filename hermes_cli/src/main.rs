use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{generate::GenerateSubcommands, quote::QuoteArgs, simulate::SimulateArgs};

mod generate;
mod parsers;
mod quote;
mod simulate;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,

    /// Environment file loaded before running the command
    #[arg(long, default_value = ".env.local")]
    env_file: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Replays a file of lifecycle events through the pooling engine
    Simulate {
        #[command(flatten)]
        args: SimulateArgs,
    },
    /// Prints a fare quote for a single delivery
    Quote {
        #[command(flatten)]
        args: QuoteArgs,
    },
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    dotenvy::from_filename(&cli.env_file).ok();

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Simulate { args }) => simulate::run(args)?,
        Some(Commands::Quote { args }) => quote::run(args)?,
        Some(Commands::Generate { commands }) => generate::run(commands)?,
        None => {}
    }

    Ok(())
}
