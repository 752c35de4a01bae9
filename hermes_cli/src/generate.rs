use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

#[derive(Clone, Copy, ValueEnum)]
pub enum SchemaKind {
    /// Simulation input: an array of lifecycle events
    Events,
    /// Engine parameters file
    Params,
}

#[derive(Subcommand)]
pub enum GenerateSubcommands {
    JsonSchema {
        /// Output file for the schema
        #[arg(long, short = 'o')]
        out: PathBuf,

        #[arg(long, value_enum, default_value_t = SchemaKind::Events)]
        kind: SchemaKind,
    },
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        GenerateSubcommands::JsonSchema { out, kind } => {
            let schema = match kind {
                SchemaKind::Events => hermes_pooling::schema::generate_events_schema()?,
                SchemaKind::Params => hermes_pooling::schema::generate_params_schema()?,
            };

            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }

            std::fs::write(out, schema)?;
        }
    }

    Ok(())
}
