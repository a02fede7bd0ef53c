//! Command-line host for the slot-based encumbrance engine.
//!
//! Reads an actor snapshot, runs one recomputation pass and reports the
//! derived state.
//!
//! ```bash
//! cargo run -p sbe -- derive aldric.json --config rules.json --write
//! RUST_LOG=sbe_core=debug cargo run -p sbe -- derive aldric.json
//! ```

mod report;

use anyhow::{Context, Result};
use clap::Parser;
use sbe_core::persist::load_config;
use sbe_core::{ActorSnapshot, Audience, EncumbranceConfig, EncumbranceEngine};
use std::path::PathBuf;

use report::{print_report, OutputFormat};

/// Slot-based encumbrance calculator
#[derive(Parser)]
#[command(name = "sbe")]
#[command(about = "Derive slots, encumbrance and movement for a character", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a recomputation pass over an actor snapshot
    Derive(Derive),

    /// Print the default rule options as JSON
    Defaults,
}

#[derive(Parser)]
struct Derive {
    /// Actor snapshot (JSON)
    #[arg(value_name = "ACTOR")]
    actor: PathBuf,

    /// Rule options (JSON). Defaults apply when omitted.
    #[arg(short, long, value_name = "FILE", env = "SBE_CONFIG")]
    config: Option<PathBuf>,

    /// Who is viewing the sheet; only the owner sees notices
    #[arg(short, long, value_enum, default_value = "owner")]
    audience: AudienceArg,

    /// Write the derived snapshot back to the input file
    #[arg(short, long)]
    write: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum AudienceArg {
    Owner,
    Gm,
    Observer,
}

impl From<AudienceArg> for Audience {
    fn from(arg: AudienceArg) -> Self {
        match arg {
            AudienceArg::Owner => Audience::Owner,
            AudienceArg::Gm => Audience::GameMaster,
            AudienceArg::Observer => Audience::Observer,
        }
    }
}

impl Derive {
    async fn execute(self) -> Result<()> {
        let config = match &self.config {
            Some(path) => load_config(path)
                .await
                .with_context(|| format!("loading rules from {}", path.display()))?,
            None => EncumbranceConfig::default(),
        };

        let mut snapshot = ActorSnapshot::load_json(&self.actor)
            .await
            .with_context(|| format!("loading actor from {}", self.actor.display()))?;

        let derivation = EncumbranceEngine::new()
            .derive(&mut snapshot.actor, &config, self.audience.into())
            .with_context(|| format!("deriving {}", snapshot.actor.name))?;

        print_report(&snapshot.actor, &derivation, self.format)?;

        if self.write {
            snapshot.save_json(&self.actor).await?;
            tracing::info!(path = %self.actor.display(), "derived snapshot written");
        }
        Ok(())
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Derive(cmd) => cmd.execute().await,
        Command::Defaults => {
            println!(
                "{}",
                serde_json::to_string_pretty(&EncumbranceConfig::default())?
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_derive() {
        let cli = Cli::try_parse_from(["sbe", "derive", "mira.json", "--audience", "gm", "--write"])
            .unwrap();
        match cli.command {
            Command::Derive(cmd) => {
                assert_eq!(cmd.actor, PathBuf::from("mira.json"));
                assert!(cmd.write);
                assert_eq!(Audience::from(cmd.audience), Audience::GameMaster);
            }
            Command::Defaults => panic!("expected derive"),
        }
    }
}
