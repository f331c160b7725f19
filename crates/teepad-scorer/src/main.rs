mod journal;
mod replay;
mod script;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use teepad_engine::{CompletenessPolicy, EngineConfig, FinalizeOutcome, PayoutStatus};

use journal::Journal;
use replay::{Summary, replay};
use script::RoundScript;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Round script (TOML) with the round setup and every player's strokes
    script: PathBuf,

    /// Override the completeness policy from the engine config
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Push past holes the block policy refuses
    #[arg(long)]
    force: bool,

    /// Print the summary as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Warn,
    Block,
}

impl From<PolicyArg> for CompletenessPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Warn => Self::Warn,
            PolicyArg::Block => Self::Block,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let script = match RoundScript::load(&args.script) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(path = %args.script.display(), error = %e, "cannot load round script");
            std::process::exit(1);
        },
    };

    let mut config = EngineConfig::load();
    if let Some(policy) = args.policy {
        config.completeness = policy.into();
    }
    tracing::info!(?config, "teepad scorer starting");

    let summary = match replay(&script, config, Journal::default(), args.force).await {
        Ok((summary, journal)) => {
            tracing::info!(publishes = journal.publishes(), "replay finished");
            summary
        },
        Err(e) => {
            tracing::error!(error = %e, "replay failed");
            std::process::exit(1);
        },
    };

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                tracing::error!(error = %e, "cannot encode summary");
                std::process::exit(1);
            },
        }
    } else {
        print_table(&summary);
    }
}

fn print_table(summary: &Summary) {
    println!(
        "Round {} ({} holes from hole {})",
        summary.round_id, summary.holes, summary.starting_hole
    );
    println!("{:>3}  {:<20} {:>6} {:>5}", "Pos", "Player", "Score", "Thru");
    for row in &summary.standings {
        println!(
            "{:>3}  {:<20} {:>6} {:>5}",
            row.position,
            row.name,
            row.total.differential.to_string(),
            row.total.holes_counted
        );
    }
    println!(
        "Pots: entry {} / ace {} / total {}",
        summary.pots.entry,
        summary.pots.ace,
        summary.pots.total()
    );
    if !summary.winners.entry.is_empty() {
        println!("Entry pot leaders: {:?}", summary.winners.entry);
    }
    if !summary.winners.ace.is_empty() {
        println!("Ace pot: {:?}", summary.winners.ace);
    }
    match &summary.outcome {
        FinalizeOutcome::Finalized { payout, .. } => match payout {
            PayoutStatus::NotRequired => println!("Round finalized"),
            PayoutStatus::Requested => println!("Round finalized; payout requested"),
            PayoutStatus::Failed(e) => println!("Round finalized; payout failed: {e}"),
        },
        FinalizeOutcome::AlreadyFinalized => println!("Round was already finalized"),
    }
}
