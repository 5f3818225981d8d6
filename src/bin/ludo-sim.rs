//! Headless bot-vs-bot simulator.
//!
//! ```text
//! ludo-sim --players 4 --games 100 --seed 7
//! RUST_LOG=ludo_engine=debug ludo-sim --games 1
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ludo_engine::bot::{FirstMovablePolicy, GreedyPolicy, MovePolicy};
use ludo_engine::sim::{play_match, DEFAULT_MAX_COMMANDS};
use ludo_engine::{Color, MatchConfig, MatchStatus, PlayerId, PlayerSpec, TurnController};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Greedy,
    First,
}

#[derive(Parser, Debug)]
#[command(name = "ludo-sim", about = "Play bot-only Ludo matches and report standings")]
struct Args {
    /// Seats per match (2-4).
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// Number of matches to play.
    #[arg(long, default_value_t = 1)]
    games: u64,

    /// Base seed; match `n` uses `seed + n`. Overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML match config.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Luck factor for every seat.
    #[arg(long, default_value_t = 0.5)]
    luck: f64,

    #[arg(long, value_enum, default_value_t = PolicyArg::Greedy)]
    policy: PolicyArg,
}

/// Seed for match number `game`; wraps instead of overflowing near `u64::MAX`.
fn match_seed(base: u64, game: u64) -> u64 {
    base.wrapping_add(game)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if !(2..=4).contains(&args.players) {
        bail!("--players must be between 2 and 4, got {}", args.players);
    }

    let mut config = match &args.config {
        Some(path) => MatchConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => MatchConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let roster: Vec<PlayerSpec> = Color::ALL
        .iter()
        .take(args.players)
        .enumerate()
        .map(|(i, &color)| {
            PlayerSpec::new(PlayerId::new(i as u32 + 1), color)
                .bot()
                .with_luck(args.luck)
        })
        .collect();

    let policy: Box<dyn MovePolicy> = match args.policy {
        PolicyArg::Greedy => Box::new(GreedyPolicy),
        PolicyArg::First => Box::new(FirstMovablePolicy),
    };

    info!(players = args.players, games = args.games, policy = policy.name(), "simulating");

    let mut first_places = vec![0u64; args.players];
    for game in 0..args.games {
        let seed = match_seed(config.seed, game);
        let mut controller = TurnController::new(config.clone().with_seed(seed));
        let state = play_match(&mut controller, &roster, policy.as_ref(), DEFAULT_MAX_COMMANDS)?;

        if state.status() != MatchStatus::Finished {
            println!("game {game}: unfinished after {} events", state.event_log().len());
            continue;
        }
        let standings = state.standings();
        if let Some(seat) = standings
            .first()
            .and_then(|id| roster.iter().position(|p| p.id == *id))
        {
            first_places[seat] += 1;
        }
        let names: Vec<String> = standings
            .iter()
            .filter_map(|id| roster.iter().find(|p| p.id == *id))
            .map(|p| p.color.to_string())
            .collect();
        println!("game {game}: {} ({} events)", names.join(" > "), state.event_log().len());
    }

    for (spec, wins) in roster.iter().zip(&first_places) {
        println!("{:>6}: {wins} first places", spec.color);
    }
    Ok(())
}
