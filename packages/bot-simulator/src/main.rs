//! Bot simulator CLI - fast in-memory soak runs of the game engine.
//!
//! Drives full games with random-legal bots through the public engine
//! API, then prints an aggregate summary. Useful for exercising the
//! phase machine end to end and for eyeballing rule statistics.

mod bots;
mod summary;

use std::sync::Arc;

use bots::RandomBot;
use clap::Parser;
use rand::Rng;
use summary::SummaryBuilder;
use tracing::{debug, info};

use engine::{ActionProducer, Game, GameConfig, GameId, GamePhase, VecSink};

#[derive(Parser)]
#[command(name = "bot-simulator")]
#[command(about = "Fast in-memory game simulator for the Liap Tui engine")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Base seed (for deterministic runs); random when omitted
    #[arg(long)]
    seed: Option<i64>,

    /// Maximum rounds per game
    #[arg(long, default_value = "20")]
    max_rounds: u32,

    /// Score that ends a game
    #[arg(long, default_value = "50")]
    win_score: i32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Hard cap on actions per game; random bots finish far below it, so
/// hitting it means the engine stopped making progress.
const MAX_ACTIONS_PER_GAME: usize = 5_000;

fn player_names() -> Vec<String> {
    ["north", "east", "south", "west"].map(String::from).to_vec()
}

type Result<T> = std::result::Result<T, engine::DomainError>;

async fn run_one_game(game_seed: i64, config: GameConfig) -> Result<Vec<engine::GameEvent>> {
    let sink = Arc::new(VecSink::new());
    let game = Game::new(
        GameId::new(),
        player_names(),
        config,
        Some(game_seed),
        sink.clone(),
    )?;
    let handle = engine::spawn(game);
    handle.start().await?;

    let mut bots: Vec<RandomBot> = (0..4)
        .map(|seat| RandomBot::new(game_seed as u64 ^ ((seat as u64) << 32)))
        .collect();

    let names = player_names();
    let mut actions = 0usize;
    'game: loop {
        let snapshot = handle.snapshot().await?;
        if snapshot.game.phase == GamePhase::GameOver {
            break;
        }
        for (seat, bot) in bots.iter_mut().enumerate() {
            let Some(view) = handle.player_view(&names[seat]).await? else {
                continue;
            };
            if let Some(action) = bot.next_action(&view).await {
                actions += 1;
                if actions > MAX_ACTIONS_PER_GAME {
                    return Err(engine::DomainError::internal(
                        "simulation exceeded the action budget",
                    ));
                }
                let outcomes = handle.submit(action).await?;
                debug!(?outcomes, "submitted bot action");
                continue 'game;
            }
        }
        // Nobody produced an action but the game is not over: stuck.
        return Err(engine::DomainError::internal(
            "no bot could act in a live game",
        ));
    }

    handle.shutdown();
    Ok(sink.drain())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let base_seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let config = GameConfig {
        max_rounds: args.max_rounds,
        win_score: args.win_score,
        ..GameConfig::default()
    };
    info!(games = args.games, base_seed, "Starting simulation run");

    let mut builder = SummaryBuilder::new();
    for game_index in 0..args.games {
        let game_seed = base_seed.wrapping_add(game_index as i64);
        let events = run_one_game(game_seed, config.clone()).await?;
        builder.record_game(&events);
        info!(game_index, game_seed, "Game finished");
    }

    let summary = builder.finish();
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).expect("summary serializes")
    );
    Ok(())
}
