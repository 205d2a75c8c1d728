//! tetrs-sim - headless driver for the TETRS rules engine
//!
//! Plays a game with a random autopilot and prints the final board and
//! line clear counts.
//!
//! ```text
//! tetrs-sim [--ticks N] [--seed N] [--config PATH] [--log-dir DIR] [--json]
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use tetrs_core::{Game, GameEvent, GameState, GameStatus, ScoreHistory, Settings, TickInput};

#[derive(Debug, Default)]
struct Args {
    ticks: u64,
    seed: Option<u64>,
    config: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        ticks: 10_000,
        ..Args::default()
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .with_context(|| format!("{name} needs a value"))
        };
        match arg.as_str() {
            "--ticks" => args.ticks = value("--ticks")?.parse().context("--ticks")?,
            "--seed" => args.seed = Some(value("--seed")?.parse().context("--seed")?),
            "--config" => args.config = Some(value("--config")?.into()),
            "--log-dir" => args.log_dir = Some(value("--log-dir")?.into()),
            "--json" => args.json = true,
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

/// Picks a random input each tick, hard dropping now and then
fn autopilot(rng: &mut ChaCha8Rng) -> TickInput {
    let hard_drop = rng.gen_bool(0.08);
    TickInput {
        left: rng.gen_range(0..=2),
        right: rng.gen_range(0..=2),
        rotate_cw: u8::from(rng.gen_bool(0.2)),
        rotate_ccw: u8::from(rng.gen_bool(0.1)),
        rotate_180: u8::from(rng.gen_bool(0.05)),
        hold: rng.gen_bool(0.03),
        soft_drop: !hard_drop && rng.gen_bool(0.3),
        hard_drop,
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    ticks: u64,
    status: GameStatus,
    score: u64,
    lines: u64,
    clears: &'a ScoreHistory,
    board: Vec<String>,
}

fn main() -> Result<()> {
    let args = parse_args()?;

    // Logs go to stderr unless a directory is given
    let (writer, _guard) = match &args.log_dir {
        Some(dir) => tracing_appender::non_blocking(tracing_appender::rolling::never(
            dir,
            "tetrs-sim.log",
        )),
        None => tracing_appender::non_blocking(std::io::stderr()),
    };
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tetrs_core=info".parse()?),
        )
        .with_ansi(false)
        .init();

    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Settings::load(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    let input_seed = settings.seed.unwrap_or_else(rand::random);
    tracing::info!("tetrs-sim starting, ticks={}, seed={:?}", args.ticks, settings.seed);

    let mut game = Game::new(settings);
    game.register_observer(|state: &GameState, event: &GameEvent| match event {
        GameEvent::LineClear(clear) => {
            tracing::info!("tick {}: {} (score {})", state.ticks(), clear, state.current_score())
        }
        GameEvent::Death => tracing::info!("tick {}: topped out", state.ticks()),
        GameEvent::Normal => {}
    });

    let mut rng = ChaCha8Rng::seed_from_u64(input_seed);
    for _ in 0..args.ticks {
        if game.tick(&autopilot(&mut rng))? == GameStatus::Dead {
            break;
        }
    }

    let state = game.state();
    let history = state.score_history();
    if args.json {
        let summary = Summary {
            ticks: state.ticks(),
            status: state.status(),
            score: state.current_score(),
            lines: history.total_lines(),
            clears: history,
            board: state.board().to_string().lines().map(String::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", state.board());
        println!("ticks: {}  status: {:?}", state.ticks(), state.status());
        for (clear, count) in history.iter().filter(|(_, count)| *count > 0) {
            println!("{:>14}  x{count}", clear.display_name());
        }
        println!("score: {}  lines: {}", state.current_score(), history.total_lines());
    }
    Ok(())
}
