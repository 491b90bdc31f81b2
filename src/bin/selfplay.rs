use anyhow::{Context, Result};
use boxbot::game::{play_match, Agent, EndReason, GameRecord, RandomAgent, MAX_GAME_TIME};
use boxbot::{Engine, EngineConfig};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Opponent {
    Random,
    Engine,
}

#[derive(Parser, Debug)]
#[command(name = "boxbot-selfplay", about = "Play boxbot against an opponent, both seat orders")]
struct Args {
    /// Games per seat order
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, value_enum, default_value_t = Opponent::Random)]
    opponent: Opponent,
    /// Engine clock per game in milliseconds
    #[arg(long, default_value_t = 24_000)]
    time_ms: u64,
    /// Forfeit cap on a player's total thinking time, in milliseconds
    #[arg(long)]
    cap_ms: Option<u64>,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Write one JSON game record per line
    #[arg(long)]
    jsonl_out: Option<PathBuf>,
}

fn make_opponent(kind: Opponent, seed: u64, time_limit: Duration) -> Box<dyn Agent> {
    match kind {
        Opponent::Random => Box::new(RandomAgent::new(seed)),
        Opponent::Engine => Box::new(Engine::new(EngineConfig { time_limit, seed: Some(seed), ..EngineConfig::default() })),
    }
}

#[derive(Default)]
struct Tally {
    wins: usize,
    losses: usize,
    boxes_for: u64,
    boxes_against: u64,
    forfeits: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let time_limit = Duration::from_millis(args.time_ms);
    let cap = args.cap_ms.map(Duration::from_millis).unwrap_or(MAX_GAME_TIME);
    let mut jsonl = match &args.jsonl_out {
        Some(p) => Some(BufWriter::new(File::create(p).with_context(|| format!("create {}", p.display()))?)),
        None => None,
    };

    let mut engine = Engine::new(EngineConfig { time_limit, seed: Some(args.seed), ..EngineConfig::default() });
    let mut opponent = make_opponent(args.opponent, args.seed.wrapping_add(1), time_limit);

    for engine_seat in 0..2usize {
        let pb = ProgressBar::new(args.games as u64);
        pb.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {msg} {bar:40.cyan/blue} {pos}/{len}")?
                .progress_chars("=>-"),
        );
        pb.set_message(format!("boxbot as player {}", engine_seat + 1));
        let mut tally = Tally::default();
        for _ in 0..args.games {
            let record: GameRecord = if engine_seat == 0 {
                play_match(&mut engine, opponent.as_mut(), cap)
            } else {
                play_match(opponent.as_mut(), &mut engine, cap)
            };
            tally.boxes_for += record.scores[engine_seat] as u64;
            tally.boxes_against += record.scores[1 - engine_seat] as u64;
            match record.winner {
                Some(w) if w == engine_seat => tally.wins += 1,
                Some(_) => tally.losses += 1,
                None => {}
            }
            if record.reason != EndReason::Normal {
                tally.forfeits += 1;
                pb.println(format!("game ended by {:?}, winner {:?}", record.reason, record.winner));
            }
            if let Some(w) = jsonl.as_mut() {
                writeln!(w, "{}", serde_json::to_string(&record)?)?;
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        let n = args.games.max(1) as f64;
        println!("==== boxbot as player {} vs {:?} ====", engine_seat + 1, args.opponent);
        println!("Games      : {}", args.games);
        println!("Wins       : {} ({:.2}%)", tally.wins, tally.wins as f64 / n * 100.0);
        println!("Losses     : {}", tally.losses);
        println!("Forfeits   : {}", tally.forfeits);
        println!("Avg boxes  : {:.3} - {:.3}", tally.boxes_for as f64 / n, tally.boxes_against as f64 / n);
        println!();
    }
    if let Some(mut w) = jsonl { w.flush()?; }
    Ok(())
}
