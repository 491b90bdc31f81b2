use anyhow::{Context, Result};
use boxbot::board::{empty_board, Line};
use boxbot::{Engine, EngineConfig, Game};
use clap::Parser;
use std::io::{self, Write};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Dots and Boxes against the boxbot engine", long_about = None)]
struct Args {
    /// Lines already drawn, as comma separated line indices (0..60).
    /// Prints the engine's reply and exits.
    #[arg(long, value_delimiter = ',')]
    drawn: Option<Vec<usize>>,

    /// Clock for the whole game in milliseconds
    #[arg(long, default_value_t = 24_000)]
    time_ms: u64,

    /// Seed for the move-order shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Let the human move first
    #[arg(long)]
    first: bool,

    /// Print search statistics
    #[arg(long)]
    verbose: bool,
}

fn get_human_move(game: &Game) -> Result<Line> {
    loop {
        print!("Your line (x,y,o or index): ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 { anyhow::bail!("stdin closed"); }
        match input.trim().parse::<Line>() {
            Ok(line) if game.legal_lines().contains(&line) => return Ok(line),
            Ok(line) => println!("Line {} is already drawn!", line),
            Err(e) => println!("{e}"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = EngineConfig { time_limit: Duration::from_millis(args.time_ms), seed: args.seed, ..EngineConfig::default() };
    let mut engine = Engine::new(config);

    if let Some(drawn) = args.drawn {
        let mut board = empty_board();
        for idx in drawn {
            Line::from_index(idx).with_context(|| format!("bad --drawn entry {idx}"))?.set(&mut board, true);
        }
        let d = engine.choose_move(&board)?;
        println!("bestmove {} index={}", d.line, d.line.index());
        if args.verbose { println!("{}", serde_json::to_string(&d)?); }
        return Ok(());
    }

    let human = if args.first { 0 } else { 1 };
    let mut game = Game::new();
    while !game.is_over() {
        println!("\n{}", game);
        let line = if game.to_move() == human {
            get_human_move(&game)?
        } else {
            let d = engine.choose_move(game.board_lines())?;
            println!("Engine plays {}", d.line);
            if args.verbose {
                println!("forced={} score={} depth={} nodes={} time_left={:?}", d.forced, d.score, d.depth, d.nodes, engine.time_left());
            }
            d.line
        };
        game.play(line)?;
    }

    println!("\n{}", game);
    let [a, b] = game.scores();
    let (you, bot) = if human == 0 { (a, b) } else { (b, a) };
    println!("Final score: you {} - {} boxbot", you, bot);
    Ok(())
}
