use anyhow::{bail, Result};
use clap::Parser;
use env_logger::Env;
use just_divide::config::GameConfig;
use just_divide::game::Game;
use just_divide::strategy::choose_move;
use just_divide::tiles::Difficulty;
use log::{info, warn};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play seeded Just Divide games with a greedy policy", long_about = None)]
struct Args {
    /// Number of games per difficulty
    #[clap(short, long, default_value_t = 20)]
    games: u64,

    /// First seed; game `i` uses `seed + i`
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Only evaluate this difficulty (easy, medium, hard)
    #[clap(short, long)]
    difficulty: Option<String>,

    /// Stop a game after this many moves
    #[clap(long, default_value_t = 2000)]
    max_moves: u32,
}

struct GameSummary {
    score: u32,
    level: u32,
    moves: u32,
    finished: bool,
}

fn play_one(difficulty: Difficulty, seed: u64, max_moves: u32) -> Result<GameSummary> {
    let config = GameConfig {
        difficulty,
        seed: Some(seed),
        ..GameConfig::default()
    };
    let mut game = Game::new(config);
    let mut moves = 0;

    while moves < max_moves {
        let Some(mv) = choose_move(&game) else {
            break;
        };
        if let Err(rejection) = mv.apply(&mut game) {
            bail!(
                "strategy chose {:?} on seed {} which was rejected: {}\n{}",
                mv,
                seed,
                rejection,
                game.board()
            );
        }
        moves += 1;
    }

    if !game.is_game_over() {
        warn!("seed {} stopped after {} moves without ending", seed, moves);
    }
    Ok(GameSummary {
        score: game.score(),
        level: game.level(),
        moves,
        finished: game.is_game_over(),
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let tiers: Vec<Difficulty> = match args.difficulty.as_deref() {
        None => Difficulty::ALL.to_vec(),
        Some(name) => match Difficulty::ALL.iter().find(|d| d.to_string() == name) {
            Some(d) => vec![*d],
            None => bail!("unknown difficulty '{}'", name),
        },
    };

    info!("Playing {} games per difficulty...", args.games);

    let mut averages: Vec<(Difficulty, f64)> = Vec::new();
    for difficulty in tiers {
        let mut summaries = Vec::new();
        for i in 0..args.games {
            let summary = play_one(difficulty, args.seed + i, args.max_moves)?;
            println!(
                "  {:<6} seed {:<4} score {:<6} level {:<3} moves {:<5}{}",
                difficulty.to_string(),
                args.seed + i,
                summary.score,
                summary.level,
                summary.moves,
                if summary.finished { "" } else { " (cut off)" }
            );
            summaries.push(summary);
        }
        if summaries.is_empty() {
            continue;
        }
        let total: u64 = summaries.iter().map(|s| s.score as u64).sum();
        averages.push((difficulty, total as f64 / summaries.len() as f64));
    }

    println!("\n--- Average Scores ---");
    for (difficulty, avg) in averages {
        println!("Difficulty {:<6}: Average Score = {:.2}", difficulty.to_string(), avg);
    }
    Ok(())
}
