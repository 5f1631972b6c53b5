use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use just_divide::config::GameConfig;
use just_divide::game::{Game, GameEvent, TileOrigin};
use just_divide::tiles::{Difficulty, QUEUE_LEN};
use just_divide::utils::{board_from_str_array, values_from_str};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play Just Divide in the terminal", long_about = None)]
struct Args {
    /// TOML config file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Starting difficulty (overrides the config)
    #[clap(short, long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Seed for tile generation (overrides the config)
    #[clap(short, long)]
    seed: Option<u64>,

    /// JSON file for the best score (overrides the config)
    #[clap(long)]
    best_score_file: Option<PathBuf>,

    /// Start from a board file: four lines of four cells, `.` for empty
    #[clap(long)]
    board: Option<PathBuf>,

    /// Upcoming tiles for a `--board` start, front first, e.g. "4 8 2"
    #[clap(long, requires = "board")]
    queue: Option<String>,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    match s.to_ascii_lowercase().as_str() {
        "easy" | "1" => Ok(Difficulty::Easy),
        "medium" | "2" => Ok(Difficulty::Medium),
        "hard" | "3" => Ok(Difficulty::Hard),
        _ => Err(format!("unknown difficulty '{}'", s)),
    }
}

fn build_game(args: &Args) -> Result<Game> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load_or_default(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(d) = args.difficulty {
        config.difficulty = d;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.best_score_file.is_some() {
        config.best_score_path = args.best_score_file.clone();
    }

    let Some(path) = &args.board else {
        return Ok(Game::new(config));
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read board file {}", path.display()))?;
    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    let board = board_from_str_array(&lines)
        .with_context(|| format!("Invalid board in {}", path.display()))?;
    let queue = match &args.queue {
        Some(text) => values_from_str(text).context("Invalid --queue")?,
        None => Vec::new(),
    };
    if queue.len() > QUEUE_LEN {
        bail!("--queue holds at most {} tiles, got {}", QUEUE_LEN, queue.len());
    }
    Ok(Game::new_with_state(config, board, &queue, None))
}

fn print_state(game: &Game) {
    let secs = game.elapsed_secs();
    println!("---------------------");
    println!(
        "Level: {}  Score: {}  Best: {}  Trash: x{}  Time: {:02}:{:02}  Difficulty: {}",
        game.level(),
        game.score(),
        game.best_score(),
        game.trash_uses(),
        secs / 60,
        secs % 60,
        game.difficulty()
    );
    println!("{}", game.board().to_string_with_highlight(game.hints()));
    let queue: Vec<String> = game.queue().iter().map(|v| v.to_string()).collect();
    let keep = game.keep().map_or("-".to_string(), |v| v.to_string());
    println!("Queue: [{}]  Keep: {}", queue.join(", "), keep);
}

fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::Placed { cell, value, .. } => format!("Placed {} on cell {}.", value, cell),
        GameEvent::Matched {
            cell, score_delta, ..
        } => format!("MATCH! Cell {} cleared (+{}).", cell, score_delta),
        GameEvent::Divided {
            cell,
            quotient,
            score_delta,
            ..
        } => format!("DIVIDE! Cell {} is now {} (+{}).", cell, quotient, score_delta),
        GameEvent::Kept { value, returned } => match returned {
            Some(r) => format!("Kept {}, {} is back in the queue.", value, r),
            None => format!("Kept {}.", value),
        },
        GameEvent::Trashed {
            value,
            trash_uses_left,
        } => format!("Trashed {} ({} left).", value, trash_uses_left),
        GameEvent::LevelUp { level, trash_uses } => {
            format!("LEVEL {}! Trash uses: {}.", level, trash_uses)
        }
        GameEvent::NewBestScore { score } => format!("New best score: {}!", score),
        GameEvent::Undone => "Move undone.".to_string(),
        GameEvent::DifficultyChanged { difficulty } => format!("Difficulty: {}.", difficulty),
        GameEvent::GameOver { score } => format!("GAME OVER with {} points.", score),
    }
}

fn parse_cell(arg: Option<&str>) -> Option<usize> {
    arg.and_then(|s| s.parse::<usize>().ok())
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let mut game = build_game(&args)?;
    println!("Welcome to Just Divide!");
    println!("Commands: p <cell> place, k <cell> place keep, s swap keep, t trash,");
    println!("          u undo, 1/2/3 difficulty, g hints, r restart, q quit");

    let mut last_tick = Instant::now();
    loop {
        print_state(&game);
        if game.is_game_over() {
            println!("🎉 GAME OVER! 🎉  Score: {} (Best: {})", game.score(), game.best_score());
            println!("Press 'r' to restart or 'q' to quit.");
        }

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let elapsed = last_tick.elapsed().as_secs();
        if elapsed > 0 {
            game.tick(u32::try_from(elapsed).unwrap_or(u32::MAX));
            last_tick = Instant::now();
        }

        let mut parts = input.split_whitespace();
        let result = match parts.next() {
            Some("q") => {
                println!("Thanks for playing!");
                break;
            }
            Some(cmd @ ("p" | "k")) => {
                let origin = if cmd == "p" {
                    TileOrigin::Queue
                } else {
                    TileOrigin::Keep
                };
                match parse_cell(parts.next()) {
                    Some(cell) => game.place(origin, cell),
                    None => {
                        println!("Usage: p <cell> or k <cell>, cells are 0-15.");
                        continue;
                    }
                }
            }
            Some("s") => game.swap_active_with_keep(),
            Some("t") => game.trash_active(),
            Some("u") => game.undo(),
            Some("g") => {
                let on = game.toggle_hints();
                println!("Hints {}.", if on { "on" } else { "off" });
                continue;
            }
            Some("r") => {
                game.restart();
                last_tick = Instant::now();
                println!("New game.");
                continue;
            }
            Some(cmd) => match cmd.parse::<u8>().ok().and_then(Difficulty::from_number) {
                Some(d) => game.set_difficulty(d),
                None => {
                    println!("Unknown command '{}'.", cmd);
                    continue;
                }
            },
            None => continue,
        };

        match result {
            Ok(events) => {
                for event in &events {
                    println!("{}", describe(event));
                }
            }
            Err(rejection) => println!("Not allowed: {}.", rejection),
        }
    }
    Ok(())
}
