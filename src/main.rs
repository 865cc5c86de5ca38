use anyhow::{bail, Result};
use clap::Parser;

use std::io::{stdin, stdout, Stdin, Write};
use std::path::PathBuf;
use std::time::Duration;

use connect4_lookahead::{selfplay::*, *};

mod display;

#[derive(Parser)]
#[command(about = "Connect 4 between humans and fixed-lookahead computer players")]
struct Args {
    /// JSON file with the board size, checker symbols and tie-break type
    #[arg(long)]
    config: Option<PathBuf>,

    /// Play this many games between two computer players and report the results
    #[arg(long)]
    self_play: Option<usize>,

    /// Lookahead of the X player in self-play
    #[arg(long, default_value_t = 2)]
    x_ply: usize,

    /// Lookahead of the O player in self-play
    #[arg(long, default_value_t = 2)]
    o_ply: usize,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print self-play results as JSON
    #[arg(long)]
    json: bool,
}

fn read_line(stdin: &Stdin) -> Result<String> {
    let mut buffer = String::new();
    if stdin.read_line(&mut buffer)? == 0 {
        bail!("input closed");
    }
    Ok(buffer.trim().to_string())
}

fn choose_player(stdin: &Stdin, config: &GameConfig, checker: Checker) -> Result<Option<Evaluator>> {
    let symbol = config.symbols.checker(checker);
    loop {
        print!("Is player {} AI controlled? y/n: ", symbol);
        stdout().flush()?;
        match read_line(stdin)?.to_lowercase().chars().next() {
            Some('y') => break,
            Some('n') => return Ok(None),
            _ => println!("Unknown answer given"),
        }
    }
    loop {
        print!("Select AI difficulty, 0 to {}: ", MAX_PLY);
        stdout().flush()?;
        let input = read_line(stdin)?;
        match input.parse::<usize>() {
            Ok(ply) => match config.evaluator(checker, ply) {
                Ok(evaluator) => return Ok(Some(evaluator)),
                Err(err) => println!("{}", err),
            },
            Err(_) => println!("Invalid number: {}", input),
        }
    }
}

fn self_play(config: &GameConfig, args: &Args, games: usize) -> Result<()> {
    let series = SelfPlayConfig {
        games,
        width: config.width,
        height: config.height,
        x: config.evaluator(Checker::X, args.x_ply)?,
        o: config.evaluator(Checker::O, args.o_ply)?,
        seed: args.seed,
        show_progress: !args.json,
    };
    let stats = play_series(&series)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!(
            "{} (ply {}) won {}, {} (ply {}) won {}, {} drawn",
            config.symbols.x,
            args.x_ply,
            stats.x_wins,
            config.symbols.o,
            args.o_ply,
            stats.o_wins,
            stats.draws
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(games) = args.self_play {
        return self_play(&config, &args, games);
    }

    let stdin = stdin();

    println!("Let's play some Connect Four!\n");

    let players = (
        choose_player(&stdin, &config, Checker::X)?,
        choose_player(&stdin, &config, Checker::O)?,
    );
    let mut game = Game::from_config(&config)?;

    // game loop
    loop {
        display::draw(game.board(), &config.symbols)?;

        match game.state() {
            GameState::Playing => {
                let checker = game.to_move();
                let symbol = config.symbols.checker(checker);
                let player = match checker {
                    Checker::X => players.0,
                    Checker::O => players.1,
                };

                let next_move = match player {
                    // AI player
                    Some(evaluator) => {
                        println!("{} is thinking...", symbol);

                        // slow down play if both players are AI
                        if players.0.is_some() && players.1.is_some() {
                            std::thread::sleep(Duration::from_secs(1));
                        }

                        // the search plays and takes back moves on its own copy
                        let mut board = game.board().clone();
                        match evaluator.next_move(&mut board) {
                            Some(column) => column,
                            None => bail!("no legal moves left for {}", symbol),
                        }
                    }
                    // human player
                    None => {
                        print!("{}'s turn, choose a column (? for a hint) > ", symbol);
                        stdout().flush()?;
                        let input = read_line(&stdin)?;

                        if input == "?" {
                            let mut board = game.board().clone();
                            if let Some(column) = board.tactical_move(checker) {
                                println!("Try column {}", column);
                            }
                            continue;
                        }
                        match input.parse::<usize>() {
                            Err(_) => {
                                println!("Invalid number: {}", input);
                                continue;
                            }
                            Ok(column) => column,
                        }
                    }
                };

                if let Err(err) = game.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
                println!("{} played column {}\n", symbol, next_move);
            }

            // end states
            GameState::Won(checker) => {
                println!("{} wins!", config.symbols.checker(checker));
                break;
            }
            GameState::Draw => {
                println!("Full board, tie game!");
                break;
            }
        }
    }
    Ok(())
}
