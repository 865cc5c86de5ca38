//! Series of games between two computer players

use anyhow::{anyhow, ensure, Result};
use indicatif::*;
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use std::sync::mpsc::*;
use std::thread;
use std::time::Instant;

use crate::*;

#[derive(Clone, Debug)]
pub struct SelfPlayConfig {
    pub games: usize,
    pub width: usize,
    pub height: usize,
    pub x: Evaluator,
    pub o: Evaluator,
    /// Game `i` draws its random tie-breaks from `seed + i`
    pub seed: u64,
    pub show_progress: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    /// `None` for a draw
    pub winner: Option<Checker>,
    pub moves: Vec<usize>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct SelfPlayStats {
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub games: Vec<GameRecord>,
}

impl SelfPlayStats {
    fn add_result(&mut self, record: GameRecord) {
        match record.winner {
            Some(Checker::X) => self.x_wins += 1,
            Some(Checker::O) => self.o_wins += 1,
            None => self.draws += 1,
        }
        self.games.push(record);
    }

    pub fn total_games(&self) -> usize {
        self.games.len()
    }
}

fn play_game(config: &SelfPlayConfig, index: usize) -> Result<GameRecord> {
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(index as u64));
    let mut game = Game::new(config.width, config.height)?;

    let winner = match game.play_out(&config.x, &config.o, &mut rng)? {
        GameState::Won(checker) => Some(checker),
        GameState::Draw => None,
        GameState::Playing => return Err(anyhow!("game {} stopped before its end", index)),
    };
    Ok(GameRecord {
        winner,
        moves: game.moves().to_vec(),
    })
}

/// Plays `config.games` games in parallel, returning the records in game order
pub fn play_series(config: &SelfPlayConfig) -> Result<SelfPlayStats> {
    ensure!(
        config.x.checker() == Checker::X && config.o.checker() == Checker::O,
        "players must be given in the order X, O"
    );
    // fail before spawning any work
    Board::new(config.width, config.height)?;

    let start = Instant::now();
    let (tx, rx) = channel();

    let series = config.clone();
    thread::spawn(move || {
        (0..series.games)
            .into_par_iter()
            .for_each_with(tx, |tx, index| {
                // the receiver only goes away once the caller has given up on the series
                let _ = tx.send((index, play_game(&series, index)));
            });
    });

    let progress = if config.show_progress {
        let progress = ProgressBar::new(config.games as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
                .progress_chars("█▓▒░  "),
        );
        progress
    } else {
        ProgressBar::hidden()
    };

    let mut records = vec![None; config.games];
    for _ in 0..config.games {
        let (index, record) = rx.recv()?;
        records[index] = Some(record?);
        progress.inc(1);
    }
    progress.finish();

    let mut stats = SelfPlayStats::default();
    for record in records.into_iter().flatten() {
        stats.add_result(record);
    }
    log::info!(
        "{} games in {:.1}s: X won {}, O won {}, {} drawn",
        stats.total_games(),
        start.elapsed().as_secs_f64(),
        stats.x_wins,
        stats.o_wins,
        stats.draws
    );
    Ok(stats)
}
