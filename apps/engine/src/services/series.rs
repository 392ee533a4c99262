//! Series of games between three participants.
//!
//! Seats rotate after every game: whoever sat in middlehand leads next, rear
//! moves to middle and forehand moves to rear. Scores are credited to the
//! participant, not the seat.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::rules::RulesConfig;
use crate::domain::cards_types::GameType;
use crate::domain::dealing::deal_cards;
use crate::domain::moves::DealtCards;
use crate::domain::rules::PLAYERS;
use crate::domain::seed_derivation::{derive_dealing_seed, derive_player_seed};
use crate::domain::state::{GameResult, Phase, Player};
use crate::error::AppError;
use crate::services::game_runner::{GameOutcome, GameRunner};
use crate::services::player_source::PlayerSource;
use crate::services::random::RandomPlayer;

#[derive(Clone)]
pub struct Participant {
    pub name: String,
    pub source: Arc<dyn PlayerSource>,
}

impl Participant {
    pub fn new(source: Arc<dyn PlayerSource>) -> Self {
        Self {
            name: source.name().to_string(),
            source,
        }
    }
}

/// One finished game as seen by the series.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub game_no: u32,
    /// Participant index sitting in each seat.
    pub seating: [usize; PLAYERS],
    pub declarer: Option<String>,
    pub game_type: Option<GameType>,
    pub phase: Phase,
    pub result: Option<GameResult>,
    /// Score change per participant.
    pub deltas: [i64; PLAYERS],
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesReport {
    pub names: [String; PLAYERS],
    pub scores: [i64; PLAYERS],
    pub games: Vec<GameRecord>,
}

pub struct Series {
    rules: RulesConfig,
    participants: [Participant; PLAYERS],
    seed: u64,
    games: u32,
}

impl Series {
    pub fn new(
        rules: RulesConfig,
        participants: [Participant; PLAYERS],
        seed: u64,
        games: u32,
    ) -> Self {
        Self {
            rules,
            participants,
            seed,
            games,
        }
    }

    /// Three seeded random players named `names`.
    pub fn random(rules: RulesConfig, names: [String; PLAYERS], seed: u64, games: u32) -> Self {
        let mut i = 0;
        let participants = names.map(|name| {
            let player = RandomPlayer::new(name, Some(derive_player_seed(seed, i)));
            i += 1;
            Participant::new(Arc::new(player))
        });
        Self::new(rules, participants, seed, games)
    }

    pub async fn run(&self, cancel: CancellationToken) -> Result<SeriesReport, AppError> {
        let names = self.participants.clone().map(|p| p.name);
        let mut scores = [0i64; PLAYERS];
        let mut records = Vec::with_capacity(self.games as usize);
        // seating[seat] = participant index
        let mut seating = [0, 1, 2];

        for game_no in 0..self.games {
            if cancel.is_cancelled() {
                return Err(AppError::Cancelled);
            }
            let players = seating.map(|i| Arc::clone(&self.participants[i].source));
            let (hands, skat) = deal_cards(derive_dealing_seed(self.seed, game_no));
            let outcome = GameRunner::new(self.rules.clone(), players)
                .with_cancellation(cancel.clone())
                .run(DealtCards::open(hands, skat))
                .await?;

            let deltas = score_deltas(&outcome, &seating);
            for (total, delta) in scores.iter_mut().zip(deltas) {
                *total += delta;
            }
            let declarer = outcome
                .data
                .declarer
                .map(|d| names[seating[d.index()]].clone());
            info!(
                game_no,
                declarer = ?declarer,
                phase = ?outcome.phase,
                ?deltas,
                "series game finished"
            );
            records.push(GameRecord {
                game_no,
                seating,
                declarer,
                game_type: outcome.data.game_type(),
                phase: outcome.phase,
                result: outcome.data.result.clone(),
                deltas,
            });

            seating = rotate(seating);
        }

        Ok(SeriesReport {
            names,
            scores,
            games: records,
        })
    }
}

fn rotate(seating: [usize; PLAYERS]) -> [usize; PLAYERS] {
    let mut next = seating;
    for seat in Player::ALL {
        next[seat.next_game_seat().index()] = seating[seat.index()];
    }
    next
}

fn score_deltas(outcome: &GameOutcome, seating: &[usize; PLAYERS]) -> [i64; PLAYERS] {
    let mut deltas = [0i64; PLAYERS];
    let Some(result) = outcome.result() else {
        return deltas;
    };
    if let Some(per_seat) = result.ramsch_scores {
        for seat in Player::ALL {
            deltas[seating[seat.index()]] += i64::from(per_seat[seat.index()]);
        }
    } else if let Some(declarer) = outcome.data.declarer {
        deltas[seating[declarer.index()]] += i64::from(result.game_value);
    }
    deltas
}

/// Run independent series concurrently; results keep the input order.
pub async fn run_tables(
    tables: Vec<Series>,
    cancel: CancellationToken,
) -> Vec<Result<SeriesReport, AppError>> {
    let count = tables.len();
    let mut set = JoinSet::new();
    for (idx, series) in tables.into_iter().enumerate() {
        let cancel = cancel.clone();
        set.spawn(async move { (idx, series.run(cancel).await) });
    }

    let mut results: Vec<Option<Result<SeriesReport, AppError>>> =
        (0..count).map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((idx, result)) => results[idx] = Some(result),
            Err(e) => warn!(error = %e, "table task failed"),
        }
    }
    results
        .into_iter()
        .map(|r| r.unwrap_or_else(|| Err(AppError::player_source("table task aborted"))))
        .collect()
}
