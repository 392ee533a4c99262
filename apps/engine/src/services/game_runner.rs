//! Drives one game from the deal to the result.
//!
//! The runner is the single writer of its `GameState`. Each player decision
//! is a request bounded by the move timeout; a time-out, an exhausted retry
//! budget or a `LeaveTable` from the control channel ends the game early.

use std::future::pending;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::rules::RulesConfig;
use crate::domain::game_flow::{apply_move, start_dealing};
use crate::domain::moves::{DealtCards, MoveInformation, MoveKind};
use crate::domain::rules::PLAYERS;
use crate::domain::state::{GameData, GameResult, GameState, Phase, Player};
use crate::error::AppError;
use crate::services::player_source::{pending_request, MoveRequest, PlayerSource, PlayerView};

/// Instructions from outside the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMessage {
    LeaveTable(Player),
}

#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub phase: Phase,
    pub data: GameData,
    pub moves: Vec<MoveInformation>,
}

impl GameOutcome {
    pub fn result(&self) -> Option<&GameResult> {
        self.data.result.as_ref()
    }
}

pub struct GameRunner {
    rules: RulesConfig,
    players: [Arc<dyn PlayerSource>; PLAYERS],
    cancel: CancellationToken,
    control: Option<mpsc::Receiver<ControlMessage>>,
}

async fn next_control(
    control: &mut Option<mpsc::Receiver<ControlMessage>>,
) -> Option<ControlMessage> {
    match control {
        Some(rx) => rx.recv().await,
        None => pending().await,
    }
}

enum Answer {
    Move(MoveInformation),
    Control(ControlMessage),
}

impl GameRunner {
    /// `players` are indexed by seat (Forehand, Middlehand, Rearhand).
    pub fn new(rules: RulesConfig, players: [Arc<dyn PlayerSource>; PLAYERS]) -> Self {
        Self {
            rules,
            players,
            cancel: CancellationToken::new(),
            control: None,
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Attach a control channel; returns the sender side.
    pub fn control_channel(&mut self) -> mpsc::Sender<ControlMessage> {
        let (tx, rx) = mpsc::channel(4);
        self.control = Some(rx);
        tx
    }

    /// Play one game on the given deal.
    pub async fn run(&mut self, dealt: DealtCards) -> Result<GameOutcome, AppError> {
        let names = Player::ALL.map(|p| self.players[p.index()].name().to_string());
        let mut state = GameState::with_players(self.rules.clone(), names);
        let mut moves = Vec::new();

        start_dealing(&mut state)?;
        self.commit(&mut state, &mut moves, MoveInformation::world(MoveKind::Deal(dealt)))
            .await?;

        while let Some((seat, request)) = pending_request(&state) {
            match self.ask(&state, seat, request).await? {
                Answer::Move(mv) => self.commit(&mut state, &mut moves, mv).await?,
                Answer::Control(ControlMessage::LeaveTable(p)) => {
                    info!(player = ?p, "player left the table");
                    let mv = MoveInformation::world(MoveKind::LeaveTable(p));
                    self.commit(&mut state, &mut moves, mv).await?;
                }
            }
        }

        Ok(GameOutcome {
            phase: state.phase,
            data: state.data,
            moves,
        })
    }

    async fn commit(
        &self,
        state: &mut GameState,
        moves: &mut Vec<MoveInformation>,
        mv: MoveInformation,
    ) -> Result<(), AppError> {
        apply_move(state, &mv)?;
        for player in &self.players {
            if timeout(self.rules.move_timeout, player.notify(&mv)).await.is_err() {
                warn!(player = player.name(), "notification timed out");
            }
        }
        moves.push(mv);
        Ok(())
    }

    /// Ask `seat` until it produces a move the rules accept.
    ///
    /// Gives up with a `TimeOut` move after the move timeout or after
    /// `max_move_attempts` rejected answers.
    async fn ask(
        &mut self,
        state: &GameState,
        seat: Player,
        request: MoveRequest,
    ) -> Result<Answer, AppError> {
        let player = Arc::clone(&self.players[seat.index()]);
        let view = PlayerView::of(state, seat);
        let time_out = MoveInformation::world(MoveKind::TimeOut(seat));

        for attempt in 1..=self.rules.max_move_attempts {
            let answer = tokio::select! {
                _ = self.cancel.cancelled() => return Err(AppError::Cancelled),
                Some(msg) = next_control(&mut self.control) => return Ok(Answer::Control(msg)),
                res = timeout(self.rules.move_timeout, player.choose_move(request, &view)) => res,
            };
            let kind = match answer {
                Err(_) => {
                    warn!(player = ?seat, ?request, "move timed out");
                    return Ok(Answer::Move(time_out));
                }
                Ok(Err(e)) => {
                    warn!(player = ?seat, attempt, error = %e, "player source failed");
                    continue;
                }
                Ok(Ok(kind)) => kind,
            };

            let mv = MoveInformation::new(seat, kind);
            let mut trial = state.clone();
            match apply_move(&mut trial, &mv) {
                Ok(_) => {
                    debug!(player = ?seat, kind = mv.kind.tag(), "move accepted");
                    return Ok(Answer::Move(mv));
                }
                Err(e) => warn!(player = ?seat, attempt, error = %e, "move rejected"),
            }
        }

        warn!(player = ?seat, "no acceptable move, timing out");
        Ok(Answer::Move(time_out))
    }
}
