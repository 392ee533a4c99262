use crate::domain::state::{GameState, Phase, Player};

/// The parts of a game that transitions are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub phase: Phase,
    pub turn: Option<Player>,
    pub completed_tricks: usize,
    pub last_trick_winner: Option<Player>,
}

impl GameView {
    pub fn of(state: &GameState) -> Self {
        let last_trick_winner = state
            .data
            .tricks
            .iter()
            .rev()
            .find_map(|t| t.winner());
        Self {
            phase: state.phase,
            turn: state.turn,
            completed_tricks: state.data.completed_tricks(),
            last_trick_winner,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Edge-triggered: the turn became a specific player.
    TurnBecame { player: Player },

    /// Edge-triggered: phase changed.
    PhaseChanged { from: Phase, to: Phase },

    /// A trick was completed; `number` is 0-based.
    TrickCompleted { number: usize, winner: Player },

    /// Edge-triggered: game reached GameOver or PreliminaryEnd.
    GameEnded { premature: bool },
}

/// Derive domain transitions from before/after views.
pub fn derive_game_transitions(before: &GameView, after: &GameView) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    if let Some(player) = after.turn {
        if before.turn != Some(player) {
            transitions.push(GameTransition::TurnBecame { player });
        }
    }

    if before.phase != after.phase {
        transitions.push(GameTransition::PhaseChanged {
            from: before.phase,
            to: after.phase,
        });
    }

    if after.completed_tricks > before.completed_tricks {
        if let Some(winner) = after.last_trick_winner {
            transitions.push(GameTransition::TrickCompleted {
                number: after.completed_tricks - 1,
                winner,
            });
        }
    }

    if !before.phase.is_finished() && after.phase.is_finished() {
        transitions.push(GameTransition::GameEnded {
            premature: after.phase == Phase::PreliminaryEnd,
        });
    }

    transitions
}
