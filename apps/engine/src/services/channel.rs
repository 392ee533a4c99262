//! A player whose moves come from outside the engine (a UI, a network peer).
//!
//! Every request is forwarded as a [`PlayerPrompt`]; the answer travels back
//! on the prompt's oneshot sender. Dropping the prompt without answering makes
//! the request fail, and the runner counts it as a rejected attempt.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::domain::moves::{MoveInformation, MoveKind};
use crate::error::AppError;
use crate::services::player_source::{MoveRequest, PlayerSource, PlayerView};

#[derive(Debug)]
pub struct PlayerPrompt {
    pub request: MoveRequest,
    pub view: PlayerView,
    pub reply: oneshot::Sender<MoveKind>,
}

/// Messages delivered to the outside on the notification channel.
#[derive(Debug)]
pub enum PlayerEvent {
    Prompt(PlayerPrompt),
    MoveApplied(MoveInformation),
}

pub struct ChannelPlayer {
    name: String,
    tx: mpsc::Sender<PlayerEvent>,
}

impl ChannelPlayer {
    pub fn new(name: impl Into<String>, capacity: usize) -> (Self, mpsc::Receiver<PlayerEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (
            Self {
                name: name.into(),
                tx,
            },
            rx,
        )
    }
}

#[async_trait]
impl PlayerSource for ChannelPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn choose_move(
        &self,
        request: MoveRequest,
        view: &PlayerView,
    ) -> Result<MoveKind, AppError> {
        let (reply, answer) = oneshot::channel();
        let prompt = PlayerPrompt {
            request,
            view: view.clone(),
            reply,
        };
        self.tx
            .send(PlayerEvent::Prompt(prompt))
            .await
            .map_err(|_| AppError::player_source(format!("{} is gone", self.name)))?;
        debug!(player = %self.name, ?request, "waiting for external move");
        answer
            .await
            .map_err(|_| AppError::player_source(format!("{} dropped the request", self.name)))
    }

    async fn notify(&self, mv: &MoveInformation) {
        // Nobody listening is not an error for the game.
        let _ = self.tx.send(PlayerEvent::MoveApplied(mv.clone())).await;
    }
}
