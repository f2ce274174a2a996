//! Per-play game sessions.
//!
//! The game engine runs in its own context and reports its final score once.
//! Each `GameSession` owns the receiving half of a one-shot channel, and the
//! engine gets the matching `GameEndHandle`. Sessions share nothing, so two
//! overlapping plays can never see each other's result.

use std::time::Instant;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("game session ended without reporting a score")]
    Abandoned,

    #[error("game session is no longer waiting for a result")]
    SessionClosed,
}

/// Final result of one play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub game_id: String,
    pub score: i64,
    pub duration_secs: i64,
}

#[derive(Debug)]
pub struct GameSession {
    game_id: String,
    started_at: Instant,
    receiver: oneshot::Receiver<i64>,
}

/// Given to the game engine; fires at most once because `finish` consumes it
#[derive(Debug)]
pub struct GameEndHandle {
    sender: oneshot::Sender<i64>,
}

impl GameSession {
    /// Starts the clock for a new play and returns the engine's end handle
    pub fn start(game_id: impl Into<String>) -> (GameSession, GameEndHandle) {
        let (sender, receiver) = oneshot::channel();
        let session = GameSession {
            game_id: game_id.into(),
            started_at: Instant::now(),
            receiver,
        };
        (session, GameEndHandle { sender })
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    /// Waits for the engine to report. Duration is whole elapsed seconds,
    /// never less than one.
    pub async fn outcome(self) -> Result<GameOutcome, PlayError> {
        let score = self.receiver.await.map_err(|_| PlayError::Abandoned)?;
        let duration_secs = (self.started_at.elapsed().as_secs() as i64).max(1);

        debug!(game_id = %self.game_id, score, duration_secs, "Game session finished");

        Ok(GameOutcome {
            game_id: self.game_id,
            score,
            duration_secs,
        })
    }
}

impl GameEndHandle {
    pub fn finish(self, score: i64) -> Result<(), PlayError> {
        self.sender
            .send(score)
            .map_err(|_| PlayError::SessionClosed)
    }
}
