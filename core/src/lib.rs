#![no_std]

extern crate alloc;

use alloc::string::ToString;
use alloc::vec::Vec;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

pub use catalog::*;
pub use deck::*;
pub use error::*;
pub use present::*;
pub use schedule::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod catalog;
mod deck;
mod error;
mod present;
mod schedule;
mod session;
mod tile;
mod types;

/// Points awarded for every matched pair.
pub const MATCH_BONUS: Count = 10;

/// Delays between a player action and its visible consequence, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Time a matching pair stays face-up before it locks in.
    pub match_delay_ms: u32,
    /// Time a mismatched pair stays face-up before it turns back.
    pub mismatch_delay_ms: u32,
    /// How long a hint keeps its tile revealed.
    pub hint_reveal_ms: u32,
    /// Pause between the final move and the win/lose announcement.
    pub game_over_notice_ms: u32,
    /// Countdown resolution.
    pub tick_ms: u32,
}

impl Pacing {
    pub const fn resolve_delay_ms(&self, verdict: PairVerdict) -> u32 {
        match verdict {
            PairVerdict::Match => self.match_delay_ms,
            PairVerdict::Mismatch => self.mismatch_delay_ms,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            match_delay_ms: 500,
            mismatch_delay_ms: 1000,
            hint_reveal_ms: 1500,
            game_over_notice_ms: 300,
            tick_ms: 1000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub elements: Vec<Element>,
    pub reactions: Vec<ReactionQuestion>,
    #[serde(default = "SessionConfig::default_move_budget")]
    pub move_budget: Count,
    #[serde(default = "SessionConfig::default_time_budget")]
    pub time_budget_secs: Count,
    #[serde(default = "SessionConfig::default_max_hints")]
    pub max_hints: Count,
    #[serde(default)]
    pub pacing: Pacing,
}

impl SessionConfig {
    pub const DEFAULT_MOVE_BUDGET: Count = 20;
    pub const DEFAULT_TIME_BUDGET_SECS: Count = 60;
    pub const DEFAULT_MAX_HINTS: Count = 2;

    pub fn new(elements: Vec<Element>, reactions: Vec<ReactionQuestion>) -> Self {
        Self {
            elements,
            reactions,
            move_budget: Self::DEFAULT_MOVE_BUDGET,
            time_budget_secs: Self::DEFAULT_TIME_BUDGET_SECS,
            max_hints: Self::DEFAULT_MAX_HINTS,
            pacing: Pacing::default(),
        }
    }

    pub fn with_move_budget(mut self, move_budget: Count) -> Self {
        self.move_budget = move_budget;
        self
    }

    pub fn with_time_budget(mut self, time_budget_secs: Count) -> Self {
        self.time_budget_secs = time_budget_secs;
        self
    }

    pub fn with_max_hints(mut self, max_hints: Count) -> Self {
        self.max_hints = max_hints;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn total_tiles(&self) -> usize {
        self.elements.len() * 2
    }

    /// Rejects configurations that would deal a degenerate or unplayable board.
    pub fn validate(&self) -> Result<()> {
        if self.elements.is_empty() {
            return Err(GameError::NoElements);
        }

        let mut seen = HashSet::with_capacity(self.elements.len());
        for element in &self.elements {
            if !seen.insert(element.name.as_str()) {
                return Err(GameError::DuplicateElement(element.name.clone()));
            }
            if element.atomic_number == 0 {
                return Err(GameError::InvalidAtomicNumber(element.name.clone()));
            }
            if element.name == element.atomic_number.to_string() {
                return Err(GameError::IndistinctElement(element.name.clone()));
            }
        }

        if self.reactions.is_empty() {
            return Err(GameError::NoReactions);
        }
        if let Some(question) = self.reactions.iter().find(|q| !q.has_valid_answer()) {
            return Err(GameError::UnanswerableQuestion(question.prompt.clone()));
        }

        if self.move_budget == 0 {
            return Err(GameError::NoMoveBudget);
        }
        if self.time_budget_secs == 0 {
            return Err(GameError::NoTimeBudget);
        }
        if self.max_hints == 0 {
            return Err(GameError::NoHintBudget);
        }

        Ok(())
    }

    fn default_move_budget() -> Count {
        Self::DEFAULT_MOVE_BUDGET
    }

    fn default_time_budget() -> Count {
        Self::DEFAULT_TIME_BUDGET_SECS
    }

    fn default_max_hints() -> Count {
        Self::DEFAULT_MAX_HINTS
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Configured but not dealt yet.
    Ready,
    InProgress,
    Won,
    LostNoMoves,
    LostNoTime,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::LostNoMoves | Self::LostNoTime)
    }

    pub const fn is_lost(self) -> bool {
        matches!(self, Self::LostNoMoves | Self::LostNoTime)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairVerdict {
    Match,
    Mismatch,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Not in play, out of range, already face-up, or a pair is waiting to resolve.
    Ignored,
    Flipped,
    /// Second tile of a pair; the verdict is applied after the pacing delay.
    PairPending(PairVerdict),
    /// The flip used the last move and ended the game.
    OutOfMoves,
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        use FlipOutcome::*;
        match self {
            Ignored => false,
            Flipped => true,
            PairPending(_) => true,
            OutOfMoves => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
}
