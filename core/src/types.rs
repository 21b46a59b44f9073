use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Position of a tile in the dealt layout, `0..tiles.len()`.
pub type TileId = usize;

/// Count type used for scores, budgets and tile counts.
pub type Count = u32;

/// Number of answer choices every reaction question carries.
pub const CHOICE_COUNT: usize = 4;

/// A chemical element contributing one name tile and one atomic-number tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub atomic_number: u8,
}

impl Element {
    pub fn new(name: impl Into<String>, atomic_number: u8) -> Self {
        Self {
            name: name.into(),
            atomic_number,
        }
    }
}

/// Multiple-choice chemistry question that unlocks a hint when answered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionQuestion {
    pub prompt: String,
    pub choices: [String; CHOICE_COUNT],
    pub correct_choice: String,
}

impl ReactionQuestion {
    pub fn new(prompt: impl Into<String>, choices: [&str; CHOICE_COUNT], correct: &str) -> Self {
        Self {
            prompt: prompt.into(),
            choices: choices.map(String::from),
            correct_choice: correct.into(),
        }
    }

    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct_choice == choice
    }

    pub(crate) fn has_valid_answer(&self) -> bool {
        self.choices.iter().any(|choice| *choice == self.correct_choice)
    }
}
