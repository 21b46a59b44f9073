use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::TileId;

/// One face of an element pair as laid out on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    text: String,
    group: String,
    flipped: bool,
    matched: bool,
}

impl Tile {
    pub(crate) fn new(id: TileId, text: String, group: String) -> Self {
        Self {
            id,
            text,
            group,
            flipped: false,
            matched: false,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    /// Text printed on the face of the tile.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Key shared by the two tiles dealt from the same element.
    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// Face-down and available for a flip or a hint reveal.
    pub fn is_hidden(&self) -> bool {
        !self.flipped && !self.matched
    }

    /// Text the player is allowed to see right now.
    pub fn visible_text(&self) -> Option<&str> {
        (self.flipped || self.matched).then_some(self.text.as_str())
    }

    /// Matched tiles are out of play and must render non-interactive.
    pub fn is_interactive(&self) -> bool {
        !self.matched
    }

    pub(crate) fn pairs_with(&self, other: &Tile) -> bool {
        self.group == other.group && self.text != other.text
    }

    pub(crate) fn set_flipped(&mut self, flipped: bool) {
        if !self.matched {
            self.flipped = flipped;
        }
    }

    pub(crate) fn set_matched(&mut self) {
        self.flipped = true;
        self.matched = true;
    }

    pub(crate) fn reset_id(&mut self, id: TileId) {
        self.id = id;
    }
}
