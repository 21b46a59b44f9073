use serde::{Deserialize, Serialize};

use crate::*;

/// Everything the render side needs after a state change.
#[derive(Copy, Clone, Debug)]
pub struct SessionView<'a> {
    pub tiles: &'a [Tile],
    pub score: Count,
    pub seconds_remaining: Count,
    pub moves_remaining: Count,
    pub hints_remaining: Count,
    pub state: GameState,
    pub question: Option<&'a ReactionQuestion>,
}

/// User-facing messages a host shows as a dialog or toast.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// Terminal state reached, delivered after the game-over pacing delay.
    Finished(GameState),
    Answer(AnswerOutcome),
}

pub trait Presenter {
    fn render(&mut self, view: &SessionView<'_>);

    fn notify(&mut self, notice: Notice);
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn render(&mut self, view: &SessionView<'_>) {
        (**self).render(view)
    }

    fn notify(&mut self, notice: Notice) {
        (**self).notify(notice)
    }
}
