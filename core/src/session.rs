use alloc::vec::Vec;
use hashbrown::HashMap;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::*;

/// Delayed work the session is waiting on, keyed by the timer that triggers it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Task {
    ResolvePair(PairVerdict),
    EndHintReveal(TileId),
    AnnounceFinish(GameState),
}

/// One play-through of a level.
///
/// All state lives here and changes only through the methods below, one event at a time. The
/// session talks to the outside world through a [`Scheduler`] for its countdown and pacing
/// delays, and through a [`Presenter`] that is told to render after every change.
pub struct GameSession<S: Scheduler, P: Presenter> {
    config: SessionConfig,
    scheduler: S,
    presenter: P,
    rng: SmallRng,
    tiles: Vec<Tile>,
    selection: SmallVec<[TileId; 2]>,
    matched_count: usize,
    score: Count,
    moves_remaining: Count,
    seconds_remaining: Count,
    hints_used: Count,
    question: Option<usize>,
    state: GameState,
    clock: Option<TimerHandle>,
    pending: HashMap<TimerHandle, Task>,
    closed: bool,
}

impl<S: Scheduler, P: Presenter> GameSession<S, P> {
    /// Validates `config` and returns a session in [`GameState::Ready`]. Nothing is dealt and no
    /// timer is armed until [`start`](Self::start).
    pub fn new(config: SessionConfig, scheduler: S, presenter: P, seed: u64) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            moves_remaining: config.move_budget,
            seconds_remaining: config.time_budget_secs,
            config,
            scheduler,
            presenter,
            rng: SmallRng::seed_from_u64(seed),
            tiles: Vec::new(),
            selection: SmallVec::new(),
            matched_count: 0,
            score: 0,
            hints_used: 0,
            question: None,
            state: GameState::Ready,
            clock: None,
            pending: HashMap::new(),
            closed: false,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// Face-up tiles waiting for their pair to resolve.
    pub fn selection(&self) -> &[TileId] {
        &self.selection
    }

    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    pub fn score(&self) -> Count {
        self.score
    }

    pub fn moves_remaining(&self) -> Count {
        self.moves_remaining
    }

    pub fn seconds_remaining(&self) -> Count {
        self.seconds_remaining
    }

    pub fn hints_used(&self) -> Count {
        self.hints_used
    }

    pub fn hints_remaining(&self) -> Count {
        self.config.max_hints.saturating_sub(self.hints_used)
    }

    pub fn active_question(&self) -> Option<&ReactionQuestion> {
        self.question.and_then(|index| self.config.reactions.get(index))
    }

    /// Whether the board still reacts to flips, ticks and hints.
    pub fn is_playable(&self) -> bool {
        self.state.is_in_progress() && !self.closed
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            tiles: &self.tiles,
            score: self.score,
            seconds_remaining: self.seconds_remaining,
            moves_remaining: self.moves_remaining,
            hints_remaining: self.hints_remaining(),
            state: self.state,
            question: self.active_question(),
        }
    }

    /// Deals a fresh board and starts the countdown. Calling it again restarts the level, dropping
    /// every timer armed for the previous board.
    pub fn start(&mut self) {
        self.cancel_timers();

        self.tiles = deal(&self.config.elements, &mut self.rng);
        self.selection.clear();
        self.matched_count = 0;
        self.score = 0;
        self.moves_remaining = self.config.move_budget;
        self.seconds_remaining = self.config.time_budget_secs;
        self.hints_used = 0;
        self.question = None;
        self.state = GameState::InProgress;
        self.closed = false;

        self.clock = Some(
            self.scheduler
                .schedule(self.config.pacing.tick_ms, Repeat::Every),
        );
        log::debug!(
            "dealt {} tiles, {} moves, {}s",
            self.tiles.len(),
            self.moves_remaining,
            self.seconds_remaining
        );
        self.render();
    }

    /// Cancels the countdown and all pending callbacks. Call before navigating away.
    pub fn teardown(&mut self) {
        self.cancel_timers();
        self.question = None;
        self.closed = true;
        log::debug!("session torn down in state {:?}", self.state);
    }

    pub fn flip(&mut self, id: TileId) -> FlipOutcome {
        use FlipOutcome::*;

        if !self.is_playable() || self.selection.len() == 2 {
            return Ignored;
        }
        let Some(tile) = self.tiles.get_mut(id) else {
            return Ignored;
        };
        if !tile.is_hidden() {
            return Ignored;
        }

        tile.set_flipped(true);
        self.selection.push(id);
        self.moves_remaining = self.moves_remaining.saturating_sub(1);
        log::trace!("flip {} ({} moves left)", id, self.moves_remaining);
        self.render();

        // the last move ends the game before its pair is judged
        if self.moves_remaining == 0 {
            self.finish(GameState::LostNoMoves);
            return OutOfMoves;
        }

        if let &[first, second] = self.selection.as_slice() {
            let verdict = if self.tiles[first].pairs_with(&self.tiles[second]) {
                PairVerdict::Match
            } else {
                PairVerdict::Mismatch
            };
            let delay = self.config.pacing.resolve_delay_ms(verdict);
            self.schedule_task(delay, Task::ResolvePair(verdict));
            return PairPending(verdict);
        }

        Flipped
    }

    /// One second of the countdown. Driven by the session's own repeating timer.
    pub fn tick(&mut self) -> GameState {
        if !self.is_playable() {
            return self.state;
        }

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        self.render();
        if self.seconds_remaining == 0 {
            self.finish(GameState::LostNoTime);
        }
        self.state
    }

    /// Draws a reaction question for the player to answer. A question that is already open is
    /// replaced by the new draw.
    pub fn request_hint(&mut self) -> Result<&ReactionQuestion> {
        if !self.is_playable() {
            return Err(GameError::NotInProgress);
        }
        if self.hints_used >= self.config.max_hints {
            return Err(GameError::HintsExhausted);
        }

        // the bank was checked non-empty in `new`
        let index = self.rng.random_range(0..self.config.reactions.len());
        self.question = Some(index);
        log::debug!("hint question {} drawn", index);
        self.render();

        Ok(&self.config.reactions[index])
    }

    /// Checks `choice` against the open question. A correct answer spends a hint and briefly
    /// reveals one random face-down tile; a wrong one leaves the question open.
    pub fn answer_hint(&mut self, choice: &str) -> AnswerOutcome {
        let correct = self.is_playable()
            && self
                .active_question()
                .is_some_and(|question| question.is_correct(choice));

        if !correct {
            self.presenter
                .notify(Notice::Answer(AnswerOutcome::Incorrect));
            return AnswerOutcome::Incorrect;
        }

        self.hints_used += 1;
        self.question = None;
        self.presenter.notify(Notice::Answer(AnswerOutcome::Correct));
        self.reveal_random_tile();
        self.render();
        AnswerOutcome::Correct
    }

    /// Closes the open question without spending a hint.
    pub fn dismiss_hint(&mut self) {
        if self.question.take().is_some() {
            self.render();
        }
    }

    /// Runs the work attached to an elapsed timer. Returns `false` for handles this session no
    /// longer tracks, such as timers armed before a restart.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.clock == Some(handle) {
            self.tick();
            return true;
        }

        let Some(task) = self.pending.remove(&handle) else {
            log::trace!("stale timer {:?}", handle);
            return false;
        };
        self.scheduler.cancel(handle);

        match task {
            Task::ResolvePair(verdict) => self.resolve_pair(verdict),
            Task::EndHintReveal(id) => self.end_hint_reveal(id),
            Task::AnnounceFinish(state) => self.presenter.notify(Notice::Finished(state)),
        }
        true
    }

    fn resolve_pair(&mut self, verdict: PairVerdict) {
        let &[first, second] = self.selection.as_slice() else {
            log::warn!("pair resolution without a pair: {:?}", self.selection);
            self.selection.clear();
            return;
        };

        match verdict {
            PairVerdict::Match => {
                self.tiles[first].set_matched();
                self.tiles[second].set_matched();
                self.score = self.score.saturating_add(MATCH_BONUS);
                self.matched_count += 2;
                log::trace!("matched {} and {}", first, second);
            }
            PairVerdict::Mismatch => {
                self.tiles[first].set_flipped(false);
                self.tiles[second].set_flipped(false);
            }
        }
        self.selection.clear();

        if self.matched_count == self.tiles.len() {
            self.finish(GameState::Won);
        } else {
            self.render();
        }
    }

    fn reveal_random_tile(&mut self) {
        let hidden: Vec<TileId> = self
            .tiles
            .iter()
            .filter(|tile| tile.is_hidden())
            .map(Tile::id)
            .collect();

        let Some(&id) = hidden.choose(&mut self.rng) else {
            log::debug!("no face-down tile left to reveal");
            return;
        };

        self.tiles[id].set_flipped(true);
        self.schedule_task(
            self.config.pacing.hint_reveal_ms,
            Task::EndHintReveal(id),
        );
    }

    fn end_hint_reveal(&mut self, id: TileId) {
        // matched tiles keep their face up
        if let Some(tile) = self.tiles.get_mut(id) {
            tile.set_flipped(false);
        }
        self.render();
    }

    fn finish(&mut self, outcome: GameState) {
        if self.state.is_finished() {
            return;
        }

        self.cancel_timers();
        self.state = outcome;
        self.selection.clear();
        self.question = None;
        if outcome.is_lost() {
            for tile in &mut self.tiles {
                tile.set_flipped(true);
            }
        }

        log::debug!("game over: {:?}, score {}", outcome, self.score);
        self.render();
        self.schedule_task(
            self.config.pacing.game_over_notice_ms,
            Task::AnnounceFinish(outcome),
        );
    }

    fn schedule_task(&mut self, delay_ms: u32, task: Task) {
        let handle = self.scheduler.schedule(delay_ms, Repeat::Once);
        self.pending.insert(handle, task);
    }

    fn cancel_timers(&mut self) {
        if let Some(handle) = self.clock.take() {
            self.scheduler.cancel(handle);
        }
        for (handle, _) in self.pending.drain() {
            self.scheduler.cancel(handle);
        }
    }

    fn render(&mut self) {
        let view = SessionView {
            tiles: &self.tiles,
            score: self.score,
            seconds_remaining: self.seconds_remaining,
            moves_remaining: self.moves_remaining,
            hints_remaining: self.config.max_hints.saturating_sub(self.hints_used),
            state: self.state,
            question: self
                .question
                .and_then(|index| self.config.reactions.get(index)),
        };
        self.presenter.render(&view);
    }
}

impl<P: Presenter> GameSession<ManualScheduler, P> {
    /// Moves the simulated clock forward by `ms`, firing every timer that falls due on the way.
    pub fn advance_time(&mut self, ms: u64) {
        let until = self.scheduler.now() + ms;
        while let Some(handle) = self.scheduler.next_due(until) {
            self.fire(handle);
        }
        self.scheduler.set_now(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[derive(Debug, Default)]
    struct Recorder {
        renders: usize,
        last_seconds: Option<Count>,
        notices: Vec<Notice>,
    }

    impl Presenter for Recorder {
        fn render(&mut self, view: &SessionView<'_>) {
            self.renders += 1;
            self.last_seconds = Some(view.seconds_remaining);
        }

        fn notify(&mut self, notice: Notice) {
            self.notices.push(notice);
        }
    }

    type TestSession = GameSession<ManualScheduler, Recorder>;

    fn elements() -> Vec<Element> {
        vec![
            Element::new("Hydrogen", 1),
            Element::new("Helium", 2),
            Element::new("Lithium", 3),
            Element::new("Beryllium", 4),
        ]
    }

    fn reactions() -> Vec<ReactionQuestion> {
        vec![
            ReactionQuestion::new("H₂ + O₂ → ?", ["H₂O", "CO₂", "NaCl", "NH₃"], "H₂O"),
            ReactionQuestion::new("Na + Cl₂ → ?", ["NaCl", "KCl", "MgO", "CO₂"], "NaCl"),
        ]
    }

    fn started(config: SessionConfig) -> TestSession {
        let mut session =
            GameSession::new(config, ManualScheduler::new(), Recorder::default(), 1).unwrap();
        session.start();
        session
    }

    fn default_session() -> TestSession {
        started(SessionConfig::new(elements(), reactions()))
    }

    fn partner_of(session: &TestSession, id: TileId) -> TileId {
        let group = session.tiles()[id].group();
        session
            .tiles()
            .iter()
            .find(|tile| tile.group() == group && tile.id() != id)
            .map(Tile::id)
            .unwrap()
    }

    fn stranger_of(session: &TestSession, id: TileId) -> TileId {
        let group = session.tiles()[id].group();
        session
            .tiles()
            .iter()
            .find(|tile| tile.group() != group && tile.is_hidden())
            .map(Tile::id)
            .unwrap()
    }

    fn first_hidden(session: &TestSession) -> TileId {
        session
            .tiles()
            .iter()
            .find(|tile| tile.is_hidden())
            .map(Tile::id)
            .unwrap()
    }

    fn answer_of(session: &TestSession) -> alloc::string::String {
        session.active_question().unwrap().correct_choice.clone()
    }

    fn check_invariants(session: &TestSession) {
        assert!(session.selection().len() <= 2);
        assert_eq!(session.matched_count() % 2, 0);
        assert!(session.matched_count() <= session.tiles().len());
        assert!(session.hints_used() <= session.config().max_hints);
        assert_eq!(
            session.matched_count(),
            session.tiles().iter().filter(|t| t.is_matched()).count()
        );
        assert!(
            session
                .tiles()
                .iter()
                .filter(|t| t.is_matched())
                .all(Tile::is_flipped)
        );
        assert_eq!(
            session.matched_count() == session.tiles().len(),
            session.state() == GameState::Won
        );
    }

    #[test]
    fn new_session_waits_for_start() {
        let mut session = GameSession::new(
            SessionConfig::new(elements(), reactions()),
            ManualScheduler::new(),
            Recorder::default(),
            1,
        )
        .unwrap();

        assert_eq!(session.state(), GameState::Ready);
        assert!(session.tiles().is_empty());
        assert_eq!(session.flip(0), FlipOutcome::Ignored);
        assert_eq!(session.request_hint().err(), Some(GameError::NotInProgress));
        assert_eq!(session.scheduler().armed_count(), 0);
    }

    #[test]
    fn invalid_configuration_is_rejected_at_creation() {
        let result = GameSession::new(
            SessionConfig::new(Vec::new(), reactions()),
            ManualScheduler::new(),
            Recorder::default(),
            1,
        );

        assert_eq!(result.err(), Some(GameError::NoElements));
    }

    #[test]
    fn start_deals_pairs_resets_budgets_and_arms_the_clock() {
        let session = default_session();

        assert_eq!(session.state(), GameState::InProgress);
        assert_eq!(session.tiles().len(), 8);
        assert_eq!(session.moves_remaining(), 20);
        assert_eq!(session.seconds_remaining(), 60);
        assert_eq!(session.hints_remaining(), 2);
        assert_eq!(session.score(), 0);
        assert_eq!(session.presenter().renders, 1);
        assert_eq!(session.scheduler().armed_count(), 1);
        for tile in session.tiles() {
            let partner = partner_of(&session, tile.id());
            assert_ne!(tile.text(), session.tiles()[partner].text());
        }
    }

    #[test]
    fn single_element_board_is_won_by_flipping_both_tiles() {
        let mut session = started(SessionConfig::new(
            vec![Element::new("H", 1)],
            reactions(),
        ));

        assert_eq!(session.flip(0), FlipOutcome::Flipped);
        assert_eq!(session.flip(1), FlipOutcome::PairPending(PairVerdict::Match));
        assert_eq!(session.state(), GameState::InProgress);

        session.advance_time(500);

        assert_eq!(session.matched_count(), 2);
        assert_eq!(session.score(), 10);
        assert_eq!(session.state(), GameState::Won);
        assert!(session.tiles().iter().all(Tile::is_matched));
        assert!(session.presenter().notices.is_empty());

        session.advance_time(300);
        assert_eq!(
            session.presenter().notices,
            [Notice::Finished(GameState::Won)]
        );
        assert_eq!(session.scheduler().armed_count(), 0);
    }

    #[test]
    fn mismatch_turns_both_tiles_back_after_the_delay() {
        let mut session = default_session();
        let a = first_hidden(&session);
        let b = stranger_of(&session, a);

        session.flip(a);
        assert_eq!(session.flip(b), FlipOutcome::PairPending(PairVerdict::Mismatch));

        session.advance_time(999);
        assert!(session.tiles()[a].is_flipped());

        session.advance_time(1);
        assert!(!session.tiles()[a].is_flipped());
        assert!(!session.tiles()[b].is_flipped());
        assert!(session.selection().is_empty());
        assert_eq!(session.score(), 0);
        assert_eq!(session.matched_count(), 0);
        assert_eq!(session.moves_remaining(), 18);
    }

    #[test]
    fn ignored_flips_leave_counters_untouched() {
        let mut session = default_session();
        let a = first_hidden(&session);
        let b = partner_of(&session, a);

        session.flip(a);
        assert_eq!(session.flip(a), FlipOutcome::Ignored);
        session.flip(b);

        let third = first_hidden(&session);
        assert_eq!(session.flip(third), FlipOutcome::Ignored);
        assert_eq!(session.flip(session.tiles().len()), FlipOutcome::Ignored);
        assert_eq!(session.moves_remaining(), 18);

        session.advance_time(500);
        let (moves, score, matched) = (
            session.moves_remaining(),
            session.score(),
            session.matched_count(),
        );
        assert_eq!(session.flip(a), FlipOutcome::Ignored);
        assert_eq!(session.flip(b), FlipOutcome::Ignored);
        assert_eq!(
            (moves, score, matched),
            (
                session.moves_remaining(),
                session.score(),
                session.matched_count()
            )
        );
    }

    #[test]
    fn running_out_of_moves_loses_and_reveals_the_board() {
        let mut session = started(SessionConfig::new(elements(), reactions()).with_move_budget(5));

        while session.state().is_in_progress() {
            let a = first_hidden(&session);
            let b = stranger_of(&session, a);
            session.flip(a);
            session.flip(b);
            session.advance_time(1000);
            check_invariants(&session);
        }

        assert_eq!(session.state(), GameState::LostNoMoves);
        assert_eq!(session.moves_remaining(), 0);
        assert!(session.tiles().iter().all(Tile::is_flipped));

        let seconds = session.seconds_remaining();
        session.advance_time(5000);
        assert_eq!(session.seconds_remaining(), seconds);
        assert_eq!(
            session.presenter().notices,
            [Notice::Finished(GameState::LostNoMoves)]
        );
    }

    #[test]
    fn last_move_loses_even_when_it_completes_a_pair() {
        let mut session = started(
            SessionConfig::new(vec![Element::new("H", 1)], reactions()).with_move_budget(2),
        );

        session.flip(0);
        assert_eq!(session.flip(1), FlipOutcome::OutOfMoves);
        session.advance_time(1000);

        assert_eq!(session.state(), GameState::LostNoMoves);
        assert_eq!(session.matched_count(), 0);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn countdown_runs_out_and_loses() {
        let mut session = default_session();
        let a = first_hidden(&session);
        let b = partner_of(&session, a);
        session.flip(a);
        session.flip(b);

        session.advance_time(59_000);
        assert_eq!(session.seconds_remaining(), 1);
        assert_eq!(session.presenter().last_seconds, Some(1));
        assert!(session.state().is_in_progress());

        session.advance_time(1000);
        assert_eq!(session.seconds_remaining(), 0);
        assert_eq!(session.state(), GameState::LostNoTime);
        assert!(session.tiles().iter().all(Tile::is_flipped));
        assert_eq!(session.matched_count(), 2);
        check_invariants(&session);

        assert_eq!(session.flip(a), FlipOutcome::Ignored);
        assert_eq!(session.tick(), GameState::LostNoTime);
        assert_eq!(session.seconds_remaining(), 0);

        session.advance_time(300);
        assert_eq!(
            session.presenter().notices,
            [Notice::Finished(GameState::LostNoTime)]
        );
    }

    #[test]
    fn correct_answers_spend_hints_until_exhausted() {
        let mut session = default_session();

        for used in 1..=2 {
            session.request_hint().unwrap();
            let answer = answer_of(&session);
            assert_eq!(session.answer_hint(&answer), AnswerOutcome::Correct);
            assert_eq!(session.hints_used(), used);
            assert!(session.active_question().is_none());
            session.advance_time(1500);
        }

        assert_eq!(session.hints_remaining(), 0);
        assert_eq!(session.request_hint().err(), Some(GameError::HintsExhausted));
        assert_eq!(
            session.presenter().notices,
            [
                Notice::Answer(AnswerOutcome::Correct),
                Notice::Answer(AnswerOutcome::Correct)
            ]
        );
    }

    #[test]
    fn hint_question_is_drawn_from_the_bank_and_stays_open() {
        let mut session = default_session();

        for _ in 0..16 {
            let drawn = session.request_hint().unwrap().clone();
            assert!(session.config().reactions.contains(&drawn));
            assert_eq!(session.active_question(), Some(&drawn));
        }
        assert_eq!(session.hints_used(), 0);
    }

    #[test]
    fn wrong_answer_keeps_the_question_open() {
        let mut session = default_session();
        let prompt = session.request_hint().unwrap().prompt.clone();

        assert_eq!(session.answer_hint("Au"), AnswerOutcome::Incorrect);
        assert_eq!(session.hints_used(), 0);
        assert_eq!(session.active_question().unwrap().prompt, prompt);
        assert!(session.tiles().iter().all(Tile::is_hidden));

        let answer = answer_of(&session);
        assert_eq!(session.answer_hint(&answer), AnswerOutcome::Correct);
    }

    #[test]
    fn answer_without_a_question_is_incorrect() {
        let mut session = default_session();

        assert_eq!(session.answer_hint("H₂O"), AnswerOutcome::Incorrect);
        assert_eq!(session.hints_used(), 0);
        assert_eq!(
            session.presenter().notices,
            [Notice::Answer(AnswerOutcome::Incorrect)]
        );
    }

    #[test]
    fn dismissed_question_costs_nothing() {
        let mut session = default_session();
        session.request_hint().unwrap();

        session.dismiss_hint();

        assert!(session.active_question().is_none());
        assert_eq!(session.hints_remaining(), 2);
        assert_eq!(session.answer_hint("H₂O"), AnswerOutcome::Incorrect);
    }

    #[test]
    fn hint_reveals_one_hidden_tile_temporarily() {
        let mut session = default_session();
        let a = first_hidden(&session);
        session.flip(a);

        session.request_hint().unwrap();
        let answer = answer_of(&session);
        session.answer_hint(&answer);

        let revealed: Vec<_> = session
            .tiles()
            .iter()
            .filter(|t| t.is_flipped() && t.id() != a)
            .map(Tile::id)
            .collect();
        assert_eq!(revealed.len(), 1);
        assert_eq!(session.moves_remaining(), 19);
        assert_eq!(session.flip(revealed[0]), FlipOutcome::Ignored);

        session.advance_time(1499);
        assert!(session.tiles()[revealed[0]].is_flipped());
        session.advance_time(1);
        assert!(!session.tiles()[revealed[0]].is_flipped());
        assert!(session.tiles()[a].is_flipped());
    }

    #[test]
    fn hint_revert_never_unmatches_a_tile() {
        let mut session = default_session();
        session.request_hint().unwrap();
        let answer = answer_of(&session);
        session.answer_hint(&answer);

        let revealed = session
            .tiles()
            .iter()
            .find(|t| t.is_flipped())
            .map(Tile::id)
            .unwrap();
        session.tiles[revealed].set_matched();

        session.advance_time(1500);
        assert!(session.tiles()[revealed].is_flipped());
        assert!(session.tiles()[revealed].is_matched());
    }

    #[test]
    fn losing_cancels_a_pending_hint_revert() {
        let mut session = started(SessionConfig::new(elements(), reactions()).with_time_budget(1));
        session.request_hint().unwrap();
        let answer = answer_of(&session);
        session.answer_hint(&answer);

        session.advance_time(1000);
        assert_eq!(session.state(), GameState::LostNoTime);

        session.advance_time(5000);
        assert!(session.tiles().iter().all(Tile::is_flipped));
    }

    #[test]
    fn restart_drops_timers_of_the_previous_board() {
        let mut session = default_session();
        let a = first_hidden(&session);
        let b = stranger_of(&session, a);
        session.flip(a);
        session.flip(b);
        let stale: Vec<_> = session.pending.keys().copied().collect();
        assert_eq!(stale.len(), 1);

        session.start();

        assert_eq!(session.scheduler().armed_count(), 1);
        assert!(!session.fire(stale[0]));
        assert_eq!(session.moves_remaining(), 20);
        assert!(session.selection().is_empty());
        assert!(session.tiles().iter().all(Tile::is_hidden));
    }

    #[test]
    fn teardown_disarms_everything() {
        let mut session = default_session();
        let a = first_hidden(&session);
        session.flip(a);
        session.flip(partner_of(&session, a));
        session.request_hint().unwrap();

        session.teardown();

        assert_eq!(session.scheduler().armed_count(), 0);
        assert!(!session.is_playable());
        assert!(session.active_question().is_none());
        assert_eq!(session.flip(first_hidden(&session)), FlipOutcome::Ignored);
        session.advance_time(120_000);
        assert_eq!(session.seconds_remaining(), 60);
        assert_eq!(session.matched_count(), 0);
    }

    #[test]
    fn random_play_preserves_invariants() {
        for seed in 0..32 {
            let mut session = started(SessionConfig::new(elements(), reactions()));
            let mut rng = SmallRng::seed_from_u64(seed);

            for _ in 0..200 {
                match rng.random_range(0..10) {
                    0 => {
                        let _ = session.request_hint();
                    }
                    1 => {
                        let choice = session
                            .active_question()
                            .map(|q| q.choices[rng.random_range(0..CHOICE_COUNT)].clone())
                            .unwrap_or_default();
                        session.answer_hint(&choice);
                    }
                    2..=3 => session.advance_time(rng.random_range(0..1600)),
                    _ => {
                        session.flip(rng.random_range(0..session.tiles().len()));
                    }
                }
                check_invariants(&session);
                if session.state().is_finished() {
                    break;
                }
            }
        }
    }
}
