use std::collections::VecDeque;

use alchemy_core as game;
use game::{GameSession, Notice, Presenter, SessionView, TileId, TimerHandle};
use yew::prelude::*;

use crate::timers::GlooScheduler;
use crate::utils::*;

type Session = GameSession<GlooScheduler, ViewInbox>;

/// Collects what the session asks the page to show until the component gets to it.
#[derive(Debug, Default)]
pub(crate) struct ViewInbox {
    dirty: bool,
    notices: VecDeque<Notice>,
}

impl ViewInbox {
    fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn drain_notices(&mut self) -> impl Iterator<Item = Notice> + '_ {
        self.notices.drain(..)
    }
}

impl Presenter for ViewInbox {
    fn render(&mut self, view: &SessionView<'_>) {
        log::trace!(
            "render: {:?}, {}s, {} moves, {} points",
            view.state,
            view.seconds_remaining,
            view.moves_remaining,
            view.score
        );
        self.dirty = true;
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }
}

/// Whether a tile button should refuse clicks.
fn tile_locked(playable: bool, tile: &game::Tile) -> bool {
    !playable || !tile.is_interactive()
}

pub(crate) fn notice_text(notice: Notice) -> &'static str {
    use game::AnswerOutcome::*;
    use game::GameState::*;

    match notice {
        Notice::Finished(Won) => "You win!",
        Notice::Finished(LostNoMoves) => "No moves left! Game over.",
        Notice::Finished(LostNoTime) => "Time's up! Game over.",
        Notice::Finished(Ready | InProgress) => "",
        Notice::Answer(Correct) => "Correct! Revealing a tile.",
        Notice::Answer(Incorrect) => "Incorrect! Try again.",
    }
}

#[derive(Clone, Debug, PartialEq)]
enum ViewTileState {
    Hidden,
    Flipped(String),
    Matched(String),
}

impl ViewTileState {
    fn of(tile: &game::Tile) -> Self {
        match tile.visible_text() {
            None => Self::Hidden,
            Some(text) if tile.is_matched() => Self::Matched(text.to_string()),
            Some(text) => Self::Flipped(text.to_string()),
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
struct TileProps {
    id: TileId,
    tile_state: ViewTileState,
    #[prop_or_default]
    locked: bool,
    callback: Callback<TileId>,
}

#[function_component(TileView)]
fn tile_component(props: &TileProps) -> Html {
    use ViewTileState::*;

    let TileProps {
        id,
        tile_state,
        locked,
        callback,
    } = props.clone();

    let (class, text) = match tile_state {
        Hidden => (classes!("tile"), String::new()),
        Flipped(text) => (classes!("tile", "flipped"), text),
        Matched(text) => (classes!("tile", "flipped", "matched"), text),
    };

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("tile {} clicked", id);
        callback.emit(id);
    });

    html! {
        <button {class} disabled={locked} {onclick}>{text}</button>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct HintDialogProps {
    question: Option<game::ReactionQuestion>,
    on_answer: Callback<String>,
    on_close: Callback<()>,
}

#[function_component(HintDialog)]
fn hint_dialog(props: &HintDialogProps) -> Html {
    let Some(question) = props.question.clone() else {
        return html! {};
    };

    let answers = question
        .choices
        .iter()
        .map(|choice| {
            let on_answer = props.on_answer.clone();
            let answer = choice.clone();
            let onclick = Callback::from(move |_: MouseEvent| on_answer.emit(answer.clone()));
            html! { <button class="answer-btn" {onclick}>{choice.clone()}</button> }
        })
        .collect::<Html>();
    let onclick = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <dialog id="hint" open={true}>
            <article>
                <h2>{"Answer to reveal a tile"}</h2>
                <p>{question.prompt.clone()}</p>
                <div class="answers">{answers}</div>
                <footer>
                    <button type="reset" {onclick}>{"Close"}</button>
                </footer>
            </article>
        </dialog>
    }
}

/// Events forwarded to the running session.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SessionMsg {
    Start,
    Flip(TileId),
    RequestHint,
    Answer(String),
    CloseHint,
    Timer(TimerHandle),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Session(SessionMsg),
    DismissMessage,
    Back,
}

impl From<SessionMsg> for Msg {
    fn from(msg: SessionMsg) -> Self {
        Self::Session(msg)
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub level: usize,
    pub seed: u64,
    pub on_back: Callback<()>,
}

pub(crate) struct GameView {
    title: &'static str,
    session: Option<Session>,
    messages: VecDeque<String>,
}

impl GameView {
    fn create_session(ctx: &Context<Self>, level: &game::Level) -> game::Result<Session> {
        let scheduler = GlooScheduler::new(ctx.link().callback(SessionMsg::Timer));
        GameSession::new(
            level.config(),
            scheduler,
            ViewInbox::default(),
            ctx.props().seed,
        )
    }

    fn collect_notices(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let before = self.messages.len();
        for notice in session.presenter_mut().drain_notices() {
            log::debug!("notice: {:?}", notice);
            self.messages.push_back(notice_text(notice).to_string());
        }
        self.messages.len() != before
    }

    fn view_info(session: &Session) -> Html {
        html! {
            <section id="info">
                <span>{format!("Points: {}", session.score())}</span>
                <span>{format!("Time Left: {}s", format_counter(session.seconds_remaining()))}</span>
                <span>{format!("Moves Left: {}", format_counter(session.moves_remaining()))}</span>
            </section>
        }
    }

    fn view_board(ctx: &Context<Self>, session: &Session) -> Html {
        let playable = session.is_playable();
        let tiles = session
            .tiles()
            .iter()
            .map(|tile| {
                let id = tile.id();
                let tile_state = ViewTileState::of(tile);
                let locked = tile_locked(playable, tile);
                let callback = ctx.link().callback(SessionMsg::Flip);
                html! {
                    <TileView key={id} {id} {tile_state} {locked} {callback}/>
                }
            })
            .collect::<Html>();

        html! {
            <div id="game-board" class={classes!(session.is_playable().then_some("playable"))}>
                {tiles}
            </div>
        }
    }

    fn view_controls(ctx: &Context<Self>, session: &Session) -> Html {
        let hint_label = format!("Use Hint ({} left)", session.hints_remaining());
        let hint_disabled = !session.is_playable();

        html! {
            <footer>
                <button id="hintButton" disabled={hint_disabled} onclick={ctx.link().callback(|_| SessionMsg::RequestHint)}>
                    {hint_label}
                </button>
                <button id="restartButton" onclick={ctx.link().callback(|_| SessionMsg::Start)}>
                    {"Restart"}
                </button>
            </footer>
        }
    }

    fn view_message(&self, ctx: &Context<Self>) -> Html {
        let Some(message) = self.messages.front() else {
            return html! {};
        };

        html! {
            <dialog id="notice" open={true}>
                <article>
                    <p>{message.clone()}</p>
                    <footer>
                        <button onclick={ctx.link().callback(|_| Msg::DismissMessage)}>{"OK"}</button>
                    </footer>
                </article>
            </dialog>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let level = game::level(ctx.props().level).unwrap_or(&game::LEVELS[0]);
        let mut messages = VecDeque::new();

        let session = match Self::create_session(ctx, level) {
            Ok(session) => Some(session),
            Err(err) => {
                log::error!("cannot open {}: {}", level.title, err);
                messages.push_back(err.to_string());
                None
            }
        };
        log::debug!("opened {} with seed {}", level.title, ctx.props().seed);

        Self {
            title: level.title,
            session,
            messages,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use SessionMsg::*;

        let msg = match msg {
            Msg::DismissMessage => return self.messages.pop_front().is_some(),
            Msg::Back => {
                if let Some(session) = self.session.as_mut() {
                    session.teardown();
                }
                ctx.props().on_back.emit(());
                return false;
            }
            Msg::Session(msg) => msg,
        };

        let Some(session) = self.session.as_mut() else {
            return false;
        };

        match msg {
            Start => session.start(),
            Flip(id) => {
                let outcome = session.flip(id);
                log::debug!("flip {}: {:?}", id, outcome);
                if !outcome.has_update() {
                    return false;
                }
            }
            RequestHint => match session.request_hint() {
                Ok(question) => log::debug!("hint question: {}", question.prompt),
                Err(err) => {
                    log::info!("hint refused: {}", err);
                    self.messages.push_back(format!("{}!", err));
                }
            },
            Answer(choice) => {
                session.answer_hint(&choice);
            }
            CloseHint => session.dismiss_hint(),
            Timer(handle) => {
                session.fire(handle);
            }
        }

        let redraw = session.presenter_mut().take_dirty();
        self.collect_notices() || redraw
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let cb_back = ctx.link().callback(|_| Msg::Back);

        let body = match self.session.as_ref() {
            None => html! {},
            Some(session) if session.state().is_ready() => html! {
                <button id="startButton" onclick={ctx.link().callback(|_| SessionMsg::Start)}>{"Start"}</button>
            },
            Some(session) => html! {
                <>
                    {Self::view_info(session)}
                    {Self::view_board(ctx, session)}
                    {Self::view_controls(ctx, session)}
                    <HintDialog
                        question={session.active_question().cloned()}
                        on_answer={ctx.link().callback(SessionMsg::Answer)}
                        on_close={ctx.link().callback(|_| SessionMsg::CloseHint)}
                    />
                </>
            },
        };

        html! {
            <div class="alchemy">
                <nav>
                    <button id="backButton" onclick={cb_back}>{"← Levels"}</button>
                    <h1>{self.title}</h1>
                </nav>
                {body}
                {self.view_message(ctx)}
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(session) = self.session.as_mut() {
            session.teardown();
        }
    }
}
