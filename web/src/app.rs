use yew::prelude::*;

use crate::game::GameView;
use crate::menu::LevelSelect;
use crate::utils::js_random_seed;

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct AppProps {
    /// Force a seed instead of random
    pub seed: Option<u64>,
    /// Open this level (zero-based) right away
    pub level: Option<usize>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Open(usize),
    Back,
}

/// Top-level navigation between the level list and a running level.
#[derive(Debug)]
pub(crate) struct App {
    level: Option<usize>,
    seed: u64,
    // bumped on every open so a replayed level mounts a fresh GameView
    visit: u32,
}

impl App {
    fn next_seed(ctx: &Context<Self>) -> u64 {
        ctx.props().seed.unwrap_or_else(js_random_seed)
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            level: ctx.props().level,
            seed: Self::next_seed(ctx),
            visit: 0,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Open(level) => {
                log::debug!("open level {}", level + 1);
                self.level = Some(level);
                self.seed = Self::next_seed(ctx);
                self.visit = self.visit.wrapping_add(1);
                true
            }
            Msg::Back => {
                log::debug!("back to level select");
                self.level.take().is_some()
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match self.level {
            Some(level) => {
                let key = format!("{}-{}", level, self.visit);
                html! {
                    <GameView
                        {key}
                        {level}
                        seed={self.seed}
                        on_back={ctx.link().callback(|_| Msg::Back)}
                    />
                }
            }
            None => html! {
                <LevelSelect on_select={ctx.link().callback(Msg::Open)}/>
            },
        }
    }
}
