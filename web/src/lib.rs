use clap::Parser;
use wasm_bindgen::prelude::*;

mod app;
mod game;
mod menu;
mod timers;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Skip the level list and open this level (1-based)
    #[arg(short, long)]
    level: Option<usize>,
}

impl Args {
    /// Options come from the URL hash, e.g. `#-vv&--seed=42&--level=2`.
    fn from_location_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }

    fn app_props(&self) -> app::AppProps {
        app::AppProps {
            seed: self.seed,
            level: self
                .level
                .and_then(|level| level.checked_sub(1))
                .filter(|&index| alchemy_core::level(index).is_some()),
        }
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::from_location_hash(&location_hash).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<app::App>::with_root_and_props(root, args.app_props()).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_options_select_seed_and_level() {
        let args = Args::from_location_hash("#--seed=42&--level=2").unwrap();
        let props = args.app_props();

        assert_eq!(props.seed, Some(42));
        assert_eq!(props.level, Some(1));
    }

    #[test]
    fn empty_hash_uses_defaults() {
        let props = Args::from_location_hash("").unwrap().app_props();

        assert_eq!(props.seed, None);
        assert_eq!(props.level, None);
    }

    #[test]
    fn unknown_level_falls_back_to_the_list() {
        let props = Args::from_location_hash("#--level=99").unwrap().app_props();

        assert_eq!(props.level, None);
    }
}
