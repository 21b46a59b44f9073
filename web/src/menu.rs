use alchemy_core::{LEVELS, Level};
use yew::prelude::*;

/// Button caption such as `Level 2 · Fluorine to Sulfur (9–16)`.
pub(crate) fn level_caption(level: &Level) -> String {
    let first = level.elements.first().map(|&(name, _)| name);
    let last = level.elements.last().map(|&(name, _)| name);
    match (first, last, level.atomic_range()) {
        (Some(first), Some(last), Some((low, high))) => {
            format!("{} · {} to {} ({}–{})", level.title, first, last, low, high)
        }
        _ => level.title.to_string(),
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct LevelSelectProps {
    pub on_select: Callback<usize>,
}

#[function_component]
pub(crate) fn LevelSelect(props: &LevelSelectProps) -> Html {
    let levels = LEVELS
        .iter()
        .enumerate()
        .map(|(index, level)| {
            let onclick = props.on_select.reform(move |_: MouseEvent| index);
            html! {
                <li><button class="level" {onclick}>{level_caption(level)}</button></li>
            }
        })
        .collect::<Html>();

    html! {
        <main class="level-select">
            <h1>{"Atomic Numbers"}</h1>
            <p>{"Match every element with its atomic number before the moves or the clock run out."}</p>
            <ul>{levels}</ul>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_names_the_first_and_last_element() {
        assert_eq!(
            level_caption(&LEVELS[1]),
            "Level 2 · Fluorine to Sulfur (9–16)"
        );
    }
}
