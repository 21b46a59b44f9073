use alloc::vec::Vec;

use crate::*;

/// Static content for one level: which elements are dealt and which questions guard the hints.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Level {
    pub title: &'static str,
    pub elements: &'static [(&'static str, u8)],
    pub reactions: &'static [ReactionSpec],
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReactionSpec {
    pub prompt: &'static str,
    pub choices: [&'static str; CHOICE_COUNT],
    pub correct: &'static str,
}

impl Level {
    /// Session configuration with the classic budgets.
    pub fn config(&self) -> SessionConfig {
        let elements = self
            .elements
            .iter()
            .map(|&(name, number)| Element::new(name, number))
            .collect();
        let reactions = self
            .reactions
            .iter()
            .map(|r| ReactionQuestion::new(r.prompt, r.choices, r.correct))
            .collect();
        SessionConfig::new(elements, reactions)
    }

    /// Lowest and highest atomic number on the board.
    pub fn atomic_range(&self) -> Option<(u8, u8)> {
        let numbers = self.elements.iter().map(|&(_, number)| number);
        Some((numbers.clone().min()?, numbers.max()?))
    }
}

const fn reaction(
    prompt: &'static str,
    choices: [&'static str; CHOICE_COUNT],
    correct: &'static str,
) -> ReactionSpec {
    ReactionSpec {
        prompt,
        choices,
        correct,
    }
}

pub const LEVELS: &[Level] = &[
    Level {
        title: "Level 1",
        elements: &[
            ("Hydrogen", 1),
            ("Helium", 2),
            ("Lithium", 3),
            ("Beryllium", 4),
            ("Boron", 5),
            ("Carbon", 6),
            ("Nitrogen", 7),
            ("Oxygen", 8),
        ],
        reactions: &[
            reaction("H₂ + O₂ → ?", ["H₂O", "CO₂", "NaCl", "NH₃"], "H₂O"),
            reaction("Na + Cl₂ → ?", ["NaCl", "KCl", "MgO", "CO₂"], "NaCl"),
            reaction("C + O₂ → ?", ["CO₂", "CH₄", "NH₃", "NO₂"], "CO₂"),
        ],
    },
    Level {
        title: "Level 2",
        elements: &[
            ("Fluorine", 9),
            ("Neon", 10),
            ("Sodium", 11),
            ("Magnesium", 12),
            ("Aluminium", 13),
            ("Silicon", 14),
            ("Phosphorus", 15),
            ("Sulfur", 16),
        ],
        reactions: &[
            reaction("Na + Cl₂ → ?", ["NaCl", "KCl", "MgO", "CO₂"], "NaCl"),
            reaction("Mg + O₂ → ?", ["MgO", "MgCl₂", "NaOH", "H₂O"], "MgO"),
            reaction("C + O₂ → ?", ["CO₂", "CH₄", "NH₃", "NO₂"], "CO₂"),
        ],
    },
    Level {
        title: "Level 3",
        elements: &[
            ("Potassium", 19),
            ("Calcium", 20),
            ("Scandium", 21),
            ("Titanium", 22),
            ("Vanadium", 23),
            ("Chromium", 24),
            ("Manganese", 25),
            ("Iron", 26),
        ],
        reactions: &[
            reaction("K + Cl₂ → ?", ["KCl", "NaCl", "MgO", "FeCl₂"], "KCl"),
            reaction("Ca + O₂ → ?", ["CaO", "CaCl₂", "NaOH", "FeO"], "CaO"),
            reaction("Mn + O₂ → ?", ["MnO", "MnCl₂", "MnO₂", "Fe₂O₃"], "MnO₂"),
        ],
    },
    Level {
        title: "Level 4",
        elements: &[
            ("Cobalt", 27),
            ("Nickel", 28),
            ("Copper", 29),
            ("Zinc", 30),
            ("Gallium", 31),
            ("Germanium", 32),
            ("Arsenic", 33),
            ("Selenium", 34),
        ],
        reactions: &[
            reaction("Co + Cl₂ → ?", ["CoCl₂", "NiCl₂", "ZnCl₂", "CuCl₂"], "CoCl₂"),
            reaction("Ni + O₂ → ?", ["NiO", "CuO", "ZnO", "Ga₂O₃"], "NiO"),
            reaction("As + O₂ → ?", ["As₂O₃", "As₂O₅", "SeO₂", "GeO₂"], "As₂O₃"),
        ],
    },
];

/// Looks a level up by its zero-based position in [`LEVELS`].
pub fn level(index: usize) -> Option<&'static Level> {
    LEVELS.get(index)
}

/// Configurations for every shipped level, in order.
pub fn level_configs() -> Vec<SessionConfig> {
    LEVELS.iter().map(Level::config).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_level_is_playable() {
        for (index, config) in level_configs().into_iter().enumerate() {
            assert_eq!(config.validate(), Ok(()), "level {}", index + 1);
            assert_eq!(config.total_tiles(), 16);
            assert_eq!(config.reactions.len(), 3);
        }
    }

    #[test]
    fn levels_climb_the_periodic_table() {
        let ranges: Vec<_> = LEVELS.iter().filter_map(Level::atomic_range).collect();

        assert_eq!(ranges, [(1, 8), (9, 16), (19, 26), (27, 34)]);
    }

    #[test]
    fn level_lookup_is_bounded() {
        assert_eq!(level(0).map(|l| l.title), Some("Level 1"));
        assert!(level(LEVELS.len()).is_none());
    }
}
