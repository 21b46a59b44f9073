use alloc::string::ToString;
use alloc::vec::Vec;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::*;

/// Deals two tiles per element, one showing the name and one the atomic number, in a uniformly
/// shuffled order. Ids follow the shuffled order so they double as board positions.
pub fn deal<R: Rng + ?Sized>(elements: &[Element], rng: &mut R) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(elements.len() * 2);
    for element in elements {
        tiles.push(Tile::new(0, element.name.clone(), element.name.clone()));
        tiles.push(Tile::new(
            0,
            element.atomic_number.to_string(),
            element.name.clone(),
        ));
    }

    tiles.shuffle(rng);
    for (id, tile) in tiles.iter_mut().enumerate() {
        tile.reset_id(id);
    }

    log::trace!("dealt {} tiles from {} elements", tiles.len(), elements.len());
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use hashbrown::HashMap;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn elements() -> Vec<Element> {
        vec![
            Element::new("Hydrogen", 1),
            Element::new("Helium", 2),
            Element::new("Lithium", 3),
            Element::new("Beryllium", 4),
        ]
    }

    #[test]
    fn every_group_is_dealt_exactly_twice_with_distinct_faces() {
        let mut rng = SmallRng::seed_from_u64(7);
        let tiles = deal(&elements(), &mut rng);

        assert_eq!(tiles.len(), 8);
        let mut groups: HashMap<&str, Vec<&str>> = HashMap::new();
        for tile in &tiles {
            groups.entry(tile.group()).or_default().push(tile.text());
        }
        assert_eq!(groups.len(), 4);
        for (group, faces) in groups {
            assert_eq!(faces.len(), 2, "group {group}");
            assert_ne!(faces[0], faces[1]);
            assert!(faces.contains(&group));
        }
    }

    #[test]
    fn ids_follow_layout_order_and_tiles_start_face_down() {
        let mut rng = SmallRng::seed_from_u64(11);
        let tiles = deal(&elements(), &mut rng);

        for (index, tile) in tiles.iter().enumerate() {
            assert_eq!(tile.id(), index);
            assert!(tile.is_hidden());
        }
    }

    #[test]
    fn same_seed_deals_same_layout() {
        let a = deal(&elements(), &mut SmallRng::seed_from_u64(42));
        let b = deal(&elements(), &mut SmallRng::seed_from_u64(42));

        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_moves_tiles_away_from_construction_order() {
        // Over many seeds at least one layout must differ from the unshuffled one.
        let unshuffled: Vec<_> = elements()
            .iter()
            .flat_map(|e| [e.name.clone(), e.atomic_number.to_string()])
            .collect();

        let shuffled_any = (0..16).any(|seed| {
            let tiles = deal(&elements(), &mut SmallRng::seed_from_u64(seed));
            tiles.iter().map(Tile::text).ne(unshuffled.iter().map(|s| s.as_str()))
        });
        assert!(shuffled_any);
    }
}
