use rand::Rng;
use strum::{Display, EnumIter};
use world::BiomeKind;

use crate::ecs::Traits;

/// Kinds of wildlife.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Species {
    #[default]
    Rabbit,
    Grouse,
    Fox,
    Deer,
    Boar,
    Wolf,
    Elk,
    Bear,
}

use Species::*;

/// Fixed stats of a species.
#[derive(Copy, Clone, Debug)]
pub struct Stats {
    pub icon: char,
    pub hp: i32,
    pub vision_bonus: i32,
    pub detection_bonus: i32,
    pub aggression_chance: i32,
    pub food_value: i32,
}

impl Species {
    pub fn stats(self) -> Stats {
        // Icon, hp, vision, detection, aggression, food.
        let (icon, hp, vision, detection, aggression, food) = match self {
            Rabbit => ('r', 1, 0, 0, 0, 1),
            Grouse => ('g', 1, 1, 0, 0, 1),
            Fox => ('f', 2, 1, 10, 10, 2),
            Deer => ('d', 3, 2, 10, 5, 4),
            Boar => ('b', 3, 0, 0, 60, 4),
            Wolf => ('w', 3, 2, 20, 70, 3),
            Elk => ('e', 4, 2, 10, 20, 6),
            Bear => ('B', 5, 1, 0, 80, 8),
        };
        Stats {
            icon,
            hp,
            vision_bonus: vision,
            detection_bonus: detection,
            aggression_chance: aggression,
            food_value: food,
        }
    }

    pub fn icon(self) -> char {
        self.stats().icon
    }

    /// Roll the behavior parameters of a new individual.
    pub(crate) fn roll_traits<R: Rng + ?Sized>(self, rng: &mut R) -> Traits {
        let s = self.stats();
        Traits {
            vision_bonus: s.vision_bonus,
            detection_bonus: s.detection_bonus,
            aggression_chance: s.aggression_chance,
            move_chance: rng.gen_range(35..50),
            food_value: s.food_value,
        }
    }

    /// Species that live in a biome, repeated entries are more common.
    pub fn spawn_table(biome: BiomeKind) -> &'static [Species] {
        match biome {
            BiomeKind::Plains => {
                &[Rabbit, Rabbit, Rabbit, Grouse, Grouse, Deer, Fox]
            }
            BiomeKind::Grassland => {
                &[Rabbit, Rabbit, Rabbit, Deer, Deer, Fox, Wolf]
            }
            BiomeKind::Scrubland => {
                &[Rabbit, Rabbit, Grouse, Grouse, Fox, Boar]
            }
            BiomeKind::Steppe => &[Rabbit, Rabbit, Elk, Deer, Wolf],
            BiomeKind::LightForest => {
                &[Rabbit, Rabbit, Grouse, Grouse, Deer, Deer, Fox, Boar]
            }
            BiomeKind::DarkForest => {
                &[Grouse, Deer, Boar, Boar, Wolf, Wolf, Bear]
            }
            BiomeKind::Taiga => &[Grouse, Grouse, Elk, Elk, Wolf, Bear],
            BiomeKind::Ocean | BiomeKind::Mountains => &[],
        }
    }

    /// Pick a species for a biome, `None` if nothing lives there.
    pub fn sample<R: Rng + ?Sized>(
        rng: &mut R,
        biome: BiomeKind,
    ) -> Option<Species> {
        let table = Species::spawn_table(biome);
        (!table.is_empty()).then(|| table[rng.gen_range(0..table.len())])
    }
}
