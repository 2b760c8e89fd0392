//! Critter components.
//!
//! Components that have a meaningful default value are treated as always
//! present, an entity missing one reads as having the default.

use derive_more::{Deref, DerefMut};

use crate::Instant;

/// How aware one party is of another.
///
/// Awareness only ever grows within a critter's lifetime, use
/// [`Vis::advance`] to raise it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Vis {
    #[default]
    Hidden,
    NotSeen,
    Seen,
}

impl Vis {
    /// Raise awareness to at least `to`, never lowers it.
    #[must_use]
    pub fn advance(self, to: Vis) -> Vis {
        self.max(to)
    }
}

/// How much the player knows about the critter.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Visibility(pub Vis);

/// How much the critter knows about the player.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Awareness(pub Vis);

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Health(pub i32);

/// Critter will attack the player instead of fleeing.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Aggressive(pub bool);

/// How many turns the critter has been aware of the player.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TurnsSeen(pub u32);

/// When the critter was spawned.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Born(pub Instant);

/// Per-critter behavior parameters, rolled at spawn from the species.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Traits {
    /// Added to the base detection radius.
    pub vision_bonus: i32,
    /// Added to the player's noise in the detection roll.
    pub detection_bonus: i32,
    /// Percent chance to turn aggressive on noticing the player.
    pub aggression_chance: i32,
    /// Percent chance to wander each turn while unaware.
    pub move_chance: i32,
    /// Food from trading the critter's carcass in town.
    pub food_value: i32,
}

/// Entity component system. Stores all the data of critters.
#[derive(Default, Deref, DerefMut)]
pub(crate) struct Ecs(pub(crate) hecs::World);
