use std::collections::BTreeMap;

use crate::prelude::*;

/// Spatial index, used for efficiently finding locations of critters and
/// critters at locations.
///
/// Holds at most one critter per tile.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Placement {
    places: BTreeMap<Entity, IVec2>,
    entities: HashMap<IVec2, Entity>,
}

impl Placement {
    pub fn entity_at(&self, pos: IVec2) -> Option<Entity> {
        self.entities.get(&pos).copied()
    }

    pub fn all_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.places.keys().copied()
    }

    pub fn entity_pos(&self, e: &Entity) -> Option<IVec2> {
        self.places.get(e).copied()
    }

    pub fn is_occupied(&self, pos: IVec2) -> bool {
        self.entities.contains_key(&pos)
    }

    /// Put entity at position, moving it from its previous position.
    ///
    /// An entity already at the position gets evicted from the index.
    pub fn insert(&mut self, pos: IVec2, e: Entity) {
        self.remove(&e);
        if let Some(prev) = self.entities.insert(pos, e) {
            log::warn!("Placement: {e} displaced {prev} at {pos}");
            self.places.remove(&prev);
        }
        self.places.insert(e, pos);
    }

    pub fn remove(&mut self, e: &Entity) {
        if let Some(pos) = self.places.remove(e) {
            self.entities.remove(&pos);
        }
    }
}
