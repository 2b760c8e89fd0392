//! Generic critter entity logic.
use std::fmt;

use derive_more::Deref;
use hecs::Component;

use crate::{
    ecs::{Aggressive, Awareness, Health, Traits, TurnsSeen, Vis, Visibility},
    prelude::*,
};

// Dummy wrapper so we can write impls for it directly instead of deriving a
// trait for hecs::Entity and writing every fn signature twice.
/// Critter identifier. All the actual contents live in the ECS.
///
/// Safe to hold on to past the critter's lifetime, lookups on a despawned
/// entity just come up empty.
#[derive(Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd, Debug, Deref)]
pub struct Entity(pub(crate) hecs::Entity);

impl Entity {
    pub(crate) fn get<T>(&self, r: &impl AsRef<Runtime>) -> T
    where
        T: Component + Clone + Default,
    {
        let r = r.as_ref();
        r.ecs
            .get::<&T>(**self)
            .map(|c| (*c).clone())
            .unwrap_or_default()
    }

    pub(crate) fn set<T>(&self, r: &mut impl AsMut<Runtime>, val: T)
    where
        T: Component + Default + PartialEq,
    {
        let r = r.as_mut();
        if val == T::default() {
            // Remove default values, abstraction layer assumes components are
            // always present but defaulted.
            //
            // Will give an error if the component wasn't there to begin with,
            // just ignore that.
            let _ = r.ecs.remove_one::<T>(**self);
        } else if r.ecs.insert_one(**self, val).is_err() {
            log::warn!("Entity::set: {self} is not alive");
        }
    }

    /// Access and mutate a component using a closure.
    pub(crate) fn with_mut<T: Component + Default + PartialEq + Clone, U>(
        &self,
        r: &mut impl AsMut<Runtime>,
        f: impl FnOnce(&mut T) -> U,
    ) -> U {
        let r = r.as_mut();
        let mut val = self.get::<T>(r);
        let ret = f(&mut val);
        self.set(r, val);
        ret
    }

    pub fn is_alive(&self, r: &impl AsRef<Runtime>) -> bool {
        r.as_ref().ecs.contains(**self)
    }

    pub fn pos(&self, r: &impl AsRef<Runtime>) -> Option<IVec2> {
        r.as_ref().placement.entity_pos(self)
    }

    /// Move the critter, does no checks on whether the destination is free.
    pub(crate) fn place(&self, r: &mut impl AsMut<Runtime>, pos: IVec2) {
        r.as_mut().placement.insert(pos, *self);
    }

    pub fn species(&self, r: &impl AsRef<Runtime>) -> Species {
        self.get::<Species>(r)
    }

    pub fn icon(&self, r: &impl AsRef<Runtime>) -> char {
        self.species(r).icon()
    }

    pub fn hp(&self, r: &impl AsRef<Runtime>) -> i32 {
        self.get::<Health>(r).0
    }

    pub fn traits(&self, r: &impl AsRef<Runtime>) -> Traits {
        self.get::<Traits>(r)
    }

    /// How much the player knows about this critter.
    pub fn vis(&self, r: &impl AsRef<Runtime>) -> Vis {
        self.get::<Visibility>(r).0
    }

    /// How much this critter knows about the player.
    pub fn awareness(&self, r: &impl AsRef<Runtime>) -> Vis {
        self.get::<Awareness>(r).0
    }

    pub fn is_aggressive(&self, r: &impl AsRef<Runtime>) -> bool {
        self.get::<Aggressive>(r).0
    }

    pub fn turns_seen(&self, r: &impl AsRef<Runtime>) -> u32 {
        self.get::<TurnsSeen>(r).0
    }

    pub(crate) fn reveal(&self, r: &mut impl AsMut<Runtime>) {
        self.with_mut(r, |v: &mut Visibility| v.0 = v.0.advance(Vis::Seen));
    }

    /// Critter notices the player, one-way street.
    pub(crate) fn notice(&self, r: &mut impl AsMut<Runtime>) {
        self.with_mut(r, |a: &mut Awareness| a.0 = a.0.advance(Vis::Seen));
    }

    /// Make the critter hostile, it notices the player if it hadn't yet.
    pub(crate) fn provoke(&self, r: &mut impl AsMut<Runtime>) {
        self.notice(r);
        self.set(r, Aggressive(true));
    }

    pub fn distance_to_player(&self, r: &impl AsRef<Runtime>) -> Option<i32> {
        let r = r.as_ref();
        self.pos(r).map(|p| (p - r.player.pos).cheb_len())
    }

    /// Remove the critter from the game.
    pub(crate) fn despawn(&self, r: &mut impl AsMut<Runtime>) {
        let r = r.as_mut();
        r.placement.remove(self);
        r.scheduler.remove(Actor::Critter(*self));
        r.spawner.forget(self);
        if r.player.target == Some(*self) {
            r.player.target = None;
        }
        let _ = r.ecs.despawn(**self);
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.id())
    }
}
