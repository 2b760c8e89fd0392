//! Keeping the wilderness around the player populated.

use rand::Rng;

use crate::{
    ecs::{Aggressive, Born, TurnsSeen, Vis},
    prelude::*,
    AGGRESSION_TIMEOUT, DESPAWN_RADIUS, ESCAPE_TIMEOUT, MAX_CRITTER_AGE,
    SPAWN_RETRIES, SPAWN_WINDOW,
};

/// Population manager actor.
///
/// Every `freq` turns it culls critters that have wandered off or run out
/// their time and spawns new ones near the player up to `count`.
#[derive(Clone, Debug)]
pub struct Spawner {
    phase: u32,
    count: usize,
    freq: u32,
    spawns: Vec<Entity>,
}

impl Spawner {
    pub fn new(count: usize, freq: u32) -> Self {
        Spawner {
            phase: 0,
            count,
            freq,
            spawns: Vec::new(),
        }
    }

    /// Critters currently managed by the spawner.
    pub fn spawns(&self) -> &[Entity] {
        &self.spawns
    }

    pub(crate) fn track(&mut self, e: Entity) {
        self.spawns.push(e);
    }

    pub(crate) fn forget(&mut self, e: &Entity) {
        self.spawns.retain(|x| x != e);
    }

    /// Advance phase, return true when a cycle is due.
    fn tick(&mut self) -> bool {
        self.phase += 1;
        if self.phase >= self.freq {
            self.phase = 0;
            true
        } else {
            false
        }
    }
}

impl Runtime {
    pub(crate) fn spawner_turn(&mut self) {
        if !self.spawner.tick() {
            return;
        }
        self.cull_critters();
        self.populate();
    }

    fn cull_critters(&mut self) {
        for e in self.spawner.spawns.clone() {
            let Some(dist) = e.distance_to_player(self) else {
                e.despawn(self);
                continue;
            };
            let species = e.species(self);

            if dist > DESPAWN_RADIUS {
                log::debug!("{species} {e} left the area");
                e.despawn(self);
                continue;
            }

            if e.awareness(self) != Vis::Seen {
                if e.vis(self) != Vis::Seen
                    && e.get::<Born>(self).0.elapsed(self) > MAX_CRITTER_AGE
                {
                    log::debug!("{species} {e} wandered off");
                    e.despawn(self);
                }
                continue;
            }

            let seen = e.turns_seen(self);
            if e.is_aggressive(self) {
                if seen > AGGRESSION_TIMEOUT {
                    e.set(self, Aggressive(false));
                    e.set(self, TurnsSeen(0));
                    if e.vis(self) == Vis::Seen {
                        msg!("The {species} loses interest in you.");
                    }
                }
            } else if seen > ESCAPE_TIMEOUT {
                if e.vis(self) == Vis::Seen {
                    msg!("The {species} gets away.");
                }
                e.despawn(self);
            }
        }
    }

    fn populate(&mut self) {
        while self.spawner.spawns.len() < self.spawner.count {
            let Some(pos) = self.spawn_site() else {
                break;
            };
            let biome = self.map.kind_at(pos);
            let Some(species) = Species::sample(&mut self.rng, biome) else {
                break;
            };
            self.spawn_critter(species, pos);
        }
    }

    /// Roll a free tile near the player.
    fn spawn_site(&mut self) -> Option<IVec2> {
        for _ in 0..SPAWN_RETRIES {
            let offset = ivec2(
                self.rng.gen_range(-SPAWN_WINDOW..=SPAWN_WINDOW),
                self.rng.gen_range(-SPAWN_WINDOW..=SPAWN_WINDOW),
            );
            let pos = self.player.pos + offset;
            if !self.is_blocked(pos) {
                return Some(pos);
            }
        }
        None
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::mock::StepRng;
    use util::srng;
    use world::{BiomeKind, BiomeMap, WorldMap};

    use super::*;
    use crate::{SPAWN_COUNT, SPAWN_FREQ, VIEW_SIZE};

    fn runtime(kind: BiomeKind) -> Runtime {
        let map =
            WorldMap::new(BiomeMap::uniform(ivec2(200, 200), kind), VIEW_SIZE);
        Runtime::scenario(map, ivec2(100, 100), srng("spawner"))
    }

    #[test]
    fn fills_up_population() {
        let mut r = runtime(BiomeKind::Plains);
        for _ in 0..SPAWN_FREQ {
            r.spawner_turn();
        }
        assert_eq!(r.spawner.spawns().len(), SPAWN_COUNT);
        for e in r.spawner.spawns() {
            let pos = e.pos(&r).unwrap();
            assert!(r.map.is_passable(pos));
            assert!((pos - r.player.pos).cheb_len() <= SPAWN_WINDOW);
            assert!(r.scheduler.contains(Actor::Critter(*e)));
        }
    }

    #[test]
    fn nothing_lives_at_sea() {
        let mut r = runtime(BiomeKind::Ocean);
        for _ in 0..SPAWN_FREQ * 4 {
            r.spawner_turn();
        }
        assert!(r.spawner.spawns().is_empty());
    }

    #[test]
    fn far_critters_despawn() {
        let mut r = runtime(BiomeKind::Plains);
        let far = r.spawn_critter(Species::Deer, r.player.pos + ivec2(50, 0));
        let near = r.spawn_critter(Species::Deer, r.player.pos + ivec2(5, 0));
        r.cull_critters();
        assert!(!far.is_alive(&r));
        assert!(near.is_alive(&r));
        assert!(!r.scheduler.contains(Actor::Critter(far)));
    }

    #[test]
    fn old_unseen_critters_despawn() {
        let mut r = runtime(BiomeKind::Plains);
        let e = r.spawn_critter(Species::Rabbit, r.player.pos + ivec2(20, 0));
        r.now += MAX_CRITTER_AGE + 1;
        r.cull_critters();
        assert!(!e.is_alive(&r));
    }

    #[test]
    fn aggression_times_out() {
        let mut r = Runtime::scenario(
            WorldMap::new(
                BiomeMap::uniform(ivec2(200, 200), BiomeKind::Plains),
                VIEW_SIZE,
            ),
            ivec2(100, 100),
            StepRng::new(0, 0),
        );
        let wolf = r.spawn_critter(Species::Wolf, r.player.pos + ivec2(8, 0));
        let deer = r.spawn_critter(Species::Deer, r.player.pos + ivec2(-8, 0));
        wolf.provoke(&mut r);
        deer.notice(&mut r);
        wolf.set(&mut r, TurnsSeen(AGGRESSION_TIMEOUT + 1));
        deer.set(&mut r, TurnsSeen(ESCAPE_TIMEOUT + 1));

        r.cull_critters();
        assert!(wolf.is_alive(&r));
        assert!(!wolf.is_aggressive(&r));
        assert_eq!(wolf.turns_seen(&r), 0);
        assert!(!deer.is_alive(&r));
    }
}
