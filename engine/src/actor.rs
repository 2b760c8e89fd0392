use crate::prelude::*;

/// Anything that takes turns.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Actor {
    Player,
    Spawner,
    Town,
    Critter(Entity),
}

/// Round-robin turn order over the live actors.
///
/// The player drives time. Once the player's action resolves, everyone else
/// in the queue gets one turn, in queue order starting after the player.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    queue: IndexSet<Actor>,
}

impl Scheduler {
    pub fn add(&mut self, actor: Actor) {
        self.queue.insert(actor);
    }

    pub fn remove(&mut self, actor: Actor) {
        self.queue.shift_remove(&actor);
    }

    pub fn contains(&self, actor: Actor) -> bool {
        self.queue.contains(&actor)
    }

    /// Snapshot of everyone who acts after the player this round.
    ///
    /// The snapshot doesn't change if actors come and go while the round is
    /// running. Spawns made during the round act from the next one on, and
    /// the round runner must skip actors that have gone away.
    pub fn round(&self) -> Vec<Actor> {
        let start = self
            .queue
            .get_index_of(&Actor::Player)
            .map_or(0, |i| i + 1);
        let n = self.queue.len();
        (0..n)
            .map(|i| self.queue[(start + i) % n])
            .filter(|&a| a != Actor::Player)
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_starts_after_player() {
        let mut world = hecs::World::new();
        let c = Actor::Critter(Entity(world.spawn(())));

        let mut s = Scheduler::default();
        s.add(Actor::Spawner);
        s.add(Actor::Player);
        s.add(Actor::Town);
        s.add(c);

        assert_eq!(s.round(), vec![Actor::Town, c, Actor::Spawner]);

        s.remove(c);
        assert!(!s.contains(c));
        assert_eq!(s.round(), vec![Actor::Town, Actor::Spawner]);

        // Re-adding is idempotent.
        s.add(Actor::Town);
        assert_eq!(s.round(), vec![Actor::Town, Actor::Spawner]);
    }
}
