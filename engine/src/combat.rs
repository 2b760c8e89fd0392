use crate::{
    ecs::{Health, Vis},
    prelude::*,
    ARROW_DAMAGE,
};

/// Hit percentages per archery level, as (max distance, percent) steps.
const ACCURACY: [&[(i32, i32)]; 3] = [
    &[(1, 90), (2, 80), (3, 60)],
    &[(1, 95), (2, 90), (3, 80), (4, 65), (5, 45)],
    &[(2, 95), (3, 90), (4, 85), (5, 75), (6, 60), (7, 40)],
];

/// Percent chance to hit a target at `dist` with an archery skill of
/// `level`.
///
/// Levels past the last one shoot as well as the last one.
pub fn archery_accuracy(level: i32, dist: i32) -> i32 {
    if level <= 0 {
        return 0;
    }
    let table = ACCURACY[(level.min(ACCURACY.len() as i32) - 1) as usize];
    table
        .iter()
        .find(|(max, _)| dist <= *max)
        .map_or(0, |&(_, p)| p)
}

impl Runtime {
    /// Take the critter's carcass and remove it from the world.
    pub(crate) fn capture(&mut self, e: Entity) {
        let species = e.species(self);
        self.player.add_loot(species);
        log::debug!("Captured {species} {e}");
        e.despawn(self);
    }

    /// Damage a critter, return whether it died from it.
    pub(crate) fn wound(&mut self, e: Entity, dmg: i32) -> bool {
        let hp = e.with_mut(self, |h: &mut Health| {
            h.0 -= dmg;
            h.0
        });
        if hp <= 0 {
            self.capture(e);
            true
        } else {
            e.provoke(self);
            false
        }
    }

    pub(crate) fn hurt_player(&mut self, attacker: Species, dmg: i32) {
        self.player.hp -= dmg;
        alert!("The {attacker} bites you.");
    }

    /// Pick the nearest seen critter that isn't already the target.
    pub(crate) fn aim(&mut self) -> bool {
        if self.player.skills.archery < 1 {
            msg!("You don't have a bow.");
            return false;
        }

        let current = self.player.target;
        let Some(e) = self
            .critters()
            .filter(|&e| Some(e) != current && e.vis(self) == Vis::Seen)
            .min_by_key(|e| e.distance_to_player(self).unwrap_or(i32::MAX))
        else {
            msg!("Nothing to aim at.");
            return false;
        };

        self.player.target = Some(e);
        let species = e.species(self);
        let dist = e.distance_to_player(self).unwrap_or_default();
        msg!(
            "You aim at the {species}, {}% to hit.",
            archery_accuracy(self.player.skills.archery, dist)
        );
        true
    }

    pub(crate) fn fire(&mut self) -> bool {
        if self.player.skills.archery < 1 {
            msg!("You don't have a bow.");
            return false;
        }
        if self.player.arrows < 1 {
            msg!("You are out of arrows.");
            return false;
        }
        let Some(e) = self.player.target.filter(|e| e.is_alive(self)) else {
            self.player.target = None;
            msg!("You must aim before firing.");
            return false;
        };
        let Some(dist) = e.distance_to_player(self) else {
            self.player.target = None;
            msg!("You must aim before firing.");
            return false;
        };

        self.player.arrows -= 1;
        let species = e.species(self);
        let chance = archery_accuracy(self.player.skills.archery, dist);
        if !self.rng.percent(chance) {
            msg!("Your arrow misses the {species}.");
            return true;
        }

        if self.wound(e, ARROW_DAMAGE) {
            msg!("Your arrow brings down the {species}.");
        } else {
            msg!("Your arrow wounds the {species}.");
        }
        true
    }
}

#[cfg(test)]
mod test {
    use quickcheck_macros::quickcheck;
    use rand::rngs::mock::StepRng;
    use world::{BiomeKind, BiomeMap, WorldMap};

    use super::*;
    use crate::VIEW_SIZE;

    fn runtime() -> Runtime {
        let map = WorldMap::new(
            BiomeMap::uniform(ivec2(100, 100), BiomeKind::Plains),
            VIEW_SIZE,
        );
        Runtime::scenario(map, ivec2(10, 10), StepRng::new(0, 0))
    }

    #[test]
    fn accuracy_table() {
        assert_eq!(archery_accuracy(0, 1), 0);
        assert_eq!(archery_accuracy(1, 1), 90);
        assert_eq!(archery_accuracy(1, 2), 80);
        assert_eq!(archery_accuracy(1, 4), 0);
        assert_eq!(archery_accuracy(2, 5), 45);
        assert_eq!(archery_accuracy(3, 2), 95);
        assert_eq!(archery_accuracy(3, 8), 0);
        assert_eq!(archery_accuracy(9, 7), 40);
    }

    #[quickcheck]
    fn accuracy_falls_off(level: u8, dist: u8) -> bool {
        let (level, dist) = (level as i32 % 5, dist as i32 % 12);
        let p = archery_accuracy(level, dist);
        (0..=95).contains(&p) && archery_accuracy(level, dist + 1) <= p
    }

    #[test]
    fn shoot_a_rabbit() {
        let mut r = runtime();
        r.player.skills.archery = 1;
        r.player.arrows = 3;
        let pos = r.player.pos + ivec2(2, 0);
        let e = r.spawn_critter(Species::Rabbit, pos);

        // No target yet.
        assert!(!r.fire());
        assert_eq!(r.player.arrows, 3);

        r.update_vis();
        assert!(r.aim());
        assert_eq!(r.player.target, Some(e));

        // StepRng always rolls lowest, so the shot hits.
        assert!(r.fire());
        assert_eq!(r.player.arrows, 2);
        assert!(!e.is_alive(&r));
        assert_eq!(r.player.target, None);
        assert_eq!(r.player.loot.get(&Species::Rabbit), Some(&1));
    }

    #[test]
    fn wounding_provokes() {
        let mut r = runtime();
        let pos = r.player.pos + ivec2(3, 0);
        let e = r.spawn_critter(Species::Bear, pos);
        let hp = e.hp(&r);

        assert!(!r.wound(e, 1));
        assert_eq!(e.hp(&r), hp - 1);
        assert!(e.is_aggressive(&r));
        assert_eq!(e.awareness(&r), Vis::Seen);
    }
}
