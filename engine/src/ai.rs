//! Critters figuring out what to do on their own.

use rand::{seq::SliceRandom, Rng};

use crate::{
    ecs::{Traits, TurnsSeen, Vis},
    prelude::*,
    BASE_DETECTION_RADIUS, CRITTER_DAMAGE,
};

/// How a critter reacts on noticing the player.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Reaction {
    Attack,
    Flee,
}

/// Roll whether a critter notices a player making `noise` and how it
/// reacts.
pub(crate) fn detection_roll<R: Rng + ?Sized>(
    rng: &mut R,
    traits: &Traits,
    noise: i32,
) -> Option<Reaction> {
    if !rng.percent(noise + traits.detection_bonus) {
        return None;
    }
    if rng.percent(traits.aggression_chance) {
        Some(Reaction::Attack)
    } else {
        Some(Reaction::Flee)
    }
}

/// Pick a step towards or away from the target.
///
/// Directions are tried in random order, the first best one wins.
pub(crate) fn chase_step<R: Rng + ?Sized>(
    rng: &mut R,
    from: IVec2,
    target: IVec2,
    flee: bool,
) -> IVec2 {
    let mut dirs = DIR_8;
    dirs.shuffle(rng);

    let dist = |d: IVec2| (from + d - target).cheb_len();
    let mut best = dirs[0];
    for &d in &dirs[1..] {
        let better = if flee {
            dist(d) > dist(best)
        } else {
            dist(d) < dist(best)
        };
        if better {
            best = d;
        }
    }
    best
}

impl Entity {
    pub(crate) fn critter_turn(&self, r: &mut Runtime) {
        let Some(pos) = self.pos(r) else {
            return;
        };
        let species = self.species(r);
        let traits = self.traits(r);
        let player_pos = r.player.pos;
        let dist = (pos - player_pos).cheb_len();

        let radius = BASE_DETECTION_RADIUS + traits.vision_bonus
            - r.player.skills.stealth;
        let unnoticed = self.awareness(r) != Vis::Seen;
        if dist <= radius && unnoticed && !r.player.hidden {
            let noise = r.player.noise;
            match detection_roll(&mut r.rng, &traits, noise) {
                Some(Reaction::Attack) => {
                    self.provoke(r);
                    log::debug!("{species} {self} attacks");
                    alert!("The {species} sees you and attacks!");
                }
                Some(Reaction::Flee) => {
                    self.notice(r);
                    log::debug!("{species} {self} flees");
                    msg!("The {species} sees you and flees!");
                }
                None => {}
            }
        }

        let aware = self.awareness(r) == Vis::Seen;
        let aggressive = self.is_aggressive(r);

        let step = if aware {
            self.with_mut(r, |t: &mut TurnsSeen| t.0 += 1);
            chase_step(&mut r.rng, pos, player_pos, !aggressive)
        } else if r.rng.percent(traits.move_chance) {
            DIR_8[r.rng.gen_range(0..DIR_8.len())]
        } else {
            return;
        };

        let dest = pos + step;
        if dest == player_pos {
            if aware && aggressive {
                r.hurt_player(species, CRITTER_DAMAGE);
            }
            return;
        }
        if r.is_blocked(dest) {
            return;
        }
        self.place(r, dest);
    }
}
