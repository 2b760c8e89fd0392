use std::collections::BTreeMap;

use crate::{
    prelude::*, HUNGER_LIMIT, HUNGER_PER_MOVE, MAX_NOISE, MIN_NOISE,
    MOVE_NOISE, PLAYER_HP, STARTING_FOOD, WAIT_QUIET,
};

/// Carcasses carried by the player, counted per species.
pub type Loot = BTreeMap<Species, u32>;

/// Abilities gained from quests and upgrades.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Skills {
    /// 0 means no bow.
    pub archery: i32,
    /// Shrinks the radius critters can notice you from.
    pub stealth: i32,
    /// Extends passive vision.
    pub vision: i32,
    /// Extends the listening radius.
    pub listen: i32,
    /// Cheaper listening.
    pub listen_discount: i32,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: IVec2,
    pub noise: i32,
    pub food: i32,
    pub hunger: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub arrows: i32,
    pub loot: Loot,
    pub skills: Skills,
    pub hidden: bool,
    pub listening: bool,
    /// Ranged attack target, resolve against the live critters on use.
    pub target: Option<Entity>,
}

impl Player {
    pub fn new(pos: IVec2) -> Self {
        Player {
            pos,
            noise: MIN_NOISE,
            food: STARTING_FOOD,
            hunger: 0,
            hp: PLAYER_HP,
            max_hp: PLAYER_HP,
            arrows: 0,
            loot: Default::default(),
            skills: Default::default(),
            hidden: false,
            listening: false,
            target: None,
        }
    }

    /// Moving makes noise.
    pub fn make_noise(&mut self) {
        self.noise = (self.noise + MOVE_NOISE).min(MAX_NOISE);
    }

    /// Staying put lets the noise die down.
    pub fn quiet_down(&mut self) {
        self.noise = (self.noise - WAIT_QUIET).max(MIN_NOISE);
    }

    /// Advance hunger from a step, eating a unit of food when it fills up.
    pub fn get_hungry(&mut self) {
        self.hunger += HUNGER_PER_MOVE;
        if self.hunger >= HUNGER_LIMIT {
            self.hunger = 0;
            self.food -= 1;
        }
    }

    pub fn is_starved(&self) -> bool {
        self.food < 0
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0 || self.is_starved()
    }

    /// Pay a food cost, fails without change if there isn't enough food.
    pub fn spend_food(&mut self, cost: i32) -> bool {
        let cost = cost.max(0);
        if self.food < cost {
            false
        } else {
            self.food -= cost;
            true
        }
    }

    pub fn add_loot(&mut self, species: Species) {
        *self.loot.entry(species).or_default() += 1;
    }

    /// Whether the loot covers all of `items`.
    pub fn has_loot(&self, items: &[(Species, u32)]) -> bool {
        items
            .iter()
            .all(|(s, n)| self.loot.get(s).copied().unwrap_or(0) >= *n)
    }

    /// Remove items from loot, fails without change if they aren't all
    /// there.
    pub fn take_loot(&mut self, items: &[(Species, u32)]) -> bool {
        if !self.has_loot(items) {
            return false;
        }
        for (s, n) in items {
            if let Some(count) = self.loot.get_mut(s) {
                *count -= n;
                if *count == 0 {
                    self.loot.remove(s);
                }
            }
        }
        true
    }

    pub fn loot_count(&self) -> u32 {
        self.loot.values().sum()
    }

    /// Get back on your feet after dying.
    pub fn revive(&mut self, pos: IVec2) {
        self.pos = pos;
        self.hp = self.max_hp;
        self.food = STARTING_FOOD;
        self.hunger = 0;
        self.noise = MIN_NOISE;
        self.hidden = false;
        self.listening = false;
        self.target = None;
    }
}
