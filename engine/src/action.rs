use crate::{
    ecs::{Health, Vis},
    prelude::*,
    InputAction, HIDE_COST, LISTEN_COST, LISTEN_RADIUS, PLAYER_VISION,
    SCOUT_COST,
};

/// Things the player can do on their turn.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PlayerAction {
    /// Step to an adjacent tile.
    Move(IVec2),
    Wait,
    Listen,
    Hide,
    Scout,
    Aim,
    Fire,
    Help,
    ToggleZoom,
}

impl TryFrom<InputAction> for PlayerAction {
    type Error = ();

    fn try_from(value: InputAction) -> Result<Self, Self::Error> {
        use InputAction::*;
        if let Some(dir) = value.dir() {
            return Ok(PlayerAction::Move(dir));
        }

        match value {
            Wait => Ok(PlayerAction::Wait),
            Listen => Ok(PlayerAction::Listen),
            Hide => Ok(PlayerAction::Hide),
            Scout => Ok(PlayerAction::Scout),
            Aim => Ok(PlayerAction::Aim),
            Fire => Ok(PlayerAction::Fire),
            Help => Ok(PlayerAction::Help),
            Confirm => Ok(PlayerAction::ToggleZoom),
            _ => Err(()),
        }
    }
}

const HELP: &[&str] = &[
    "Move with w e d c x z a q or the arrow keys, wait with s or space.",
    "1 listen, 2 hide, 3 scout, 4 aim, 5 fire, enter zooms the map.",
];

impl Runtime {
    /// Carry out a player action, return whether it took up a turn.
    ///
    /// Actions that fail for lack of resources or targets take no time.
    pub fn player_act(&mut self, act: PlayerAction) -> bool {
        match act {
            PlayerAction::Move(dir) => self.player_move(dir),
            PlayerAction::Wait => {
                self.player.quiet_down();
                true
            }
            PlayerAction::Listen => self.listen(),
            PlayerAction::Hide => self.hide(),
            PlayerAction::Scout => self.scout(),
            PlayerAction::Aim => self.aim(),
            PlayerAction::Fire => self.fire(),
            PlayerAction::Help => {
                for line in HELP {
                    msg!("{line}");
                }
                false
            }
            PlayerAction::ToggleZoom => {
                self.map.toggle_zoom();
                false
            }
        }
    }

    fn player_move(&mut self, dir: IVec2) -> bool {
        let dest = self.player.pos + dir;

        if dest == self.town.pos {
            self.menu = Some(self.town_menu());
            return true;
        }

        if let Some(e) = self.placement.entity_at(dest) {
            let species = e.species(self);
            if e.hp(self) > 1 {
                e.with_mut(self, |h: &mut Health| h.0 -= 1);
                e.provoke(self);
                msg!("You grapple with the {species}.");
                return true;
            }
            msg!("You catch the {species}.");
            self.capture(e);
        }

        if !self.map.is_passable(dest) {
            return false;
        }

        self.player.pos = dest;
        self.player.get_hungry();
        self.player.make_noise();

        if self.player.hidden && self.rng.one_chance_in(2) {
            self.player.hidden = false;
            msg!("You step out of cover.");
        }
        if self.player.listening && self.rng.one_chance_in(2) {
            self.player.listening = false;
        }

        if let Some(camp) = self.town.camp_at(dest) {
            self.discover_camp(camp);
            self.menu = Some(self.camp_menu(camp));
        }
        true
    }

    /// Pay a food cost or narrate why you can't.
    fn pay(&mut self, cost: i32) -> bool {
        if self.player.spend_food(cost) {
            true
        } else {
            msg!("You are too hungry for that.");
            false
        }
    }

    fn listen(&mut self) -> bool {
        if !self.pay(LISTEN_COST - self.player.skills.listen_discount) {
            return false;
        }
        self.player.listening = true;
        self.update_vis();

        let radius = self.sense_radius();
        let n = self.critters_within(self.player.pos, radius).count();
        match n {
            0 => msg!("You listen, but the wilds are quiet."),
            1 => msg!("You hear an animal nearby."),
            n => msg!("You hear {n} animals nearby."),
        }
        true
    }

    fn hide(&mut self) -> bool {
        if !self.pay(HIDE_COST) {
            return false;
        }
        self.player.hidden = true;
        msg!("You take cover.");
        true
    }

    fn scout(&mut self) -> bool {
        if !self.pay(SCOUT_COST) {
            return false;
        }
        let kind = self.map.kind_at(self.player.pos);
        msg!("{}", kind.description());
        self.search_for_camps();
        self.map.toggle_zoom();
        true
    }

    /// How far the player can currently perceive critters.
    pub(crate) fn sense_radius(&self) -> i32 {
        let skills = &self.player.skills;
        if self.player.listening {
            LISTEN_RADIUS + skills.listen
        } else {
            PLAYER_VISION + skills.vision
        }
    }

    /// Reveal critters within the player's senses.
    pub(crate) fn update_vis(&mut self) {
        let near: Vec<Entity> = self
            .critters_within(self.player.pos, self.sense_radius())
            .filter(|e| e.vis(self) != Vis::Seen)
            .collect();
        for e in near {
            e.reveal(self);
        }
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::mock::StepRng;
    use world::{BiomeKind, BiomeMap, WorldMap};

    use super::*;
    use crate::{Camp, MenuCommand, HUNGER_PER_MOVE, MOVE_NOISE, VIEW_SIZE};

    fn runtime() -> Runtime {
        let map = WorldMap::new(
            BiomeMap::uniform(ivec2(100, 100), BiomeKind::Plains),
            VIEW_SIZE,
        );
        Runtime::scenario(map, ivec2(50, 50), StepRng::new(0, 0))
    }

    #[test]
    fn input_mapping() {
        assert_eq!(
            PlayerAction::try_from(InputAction::NorthWest),
            Ok(PlayerAction::Move(ivec2(-1, -1)))
        );
        assert_eq!(
            PlayerAction::try_from(InputAction::Confirm),
            Ok(PlayerAction::ToggleZoom)
        );
        assert_eq!(PlayerAction::try_from(InputAction::Cancel), Err(()));
    }

    #[test]
    fn walking() {
        let mut r = runtime();
        let start = r.player.pos;
        r.play(PlayerAction::Move(ivec2(-1, 0)));
        assert_eq!(r.player.pos, start + ivec2(-1, 0));
        assert_eq!(r.player.noise, MOVE_NOISE);
        assert_eq!(r.player.hunger, HUNGER_PER_MOVE);
        assert_eq!(r.now().turn(), 2);

        r.play(PlayerAction::Wait);
        assert_eq!(r.player.noise, 0);
    }

    #[test]
    fn map_edge_blocks() {
        let mut r = runtime();
        r.player.pos = ivec2(0, 0);
        assert!(!r.player_act(PlayerAction::Move(ivec2(-1, 0))));
        assert_eq!(r.player.pos, ivec2(0, 0));
    }

    #[test]
    fn free_actions_take_no_time() {
        let mut r = runtime();
        r.play(PlayerAction::Help);
        r.play(PlayerAction::ToggleZoom);
        assert_eq!(r.now().turn(), 1);
        assert!(r.map.is_zoomed());
    }

    #[test]
    fn starving() {
        let mut r = runtime();
        r.player.food = 1;
        r.player.hunger = 95;
        r.play(PlayerAction::Move(ivec2(-1, 0)));
        assert_eq!(r.player.food, 0);
        assert_eq!(r.player.hunger, 0);
        assert!(r.menu().is_none());

        r.player.hunger = 95;
        r.play(PlayerAction::Move(ivec2(-1, 0)));
        assert_eq!(r.player.food, -1);
        let menu = r.menu().unwrap();
        assert!(!menu.closable);

        r.dispatch(MenuCommand::Revive);
        assert!(r.menu().is_none());
        assert_eq!(r.cheat_count(), 1);
        assert_eq!(r.player.food, crate::STARTING_FOOD);
        assert_eq!((r.player.pos - r.town.pos).cheb_len(), 1);
    }

    #[test]
    fn bumping_critters() {
        let mut r = runtime();
        let start = r.player.pos;
        let bear = r.spawn_critter(Species::Bear, start + ivec2(-1, 0));
        let hp = bear.hp(&r);
        assert!(r.player_act(PlayerAction::Move(ivec2(-1, 0))));
        assert_eq!(r.player.pos, start);
        assert_eq!(bear.hp(&r), hp - 1);
        assert!(bear.is_aggressive(&r));

        let rabbit = r.spawn_critter(Species::Rabbit, start + ivec2(0, 1));
        assert!(r.player_act(PlayerAction::Move(ivec2(0, 1))));
        assert!(!rabbit.is_alive(&r));
        assert_eq!(r.player.pos, start + ivec2(0, 1));
        assert_eq!(r.player.loot.get(&Species::Rabbit), Some(&1));
    }

    #[test]
    fn town_and_camp_menus() {
        let mut r = runtime();
        let town = r.town.pos;
        r.player.pos = town + ivec2(-1, 0);
        r.play(PlayerAction::Move(ivec2(1, 0)));
        assert_eq!(r.player.pos, town + ivec2(-1, 0));
        assert_eq!(r.menu().map(|m| m.title.as_str()), Some("Town"));
        r.menu_input(InputAction::Cancel);
        assert!(r.menu().is_none());

        r.town.camps.push(Camp {
            name: "Test Camp",
            biome: BiomeKind::Plains,
            pos: town + ivec2(-2, 0),
            discovered: false,
        });
        r.play(PlayerAction::Move(ivec2(-1, 0)));
        assert!(r.town.camps[0].discovered);
        assert_eq!(r.menu().map(|m| m.title.as_str()), Some("Test Camp"));

        r.player.hp = 1;
        r.menu_input(InputAction::Confirm);
        assert_eq!(r.player.hp, r.player.max_hp);
        assert!(r.menu().is_none());
    }

    #[test]
    fn skills_cost_food() {
        let mut r = runtime();
        r.player.food = 1;
        assert!(r.player_act(PlayerAction::Hide));
        assert!(r.player.hidden);
        assert!(!r.player_act(PlayerAction::Listen));
        assert!(!r.player.listening);

        r.player.skills.listen_discount = 1;
        assert!(r.player_act(PlayerAction::Listen));
        assert!(r.player.listening);
        assert_eq!(r.sense_radius(), LISTEN_RADIUS);
    }

    #[test]
    fn scouting_finds_camps() {
        let mut r = runtime();
        let food = r.player.food;
        let pos = r.player.pos;
        r.town.camps.push(Camp {
            name: "Far Camp",
            biome: BiomeKind::Plains,
            pos: pos + ivec2(30, 0),
            discovered: false,
        });

        assert!(r.player_act(PlayerAction::Scout));
        r.pump_messages();
        assert!(r
            .messages()
            .tail(2)
            .any(|m| m.text() == "You spot campfire smoke to the east."));
        assert!(!r.town.camps[0].discovered);
        assert_eq!(r.player.food, food - SCOUT_COST);
        assert!(r.map.is_zoomed());

        r.town.camps[0].pos = pos + ivec2(5, 0);
        assert!(r.player_act(PlayerAction::Scout));
        assert!(r.town.camps[0].discovered);
        assert!(!r.map.is_zoomed());

        r.player.food = 0;
        assert!(!r.player_act(PlayerAction::Scout));
        assert!(!r.map.is_zoomed());
    }

    #[test]
    fn listening_reveals() {
        let mut r = runtime();
        let e = r.spawn_critter(Species::Deer, r.player.pos + ivec2(-8, 0));
        r.update_vis();
        assert_eq!(e.vis(&r), Vis::NotSeen);
        assert!(r.player_act(PlayerAction::Listen));
        assert_eq!(e.vis(&r), Vis::Seen);
    }
}
