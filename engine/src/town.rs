//! The town, its quests and trade, and the camps out in the wilds.

use rand::{seq::IteratorRandom, Rng};
use util::compass_name;
use world::{BiomeKind, WorldMap};

use crate::{prelude::*, Skills};

/// Food paid for finding the next camp in the mission list.
const MISSION_REWARD: i32 = 3;

/// Arrows bought per unit of food.
const ARROW_BUNDLE: i32 = 5;

/// Arrows that come with each new archery level.
const BOW_ARROWS: i32 = 5;

const MAX_ARCHERY: i32 = 3;

/// Food cost of resting at a camp.
const REST_COST: i32 = 1;

/// Things the town hands out.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Reward {
    Food(i32),
    Arrows(i32),
    Archery,
    Stealth,
    Vision,
    Listen,
    ListenDiscount,
    MaxHp,
}

impl Reward {
    pub fn describe(self) -> String {
        match self {
            Reward::Food(n) => format!("{n} food"),
            Reward::Arrows(n) => format!("{n} arrows"),
            Reward::Archery => "archery training".into(),
            Reward::Stealth => "stealth training".into(),
            Reward::Vision => "keener eyes".into(),
            Reward::Listen => "keener ears".into(),
            Reward::ListenDiscount => "patience".into(),
            Reward::MaxHp => "toughness".into(),
        }
    }
}

pub struct Quest {
    pub name: &'static str,
    pub wants: &'static [(Species, u32)],
    pub reward: Reward,
}

use Species::*;

/// Quests are handed out one at a time in this order.
const QUESTS: &[Quest] = &[
    Quest {
        name: "Rabbit stew",
        wants: &[(Rabbit, 2)],
        reward: Reward::Archery,
    },
    Quest {
        name: "Fletching feathers",
        wants: &[(Grouse, 2)],
        reward: Reward::Arrows(10),
    },
    Quest {
        name: "A fox stole",
        wants: &[(Fox, 1), (Rabbit, 1)],
        reward: Reward::Stealth,
    },
    Quest {
        name: "Venison for the feast",
        wants: &[(Deer, 2)],
        reward: Reward::Vision,
    },
    Quest {
        name: "Boar tusks",
        wants: &[(Boar, 1)],
        reward: Reward::Archery,
    },
    Quest {
        name: "Wolves at the gate",
        wants: &[(Wolf, 2)],
        reward: Reward::Listen,
    },
    Quest {
        name: "Elk antlers",
        wants: &[(Elk, 1)],
        reward: Reward::ListenDiscount,
    },
    Quest {
        name: "The old bear",
        wants: &[(Bear, 1)],
        reward: Reward::Archery,
    },
];

pub struct Upgrade {
    pub name: &'static str,
    pub cost: i32,
    pub reward: Reward,
}

/// Upgrades are sold one at a time in this order.
const UPGRADES: &[Upgrade] = &[
    Upgrade {
        name: "Soft boots",
        cost: 4,
        reward: Reward::Stealth,
    },
    Upgrade {
        name: "Leather jerkin",
        cost: 5,
        reward: Reward::MaxHp,
    },
    Upgrade {
        name: "Spyglass",
        cost: 6,
        reward: Reward::Vision,
    },
    Upgrade {
        name: "Ear trumpet",
        cost: 6,
        reward: Reward::Listen,
    },
    Upgrade {
        name: "Pemmican pouch",
        cost: 8,
        reward: Reward::ListenDiscount,
    },
];

/// Camps and the biome each one is pitched in.
const CAMP_SITES: [(&str, BiomeKind); 3] = [
    ("Birch Camp", BiomeKind::LightForest),
    ("Spruce Camp", BiomeKind::DarkForest),
    ("Larch Camp", BiomeKind::Taiga),
];

#[derive(Clone, Debug)]
pub struct Camp {
    pub name: &'static str,
    pub biome: BiomeKind,
    pub pos: IVec2,
    pub discovered: bool,
}

impl Camp {
    /// Pitch the camps on a map, camps whose biome isn't on the map are
    /// left out.
    pub fn place_all<R: Rng + ?Sized>(
        map: &WorldMap,
        rng: &mut R,
        town_pos: IVec2,
    ) -> Vec<Camp> {
        let mut ret = Vec::new();
        let biomes = map.biomes();
        for (name, biome) in CAMP_SITES {
            let Some(pos) = biomes
                .cells_of(biome)
                .map(|c| biomes.anchor_point(c))
                .filter(|&p| p != town_pos)
                .choose(rng)
            else {
                log::info!("No {biome} on the map, skipping {name}");
                continue;
            };
            log::info!("{name} at {pos}");
            ret.push(Camp {
                name,
                biome,
                pos,
                discovered: false,
            });
        }
        ret
    }
}

/// The town actor's state.
#[derive(Clone, Debug)]
pub struct Town {
    pub pos: IVec2,
    /// Index of the current quest.
    pub quest: usize,
    /// Number of missions completed, the next one is to find the camp at
    /// this index.
    pub mission: usize,
    /// Index of the next upgrade for sale.
    pub upgrade: usize,
    pub camps: Vec<Camp>,
}

impl Town {
    pub fn new(pos: IVec2) -> Self {
        Town {
            pos,
            quest: 0,
            mission: 0,
            upgrade: 0,
            camps: Vec::new(),
        }
    }

    /// Site the town on the plains closest to the middle of the map.
    pub fn find_site(map: &WorldMap) -> Option<IVec2> {
        let center = map.size() / 2;
        let biomes = map.biomes();
        let closest = |cells: Vec<usize>| {
            cells
                .into_iter()
                .map(|c| biomes.anchor_point(c))
                .min_by_key(|&p| (p - center).cheb_len())
        };

        closest(biomes.cells_of(BiomeKind::Plains).collect()).or_else(|| {
            closest(
                biomes
                    .biomes()
                    .iter()
                    .filter(|b| b.is_passable())
                    .map(|b| b.cell)
                    .collect(),
            )
        })
    }

    pub fn current_quest(&self) -> Option<&'static Quest> {
        QUESTS.get(self.quest)
    }

    pub fn current_upgrade(&self) -> Option<&'static Upgrade> {
        UPGRADES.get(self.upgrade)
    }

    pub fn current_mission(&self) -> Option<&Camp> {
        self.camps.get(self.mission)
    }

    pub fn camp_at(&self, pos: IVec2) -> Option<usize> {
        self.camps.iter().position(|c| c.pos == pos)
    }

    /// Index and distance of the closest camp not yet found.
    pub fn nearest_undiscovered_camp(
        &self,
        pos: IVec2,
    ) -> Option<(usize, i32)> {
        self.camps
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.discovered)
            .map(|(i, c)| (i, (c.pos - pos).cheb_len()))
            .min_by_key(|&(_, d)| d)
    }
}

fn wants_text(wants: &[(Species, u32)]) -> String {
    wants
        .iter()
        .map(|(s, n)| format!("{n} {s}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Skills {
    fn train(&mut self, reward: Reward) {
        match reward {
            Reward::Archery => {
                self.archery = (self.archery + 1).min(MAX_ARCHERY)
            }
            Reward::Stealth => self.stealth += 1,
            Reward::Vision => self.vision += 1,
            Reward::Listen => self.listen += 1,
            Reward::ListenDiscount => self.listen_discount += 1,
            _ => {}
        }
    }
}

impl Runtime {
    fn grant(&mut self, reward: Reward) {
        match reward {
            Reward::Food(n) => self.player.food += n,
            Reward::Arrows(n) => self.player.arrows += n,
            Reward::MaxHp => {
                self.player.max_hp += 1;
                self.player.hp = self.player.max_hp;
            }
            Reward::Archery => {
                self.player.skills.train(reward);
                self.player.arrows += BOW_ARROWS;
            }
            _ => self.player.skills.train(reward),
        }
        msg!("You receive {}.", reward.describe());
    }

    /// Trade loot for the current quest's reward.
    pub(crate) fn hand_in_quest(&mut self) -> bool {
        let Some(quest) = self.town.current_quest() else {
            msg!("There is no more work for you here.");
            return false;
        };
        if !self.player.take_loot(quest.wants) {
            msg!("You still need {}.", wants_text(quest.wants));
            return false;
        }
        self.town.quest += 1;
        log::info!("Quest \"{}\" done", quest.name);
        msg!("\"{}\" is done.", quest.name);
        self.grant(quest.reward);
        true
    }

    pub(crate) fn claim_mission(&mut self) -> bool {
        let Some(camp) = self.town.current_mission() else {
            msg!("There are no more camps to find.");
            return false;
        };
        if !camp.discovered {
            msg!("You haven't found {} yet.", camp.name);
            return false;
        }
        self.town.mission += 1;
        self.grant(Reward::Food(MISSION_REWARD));
        true
    }

    /// Sell all carried loot for food, return the food gained.
    pub(crate) fn sell_loot(&mut self) -> i32 {
        let food: i32 = self
            .player
            .loot
            .iter()
            .map(|(s, &n)| s.stats().food_value * n as i32)
            .sum();
        if food == 0 {
            msg!("You have nothing to sell.");
            return 0;
        }
        self.player.loot.clear();
        self.player.food += food;
        msg!("You sell your catch for {food} food.");
        food
    }

    pub(crate) fn buy_arrows(&mut self) -> bool {
        if self.player.skills.archery < 1 {
            msg!("You have no use for arrows without a bow.");
            return false;
        }
        if !self.player.spend_food(1) {
            msg!("You can't afford arrows.");
            return false;
        }
        self.player.arrows += ARROW_BUNDLE;
        msg!("You buy {ARROW_BUNDLE} arrows.");
        true
    }

    pub(crate) fn buy_upgrade(&mut self) -> bool {
        let Some(upgrade) = self.town.current_upgrade() else {
            msg!("There is nothing left to buy.");
            return false;
        };
        if !self.player.spend_food(upgrade.cost) {
            msg!("You can't afford the {}.", upgrade.name.to_lowercase());
            return false;
        }
        self.town.upgrade += 1;
        msg!("You buy the {}.", upgrade.name.to_lowercase());
        self.grant(upgrade.reward);
        true
    }

    pub(crate) fn rest(&mut self, camp: usize) {
        if !self.player.spend_food(REST_COST) {
            msg!("You are too hungry to rest.");
            return;
        }
        self.player.hp = self.player.max_hp;
        let name = self.town.camps.get(camp).map_or("the camp", |c| c.name);
        msg!("You rest at {name} and feel better.");
    }

    /// Mark a camp found, return whether it was new.
    pub(crate) fn discover_camp(&mut self, camp: usize) -> bool {
        let Some(c) = self.town.camps.get_mut(camp) else {
            return false;
        };
        if c.discovered {
            return false;
        }
        c.discovered = true;
        log::info!("Discovered {}", c.name);
        msg!("You found {}!", c.name);
        true
    }

    /// Hint towards the closest unknown camp, or find it if it's close.
    pub(crate) fn search_for_camps(&mut self) {
        let pos = self.player.pos;
        let Some((i, dist)) = self.town.nearest_undiscovered_camp(pos) else {
            return;
        };
        if dist <= crate::SCOUT_DISCOVER_RADIUS {
            self.discover_camp(i);
        } else if dist <= crate::SCOUT_HINT_RADIUS {
            let dir = compass_name(self.town.camps[i].pos - pos);
            msg!("You spot campfire smoke to the {dir}.");
        }
    }

    pub(crate) fn town_menu(&self) -> Menu {
        Menu::new("Town")
            .line("Smoke rises from the chimneys of the trading post.")
            .item("Quests", MenuCommand::Quests)
            .item("Missions", MenuCommand::Missions)
            .item("Trade", MenuCommand::Trade)
            .item("Leave", MenuCommand::Close)
    }

    pub(crate) fn quest_menu(&self) -> Menu {
        let menu = Menu::new("Quests");
        let menu = match self.town.current_quest() {
            Some(q) => menu
                .line(format!("{}: bring {}.", q.name, wants_text(q.wants)))
                .line(format!("Reward: {}.", q.reward.describe()))
                .item("Hand in", MenuCommand::HandInQuest),
            None => menu.line("You've done everything the town asked."),
        };
        menu.item("Back", MenuCommand::Town)
    }

    pub(crate) fn mission_menu(&self) -> Menu {
        let menu = Menu::new("Missions");
        let menu = match self.town.current_mission() {
            Some(c) => menu
                .line(format!("Find {} somewhere in the {}.", c.name, c.biome))
                .line(format!("Reward: {MISSION_REWARD} food."))
                .item("Report", MenuCommand::ClaimMission),
            None => menu.line("All the camps have been found."),
        };
        menu.item("Back", MenuCommand::Town)
    }

    pub(crate) fn trade_menu(&self) -> Menu {
        let p = &self.player;
        let mut menu = Menu::new("Trade")
            .line(format!(
                "Food: {}  Arrows: {}  Carcasses: {}",
                p.food,
                p.arrows,
                p.loot_count()
            ))
            .item("Sell catch", MenuCommand::SellLoot);
        if p.skills.archery > 0 {
            menu = menu.item(
                format!("Buy {ARROW_BUNDLE} arrows (1 food)"),
                MenuCommand::BuyArrows,
            );
        }
        if let Some(u) = self.town.current_upgrade() {
            menu = menu.item(
                format!("Buy {} ({} food)", u.name.to_lowercase(), u.cost),
                MenuCommand::BuyUpgrade,
            );
        }
        menu.item("Back", MenuCommand::Town)
    }

    pub(crate) fn camp_menu(&self, camp: usize) -> Menu {
        let name = self.town.camps.get(camp).map_or("Camp", |c| c.name);
        Menu::new(name)
            .line("A fire pit and a lean-to.")
            .line("A good place to catch your breath.")
            .item(format!("Rest ({REST_COST} food)"), MenuCommand::Rest(camp))
            .item("Leave", MenuCommand::Close)
    }
}

#[cfg(test)]
mod test {
    use glam::vec2;
    use rand::rngs::mock::StepRng;
    use util::srng;
    use world::{BiomeMap, SITE_SPACING};

    use super::*;
    use crate::{VIEW_SIZE, WORLD_SIZE};

    fn runtime() -> Runtime {
        let map = WorldMap::new(
            BiomeMap::uniform(ivec2(100, 100), BiomeKind::Plains),
            VIEW_SIZE,
        );
        Runtime::scenario(map, ivec2(50, 50), StepRng::new(0, 0))
    }

    #[test]
    fn quest_hand_in() {
        let mut r = runtime();
        assert!(!r.hand_in_quest());
        assert_eq!(r.town.quest, 0);

        r.player.add_loot(Rabbit);
        r.player.add_loot(Rabbit);
        r.player.add_loot(Rabbit);
        assert!(r.hand_in_quest());
        assert_eq!(r.town.quest, 1);
        assert_eq!(r.player.loot.get(&Rabbit), Some(&1));
        assert_eq!(r.player.skills.archery, 1);
        assert_eq!(r.player.arrows, BOW_ARROWS);
    }

    #[test]
    fn trading() {
        let mut r = runtime();
        let food = r.player.food;
        r.player.add_loot(Deer);
        r.player.add_loot(Rabbit);
        assert_eq!(r.sell_loot(), 5);
        assert_eq!(r.player.food, food + 5);
        assert_eq!(r.player.loot_count(), 0);

        // No bow, no arrows.
        assert!(!r.buy_arrows());
        r.player.skills.archery = 1;
        assert!(r.buy_arrows());
        assert_eq!(r.player.arrows, ARROW_BUNDLE);

        r.player.food = 0;
        assert!(!r.buy_upgrade());
        r.player.food = 100;
        assert!(r.buy_upgrade());
        assert_eq!(r.player.skills.stealth, 1);
        assert_eq!(r.town.upgrade, 1);
    }

    #[test]
    fn missions_go_in_order() {
        let mut r = runtime();
        r.town.camps = vec![
            Camp {
                name: "A",
                biome: BiomeKind::Plains,
                pos: ivec2(10, 10),
                discovered: false,
            },
            Camp {
                name: "B",
                biome: BiomeKind::Plains,
                pos: ivec2(90, 90),
                discovered: false,
            },
        ];
        r.discover_camp(1);
        assert!(!r.claim_mission());
        r.discover_camp(0);
        let food = r.player.food;
        assert!(r.claim_mission());
        assert!(r.claim_mission());
        assert!(!r.claim_mission());
        assert_eq!(r.player.food, food + 2 * MISSION_REWARD);
    }

    #[test]
    fn unsampled_cells_still_get_sites() {
        let map = WorldMap::new(
            BiomeMap::from_sites(
                ivec2(100, 50),
                &[
                    (vec2(25.0, 25.0), BiomeKind::Plains),
                    (vec2(75.0, 25.0), BiomeKind::LightForest),
                ],
            ),
            VIEW_SIZE,
        );
        assert_eq!(map.biomes().rand_point(0), None);
        assert_eq!(map.biomes().rand_point(1), None);

        let town = Town::find_site(&map).unwrap();
        assert_eq!(map.kind_at(town), BiomeKind::Plains);

        let camps = Camp::place_all(&map, &mut StepRng::new(0, 0), town);
        assert_eq!(camps.len(), 1);
        assert_eq!(camps[0].biome, BiomeKind::LightForest);
        assert_eq!(map.kind_at(camps[0].pos), BiomeKind::LightForest);
    }

    #[test]
    fn camps_and_town_on_generated_map() {
        let mut rng = srng("camps");
        let map =
            WorldMap::generate(&mut rng, WORLD_SIZE, VIEW_SIZE, SITE_SPACING)
                .unwrap();
        let town = Town::find_site(&map).unwrap();
        assert!(map.is_passable(town));

        let camps = Camp::place_all(&map, &mut rng, town);
        assert!(!camps.is_empty());
        for c in &camps {
            assert!(map.is_passable(c.pos));
            assert_eq!(map.kind_at(c.pos), c.biome);
        }
    }
}
