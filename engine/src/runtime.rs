use anyhow::{Context, Result};
use rand::RngCore;
use util::{srng, Logos};
use world::{WorldMap, SITE_SPACING};

use crate::{
    ecs::{Awareness, Born, Ecs, Health, Vis, Visibility},
    prelude::*,
    Camp, MessageLog, Placement, PlayerAction, Receiver, Scheduler, Spawner,
    Town, SPAWN_COUNT, SPAWN_FREQ, VIEW_SIZE, WORLD_SIZE,
};

/// Main data container for game engine runtime.
pub struct Runtime {
    pub(crate) now: Instant,
    pub(crate) map: WorldMap,
    pub(crate) player: Player,
    pub(crate) town: Town,
    pub(crate) spawner: Spawner,
    pub(crate) scheduler: Scheduler,
    pub(crate) ecs: Ecs,
    pub(crate) placement: Placement,
    pub(crate) menu: Option<Menu>,
    /// How many times the player has been brought back from death.
    pub(crate) cheat_count: u32,
    /// Session random source.
    ///
    /// Boxed so that scripted runs can swap in a fixed sequence.
    pub(crate) rng: Box<dyn RngCore>,
    messages: MessageLog,
    recv: Receiver,
}

impl AsRef<Runtime> for Runtime {
    fn as_ref(&self) -> &Runtime {
        self
    }
}

impl AsMut<Runtime> for Runtime {
    fn as_mut(&mut self) -> &mut Runtime {
        self
    }
}

impl Runtime {
    /// Start a new game from a seed.
    pub fn new(seed: &Logos) -> Result<Self> {
        let mut rng = srng(seed);

        let map =
            WorldMap::generate(&mut rng, WORLD_SIZE, VIEW_SIZE, SITE_SPACING)
                .with_context(|| format!("Generating world for seed {seed}"))?;
        let town_pos =
            Town::find_site(&map).context("No place to put the town")?;
        let camps = Camp::place_all(&map, &mut rng, town_pos);

        log::info!(
            "New game, seed {seed}, town at {town_pos}, {} camps",
            camps.len()
        );

        let mut ret = Runtime::scenario(map, town_pos, rng);
        ret.town.camps = camps;
        Ok(ret)
    }

    /// Set up a game on a given map with no camps and no critters.
    pub fn scenario(
        map: WorldMap,
        town_pos: IVec2,
        rng: impl RngCore + 'static,
    ) -> Self {
        // Receiver must exist before anything sends messages.
        let recv = Receiver::default();

        let mut scheduler = Scheduler::default();
        scheduler.add(Actor::Player);
        scheduler.add(Actor::Spawner);
        scheduler.add(Actor::Town);

        let mut ret = Runtime {
            now: Instant(1),
            map,
            player: Player::new(town_pos),
            town: Town::new(town_pos),
            spawner: Spawner::new(SPAWN_COUNT, SPAWN_FREQ),
            scheduler,
            ecs: Default::default(),
            placement: Default::default(),
            menu: None,
            cheat_count: 0,
            rng: Box::new(rng),
            messages: Default::default(),
            recv,
        };
        ret.player.pos = ret.start_pos();
        ret
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn town(&self) -> &Town {
        &self.town
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn menu(&self) -> Option<&Menu> {
        self.menu.as_ref()
    }

    pub fn cheat_count(&self) -> u32 {
        self.cheat_count
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn critters(&self) -> impl Iterator<Item = Entity> + '_ {
        self.placement.all_entities()
    }

    pub fn critter_at(&self, pos: IVec2) -> Option<Entity> {
        self.placement.entity_at(pos)
    }

    /// Critters within a Chebyshev radius of a point.
    pub fn critters_within(
        &self,
        pos: IVec2,
        radius: i32,
    ) -> impl Iterator<Item = Entity> + '_ {
        self.critters().filter(move |e| {
            e.pos(self)
                .is_some_and(|p| (p - pos).cheb_len() <= radius)
        })
    }

    /// Whether a critter can't step on the tile.
    pub fn is_blocked(&self, pos: IVec2) -> bool {
        !self.map.is_passable(pos)
            || self.placement.is_occupied(pos)
            || pos == self.town.pos
            || pos == self.player.pos
    }

    /// Free spot next to the town where the player starts out.
    fn start_pos(&self) -> IVec2 {
        let center = self.town.pos;
        for radius in 1..=16 {
            for y in -radius..=radius {
                for x in -radius..=radius {
                    let p = center + ivec2(x, y);
                    if (p - center).cheb_len() == radius
                        && self.map.is_passable(p)
                        && !self.placement.is_occupied(p)
                    {
                        return p;
                    }
                }
            }
        }
        log::warn!("No free tile near the town at {center}");
        center + ivec2(1, 0)
    }

    pub fn spawn_critter(&mut self, species: Species, pos: IVec2) -> Entity {
        let traits = species.roll_traits(&mut self.rng);
        let e = Entity(self.ecs.spawn((
            species,
            Health(species.stats().hp),
            Visibility(Vis::NotSeen),
            Awareness(Vis::NotSeen),
            traits,
            Born(self.now),
        )));
        e.place(self, pos);
        self.scheduler.add(Actor::Critter(e));
        self.spawner.track(e);
        log::debug!("Spawned {species} {e} at {pos}");
        e
    }

    /// Run a player action and the world's response to it.
    pub fn play(&mut self, act: PlayerAction) {
        if self.menu.is_some() {
            log::warn!("Runtime::play: {act:?} while a menu is open");
            return;
        }

        if self.player_act(act) {
            self.now += 1;
            self.update_vis();
            // Town and camp menus pause the world.
            if self.menu.is_none() {
                self.world_turn();
                self.update_vis();
            }
            self.check_death();
        }
        self.pump_messages();
    }

    /// Everyone except the player takes one turn.
    pub(crate) fn world_turn(&mut self) {
        for actor in self.scheduler.round() {
            match actor {
                Actor::Player => {}
                Actor::Spawner => self.spawner_turn(),
                // The town stays put and waits for visitors.
                Actor::Town => {}
                Actor::Critter(e) => {
                    // Discard critters removed earlier this round.
                    if !e.is_alive(self) {
                        continue;
                    }
                    e.critter_turn(self);
                }
            }
        }
    }

    fn check_death(&mut self) {
        if !self.player.is_dead() {
            return;
        }
        let starved = self.player.is_starved();
        if starved {
            alert!("You have starved.");
        } else {
            alert!("You have died.");
        }
        log::info!("Player died on turn {}", self.now.turn());
        self.menu = Some(Menu::death(starved));
    }

    /// Bring the player back next to the town after dying.
    pub(crate) fn revive(&mut self) {
        let pos = self.start_pos();
        self.player.revive(pos);
        self.cheat_count += 1;
        msg!("You wake up by the town gate, bruised and ravenous.");
    }

    /// Move sent messages into the message log.
    pub(crate) fn pump_messages(&mut self) {
        for msg in self.recv.try_iter() {
            self.messages.push(msg);
        }
    }
}
