//! Game logic layer machinery.

use glam::IVec2;

/// Size of the whole terminal screen.
pub const SCREEN_SIZE: IVec2 = IVec2::new(120, 50);

/// Size of the map view at the top of the screen.
pub const VIEW_SIZE: IVec2 = IVec2::new(120, 46);

/// Size of the world map in map tiles.
pub const WORLD_SIZE: IVec2 = IVec2::new(480, 184);

/// How many message log lines are shown under the status bars.
pub const MESSAGE_LINES: usize = 2;

/// Quietest the player can be.
pub const MIN_NOISE: i32 = 0;

/// Loudest the player can be, also the percent chance critters in range
/// notice the player at that point.
pub const MAX_NOISE: i32 = 50;

/// Noise from taking a step.
pub const MOVE_NOISE: i32 = 10;

/// How much noise dies down when waiting in place.
pub const WAIT_QUIET: i32 = 15;

/// From how far away do critters get a chance to notice the player.
pub const BASE_DETECTION_RADIUS: i32 = 3;

/// How far can the player see critters.
pub const PLAYER_VISION: i32 = 5;

/// How far can the player hear critters when listening.
pub const LISTEN_RADIUS: i32 = 9;

/// Hunger gained per step.
pub const HUNGER_PER_MOVE: i32 = 5;

/// Hunger at which a unit of food gets eaten.
pub const HUNGER_LIMIT: i32 = 100;

pub const STARTING_FOOD: i32 = 10;

pub const PLAYER_HP: i32 = 5;

/// Food cost of the skill actions.
pub const LISTEN_COST: i32 = 1;
pub const HIDE_COST: i32 = 1;
pub const SCOUT_COST: i32 = 1;

/// Scouting this close to a camp finds it.
pub const SCOUT_DISCOVER_RADIUS: i32 = 10;

/// Scouting this close to a camp gives a hint of its direction.
pub const SCOUT_HINT_RADIUS: i32 = 40;

/// Target population of critters around the player.
pub const SPAWN_COUNT: usize = 8;

/// Turns between spawner cycles.
pub const SPAWN_FREQ: u32 = 3;

/// Critters spawn at most this far from the player on either axis.
pub const SPAWN_WINDOW: i32 = 30;

/// Position rolls per spawn before giving up for the cycle.
pub const SPAWN_RETRIES: usize = 10;

/// Critters farther than this from the player are removed.
pub const DESPAWN_RADIUS: i32 = 40;

/// Turns a critter nobody has seen can live before it wanders off.
pub const MAX_CRITTER_AGE: i64 = 300;

/// Seen turns after which an aggressive critter calms down.
pub const AGGRESSION_TIMEOUT: u32 = 10;

/// Seen turns after which a fleeing critter escapes for good.
pub const ESCAPE_TIMEOUT: u32 = 5;

/// Damage from a critter attack.
pub const CRITTER_DAMAGE: i32 = 1;

/// Damage from an arrow hit.
pub const ARROW_DAMAGE: i32 = 2;

mod actor;
pub use actor::{Actor, Scheduler};

mod action;
pub use action::PlayerAction;

mod ai;

mod combat;
pub use combat::archery_accuracy;

pub mod ecs;

mod entity;
pub use entity::Entity;

mod input;
pub use input::{wait_for, InputAction};

mod menu;
pub use menu::{Menu, MenuCommand, MenuItem};

mod msg;
pub use msg::{send_msg, MessageLog, Msg, Receiver};

mod placement;
pub use placement::Placement;

mod player;
pub use player::{Loot, Player, Skills};

pub mod prelude;

mod render;

mod runtime;
pub use runtime::Runtime;

mod spawner;
pub use spawner::Spawner;

mod species;
pub use species::Species;

mod time;
pub use time::Instant;

mod town;
pub use town::{Camp, Quest, Reward, Town, Upgrade};

mod turn_loop;
pub use turn_loop::run;
