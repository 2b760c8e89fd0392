pub use crate::{
    alert, msg, send_msg, Actor, Entity, Instant, Menu, MenuCommand, Msg,
    Player, Runtime, Species,
};
pub use glam::{ivec2, IVec2};
pub use util::{HashMap, HashSet, IndexMap, IndexSet, RngExt, VecExt, DIR_8};
