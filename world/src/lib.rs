//! Biome world map generation and lookup.

mod biome;
pub use biome::{Biome, BiomeKind, TileBiome};

mod biome_map;
pub use biome_map::BiomeMap;

mod voronoi;
pub use voronoi::{Cell, Diagram, Sides};

mod world_map;
pub use world_map::WorldMap;

/// Biome kinds every playable map must contain.
pub const REQUIRED_KINDS: [BiomeKind; 5] = [
    BiomeKind::Ocean,
    BiomeKind::Mountains,
    BiomeKind::Plains,
    BiomeKind::LightForest,
    BiomeKind::DarkForest,
];

/// Minimum distance between Voronoi seed points.
pub const SITE_SPACING: f32 = 40.0;

/// Amplitude in map tiles of the noise jitter applied to biome lookups.
pub const BOUNDARY_JITTER: f64 = 10.0;

/// Macro view tiles closer than this to the player are never shaded.
pub const FOG_THRESHOLD: i32 = 5;
