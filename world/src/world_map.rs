use std::cell::RefCell;

use anyhow::{bail, Result};
use glam::{IVec2, Vec2};
use rand::Rng;
use util::{noise2, HashMap, VecExt};

use crate::{BiomeKind, BiomeMap, TileBiome, FOG_THRESHOLD, REQUIRED_KINDS};

/// How many times to reroll a map that's missing required biomes.
const MAX_GENERATION_ATTEMPTS: usize = 16;

/// Biome map with per-tile caching and the two view projections.
///
/// Map space is the full resolution world, used in the zoomed view and by
/// all game logic. View space is the screen grid. The macro view squeezes the
/// whole map into view space, the zoomed view shows a 1:1 window around the
/// player.
pub struct WorldMap {
    biomes: BiomeMap,
    view_size: IVec2,
    scale: Vec2,
    tiles: RefCell<HashMap<IVec2, TileBiome>>,
    /// Closest the player has been to each macro tile, in view cells.
    macro_seen: HashMap<IVec2, i32>,
    zoomed: bool,
}

impl WorldMap {
    pub fn new(biomes: BiomeMap, view_size: IVec2) -> Self {
        assert!(view_size.x > 0 && view_size.y > 0);
        let scale = biomes.size().as_vec2() / view_size.as_vec2();
        WorldMap {
            biomes,
            view_size,
            scale,
            tiles: Default::default(),
            macro_seen: Default::default(),
            zoomed: false,
        }
    }

    /// Generate a new map, retrying until every required biome shows up.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        size: IVec2,
        view_size: IVec2,
        site_spacing: f32,
    ) -> Result<Self> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let biomes = BiomeMap::generate(rng, size, site_spacing);
            let missing = biomes.missing_kinds(&REQUIRED_KINDS);
            if missing.is_empty() {
                return Ok(WorldMap::new(biomes, view_size));
            }
            log::warn!(
                "Map attempt {attempt} is missing {missing:?}, regenerating"
            );
        }
        bail!(
            "Failed to generate a complete {}x{} map in {} attempts",
            size.x,
            size.y,
            MAX_GENERATION_ATTEMPTS
        )
    }

    pub fn biomes(&self) -> &BiomeMap {
        &self.biomes
    }

    /// Size of the map in map tiles.
    pub fn size(&self) -> IVec2 {
        self.biomes.size()
    }

    pub fn view_size(&self) -> IVec2 {
        self.view_size
    }

    pub fn contains(&self, p: IVec2) -> bool {
        let size = self.size();
        p.x >= 0 && p.y >= 0 && p.x < size.x && p.y < size.y
    }

    /// Biome of a single map tile, with the tile's color variation.
    pub fn tile_biome(&self, p: IVec2) -> TileBiome {
        if let Some(t) = self.tiles.borrow().get(&p) {
            return *t;
        }

        let t = self.compute_tile(p);
        self.tiles.borrow_mut().insert(p, t);
        t
    }

    fn compute_tile(&self, p: IVec2) -> TileBiome {
        let cell = self.biomes.cell_at(p);
        let biome = self.biomes.biome(cell);

        let n = noise2(p.x as f64 * 17.5, p.y as f64 * 25.2);
        let bg = if n > 0.2 {
            biome.base_color.lighten(1.0)
        } else if n < -0.2 {
            biome.base_color.darken(1.0)
        } else {
            biome.base_color
        };

        TileBiome {
            kind: biome.kind,
            cell,
            bg,
            fg: bg.lighten(2.0),
        }
    }

    /// Whether the terrain at `p` can be walked on.
    ///
    /// Doesn't know about actors, callers check occupancy separately. The
    /// map edge is impassable.
    pub fn is_passable(&self, p: IVec2) -> bool {
        self.contains(p) && self.tile_biome(p).is_passable()
    }

    pub fn kind_at(&self, p: IVec2) -> BiomeKind {
        self.tile_biome(p).kind
    }

    /// Project a view cell of the macro view to the map tile it shows.
    pub fn game_to_map_scale(&self, p: IVec2) -> IVec2 {
        (p.as_vec2() * self.scale).round().as_ivec2()
    }

    /// Project a map tile to the macro view cell showing it.
    pub fn map_to_game_scale(&self, p: IVec2) -> IVec2 {
        (p.as_vec2() / self.scale).round().as_ivec2()
    }

    /// Map position of the top left corner of the zoomed view.
    pub fn zoom_origin(&self, player: IVec2) -> IVec2 {
        player - self.view_size / 2
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn zoom_in(&mut self) {
        self.zoomed = true;
    }

    pub fn zoom_out(&mut self) {
        self.zoomed = false;
    }

    pub fn toggle_zoom(&mut self) {
        self.zoomed = !self.zoomed;
    }

    /// Record the player's macro position seen from a macro view cell and
    /// return how many steps to darken the cell.
    ///
    /// Cells only ever get brighter as the player comes closer to them.
    pub fn macro_shade(&mut self, cell: IVec2, player_cell: IVec2) -> i32 {
        let dist = (cell - player_cell).cheb_len();
        let seen = self.macro_seen.entry(cell).or_insert(i32::MAX);
        if dist < *seen {
            *seen = dist;
        }
        (*seen - FOG_THRESHOLD).max(0)
    }
}

#[cfg(test)]
mod test {
    use glam::ivec2;
    use pretty_assertions::assert_eq;
    use quickcheck_macros::quickcheck;
    use util::srng;

    use super::*;
    use crate::SITE_SPACING;

    const MAP_SIZE: IVec2 = IVec2::new(480, 184);
    const VIEW_SIZE: IVec2 = IVec2::new(120, 46);

    fn map() -> WorldMap {
        let mut rng = srng("world");
        WorldMap::generate(&mut rng, MAP_SIZE, VIEW_SIZE, SITE_SPACING)
            .unwrap()
    }

    #[test]
    fn generated_map_is_complete() {
        let m = map();
        assert!(m.biomes().missing_kinds(&REQUIRED_KINDS).is_empty());
        assert_eq!(m.size(), MAP_SIZE);
    }

    #[test]
    fn passability_ignores_cache() {
        let m = map();
        let points: Vec<IVec2> = (0..MAP_SIZE.y)
            .step_by(3)
            .flat_map(|y| (0..MAP_SIZE.x).step_by(7).map(move |x| ivec2(x, y)))
            .collect();

        let cold: Vec<(BiomeKind, bool)> = points
            .iter()
            .map(|&p| (m.kind_at(p), m.is_passable(p)))
            .collect();
        let warm: Vec<(BiomeKind, bool)> = points
            .iter()
            .map(|&p| (m.kind_at(p), m.is_passable(p)))
            .collect();
        assert_eq!(cold, warm);

        for ((kind, passable), &p) in cold.iter().zip(&points) {
            assert_eq!(*passable, !(kind.is_ocean() || kind.is_mountains()));
            assert_eq!(m.compute_tile(p), m.tile_biome(p));
        }
    }

    #[test]
    fn rand_points_classify_back() {
        let m = map();
        for b in m.biomes().biomes() {
            if let Some(p) = m.biomes().rand_point(b.cell) {
                assert_eq!(m.tile_biome(p).cell, b.cell);
                assert!(m.is_passable(p));
            }
        }
    }

    #[quickcheck]
    fn scale_round_trip(x: u16, y: u16) -> bool {
        let m = WorldMap::new(
            BiomeMap::uniform(ivec2(480, 184), BiomeKind::Plains),
            ivec2(120, 46),
        );
        let p = ivec2(x as i32 % 120, y as i32 % 46);
        m.map_to_game_scale(m.game_to_map_scale(p)) == p
    }

    #[test]
    fn zoom_state() {
        let mut m = WorldMap::new(
            BiomeMap::uniform(ivec2(100, 100), BiomeKind::Plains),
            ivec2(20, 10),
        );
        assert!(!m.is_zoomed());
        m.zoom_in();
        m.zoom_in();
        assert!(m.is_zoomed());
        m.toggle_zoom();
        assert!(!m.is_zoomed());
        m.zoom_out();
        assert!(!m.is_zoomed());

        assert_eq!(m.zoom_origin(ivec2(50, 50)), ivec2(40, 45));
    }

    #[test]
    fn fog_only_lifts() {
        let mut m = WorldMap::new(
            BiomeMap::uniform(ivec2(100, 100), BiomeKind::Plains),
            ivec2(50, 50),
        );
        let cell = ivec2(20, 20);

        assert_eq!(m.macro_shade(cell, ivec2(0, 0)), 15);
        assert_eq!(m.macro_shade(cell, ivec2(18, 20)), 0);
        // Moving away doesn't bring the fog back.
        assert_eq!(m.macro_shade(cell, ivec2(0, 0)), 0);
        assert_eq!(m.macro_shade(ivec2(3, 3), ivec2(0, 0)), 0);
    }
}
