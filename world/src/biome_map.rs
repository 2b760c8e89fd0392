use glam::{vec2, IVec2, Vec2};
use rand::Rng;
use util::{noise2, PoissonDisk};

use crate::{Biome, BiomeKind, Diagram, Sides, BOUNDARY_JITTER};

/// How many points to try per cell when looking for an interior point.
const RAND_POINT_TRIES: usize = 20;

/// Candidate attempts per active point in the seed point sampler.
const SITE_ATTEMPTS: usize = 10;

/// Voronoi cells labeled with biomes.
#[derive(Clone, Debug)]
pub struct BiomeMap {
    diagram: Diagram,
    biomes: Vec<Biome>,
    rand_points: Vec<Option<IVec2>>,
}

impl BiomeMap {
    /// Generate a new biome layout over a `size` rectangle.
    ///
    /// The border cells are sea. One randomly chosen side of the sea is
    /// raised into mountains, and the land cells along the coasts get
    /// coastal biomes. The rest of the land gets random interior biomes.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        size: IVec2,
        site_spacing: f32,
    ) -> Self {
        let sites = PoissonDisk::new(
            &mut *rng,
            size.as_vec2(),
            site_spacing,
            SITE_ATTEMPTS,
        );
        let diagram = Diagram::new(sites, size);
        let n = diagram.len();

        // Sea cells per side, west, north, east, south.
        let seas: Vec<Vec<usize>> = Sides::EACH
            .iter()
            .map(|&s| {
                (0..n)
                    .filter(|&i| diagram.cell(i).sides.contains(s))
                    .collect()
            })
            .collect();

        // Seas each land cell borders. A sea cell counts for the first side
        // it touches, in west, north, east, south order.
        let mut coasts = vec![Sides::empty(); n];
        for i in 0..n {
            let cell = diagram.cell(i);
            let Some(&side) =
                Sides::EACH.iter().find(|&&s| cell.sides.contains(s))
            else {
                continue;
            };
            for &j in &cell.neighbors {
                if !diagram.cell(j).is_border() {
                    coasts[j] |= side;
                }
            }
        }

        let selection = rng.gen_range(0..4);
        let selected = Sides::EACH[selection];
        let [mut far, mut near] = selected.flanks();
        if rng.gen_bool(0.5) {
            std::mem::swap(&mut far, &mut near);
        }

        let mut kinds = vec![None; n];
        for &i in seas.iter().flatten() {
            kinds[i] = Some(BiomeKind::Ocean);
        }
        for &i in &seas[selection] {
            kinds[i] = Some(BiomeKind::Mountains);
        }

        for (i, &coast) in coasts.iter().enumerate() {
            if let Some(kind) = coast_kind(coast, selected, far, near) {
                kinds[i] = Some(kind);
            }
        }

        let biomes = kinds
            .into_iter()
            .enumerate()
            .map(|(i, kind)| {
                let kind =
                    kind.unwrap_or_else(|| BiomeKind::sample_interior(rng));
                Biome {
                    kind,
                    base_color: kind.sample_color(rng),
                    cell: i,
                    neighbors: diagram.cell(i).neighbors.clone(),
                }
            })
            .collect();

        let mut ret = BiomeMap {
            diagram,
            biomes,
            rand_points: Vec::new(),
        };
        ret.rand_points = (0..n)
            .map(|i| ret.find_rand_point(rng, i, site_spacing / 2.0))
            .collect();

        log::info!(
            "Generated biome map with {n} cells, mountains on the {} side",
            ["west", "north", "east", "south"][selection]
        );

        ret
    }

    /// Map that's a single biome everywhere.
    ///
    /// Used for scripted setups where terrain shouldn't get in the way.
    pub fn uniform(size: IVec2, kind: BiomeKind) -> Self {
        let center = size.as_vec2() / 2.0;
        let mut ret = BiomeMap::from_sites(size, &[(center, kind)]);
        if kind.is_passable() {
            ret.rand_points[0] = Some(center.floor().as_ivec2());
        }
        ret
    }

    /// Map with hand-placed cells and no sampled interior points.
    pub fn from_sites(size: IVec2, sites: &[(Vec2, BiomeKind)]) -> Self {
        let diagram = Diagram::new(sites.iter().map(|&(p, _)| p), size);
        let biomes = sites
            .iter()
            .enumerate()
            .map(|(i, &(_, kind))| Biome {
                kind,
                base_color: kind.sample_color(&mut util::srng(&kind)),
                cell: i,
                neighbors: diagram.cell(i).neighbors.clone(),
            })
            .collect();
        BiomeMap {
            biomes,
            rand_points: vec![None; sites.len()],
            diagram,
        }
    }

    fn find_rand_point<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        cell: usize,
        radius: f32,
    ) -> Option<IVec2> {
        if !self.biomes[cell].is_passable() {
            return None;
        }

        let center = self.diagram.cell(cell).centroid;
        (0..RAND_POINT_TRIES)
            .map(|_| {
                let offset = vec2(
                    rng.gen_range(-radius..=radius),
                    rng.gen_range(-radius..=radius),
                );
                (center + offset).round().as_ivec2()
            })
            .find(|&p| self.cell_at(p) == cell)
    }

    pub fn size(&self) -> IVec2 {
        self.diagram.size()
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn biomes(&self) -> &[Biome] {
        &self.biomes
    }

    pub fn biome(&self, cell: usize) -> &Biome {
        &self.biomes[cell]
    }

    /// Cell containing map position `p`.
    ///
    /// The lookup point is pushed around by two noise fields before the
    /// nearest site search so that cell boundaries come out ragged instead
    /// of straight.
    pub fn cell_at(&self, p: IVec2) -> usize {
        let (x, y) = (p.x as f64, p.y as f64);
        let dx = BOUNDARY_JITTER * noise2(100.0 + x / 10.0, 100.0 + y / 13.0);
        let dy = BOUNDARY_JITTER * noise2(200.0 + x / 10.0, 200.0 + y / 13.0);
        self.diagram
            .find(Vec2::new((x + dx) as f32, (y + dy) as f32))
    }

    /// Point inside a land cell found at generation time, if any was found.
    pub fn rand_point(&self, cell: usize) -> Option<IVec2> {
        self.rand_points[cell]
    }

    /// Like `rand_point`, but falls back to the cell centroid.
    pub fn anchor_point(&self, cell: usize) -> IVec2 {
        self.rand_points[cell].unwrap_or_else(|| {
            self.diagram.cell(cell).centroid.round().as_ivec2()
        })
    }

    pub fn cells_of(
        &self,
        kind: BiomeKind,
    ) -> impl Iterator<Item = usize> + '_ {
        self.biomes
            .iter()
            .filter(move |b| b.kind == kind)
            .map(|b| b.cell)
    }

    /// Which of the given kinds have no cells on this map.
    pub fn missing_kinds(&self, kinds: &[BiomeKind]) -> Vec<BiomeKind> {
        kinds
            .iter()
            .copied()
            .filter(|&k| self.cells_of(k).next().is_none())
            .collect()
    }
}

/// Biome for a land cell that borders the seas in `coast`.
///
/// Flank coasts override the mountain side and its opposite, and the near
/// flank overrides the far one.
fn coast_kind(
    coast: Sides,
    selected: Sides,
    far: Sides,
    near: Sides,
) -> Option<BiomeKind> {
    if coast.contains(near) {
        Some(BiomeKind::LightForest)
    } else if coast.contains(far) {
        Some(BiomeKind::DarkForest)
    } else if coast.intersects(selected | selected.opposite()) {
        Some(BiomeKind::Plains)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use glam::ivec2;
    use util::srng;

    use super::*;
    use crate::SITE_SPACING;

    fn map(seed: &str) -> BiomeMap {
        BiomeMap::generate(&mut srng(seed), ivec2(480, 184), SITE_SPACING)
    }

    #[test]
    fn border_cells_are_sea() {
        let m = map("border");
        for (cell, biome) in m.diagram().cells().iter().zip(m.biomes()) {
            if cell.is_border() {
                assert!(
                    biome.is_ocean() || biome.is_mountains(),
                    "border cell {} is {}",
                    biome.cell,
                    biome.kind
                );
            } else {
                assert!(biome.is_passable());
            }
        }
    }

    #[test]
    fn mountains_on_one_side_only() {
        for seed in ["a", "b", "c", "d", "e"] {
            let m = map(seed);
            let mountains: Vec<usize> =
                m.cells_of(BiomeKind::Mountains).collect();
            assert!(!mountains.is_empty());
            assert!(m.cells_of(BiomeKind::Ocean).next().is_some());
            assert!(
                Sides::EACH.iter().any(|&s| mountains
                    .iter()
                    .all(|&i| m.diagram().cell(i).sides.contains(s))),
                "seed {seed}: mountains not confined to one side"
            );
        }
    }

    #[test]
    fn rand_points_stay_in_their_cells() {
        for seed in ["x", "y", "z"] {
            let m = map(seed);
            let mut found = 0;
            for b in m.biomes() {
                if let Some(p) = m.rand_point(b.cell) {
                    assert_eq!(m.cell_at(p), b.cell);
                    found += 1;
                }
                if !b.is_passable() {
                    assert_eq!(m.rand_point(b.cell), None);
                }
            }
            assert!(found > 0);
        }
    }

    #[test]
    fn uniform_map() {
        let m = BiomeMap::uniform(ivec2(50, 50), BiomeKind::Steppe);
        assert_eq!(m.cell_at(ivec2(-100, 300)), 0);
        assert_eq!(m.biome(0).kind, BiomeKind::Steppe);
        assert_eq!(m.rand_point(0), Some(ivec2(25, 25)));
        assert_eq!(
            m.missing_kinds(&[BiomeKind::Ocean]),
            vec![BiomeKind::Ocean]
        );
    }

    #[test]
    fn corner_coasts_go_to_the_flanks() {
        let (sel, far, near) = (Sides::NORTH, Sides::WEST, Sides::EAST);
        let kind = |coast| coast_kind(coast, sel, far, near);

        assert_eq!(kind(Sides::NORTH), Some(BiomeKind::Plains));
        assert_eq!(kind(Sides::SOUTH), Some(BiomeKind::Plains));
        assert_eq!(kind(Sides::WEST), Some(BiomeKind::DarkForest));
        // Corners.
        let dark = Some(BiomeKind::DarkForest);
        let light = Some(BiomeKind::LightForest);
        assert_eq!(kind(Sides::NORTH | Sides::WEST), dark);
        assert_eq!(kind(Sides::SOUTH | Sides::EAST), light);
        assert_eq!(kind(Sides::WEST | Sides::EAST), light);
        assert_eq!(kind(Sides::empty()), None);
    }

    #[test]
    fn anchor_falls_back_to_centroid() {
        let m = BiomeMap::from_sites(
            ivec2(100, 50),
            &[
                (vec2(25.0, 25.0), BiomeKind::Plains),
                (vec2(75.0, 25.0), BiomeKind::Taiga),
            ],
        );
        assert_eq!(m.rand_point(1), None);
        let centroid = m.diagram().cell(1).centroid.round().as_ivec2();
        assert_eq!(m.anchor_point(1), centroid);
        assert_eq!(m.cell_at(m.anchor_point(1)), 1);
        assert_eq!(m.cells_of(BiomeKind::Taiga).collect::<Vec<_>>(), vec![1]);
    }
}
