use std::collections::BTreeSet;

use bitflags::bitflags;
use glam::{ivec2, IVec2, Vec2};

bitflags! {
    /// Which edges of the map rectangle a cell touches.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Sides: u8 {
        const WEST = 1 << 0;
        const NORTH = 1 << 1;
        const EAST = 1 << 2;
        const SOUTH = 1 << 3;
    }
}

impl Sides {
    /// Single sides in west, north, east, south order.
    pub const EACH: [Sides; 4] =
        [Sides::WEST, Sides::NORTH, Sides::EAST, Sides::SOUTH];

    /// Side across the map from a single side.
    pub fn opposite(self) -> Sides {
        match self {
            Sides::WEST => Sides::EAST,
            Sides::NORTH => Sides::SOUTH,
            Sides::EAST => Sides::WEST,
            Sides::SOUTH => Sides::NORTH,
            _ => Sides::empty(),
        }
    }

    /// The two sides perpendicular to a single side.
    pub fn flanks(self) -> [Sides; 2] {
        if self.intersects(Sides::WEST | Sides::EAST) {
            [Sides::NORTH, Sides::SOUTH]
        } else {
            [Sides::EAST, Sides::WEST]
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub site: Vec2,
    /// Mean position of the cell's area.
    pub centroid: Vec2,
    pub neighbors: Vec<usize>,
    pub sides: Sides,
    pub area: usize,
}

impl Cell {
    /// Cell touches the map border.
    pub fn is_border(&self) -> bool {
        !self.sides.is_empty()
    }
}

/// Voronoi partition of a `size` rectangle, computed over the integer
/// lattice.
///
/// Each lattice point belongs to the nearest site. Adjacency and the border
/// sides come from the rasterized ownership map, so cells whose area misses
/// every lattice point end up with no neighbors and no area.
#[derive(Clone, Debug)]
pub struct Diagram {
    size: IVec2,
    cells: Vec<Cell>,
}

impl Diagram {
    pub fn new(sites: impl IntoIterator<Item = Vec2>, size: IVec2) -> Self {
        assert!(size.x > 0 && size.y > 0, "Diagram: bad size {size}");

        let sites: Vec<Vec2> = sites.into_iter().collect();
        assert!(!sites.is_empty(), "Diagram: no sites");

        let (w, h) = (size.x, size.y);
        let mut owner = vec![0usize; (w * h) as usize];
        for y in 0..h {
            for x in 0..w {
                owner[(x + y * w) as usize] =
                    nearest(&sites, ivec2(x, y).as_vec2());
            }
        }

        let mut neighbors = vec![BTreeSet::new(); sites.len()];
        let mut sides = vec![Sides::empty(); sites.len()];
        let mut sum = vec![Vec2::ZERO; sites.len()];
        let mut area = vec![0usize; sites.len()];

        for y in 0..h {
            for x in 0..w {
                let i = owner[(x + y * w) as usize];
                sum[i] += ivec2(x, y).as_vec2();
                area[i] += 1;

                if x == 0 {
                    sides[i] |= Sides::WEST;
                }
                if y == 0 {
                    sides[i] |= Sides::NORTH;
                }
                if x == w - 1 {
                    sides[i] |= Sides::EAST;
                }
                if y == h - 1 {
                    sides[i] |= Sides::SOUTH;
                }

                // Look right and down, symmetric links cover the rest.
                for p in [ivec2(x + 1, y), ivec2(x, y + 1)] {
                    if p.x < w && p.y < h {
                        let j = owner[(p.x + p.y * w) as usize];
                        if i != j {
                            neighbors[i].insert(j);
                            neighbors[j].insert(i);
                        }
                    }
                }
            }
        }

        let cells = sites
            .into_iter()
            .enumerate()
            .map(|(i, site)| Cell {
                site,
                centroid: if area[i] > 0 {
                    sum[i] / area[i] as f32
                } else {
                    site
                },
                neighbors: neighbors[i].iter().copied().collect(),
                sides: sides[i],
                area: area[i],
            })
            .collect();

        Diagram { size, cells }
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, i: usize) -> &Cell {
        &self.cells[i]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Index of the cell whose site is closest to `p`.
    ///
    /// Works for points outside the rectangle too.
    pub fn find(&self, p: Vec2) -> usize {
        let mut best = 0;
        let mut best_dist = f32::INFINITY;
        for (i, c) in self.cells.iter().enumerate() {
            let d = c.site.distance_squared(p);
            if d < best_dist {
                best = i;
                best_dist = d;
            }
        }
        best
    }
}

fn nearest(sites: &[Vec2], p: Vec2) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, s) in sites.iter().enumerate() {
        let d = s.distance_squared(p);
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}

#[cfg(test)]
mod test {
    use glam::vec2;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn two_columns() {
        let d = Diagram::new([vec2(2.0, 5.0), vec2(8.0, 5.0)], ivec2(10, 10));

        assert_eq!(d.len(), 2);
        assert_eq!(d.cell(0).neighbors, vec![1]);
        assert_eq!(d.cell(1).neighbors, vec![0]);
        assert_eq!(d.cell(0).sides, Sides::WEST | Sides::NORTH | Sides::SOUTH);
        assert_eq!(d.cell(1).sides, Sides::EAST | Sides::NORTH | Sides::SOUTH);
        assert_eq!(d.cell(0).area + d.cell(1).area, 100);

        assert_eq!(d.find(vec2(0.0, 0.0)), 0);
        assert_eq!(d.find(vec2(9.0, 9.0)), 1);
        assert_eq!(d.find(vec2(-50.0, 3.0)), 0);
    }

    #[test]
    fn interior_cell() {
        let d = Diagram::new(
            [
                vec2(15.0, 15.0),
                vec2(2.0, 2.0),
                vec2(28.0, 2.0),
                vec2(2.0, 28.0),
                vec2(28.0, 28.0),
            ],
            ivec2(30, 30),
        );

        // Middle site sits in a diamond that reaches no edge.
        assert!(d.cell(0).sides.is_empty());
        assert_eq!(d.cell(0).neighbors, vec![1, 2, 3, 4]);
        assert!(d.cell(1).is_border());
        assert!(d.cell(0).centroid.distance(vec2(15.0, 15.0)) < 1.0);
    }

    #[test]
    fn side_geometry() {
        assert_eq!(Sides::WEST.opposite(), Sides::EAST);
        assert_eq!(Sides::NORTH.flanks(), [Sides::EAST, Sides::WEST]);
        assert_eq!(Sides::EAST.flanks(), [Sides::NORTH, Sides::SOUTH]);
    }
}
