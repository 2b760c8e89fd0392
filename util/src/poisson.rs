use std::f32::consts::TAU;

use glam::{vec2, Vec2};
use rand::Rng;

/// Bridson's blue noise sampler over the rectangle `[0, size)`.
///
/// Yields points lazily, every emitted point is at least `min_dist` away from
/// all the previous ones. Runs out when no active point can place any more
/// neighbors within `max_attempts` tries.
pub struct PoissonDisk<R> {
    rng: R,
    size: Vec2,
    min_dist: f32,
    max_attempts: usize,
    cell_size: f32,
    cols: usize,
    rows: usize,
    grid: Vec<Option<usize>>,
    points: Vec<Vec2>,
    active: Vec<usize>,
}

impl<R: Rng> PoissonDisk<R> {
    pub fn new(
        rng: R,
        size: impl Into<Vec2>,
        min_dist: f32,
        max_attempts: usize,
    ) -> Self {
        let size = size.into();
        assert!(
            size.x > 0.0 && size.y > 0.0,
            "PoissonDisk: degenerate sampling area {size}"
        );
        assert!(min_dist > 0.0, "PoissonDisk: bad min distance {min_dist}");

        // Cell diagonal equals min_dist, so each cell holds at most one
        // point.
        let cell_size = min_dist / std::f32::consts::SQRT_2;
        let cols = (size.x / cell_size).ceil() as usize;
        let rows = (size.y / cell_size).ceil() as usize;

        PoissonDisk {
            rng,
            size,
            min_dist,
            max_attempts,
            cell_size,
            cols,
            rows,
            grid: vec![None; cols * rows],
            points: Vec::new(),
            active: Vec::new(),
        }
    }

    fn cell(&self, p: Vec2) -> (usize, usize) {
        let x = ((p.x / self.cell_size) as usize).min(self.cols - 1);
        let y = ((p.y / self.cell_size) as usize).min(self.rows - 1);
        (x, y)
    }

    fn fits(&self, p: Vec2) -> bool {
        if p.x < 0.0 || p.y < 0.0 || p.x >= self.size.x || p.y >= self.size.y
        {
            return false;
        }

        let (cx, cy) = self.cell(p);
        for y in cy.saturating_sub(2)..(cy + 3).min(self.rows) {
            for x in cx.saturating_sub(2)..(cx + 3).min(self.cols) {
                if let Some(i) = self.grid[x + y * self.cols] {
                    if self.points[i].distance(p) < self.min_dist {
                        return false;
                    }
                }
            }
        }
        true
    }

    fn accept(&mut self, p: Vec2) -> Vec2 {
        let (cx, cy) = self.cell(p);
        let idx = self.points.len();
        self.grid[cx + cy * self.cols] = Some(idx);
        self.points.push(p);
        self.active.push(idx);
        p
    }
}

impl<R: Rng> Iterator for PoissonDisk<R> {
    type Item = Vec2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.points.is_empty() {
            let p = vec2(
                self.rng.gen_range(0.0..self.size.x),
                self.rng.gen_range(0.0..self.size.y),
            );
            return Some(self.accept(p));
        }

        while !self.active.is_empty() {
            let i = self.rng.gen_range(0..self.active.len());
            let origin = self.points[self.active[i]];

            for _ in 0..self.max_attempts {
                let angle = self.rng.gen_range(0.0..TAU);
                let r = self.rng.gen_range(self.min_dist..2.0 * self.min_dist);
                let p = origin + vec2(angle.cos(), angle.sin()) * r;
                if self.fits(p) {
                    return Some(self.accept(p));
                }
            }

            // Origin is saturated, retire it.
            self.active.swap_remove(i);
        }

        None
    }
}

#[cfg(test)]
mod test {
    use crate::srng;

    use super::*;

    #[test]
    fn separation() {
        let points: Vec<Vec2> =
            PoissonDisk::new(srng("poisson"), [200.0, 120.0], 20.0, 10)
                .collect();

        assert!(points.len() > 10);
        for (i, a) in points.iter().enumerate() {
            assert!(a.x >= 0.0 && a.x < 200.0 && a.y >= 0.0 && a.y < 120.0);
            for b in &points[i + 1..] {
                assert!(a.distance(*b) >= 20.0);
            }
        }
    }

    #[test]
    fn deterministic() {
        let a: Vec<Vec2> =
            PoissonDisk::new(srng("x"), [100.0, 100.0], 10.0, 10).collect();
        let b: Vec<Vec2> =
            PoissonDisk::new(srng("x"), [100.0, 100.0], 10.0, 10).collect();
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic]
    fn empty_area() {
        let _ = PoissonDisk::new(srng("x"), [0.0, 100.0], 10.0, 10);
    }
}
