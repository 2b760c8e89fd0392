use glam::IVec2;

/// 8 directions, clock face order.
pub const DIR_8: [IVec2; 8] = [
    IVec2::from_array([0, -1]),
    IVec2::from_array([1, -1]),
    IVec2::from_array([1, 0]),
    IVec2::from_array([1, 1]),
    IVec2::from_array([0, 1]),
    IVec2::from_array([-1, 1]),
    IVec2::from_array([-1, 0]),
    IVec2::from_array([-1, -1]),
];

pub trait VecExt: Sized + Default {
    /// Absolute size of vector in taxicab metric.
    fn taxi_len(&self) -> i32;

    /// Absolute size of vector in chessboard metric.
    ///
    /// All the "within N tiles" range checks in the game use this.
    fn cheb_len(&self) -> i32;

    /// Vec points to one of the 8 neighboring cells.
    fn is_adjacent_8(&self) -> bool {
        self.cheb_len() == 1
    }
}

impl VecExt for IVec2 {
    fn taxi_len(&self) -> i32 {
        self[0].abs() + self[1].abs()
    }

    fn cheb_len(&self) -> i32 {
        self[0].abs().max(self[1].abs())
    }
}

/// Name the compass direction a vector points towards, screen coordinates
/// with y growing south.
///
/// Diagonals are only used when the vector is not dominated by one axis.
pub fn compass_name(v: IVec2) -> &'static str {
    let (dx, dy) = (v.x, v.y);
    let (adx, ady) = (dx.abs(), dy.abs());

    if adx == 0 && ady == 0 {
        return "here";
    }

    if adx > 2 * ady {
        if dx > 0 {
            "east"
        } else {
            "west"
        }
    } else if ady > 2 * adx {
        if dy > 0 {
            "south"
        } else {
            "north"
        }
    } else {
        match (dx > 0, dy > 0) {
            (true, true) => "southeast",
            (true, false) => "northeast",
            (false, true) => "southwest",
            (false, false) => "northwest",
        }
    }
}
