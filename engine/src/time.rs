use crate::Runtime;

/// An opaque representation of a time instant.
///
/// The unit of time is one player turn.
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Instant(pub(crate) i64);

impl Instant {
    /// Return number of turns elapsed since this instant.
    pub fn elapsed(&self, r: &impl AsRef<Runtime>) -> i64 {
        r.as_ref().now() - *self
    }

    /// Turn number for display.
    pub fn turn(self) -> i64 {
        self.0
    }
}

impl std::ops::AddAssign<i64> for Instant {
    fn add_assign(&mut self, rhs: i64) {
        self.0 += rhs;
    }
}

impl std::ops::Sub<Instant> for Instant {
    type Output = i64;

    fn sub(self, rhs: Instant) -> Self::Output {
        self.0 - rhs.0
    }
}
