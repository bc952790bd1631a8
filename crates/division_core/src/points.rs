//! Half-point arithmetic for game counts.
//!
//! Every count in a division is a multiple of 0.5 (a drawn game credits half
//! a win to each side), so counts are stored as whole half-points and
//! compared exactly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// A non-negative count of games in half-point units.
///
/// Serialized as a decimal number of games (`2.5`), not as raw halves.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct HalfPoints(u32);

impl HalfPoints {
    pub const ZERO: HalfPoints = HalfPoints(0);

    /// Build from a raw half-point count (`halves / 2` games).
    pub const fn from_halves(halves: u32) -> Self {
        Self(halves)
    }

    /// Build from a whole number of games, saturating at the largest
    /// representable count.
    pub const fn from_games(games: u32) -> Self {
        Self(games.saturating_mul(2))
    }

    /// Convert a decimal game count, rejecting negatives, non-finite values
    /// and anything that is not a multiple of 0.5.
    pub fn from_f64(games: f64) -> Option<Self> {
        if !games.is_finite() || games < 0.0 {
            return None;
        }
        let halves = games * 2.0;
        if halves.fract() != 0.0 || halves > u32::MAX as f64 {
            return None;
        }
        Some(Self(halves as u32))
    }

    #[inline]
    pub const fn halves(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 2.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_sub(self, rhs: HalfPoints) -> Option<HalfPoints> {
        self.0.checked_sub(rhs.0).map(HalfPoints)
    }

    pub fn saturating_sub(self, rhs: HalfPoints) -> HalfPoints {
        HalfPoints(self.0.saturating_sub(rhs.0))
    }
}

impl TryFrom<f64> for HalfPoints {
    type Error = String;

    fn try_from(games: f64) -> Result<Self, Self::Error> {
        HalfPoints::from_f64(games)
            .ok_or_else(|| format!("{} is not a non-negative multiple of 0.5", games))
    }
}

impl From<HalfPoints> for f64 {
    fn from(points: HalfPoints) -> f64 {
        points.as_f64()
    }
}

impl Add for HalfPoints {
    type Output = HalfPoints;

    fn add(self, rhs: HalfPoints) -> HalfPoints {
        HalfPoints(self.0 + rhs.0)
    }
}

impl AddAssign for HalfPoints {
    fn add_assign(&mut self, rhs: HalfPoints) {
        self.0 += rhs.0;
    }
}

impl Sub for HalfPoints {
    type Output = HalfPoints;

    /// Panics on underflow in debug builds, like integer subtraction.
    fn sub(self, rhs: HalfPoints) -> HalfPoints {
        HalfPoints(self.0 - rhs.0)
    }
}

impl std::iter::Sum for HalfPoints {
    fn sum<I: Iterator<Item = HalfPoints>>(iter: I) -> HalfPoints {
        iter.fold(HalfPoints::ZERO, Add::add)
    }
}

/// Always one decimal place: `3.0`, `2.5`.
impl fmt::Display for HalfPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 2;
        if self.0 % 2 == 0 {
            write!(f, "{}.0", whole)
        } else {
            write!(f, "{}.5", whole)
        }
    }
}
