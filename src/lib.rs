//! Region quadtree for broad-phase collision queries.
//! # Contracts:
//! - Objects are borrowed, never owned: every inserted object must outlive the tree
//! - Retrieval over-approximates: an object straddling quadrant edges is stored in every quadrant it overlaps
//! - There is no removal; moving objects are handled by building a fresh tree per step
//!
pub mod config;
pub mod error;
pub mod geometry;
pub mod quadtree;

pub use config::Config;
pub use error::{QuadtreeError, Result};
pub use geometry::{Axis, Rect, Scalar, Spatial, Vector2};
pub use quadtree::{Node, Quadrant};

use std::ops::{Add, AddAssign, Deref, Sub};

/// Plain 2D vector over any [`Scalar`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<S>(pub [S; 2]);

impl<S: Scalar> AddAssign for Point<S> {
    fn add_assign(&mut self, p: Self) {
        self.0[0] = self.0[0] + p.0[0];
        self.0[1] = self.0[1] + p.0[1];
    }
}

impl<S> Deref for Point<S> {
    type Target = [S; 2];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Scalar> Add for Point<S> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<S: Scalar> Sub for Point<S> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self([self.0[0] - rhs.0[0], self.0[1] - rhs.0[1]])
    }
}

impl<S: Scalar> Point<S> {
    pub fn new(x: S, y: S) -> Self {
        Self([x, y])
    }
}

impl<S: Scalar> Vector2 for Point<S> {
    type Scalar = S;

    fn from_xy(x: S, y: S) -> Self {
        Self([x, y])
    }

    fn x(&self) -> S {
        self.0[0]
    }

    fn y(&self) -> S {
        self.0[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(3, 4);
        let b = Point::new(10, -2);

        assert_eq!(a + b, Point::new(13, 2));
        assert_eq!(b - a, Point::new(7, -6));

        let mut c = a;
        c += a;
        assert_eq!(*c, [6, 8]);
    }
}
