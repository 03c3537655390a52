use crate::geometry::Axis;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuadtreeError {
    /// The top-left corner lies past the bottom-right corner.
    #[error("inverted bounds on the {axis} axis: top-left {top_left} > bottom-right {bottom_right}")]
    InvertedBounds {
        axis: Axis,
        top_left: String,
        bottom_right: String,
    },
    /// The corner coordinates cannot be ordered, e.g. one of them is NaN.
    #[error("bounds on the {axis} axis are not comparable: {top_left}, {bottom_right}")]
    UnorderedBounds {
        axis: Axis,
        top_left: String,
        bottom_right: String,
    },
    /// The distance between two coordinates does not fit the scalar type.
    #[error("extent on the {axis} axis from {from} to {to} does not fit the coordinate type")]
    ExtentOverflow { axis: Axis, from: String, to: String },
    #[error("object at {position} with size {size} does not overlap the node region")]
    OutOfBounds { position: String, size: String },
    #[error("cannot derive bounds from an empty set of objects")]
    Empty,
}

pub type Result<T, E = QuadtreeError> = std::result::Result<T, E>;
