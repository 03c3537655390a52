//! Coordinate contracts shared by the tree and the objects it indexes.
//!
//! A node region and an object box are both [`Rect`]s. Objects only have to describe
//! themselves through [`Spatial`]; the vector type they use may differ from the one the
//! tree bounds are expressed in, as long as both share a [`Scalar`].
use crate::error::{QuadtreeError, Result};
use num_traits::ops::saturating::{SaturatingAdd, SaturatingSub};
use num_traits::{CheckedAdd, CheckedSub, Num, One};
use std::cmp::Ordering;
use std::fmt::{self, Debug};

/// Coordinate type. Halving follows the type's own `/`, so integer midpoints truncate.
///
/// The checked operations fail on integer overflow and on non-finite float results. The
/// saturating ones clamp integers to their range and let floats reach infinity.
pub trait Scalar: Num + Copy + PartialOrd + Debug {
    fn checked_add(self, rhs: Self) -> Option<Self>;
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    fn saturating_add(self, rhs: Self) -> Self;
    fn saturating_sub(self, rhs: Self) -> Self;
}

macro_rules! impl_integer_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &rhs)
                }

                fn checked_sub(self, rhs: Self) -> Option<Self> {
                    CheckedSub::checked_sub(&self, &rhs)
                }

                fn saturating_add(self, rhs: Self) -> Self {
                    SaturatingAdd::saturating_add(&self, &rhs)
                }

                fn saturating_sub(self, rhs: Self) -> Self {
                    SaturatingSub::saturating_sub(&self, &rhs)
                }
            }
        )*
    };
}

impl_integer_scalar!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    Some(self + rhs).filter(|sum| sum.is_finite())
                }

                fn checked_sub(self, rhs: Self) -> Option<Self> {
                    Some(self - rhs).filter(|diff| diff.is_finite())
                }

                fn saturating_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                fn saturating_sub(self, rhs: Self) -> Self {
                    self - rhs
                }
            }
        )*
    };
}

impl_float_scalar!(f32, f64);

pub trait Vector2: Copy {
    type Scalar: Scalar;

    fn from_xy(x: Self::Scalar, y: Self::Scalar) -> Self;
    fn x(&self) -> Self::Scalar;
    fn y(&self) -> Self::Scalar;
}

impl<S: Scalar> Vector2 for [S; 2] {
    type Scalar = S;

    fn from_xy(x: S, y: S) -> Self {
        [x, y]
    }

    fn x(&self) -> S {
        self[0]
    }

    fn y(&self) -> S {
        self[1]
    }
}

#[cfg(feature = "glam")]
macro_rules! impl_glam_vector {
    ($($ty:ty => $scalar:ty),* $(,)?) => {
        $(
            impl Vector2 for $ty {
                type Scalar = $scalar;

                fn from_xy(x: $scalar, y: $scalar) -> Self {
                    <$ty>::new(x, y)
                }

                fn x(&self) -> $scalar {
                    self.x
                }

                fn y(&self) -> $scalar {
                    self.y
                }
            }
        )*
    };
}

#[cfg(feature = "glam")]
impl_glam_vector!(
    glam::Vec2 => f32,
    glam::DVec2 => f64,
    glam::IVec2 => i32,
    glam::UVec2 => u32,
);

/// Something with an axis-aligned bounding box.
///
/// `position` is the top-left corner and `size` is (width, height).
pub trait Spatial {
    type Vector: Vector2;

    fn position(&self) -> Self::Vector;
    fn size(&self) -> Self::Vector;

    /// Box ends that do not fit the scalar are clamped to its range, which keeps overlap tests
    /// conservative for queries.
    fn aabb(&self) -> Rect<Self::Vector> {
        let p = self.position();
        let s = self.size();
        Rect::new_unchecked(
            p,
            <Self::Vector as Vector2>::from_xy(
                p.x().saturating_add(s.x()),
                p.y().saturating_add(s.y()),
            ),
        )
    }

    /// Like [`aabb`](Spatial::aabb), but fails with [`QuadtreeError::ExtentOverflow`] instead
    /// of clamping.
    fn try_aabb(&self) -> Result<Rect<Self::Vector>> {
        let p = self.position();
        let s = self.size();
        let right = extent_end(Axis::X, p.x(), s.x())?;
        let bottom = extent_end(Axis::Y, p.y(), s.y())?;
        Ok(Rect::new_unchecked(
            p,
            <Self::Vector as Vector2>::from_xy(right, bottom),
        ))
    }
}

fn extent_end<S: Scalar>(axis: Axis, position: S, size: S) -> Result<S> {
    position
        .checked_add(size)
        .ok_or_else(|| QuadtreeError::ExtentOverflow {
            axis,
            from: format!("{:?}", position),
            to: format!("{:?} + {:?}", position, size),
        })
}

pub type ScalarOf<T> = <<T as Spatial>::Vector as Vector2>::Scalar;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Closed axis-aligned rectangle between two corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect<V> {
    top_left: V,
    bottom_right: V,
}

fn check_axis<S: Scalar>(axis: Axis, top_left: S, bottom_right: S) -> Result<()> {
    match top_left.partial_cmp(&bottom_right) {
        Some(Ordering::Less) | Some(Ordering::Equal) => match bottom_right.checked_sub(top_left) {
            Some(_) => Ok(()),
            None => Err(QuadtreeError::ExtentOverflow {
                axis,
                from: format!("{:?}", top_left),
                to: format!("{:?}", bottom_right),
            }),
        },
        Some(Ordering::Greater) => Err(QuadtreeError::InvertedBounds {
            axis,
            top_left: format!("{:?}", top_left),
            bottom_right: format!("{:?}", bottom_right),
        }),
        None => Err(QuadtreeError::UnorderedBounds {
            axis,
            top_left: format!("{:?}", top_left),
            bottom_right: format!("{:?}", bottom_right),
        }),
    }
}

impl<V: Vector2> Rect<V> {
    /// Zero-area rectangles are accepted. An extent that does not fit the scalar, such as
    /// `i32::MIN..=i32::MAX`, is rejected so that halving it during a split cannot overflow.
    pub fn new(top_left: V, bottom_right: V) -> Result<Self> {
        check_axis(Axis::X, top_left.x(), bottom_right.x())?;
        check_axis(Axis::Y, top_left.y(), bottom_right.y())?;
        Ok(Self::new_unchecked(top_left, bottom_right))
    }

    /// Corner ordering is not checked. An inverted rectangle overlaps nothing that does not
    /// also straddle its corners.
    pub fn new_unchecked(top_left: V, bottom_right: V) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    pub fn top_left(&self) -> V {
        self.top_left
    }

    pub fn bottom_right(&self) -> V {
        self.bottom_right
    }

    pub fn left(&self) -> V::Scalar {
        self.top_left.x()
    }

    pub fn top(&self) -> V::Scalar {
        self.top_left.y()
    }

    pub fn right(&self) -> V::Scalar {
        self.bottom_right.x()
    }

    pub fn bottom(&self) -> V::Scalar {
        self.bottom_right.y()
    }

    pub fn width(&self) -> V::Scalar {
        self.right().saturating_sub(self.left())
    }

    pub fn height(&self) -> V::Scalar {
        self.bottom().saturating_sub(self.top())
    }

    pub fn center(&self) -> V {
        let two = <V::Scalar as One>::one() + <V::Scalar as One>::one();
        V::from_xy(
            self.left() + self.width() / two,
            self.top() + self.height() / two,
        )
    }

    /// Inclusive: touching edges count as overlap.
    pub fn overlaps<W>(&self, other: &Rect<W>) -> bool
    where
        W: Vector2<Scalar = V::Scalar>,
    {
        other.right() >= self.left()
            && other.left() <= self.right()
            && other.bottom() >= self.top()
            && other.top() <= self.bottom()
    }

    /// Inclusive: `other` may share edges with `self`.
    pub fn contains<W>(&self, other: &Rect<W>) -> bool
    where
        W: Vector2<Scalar = V::Scalar>,
    {
        self.left() <= other.left()
            && other.right() <= self.right()
            && self.top() <= other.top()
            && other.bottom() <= self.bottom()
    }

    /// Splits at [`Rect::center`] into [top-right, top-left, bottom-left, bottom-right].
    pub fn quadrants(&self) -> [Self; 4] {
        let (l, t, r, b) = (self.left(), self.top(), self.right(), self.bottom());
        let c = self.center();
        let (cx, cy) = (c.x(), c.y());

        [
            Self::new_unchecked(V::from_xy(cx, t), V::from_xy(r, cy)),
            Self::new_unchecked(V::from_xy(l, t), V::from_xy(cx, cy)),
            Self::new_unchecked(V::from_xy(l, cy), V::from_xy(cx, b)),
            Self::new_unchecked(V::from_xy(cx, cy), V::from_xy(r, b)),
        ]
    }
}

impl<V: Vector2> Spatial for Rect<V> {
    type Vector = V;

    fn position(&self) -> V {
        self.top_left
    }

    fn size(&self) -> V {
        V::from_xy(self.width(), self.height())
    }

    fn aabb(&self) -> Rect<V> {
        *self
    }

    fn try_aabb(&self) -> Result<Rect<V>> {
        Ok(*self)
    }
}
