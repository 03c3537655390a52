//! Region quadtree over borrowed objects.
//!
//! Insertion and retrieval both use the inclusive overlap test, so an object straddling a
//! quadrant boundary is stored in every quadrant it touches and a query visits every
//! quadrant it touches. Retrieval therefore never misses an overlapping object, at the cost
//! of duplicate candidates.
mod quadrant;

pub use quadrant::Quadrant;

use crate::config::Config;
use crate::error::{QuadtreeError, Result};
use crate::geometry::{Rect, ScalarOf, Spatial, Vector2};
use arrayvec::ArrayVec;
use std::collections::HashSet;
use std::mem;
use tracing::{debug, trace};

type Children<'a, T, B> = Option<Box<[Node<'a, T, B>; 4]>>;

/// A quadtree node. The root node is the tree.
///
/// A node is either a leaf holding object references, or has exactly four children laid out
/// in [`Quadrant`] order and holds nothing itself.
///
/// Objects are borrowed for `'a`; the tree never copies or drops them. There is no removal:
/// when objects move, build a fresh tree for the new positions (construction is cheap, a
/// single leaf) or [`clear`](Node::clear) and reinsert if the objects are not mutated through
/// the borrow.
#[derive(Debug)]
pub struct Node<'a, T, B> {
    level: u32,
    bounds: Rect<B>,
    config: Config,

    children: Children<'a, T, B>,

    objects: Vec<&'a T>,
}

impl<'a, T, B> Node<'a, T, B>
where
    T: Spatial,
    B: Vector2<Scalar = ScalarOf<T>>,
{
    /// Empty leaf covering `top_left..=bottom_right`.
    pub fn new(
        level: u32,
        top_left: B,
        bottom_right: B,
        max_objects: usize,
        max_level: u32,
    ) -> Result<Self> {
        let bounds = Rect::new(top_left, bottom_right).map_err(|err| {
            debug!(%err, "rejected node bounds");
            err
        })?;
        Ok(Self::with_config(
            level,
            bounds,
            Config::new(max_objects, max_level),
        ))
    }

    pub fn with_config(level: u32, bounds: Rect<B>, config: Config) -> Self {
        Self {
            level,
            bounds,
            config,
            children: None,
            objects: Vec::new(),
        }
    }

    pub fn root(bounds: Rect<B>, config: Config) -> Self {
        Self::with_config(0, bounds, config)
    }

    /// Root sized to the smallest rectangle enclosing every object, with all of them inserted.
    pub fn from_objects<I>(objects: I, config: Config) -> Result<Self>
    where
        I: IntoIterator<Item = &'a T>,
    {
        let objects = objects.into_iter().collect::<Vec<_>>();

        let boxes = objects
            .iter()
            .map(|o| o.try_aabb())
            .collect::<Result<Vec<_>>>()?;
        let mut boxes = boxes.into_iter();
        let first = boxes.next().ok_or(QuadtreeError::Empty)?;
        let (mut left, mut top) = (first.left(), first.top());
        let (mut right, mut bottom) = (first.right(), first.bottom());
        for aabb in boxes {
            if aabb.left() < left {
                left = aabb.left();
            }
            if aabb.top() < top {
                top = aabb.top();
            }
            if aabb.right() > right {
                right = aabb.right();
            }
            if aabb.bottom() > bottom {
                bottom = aabb.bottom();
            }
        }

        let bounds = Rect::new(B::from_xy(left, top), B::from_xy(right, bottom))?;
        let mut tree = Self::root(bounds, config);
        tree.extend(objects)?;
        Ok(tree)
    }

    /// Drops every object reference and every child, leaving an empty leaf.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.children = None;
    }

    /// Objects whose box does not overlap this node, or whose far corner does not fit the
    /// scalar type, are rejected.
    pub fn insert(&mut self, object: &'a T) -> Result<()> {
        let aabb = object.try_aabb().map_err(|err| {
            trace!(level = self.level, %err, "rejected object with overflowing box");
            err
        })?;

        if !self.bounds.overlaps(&aabb) {
            let position = object.position();
            let size = object.size();
            trace!(level = self.level, "rejected object outside node bounds");
            return Err(QuadtreeError::OutOfBounds {
                position: format!("({:?}, {:?})", position.x(), position.y()),
                size: format!("({:?}, {:?})", size.x(), size.y()),
            });
        }

        self.place(object);
        Ok(())
    }

    /// Inserts every object, stopping at the first rejected one.
    pub fn extend<I>(&mut self, objects: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a T>,
    {
        for object in objects {
            self.insert(object)?;
        }
        Ok(())
    }

    fn place(&mut self, object: &'a T) {
        if let Some(children) = self.children.as_mut() {
            let aabb = object.aabb();
            for child in children.iter_mut() {
                if child.bounds.overlaps(&aabb) {
                    child.place(object);
                }
            }
            return;
        }

        self.objects.push(object);

        if self.objects.len() > self.config.max_objects && self.level < self.config.max_level {
            if self.children.is_none() {
                self.split();
            }
            self.redistribute();
        }
    }

    /// Moves the local objects into the children without splitting them further; an
    /// over-full child splits on its next insert.
    fn redistribute(&mut self) {
        let objects = mem::take(&mut self.objects);
        for object in objects {
            let targets = self.overlapping_quadrants(object);
            if let Some(children) = self.children.as_mut() {
                for quadrant in targets {
                    children[quadrant.index()].objects.push(object);
                }
            }
        }
    }

    /// Replaces the children with four empty leaves one level down.
    fn split(&mut self) {
        trace!(
            level = self.level,
            left = ?self.bounds.left(),
            top = ?self.bounds.top(),
            right = ?self.bounds.right(),
            bottom = ?self.bounds.bottom(),
            "splitting node"
        );

        let level = self.level + 1;
        let config = self.config;
        let [top_right, top_left, bottom_left, bottom_right] = self.bounds.quadrants();

        self.children = Some(Box::new([
            Self::with_config(level, top_right, config),
            Self::with_config(level, top_left, config),
            Self::with_config(level, bottom_left, config),
            Self::with_config(level, bottom_right, config),
        ]));
    }

    /// Appends every object stored in a leaf that `query` overlaps, and returns `out`.
    ///
    /// Leaf contents are not filtered against `query`, and an object stored in several leaves
    /// is appended once per leaf. `out` is not cleared first.
    pub fn retrieve<'v, Q>(&self, out: &'v mut Vec<&'a T>, query: &Q) -> &'v mut Vec<&'a T>
    where
        Q: Spatial,
        Q::Vector: Vector2<Scalar = B::Scalar>,
    {
        let area = query.aabb();
        if self.bounds.overlaps(&area) {
            self.collect(&area, out);
        }
        out
    }

    fn collect<W>(&self, area: &Rect<W>, out: &mut Vec<&'a T>)
    where
        W: Vector2<Scalar = B::Scalar>,
    {
        match self.children {
            None => out.extend_from_slice(&self.objects),
            Some(ref children) => {
                for child in children.iter() {
                    if child.bounds.overlaps(area) {
                        child.collect(area, out);
                    }
                }
            }
        }
    }

    /// [`retrieve`](Node::retrieve) into a fresh vector with duplicate references removed.
    pub fn candidates<Q>(&self, query: &Q) -> Vec<&'a T>
    where
        Q: Spatial,
        Q::Vector: Vector2<Scalar = B::Scalar>,
    {
        let mut out = Vec::new();
        self.retrieve(&mut out, query);

        let mut seen = HashSet::with_capacity(out.len());
        out.retain(|o| seen.insert(*o as *const T));
        out
    }

    /// Whether the object's box overlaps this node's region, edges included.
    pub fn is_inside<Q>(&self, object: &Q) -> bool
    where
        Q: Spatial,
        Q::Vector: Vector2<Scalar = B::Scalar>,
    {
        self.bounds.overlaps(&object.aabb())
    }

    /// The single quadrant the object fits in entirely, or `None` when it straddles a
    /// midpoint. Insertion does not use this; see [`overlapping_quadrants`](Node::overlapping_quadrants).
    pub fn quadrant_of<Q>(&self, object: &Q) -> Option<Quadrant>
    where
        Q: Spatial,
        Q::Vector: Vector2<Scalar = B::Scalar>,
    {
        let center = self.bounds.center();
        let (mid_x, mid_y) = (center.x(), center.y());
        let aabb = object.aabb();

        let top = aabb.top() < mid_y && aabb.bottom() < mid_y;
        let bottom = aabb.top() > mid_y;

        if aabb.left() < mid_x && aabb.right() < mid_x {
            if top {
                Some(Quadrant::TopLeft)
            } else if bottom {
                Some(Quadrant::BottomLeft)
            } else {
                None
            }
        } else if aabb.left() > mid_x {
            if top {
                Some(Quadrant::TopRight)
            } else if bottom {
                Some(Quadrant::BottomRight)
            } else {
                None
            }
        } else {
            None
        }
    }

    /// Every quadrant the object's box overlaps, in [`Quadrant`] order. These are the children
    /// an insert forwards the object to.
    pub fn overlapping_quadrants<Q>(&self, object: &Q) -> ArrayVec<[Quadrant; 4]>
    where
        Q: Spatial,
        Q::Vector: Vector2<Scalar = B::Scalar>,
    {
        let aabb = object.aabb();
        let regions = self.bounds.quadrants();
        Quadrant::ALL
            .iter()
            .copied()
            .filter(|q| regions[q.index()].overlaps(&aabb))
            .collect()
    }

    /// Whether this exact object (by address) is stored anywhere in the subtree.
    pub fn contains(&self, object: &T) -> bool {
        if !self.is_inside(object) {
            return false;
        }

        if self.objects.iter().any(|o| std::ptr::eq(*o, object)) {
            return true;
        }

        match self.children {
            Some(ref children) => children.iter().any(|child| child.contains(object)),
            None => false,
        }
    }

    /// Deepest level present in the subtree.
    pub fn depth(&self) -> u32 {
        match self.children {
            Some(ref children) => children
                .iter()
                .map(|child| child.depth())
                .max()
                .unwrap_or(self.level),
            None => self.level,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn bounds(&self) -> &Rect<B> {
        &self.bounds
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn children(&self) -> Option<&[Node<'a, T, B>; 4]> {
        self.children.as_deref()
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&Node<'a, T, B>> {
        self.children
            .as_ref()
            .map(|children| &children[quadrant.index()])
    }

    /// References held directly by this node; empty for internal nodes.
    pub fn objects(&self) -> &[&'a T] {
        &self.objects
    }
}
