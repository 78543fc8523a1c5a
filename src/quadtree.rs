/*
 * Quadtree Module
 *
 * This module defines the QuadTree used for neighbour lookups. The tree is
 * rebuilt from scratch every frame: reset + init, insert everything, query,
 * then dispose. There is no incremental update and no rebalancing.
 *
 * A node keeps up to `capacity` points itself. The first insertion past that
 * splits the node into four equal quadrants (NW, NE, SW, SE) and every later
 * point is handed to the first quadrant that contains it.
 */

use nannou::prelude::*;
use rand::Rng;

pub const DEFAULT_CAPACITY: usize = 4;

/// Anything the tree can index: read-only access to a position.
pub trait Positioned {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
}

impl Positioned for Vec2 {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }
}

/// Axis-aligned rectangle anchored at its minimum corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Region {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    // Square of side 2 * half_extent centred on `center`
    pub fn around(center: Vec2, half_extent: f32) -> Self {
        let side = half_extent * 2.0;
        Self::new(center.x - half_extent, center.y - half_extent, side, side)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    // Inclusive on every edge
    #[inline]
    pub fn contains<P: Positioned + ?Sized>(&self, point: &P) -> bool {
        let (px, py) = (point.x(), point.y());
        px >= self.x && py >= self.y && px <= self.right() && py <= self.bottom()
    }

    // Touching edges do not count as an overlap
    #[inline]
    pub fn intersects(&self, other: &Region) -> bool {
        !(other.right() <= self.x
            || other.bottom() <= self.y
            || other.x >= self.right()
            || other.y >= self.bottom())
    }

    // NW, NE, SW, SE with y growing downwards
    pub fn quadrants(&self) -> [Region; 4] {
        let (hw, hh) = (self.w / 2.0, self.h / 2.0);
        [
            Region::new(self.x, self.y, hw, hh),
            Region::new(self.x + hw, self.y, hw, hh),
            Region::new(self.x, self.y + hh, hw, hh),
            Region::new(self.x + hw, self.y + hh, hw, hh),
        ]
    }

    // Uniform point in [x, x + w) x [y, y + h)
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec2 {
        vec2(
            self.x + rng.gen::<f32>() * self.w,
            self.y + rng.gen::<f32>() * self.h,
        )
    }
}

pub struct QuadTree<T> {
    boundary: Option<Region>,
    capacity: usize,
    points: Vec<T>,
    children: Option<Box<[QuadTree<T>; 4]>>,
    // Everything accepted by this node or its descendants
    point_count: usize,
}

impl<T: Positioned> QuadTree<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            boundary: None,
            capacity,
            points: Vec::with_capacity(capacity),
            children: None,
            point_count: 0,
        }
    }

    fn with_boundary(boundary: Region, capacity: usize) -> Self {
        let mut node = Self::with_capacity(capacity);
        node.boundary = Some(boundary);
        node
    }

    // Set the region covered by the root; call after reset() for each frame
    pub fn init(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.boundary = Some(Region::new(x, y, w, h));
    }

    pub fn init_region(&mut self, region: Region) {
        self.boundary = Some(region);
    }

    pub fn boundary(&self) -> Option<Region> {
        self.boundary
    }

    // Points accepted by this subtree since the last reset
    pub fn len(&self) -> usize {
        self.point_count
    }

    pub fn is_empty(&self) -> bool {
        self.point_count == 0
    }

    pub fn is_subdivided(&self) -> bool {
        self.children.is_some()
    }

    /// Insert a point, returning `false` when it lies outside this node.
    ///
    /// An uninitialised tree rejects everything.
    pub fn insert(&mut self, point: T) -> bool {
        let boundary = match self.boundary {
            Some(boundary) if boundary.contains(&point) => boundary,
            _ => return false,
        };

        self.point_count += 1;

        if self.points.len() < self.capacity {
            self.points.push(point);
            return true;
        }

        let capacity = self.capacity;
        let children = self.children.get_or_insert_with(|| {
            let [nw, ne, sw, se] = boundary.quadrants();
            Box::new([
                QuadTree::with_boundary(nw, capacity),
                QuadTree::with_boundary(ne, capacity),
                QuadTree::with_boundary(sw, capacity),
                QuadTree::with_boundary(se, capacity),
            ])
        });

        // First quadrant that contains the point wins
        let target = children
            .iter_mut()
            .find(|child| child.boundary.map_or(false, |b| b.contains(&point)));

        match target {
            Some(child) => child.insert(point),
            None => {
                // Rounding on the far edges can leave a point of ours outside
                // all four halves; keep it here rather than lose it
                self.points.push(point);
                true
            }
        }
    }

    /// Append every stored point inside `range` to `found`.
    ///
    /// Nodes whose boundary misses `range` are skipped along with their
    /// whole subtree. Local points come before child points, children in
    /// NW, NE, SW, SE order.
    pub fn query(&self, range: &Region, found: &mut Vec<T>)
    where
        T: Clone,
    {
        let Some(boundary) = self.boundary else {
            return;
        };

        if !boundary.intersects(range) {
            return;
        }

        found.extend(self.points.iter().filter(|p| range.contains(*p)).cloned());

        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query(range, found);
            }
        }
    }

    // Drop children, points and the count; keep the boundary
    pub fn reset(&mut self) {
        self.dispose();
        self.point_count = 0;
    }

    // Drop children and points only
    pub fn dispose(&mut self) {
        self.children = None;
        self.points.clear();
    }

    /// Walk every node depth-first, parents before children.
    pub fn visit<F>(&self, f: &mut F)
    where
        F: FnMut(&Region, &[T]),
    {
        if let Some(boundary) = &self.boundary {
            f(boundary, &self.points);
        }

        if let Some(children) = &self.children {
            for child in children.iter() {
                child.visit(f);
            }
        }
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.visit(&mut |_, _| count += 1);
        count
    }

    // Boundaries of every node, used by the partition overlay
    pub fn regions(&self, out: &mut Vec<Region>) {
        self.visit(&mut |region, _| out.push(*region));
    }
}

impl<T: Positioned> Default for QuadTree<T> {
    fn default() -> Self {
        Self::new()
    }
}
