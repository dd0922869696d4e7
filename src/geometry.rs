//! Geometry primitives shared by the document store, the snapping engine
//! and the export pipeline.
//!
//! Everything here is a pure function of its inputs. Flat point lists use the
//! `[x0, y0, x1, y1, ...]` layout that triangle and polygon annotations store.

use serde::{Deserialize, Serialize};

/// A point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box `(x, y, width, height)` with `(x, y)` the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Create a new box.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The zero box used for missing geometry.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Normalized box spanning two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Area (`width * height`).
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// `[x, y, width, height]`, the layout COCO uses.
    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Edges inclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// The box moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Bounds of a flat `[x, y, x, y, ...]` list.
///
/// X values are the even indices, Y values the odd ones. A list without at
/// least one complete pair yields the zero box.
pub fn bounds_of_points(points: &[f64]) -> BoundingBox {
    if points.len() < 2 {
        return BoundingBox::zero();
    }

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for (i, &v) in points.iter().enumerate() {
        if i % 2 == 0 {
            min_x = min_x.min(v);
            max_x = max_x.max(v);
        } else {
            min_y = min_y.min(v);
            max_y = max_y.max(v);
        }
    }

    BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Iterate complete `(x, y)` pairs of a flat point list.
pub fn point_pairs(points: &[f64]) -> impl Iterator<Item = Point> + '_ {
    points.chunks_exact(2).map(|c| Point::new(c[0], c[1]))
}

/// Point-in-polygon test using ray casting.
///
/// Fewer than three vertices never contain anything.
pub fn polygon_contains(points: &[f64], p: Point) -> bool {
    let vertices: Vec<Point> = point_pairs(points).collect();
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (vi, vj) = (vertices[i], vertices[j]);
        if ((vi.y > p.y) != (vj.y > p.y)) && (p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Whether `p` lies inside the ellipse inscribed in `bounds`.
pub fn ellipse_contains(bounds: &BoundingBox, p: Point) -> bool {
    let rx = bounds.width / 2.0;
    let ry = bounds.height / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let dx = (p.x - bounds.center_x()) / rx;
    let dy = (p.y - bounds.center_y()) / ry;
    dx * dx + dy * dy <= 1.0
}

/// Shift every pair of a flat point list by `(dx, dy)`.
pub fn translate_points(points: &mut [f64], dx: f64, dy: f64) {
    for (i, v) in points.iter_mut().enumerate() {
        *v += if i % 2 == 0 { dx } else { dy };
    }
}
