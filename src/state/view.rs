//! View transform (zoom and pan) of the annotation canvas.
//!
//! Screen coordinates relate to image coordinates as
//! `screen = image * scale + offset`.

use serde::{Deserialize, Serialize};

use crate::constants::{ZOOM_MAX, ZOOM_MIN};
use crate::geometry::Point;

/// Pan/zoom state of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
}

impl ViewTransform {
    /// Create a new transform with the given scale and offset.
    pub fn new(scale: f64, x: f64, y: f64) -> Self {
        Self { scale, x, y }
    }

    /// Create an identity transform (scale=1, no offset).
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Map a screen point into image space.
    pub fn to_image(&self, screen: Point) -> Point {
        Point::new((screen.x - self.x) / self.scale, (screen.y - self.y) / self.scale)
    }

    /// Map an image point into screen space.
    pub fn to_screen(&self, image: Point) -> Point {
        Point::new(image.x * self.scale + self.x, image.y * self.scale + self.y)
    }

    /// Zoom to `new_scale` keeping the image point under `anchor` (screen
    /// space) fixed. The scale is clamped to the supported range.
    pub fn zoom_at(&self, new_scale: f64, anchor: Point) -> ViewTransform {
        let new_scale = new_scale.clamp(ZOOM_MIN, ZOOM_MAX);
        let image_point = self.to_image(anchor);

        ViewTransform {
            scale: new_scale,
            x: anchor.x - image_point.x * new_scale,
            y: anchor.y - image_point.y * new_scale,
        }
    }

    /// Apply a pan delta to the transform.
    pub fn pan_by(&self, dx: f64, dy: f64) -> ViewTransform {
        ViewTransform {
            scale: self.scale,
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Zoom in by a factor (e.g., 1.2 for 20% zoom in).
    pub fn zoom_in(&self, factor: f64) -> ViewTransform {
        ViewTransform {
            scale: (self.scale * factor).min(ZOOM_MAX),
            ..*self
        }
    }

    /// Zoom out by a factor (e.g., 1.2 for 20% zoom out).
    pub fn zoom_out(&self, factor: f64) -> ViewTransform {
        ViewTransform {
            scale: (self.scale / factor).max(ZOOM_MIN),
            ..*self
        }
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}
