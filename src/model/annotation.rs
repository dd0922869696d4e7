//! Annotation types and shape geometry.

use serde::{Deserialize, Serialize};

use super::label::PRESET_COLORS;
use crate::geometry::{self, BoundingBox, Point};

/// Unique identifier for an annotation.
pub type AnnotationId = String;

/// Shape kinds available as drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle
    #[default]
    Rect,
    /// Circle stored as its bounding box
    Circle,
    /// Three-vertex polygon
    Triangle,
    /// Free polygon
    Polygon,
}

impl ShapeKind {
    /// Get the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rect => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Polygon => "Polygon",
        }
    }

    /// Get all shape kinds.
    pub fn all() -> &'static [ShapeKind] {
        &[
            ShapeKind::Rect,
            ShapeKind::Circle,
            ShapeKind::Triangle,
            ShapeKind::Polygon,
        ]
    }
}

/// Shape data for an annotation (in image coordinates).
///
/// Serializes with a `type` tag next to the variant's geometry, so an
/// annotation reads `{"type": "rect", "rect": {...}}` or
/// `{"type": "polygon", "points": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Rectangle defined by its box.
    Rect { rect: BoundingBox },
    /// Circle; the box drives all geometry, `radius` is informational.
    Circle {
        rect: BoundingBox,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        radius: Option<f64>,
    },
    /// Triangle as a flat `[x, y, ...]` list.
    Triangle { points: Vec<f64> },
    /// Polygon as a flat `[x, y, ...]` list.
    Polygon { points: Vec<f64> },
}

impl Shape {
    /// The kind tag of this shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rect { .. } => ShapeKind::Rect,
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Triangle { .. } => ShapeKind::Triangle,
            Shape::Polygon { .. } => ShapeKind::Polygon,
        }
    }

    /// Axis-aligned bounds.
    ///
    /// Rect and circle report their stored box; triangle and polygon the
    /// extent of their vertices.
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Shape::Rect { rect } | Shape::Circle { rect, .. } => *rect,
            Shape::Triangle { points } | Shape::Polygon { points } => {
                geometry::bounds_of_points(points)
            }
        }
    }

    /// Check if a point is inside this shape.
    pub fn contains_point(&self, p: Point) -> bool {
        match self {
            Shape::Rect { rect } => rect.contains(p),
            Shape::Circle { rect, .. } => geometry::ellipse_contains(rect, p),
            Shape::Triangle { points } | Shape::Polygon { points } => {
                geometry::polygon_contains(points, p)
            }
        }
    }

    /// Move the whole shape by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Rect { rect } | Shape::Circle { rect, .. } => {
                *rect = rect.translated(dx, dy);
            }
            Shape::Triangle { points } | Shape::Polygon { points } => {
                geometry::translate_points(points, dx, dy);
            }
        }
    }

    /// Vertex list for point-editable shapes.
    pub fn points(&self) -> Option<&[f64]> {
        match self {
            Shape::Triangle { points } | Shape::Polygon { points } => Some(points),
            Shape::Rect { .. } | Shape::Circle { .. } => None,
        }
    }

    /// Replace vertex `index` of a triangle or polygon. Returns false when the
    /// shape has no such vertex.
    pub fn set_vertex(&mut self, index: usize, p: Point) -> bool {
        match self {
            Shape::Triangle { points } | Shape::Polygon { points } => {
                let i = index * 2;
                if i + 1 >= points.len() {
                    return false;
                }
                points[i] = p.x;
                points[i + 1] = p.y;
                true
            }
            Shape::Rect { .. } | Shape::Circle { .. } => false,
        }
    }
}

/// One labeled shape on one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Unique identifier.
    pub id: AnnotationId,
    /// `LabelItem::id` this annotation is classified as. Not validated.
    pub label_id: String,
    /// The shape geometry.
    #[serde(flatten)]
    pub shape: Shape,
    /// Display colour (`#rrggbb`).
    pub color: String,
}

impl Annotation {
    /// Create a new annotation.
    pub fn new(
        id: impl Into<AnnotationId>,
        label_id: impl Into<String>,
        shape: Shape,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label_id: label_id.into(),
            shape,
            color: color.into(),
        }
    }

    /// Create a rectangle with a fresh id and a palette colour.
    pub fn new_rect(x: f64, y: f64, width: f64, height: f64, label_id: impl Into<String>) -> Self {
        let id = uuid::Uuid::new_v4();
        // v4 ids are random, so the first byte doubles as a palette pick
        let color = PRESET_COLORS[id.as_bytes()[0] as usize % PRESET_COLORS.len()];

        Self::new(
            id.to_string(),
            label_id,
            Shape::Rect {
                rect: BoundingBox::new(x, y, width, height),
            },
            color,
        )
    }

    /// Shape kind of this annotation.
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Axis-aligned bounds of the shape.
    pub fn bounding_box(&self) -> BoundingBox {
        self.shape.bounding_box()
    }

    /// Merge a partial update onto this annotation. Fields left `None` in
    /// the patch are kept.
    pub fn apply(&mut self, patch: AnnotationPatch) {
        if let Some(label_id) = patch.label_id {
            self.label_id = label_id;
        }
        if let Some(shape) = patch.shape {
            self.shape = shape;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

/// Partial annotation fields for `update_annotation`.
///
/// The id is not patchable. Geometry is replaced wholesale, so the kind and
/// its fields always change together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationPatch {
    #[serde(default)]
    pub label_id: Option<String>,
    #[serde(default)]
    pub shape: Option<Shape>,
    #[serde(default)]
    pub color: Option<String>,
}

impl AnnotationPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label id.
    pub fn label_id(mut self, label_id: impl Into<String>) -> Self {
        self.label_id = Some(label_id.into());
        self
    }

    /// Set the shape.
    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Set the colour.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.label_id.is_none() && self.shape.is_none() && self.color.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
        Shape::Rect {
            rect: BoundingBox::new(x, y, w, h),
        }
    }

    #[test]
    fn test_bounding_box_per_kind() {
        assert_eq!(
            rect(1.0, 2.0, 3.0, 4.0).bounding_box(),
            BoundingBox::new(1.0, 2.0, 3.0, 4.0)
        );

        let circle = Shape::Circle {
            rect: BoundingBox::new(10.0, 10.0, 20.0, 20.0),
            radius: Some(999.0),
        };
        // radius never drives geometry
        assert_eq!(circle.bounding_box(), BoundingBox::new(10.0, 10.0, 20.0, 20.0));

        let tri = Shape::Triangle {
            points: vec![0.0, 10.0, 5.0, 0.0, 10.0, 10.0],
        };
        assert_eq!(tri.bounding_box(), BoundingBox::new(0.0, 0.0, 10.0, 10.0));

        let empty = Shape::Polygon { points: vec![] };
        assert_eq!(empty.bounding_box(), BoundingBox::zero());
    }

    #[test]
    fn test_contains_point() {
        assert!(rect(0.0, 0.0, 10.0, 10.0).contains_point(Point::new(5.0, 5.0)));

        let circle = Shape::Circle {
            rect: BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            radius: None,
        };
        assert!(circle.contains_point(Point::new(5.0, 5.0)));
        assert!(!circle.contains_point(Point::new(0.5, 0.5)));

        let tri = Shape::Triangle {
            points: vec![0.0, 0.0, 10.0, 0.0, 0.0, 10.0],
        };
        assert!(tri.contains_point(Point::new(2.0, 2.0)));
        assert!(!tri.contains_point(Point::new(9.0, 9.0)));
    }

    #[test]
    fn test_translate() {
        let mut r = rect(0.0, 0.0, 5.0, 5.0);
        r.translate(3.0, 4.0);
        assert_eq!(r.bounding_box(), BoundingBox::new(3.0, 4.0, 5.0, 5.0));

        let mut poly = Shape::Polygon {
            points: vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0],
        };
        poly.translate(-1.0, 2.0);
        assert_eq!(poly.points(), Some(&[-1.0, 2.0, 9.0, 2.0, 9.0, 12.0][..]));
    }

    #[test]
    fn test_set_vertex() {
        let mut tri = Shape::Triangle {
            points: vec![0.0, 0.0, 10.0, 0.0, 0.0, 10.0],
        };
        assert!(tri.set_vertex(1, Point::new(20.0, 1.0)));
        assert_eq!(tri.points(), Some(&[0.0, 0.0, 20.0, 1.0, 0.0, 10.0][..]));
        assert!(!tri.set_vertex(3, Point::new(0.0, 0.0)));
        assert!(!rect(0.0, 0.0, 1.0, 1.0).set_vertex(0, Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_apply_patch_is_shallow() {
        let mut ann = Annotation::new("a1", "cat", rect(0.0, 0.0, 1.0, 1.0), "#FF0000");
        ann.apply(AnnotationPatch::new().color("#00FF00"));
        assert_eq!(ann.color, "#00FF00");
        assert_eq!(ann.label_id, "cat");
        assert_eq!(ann.kind(), ShapeKind::Rect);

        ann.apply(AnnotationPatch::new().shape(Shape::Polygon {
            points: vec![0.0, 0.0, 1.0, 1.0, 2.0, 0.0],
        }));
        assert_eq!(ann.kind(), ShapeKind::Polygon);
        assert_eq!(ann.id, "a1");
    }

    #[test]
    fn test_serde_layout() {
        let ann = Annotation::new("a1", "cat", rect(10.0, 20.0, 30.0, 40.0), "#FF0000");
        let value = serde_json::to_value(&ann).unwrap();
        assert_eq!(value["type"], "rect");
        assert_eq!(value["labelId"], "cat");
        assert_eq!(value["rect"]["width"], 30.0);

        let parsed: Annotation = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, ann);

        let poly: Annotation = serde_json::from_str(
            r##"{"id":"p","labelId":"x","type":"polygon","points":[0,0,4,0,4,3],"color":"#000000"}"##,
        )
        .unwrap();
        assert_eq!(poly.bounding_box(), BoundingBox::new(0.0, 0.0, 4.0, 3.0));
    }

    #[test]
    fn test_new_rect() {
        let a = Annotation::new_rect(1.0, 2.0, 3.0, 4.0, "lbl");
        let b = Annotation::new_rect(1.0, 2.0, 3.0, 4.0, "lbl");
        assert_ne!(a.id, b.id);
        assert_eq!(a.label_id, "lbl");
        assert_eq!(a.kind(), ShapeKind::Rect);
        assert!(PRESET_COLORS.contains(&a.color.as_str()));
        assert_eq!(a.bounding_box(), BoundingBox::new(1.0, 2.0, 3.0, 4.0));
    }
}
