//! Alignment guides and snapping.
//!
//! While a shape is dragged its left, center and right x (and top, middle and
//! bottom y) are compared with the same edges of every other shape on the
//! image. When one is closer than the snap radius the shape is moved so the
//! edges coincide, and a guide line is published for the renderer.
//!
//! The snap radius is configured in screen pixels and converted to image
//! units by dividing by the current zoom, so the feel stays constant when
//! zoomed in.

mod guides;

pub use guides::{Axis, GuideLine, GuideSet, SnapEdge, SnapMatch};

use guides::{closest_match, snapping_edges};

use crate::config::EditorConfig;
use crate::constants::SNAP_THRESHOLD_PX;
use crate::geometry::{BoundingBox, Point};
use crate::model::Annotation;

/// Outcome of snapping a dragged shape.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShapeSnap {
    /// Corrected origin for the shape
    pub position: Point,
    /// Translation applied on x
    pub dx: f64,
    /// Translation applied on y
    pub dy: f64,
    pub vertical: Option<SnapMatch>,
    pub horizontal: Option<SnapMatch>,
}

impl ShapeSnap {
    /// Whether either axis snapped.
    pub fn snapped(&self) -> bool {
        self.vertical.is_some() || self.horizontal.is_some()
    }
}

/// Outcome of snapping a single point (vertex drag or drawing).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointSnap {
    pub point: Point,
    /// Guide x the point was moved onto
    pub vertical: Option<f64>,
    /// Guide y the point was moved onto
    pub horizontal: Option<f64>,
}

/// Computes snaps and owns the currently visible guide lines.
#[derive(Debug, Clone)]
pub struct Aligner {
    threshold_px: f64,
    lines: Vec<GuideLine>,
}

impl Default for Aligner {
    fn default() -> Self {
        Self::new(SNAP_THRESHOLD_PX)
    }
}

impl Aligner {
    /// Create an aligner with a snap radius in screen pixels.
    pub fn new(threshold_px: f64) -> Self {
        Self {
            threshold_px,
            lines: Vec::new(),
        }
    }

    /// Create an aligner from editor settings.
    pub fn with_config(config: &EditorConfig) -> Self {
        Self::new(config.snap_threshold_px)
    }

    /// Snap radius in image units at `zoom`.
    ///
    /// A non-positive or non-finite zoom disables snapping.
    pub fn threshold(&self, zoom: f64) -> f64 {
        if zoom.is_finite() && zoom > 0.0 {
            self.threshold_px / zoom
        } else {
            0.0
        }
    }

    /// Guide lines produced by the last snap.
    pub fn lines(&self) -> &[GuideLine] {
        &self.lines
    }

    /// Drop all guide lines (drag ended).
    pub fn clear_lines(&mut self) {
        self.lines.clear();
    }

    /// Snap a shape whose bounds are `bounds` and whose position is `origin`.
    ///
    /// Each axis is matched independently. The returned position is where
    /// `origin` has to move so the matched edge lands on its guide.
    pub fn snap_bounds(
        &mut self,
        guides: &GuideSet,
        bounds: &BoundingBox,
        origin: Point,
        zoom: f64,
    ) -> ShapeSnap {
        self.lines.clear();

        let threshold = self.threshold(zoom);
        let (v_edges, h_edges) = snapping_edges(bounds, origin);
        let vertical = closest_match(&v_edges, guides.vertical(), threshold);
        let horizontal = closest_match(&h_edges, guides.horizontal(), threshold);

        let mut position = origin;
        if let Some(m) = vertical {
            position.x = m.guide - m.offset;
            self.lines.push(GuideLine::vertical(m.guide, zoom));
        }
        if let Some(m) = horizontal {
            position.y = m.guide - m.offset;
            self.lines.push(GuideLine::horizontal(m.guide, zoom));
        }

        if vertical.is_some() || horizontal.is_some() {
            log::trace!(
                "Snapped to ({:?}, {:?}) at zoom {}",
                vertical.map(|m| m.guide),
                horizontal.map(|m| m.guide),
                zoom
            );
        }

        ShapeSnap {
            position,
            dx: position.x - origin.x,
            dy: position.y - origin.y,
            vertical,
            horizontal,
        }
    }

    /// Snap a dragged annotation against its siblings.
    ///
    /// `siblings` may include `active` itself; it is skipped by id. Returns
    /// the moved copy, leaving `active` untouched.
    pub fn snap_annotation(
        &mut self,
        siblings: &[Annotation],
        active: &Annotation,
        zoom: f64,
    ) -> (Annotation, ShapeSnap) {
        let guides = GuideSet::from_annotations(siblings, Some(active.id.as_str()));
        let bounds = active.bounding_box();
        let snap = self.snap_bounds(&guides, &bounds, Point::new(bounds.x, bounds.y), zoom);

        let mut moved = active.clone();
        if snap.snapped() {
            moved.shape.translate(snap.dx, snap.dy);
        }
        (moved, snap)
    }

    /// Snap a single point to sibling edges.
    ///
    /// `editing` names the shape being edited so it cannot snap to itself.
    pub fn snap_point(
        &mut self,
        siblings: &[Annotation],
        point: Point,
        editing: Option<&str>,
        zoom: f64,
    ) -> PointSnap {
        let guides = GuideSet::from_annotations(siblings, editing);
        let snap = self.snap_bounds(
            &guides,
            &BoundingBox::new(point.x, point.y, 0.0, 0.0),
            point,
            zoom,
        );

        PointSnap {
            point: snap.position,
            vertical: snap.vertical.map(|m| m.guide),
            horizontal: snap.horizontal.map(|m| m.guide),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Shape;

    fn rect(id: &str, x: f64, y: f64, w: f64, h: f64) -> Annotation {
        Annotation::new(
            id,
            "label",
            Shape::Rect {
                rect: BoundingBox::new(x, y, w, h),
            },
            "#FF0000",
        )
    }

    #[test]
    fn test_left_edge_snaps_to_neighbour_right_edge() {
        let reference = rect("ref", 0.0, 0.0, 100.0, 100.0);
        let dragged = rect("drag", 98.0, 300.0, 50.0, 50.0);
        let siblings = vec![reference, dragged.clone()];

        let mut aligner = Aligner::default();
        let (moved, snap) = aligner.snap_annotation(&siblings, &dragged, 1.0);

        assert_eq!(moved.bounding_box().x, 100.0);
        assert_eq!(moved.bounding_box().y, 300.0);
        assert_eq!(snap.vertical.unwrap().edge, SnapEdge::Start);
        assert!(snap.horizontal.is_none());

        assert_eq!(aligner.lines().len(), 1);
        let line = &aligner.lines()[0];
        assert_eq!(line.axis, Axis::Vertical);
        assert_eq!(line.position, 100.0);
        assert_eq!(line.stroke_width, 1.0);

        // original untouched
        assert_eq!(dragged.bounding_box().x, 98.0);
    }

    #[test]
    fn test_threshold_scales_with_zoom() {
        let reference = rect("ref", 0.0, 0.0, 100.0, 100.0);
        let mut aligner = Aligner::default();
        assert_eq!(aligner.threshold(2.0), 5.0);

        // 2 image units away snaps at zoom 2 (threshold 5)
        let near = rect("near", 98.0, 300.0, 50.0, 50.0);
        let (moved, _) = aligner.snap_annotation(&[reference.clone()], &near, 2.0);
        assert_eq!(moved.bounding_box().x, 100.0);
        assert_eq!(aligner.lines()[0].stroke_width, 0.5);

        // 6 image units away does not
        let far = rect("far", 94.0, 300.0, 50.0, 50.0);
        let (moved, snap) = aligner.snap_annotation(&[reference], &far, 2.0);
        assert_eq!(moved.bounding_box().x, 94.0);
        assert!(!snap.snapped());
        assert!(aligner.lines().is_empty());
    }

    #[test]
    fn test_no_siblings_means_no_guides() {
        let only = rect("only", 10.0, 10.0, 20.0, 20.0);
        let mut aligner = Aligner::default();
        let (moved, snap) = aligner.snap_annotation(&[only.clone()], &only, 1.0);
        assert_eq!(moved, only);
        assert!(!snap.snapped());
        assert!(aligner.lines().is_empty());
    }

    #[test]
    fn test_both_axes_snap_independently() {
        let reference = rect("ref", 0.0, 0.0, 100.0, 100.0);
        // center (53, 47) is 3 away from the reference center on both axes
        let dragged = rect("drag", 43.0, 37.0, 20.0, 20.0);
        let mut aligner = Aligner::default();
        let (moved, snap) = aligner.snap_annotation(&[reference], &dragged, 1.0);

        let b = moved.bounding_box();
        assert_eq!((b.center_x(), b.center_y()), (50.0, 50.0));
        assert_eq!(snap.vertical.unwrap().edge, SnapEdge::Center);
        assert_eq!(snap.horizontal.unwrap().edge, SnapEdge::Center);
        assert_eq!(aligner.lines().len(), 2);
    }

    #[test]
    fn test_polygon_moves_all_vertices() {
        let reference = rect("ref", 0.0, 0.0, 100.0, 100.0);
        let tri = Annotation::new(
            "tri",
            "label",
            Shape::Triangle {
                points: vec![104.0, 300.0, 134.0, 300.0, 119.0, 330.0],
            },
            "#00FF00",
        );
        let mut aligner = Aligner::default();
        let (moved, snap) = aligner.snap_annotation(&[reference], &tri, 1.0);

        assert_eq!(snap.dx, -4.0);
        assert_eq!(
            moved.shape.points().unwrap(),
            &[100.0, 300.0, 130.0, 300.0, 115.0, 330.0]
        );
    }

    #[test]
    fn test_snap_point_excludes_edited_shape() {
        let reference = rect("ref", 0.0, 0.0, 100.0, 100.0);
        let editing = rect("edit", 200.0, 200.0, 50.0, 50.0);
        let siblings = vec![reference, editing];

        let mut aligner = Aligner::default();
        let snap = aligner.snap_point(&siblings, Point::new(203.0, 97.0), Some("edit"), 1.0);
        assert_eq!(snap.point, Point::new(203.0, 100.0));
        assert_eq!(snap.vertical, None);
        assert_eq!(snap.horizontal, Some(100.0));

        // without the exclusion the edited shape's own edge wins on x
        let snap = aligner.snap_point(&siblings, Point::new(203.0, 97.0), None, 1.0);
        assert_eq!(snap.vertical, Some(200.0));
    }

    #[test]
    fn test_invalid_zoom_disables_snapping() {
        let reference = rect("ref", 0.0, 0.0, 100.0, 100.0);
        let dragged = rect("drag", 99.0, 300.0, 50.0, 50.0);
        let mut aligner = Aligner::default();
        let (_, snap) = aligner.snap_annotation(&[reference], &dragged, 0.0);
        assert!(!snap.snapped());
    }

    #[test]
    fn test_clear_lines() {
        let reference = rect("ref", 0.0, 0.0, 100.0, 100.0);
        let dragged = rect("drag", 98.0, 300.0, 50.0, 50.0);
        let mut aligner = Aligner::with_config(&EditorConfig::default());
        aligner.snap_annotation(&[reference], &dragged, 1.0);
        assert!(!aligner.lines().is_empty());
        aligner.clear_lines();
        assert!(aligner.lines().is_empty());
    }
}
