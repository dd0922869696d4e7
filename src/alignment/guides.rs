//! Guide collection and closest-guide matching.

use serde::Serialize;

use crate::constants::{GUIDE_DASH, GUIDE_EXTENT, GUIDE_STROKE};
use crate::geometry::{BoundingBox, Point};
use crate::model::Annotation;

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Line of constant x
    Vertical,
    /// Line of constant y
    Horizontal,
}

/// Which edge of the active shape produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapEdge {
    Start,
    Center,
    End,
}

/// Candidate guide coordinates gathered from sibling shapes.
///
/// Both axes are sorted ascending and deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuideSet {
    vertical: Vec<f64>,
    horizontal: Vec<f64>,
}

impl GuideSet {
    /// Left, center and right x plus top, center and bottom y of every box.
    pub fn from_boxes(boxes: impl IntoIterator<Item = BoundingBox>) -> Self {
        let mut vertical = Vec::new();
        let mut horizontal = Vec::new();

        for b in boxes {
            vertical.extend([b.x, b.center_x(), b.right()]);
            horizontal.extend([b.y, b.center_y(), b.bottom()]);
        }

        Self {
            vertical: sorted_unique(vertical),
            horizontal: sorted_unique(horizontal),
        }
    }

    /// Guides from every annotation except the one with `exclude` id.
    pub fn from_annotations(annotations: &[Annotation], exclude: Option<&str>) -> Self {
        Self::from_boxes(
            annotations
                .iter()
                .filter(|a| Some(a.id.as_str()) != exclude)
                .map(Annotation::bounding_box),
        )
    }

    /// Vertical guide x values.
    pub fn vertical(&self) -> &[f64] {
        &self.vertical
    }

    /// Horizontal guide y values.
    pub fn horizontal(&self) -> &[f64] {
        &self.horizontal
    }

    /// Whether there is nothing to snap to.
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }
}

fn sorted_unique(mut values: Vec<f64>) -> Vec<f64> {
    values.retain(|v| v.is_finite());
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

/// One snappable edge of the active shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SnappingEdge {
    /// Edge coordinate
    pub value: f64,
    /// Edge coordinate minus the shape's origin on the same axis
    pub offset: f64,
    pub edge: SnapEdge,
}

/// Vertical and horizontal snapping edges of `bounds` relative to `origin`.
pub(crate) fn snapping_edges(
    bounds: &BoundingBox,
    origin: Point,
) -> ([SnappingEdge; 3], [SnappingEdge; 3]) {
    let v = |value: f64, edge| SnappingEdge {
        value,
        offset: value - origin.x,
        edge,
    };
    let h = |value: f64, edge| SnappingEdge {
        value,
        offset: value - origin.y,
        edge,
    };

    (
        [
            v(bounds.x, SnapEdge::Start),
            v(bounds.center_x(), SnapEdge::Center),
            v(bounds.right(), SnapEdge::End),
        ],
        [
            h(bounds.y, SnapEdge::Start),
            h(bounds.center_y(), SnapEdge::Center),
            h(bounds.bottom(), SnapEdge::End),
        ],
    )
}

/// A guide an edge was snapped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapMatch {
    /// Guide coordinate the edge lands on
    pub guide: f64,
    /// Distance before snapping
    pub distance: f64,
    /// Edge offset from the shape origin
    pub offset: f64,
    pub edge: SnapEdge,
}

/// Closest (edge, guide) pair strictly within `threshold`.
///
/// Equal distances resolve to the smaller guide value, then to the earlier
/// edge (start, center, end): guides are scanned ascending and a candidate
/// only replaces the best one when strictly closer.
pub(crate) fn closest_match(
    edges: &[SnappingEdge],
    guides: &[f64],
    threshold: f64,
) -> Option<SnapMatch> {
    let mut best: Option<SnapMatch> = None;

    for &guide in guides {
        for edge in edges {
            let distance = (guide - edge.value).abs();
            if distance >= threshold {
                continue;
            }
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(SnapMatch {
                    guide,
                    distance,
                    offset: edge.offset,
                    edge: edge.edge,
                });
            }
        }
    }

    best
}

/// Transient guide geometry handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideLine {
    pub axis: Axis,
    /// The guide coordinate (x for vertical, y for horizontal)
    pub position: f64,
    /// `[x1, y1, x2, y2]` spanning the whole canvas
    pub points: [f64; 4],
    pub stroke: &'static str,
    pub dash: [f64; 2],
    /// Kept at one screen pixel regardless of zoom
    pub stroke_width: f64,
}

impl GuideLine {
    /// Vertical line at `x`.
    pub fn vertical(x: f64, zoom: f64) -> Self {
        Self::new(Axis::Vertical, x, [x, -GUIDE_EXTENT, x, GUIDE_EXTENT], zoom)
    }

    /// Horizontal line at `y`.
    pub fn horizontal(y: f64, zoom: f64) -> Self {
        Self::new(Axis::Horizontal, y, [-GUIDE_EXTENT, y, GUIDE_EXTENT, y], zoom)
    }

    fn new(axis: Axis, position: f64, points: [f64; 4], zoom: f64) -> Self {
        Self {
            axis,
            position,
            points,
            stroke: GUIDE_STROKE,
            dash: GUIDE_DASH,
            stroke_width: 1.0 / zoom,
        }
    }
}
