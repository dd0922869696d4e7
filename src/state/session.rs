//! The editing session: document store, selection, tool, view and history.
//!
//! One `EditorSession` exists per open editor. It exclusively owns every
//! `ImageFile` and `Annotation`; collaborators read through accessors and
//! change the document only through the operations below.
//!
//! All annotation-list mutations target the current image and are recorded
//! in a snapshot history scoped to that image. Operating without a current
//! image, or on an id that doesn't exist, is a silent no-op.

use crate::config::EditorConfig;
use crate::constants::ZOOM_STEP;
use crate::geometry::Point;
use crate::model::{Annotation, AnnotationId, AnnotationPatch, ImageFile, ImageId, ShapeKind};
use crate::undo::UndoStack;

use super::view::ViewTransform;

/// Document store plus per-image undo/redo.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    images: Vec<ImageFile>,
    current_image_id: Option<ImageId>,
    selected_annotation_id: Option<AnnotationId>,
    /// Label applied to newly drawn shapes
    current_label_id: Option<String>,
    current_tool: ShapeKind,
    view: ViewTransform,
    is_drawing: bool,
    /// Snapshots of the current image's annotation list
    history: UndoStack<Vec<Annotation>>,
}

impl EditorSession {
    /// Create an empty session with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session using the configured history depth and tool.
    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            current_tool: config.default_tool,
            history: UndoStack::new(config.history_limit),
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------

    /// Append images. The first new image becomes current only when no image
    /// was current before.
    pub fn add_images(&mut self, new_images: Vec<ImageFile>) {
        if self.current_image_id.is_none() {
            if let Some(first) = new_images.first() {
                log::debug!("Auto-selecting image '{}'", first.name);
                self.current_image_id = Some(first.id.clone());
            }
        }
        self.images.extend(new_images);
    }

    /// Make `id` the current image.
    ///
    /// Clears the selection, resets the view transform and drops all undo and
    /// redo history; history never follows across images. Unknown ids are
    /// ignored.
    pub fn select_image(&mut self, id: &str) {
        if !self.images.iter().any(|img| img.id == id) {
            log::debug!("select_image: unknown image id '{}'", id);
            return;
        }

        self.current_image_id = Some(id.to_string());
        self.selected_annotation_id = None;
        self.view = ViewTransform::identity();
        self.history.clear();
        log::debug!("Switched to image '{}', history cleared", id);
    }

    /// All images in load order.
    pub fn images(&self) -> &[ImageFile] {
        &self.images
    }

    /// Look up an image by id.
    pub fn image(&self, id: &str) -> Option<&ImageFile> {
        self.images.iter().find(|img| img.id == id)
    }

    /// Id of the current image, if any.
    pub fn current_image_id(&self) -> Option<&str> {
        self.current_image_id.as_deref()
    }

    /// The current image, if any.
    pub fn current_image(&self) -> Option<&ImageFile> {
        self.current_image_id.as_deref().and_then(|id| self.image(id))
    }

    /// Annotations of the current image (empty without one).
    pub fn current_annotations(&self) -> &[Annotation] {
        self.current_image()
            .map(|img| img.annotations.as_slice())
            .unwrap_or(&[])
    }

    fn current_annotations_mut(&mut self) -> Option<&mut Vec<Annotation>> {
        let id = self.current_image_id.as_deref()?;
        self.images
            .iter_mut()
            .find(|img| img.id == id)
            .map(|img| &mut img.annotations)
    }

    // ------------------------------------------------------------------
    // Annotation CRUD (recorded in history)
    // ------------------------------------------------------------------

    /// Append an annotation to the current image (top of z-order).
    pub fn add_annotation(&mut self, annotation: Annotation) {
        log::debug!("Adding {} annotation '{}'", annotation.kind().name(), annotation.id);
        self.record(|list| list.push(annotation));
    }

    /// Shallow-merge `patch` onto the annotation with `id`.
    pub fn update_annotation(&mut self, id: &str, patch: AnnotationPatch) {
        if !self.current_annotations().iter().any(|a| a.id == id) {
            log::debug!("update_annotation: no annotation '{}'", id);
            return;
        }
        self.record(|list| {
            if let Some(ann) = list.iter_mut().find(|a| a.id == id) {
                ann.apply(patch);
            }
        });
    }

    /// Remove the annotation with `id`, dropping the selection if it pointed
    /// at it.
    pub fn remove_annotation(&mut self, id: &str) {
        if !self.current_annotations().iter().any(|a| a.id == id) {
            log::debug!("remove_annotation: no annotation '{}'", id);
            return;
        }
        self.record(|list| list.retain(|a| a.id != id));
        if self.selected_annotation_id.as_deref() == Some(id) {
            self.selected_annotation_id = None;
        }
    }

    /// Snapshot the pre-mutation list, then apply `mutate` to the live one.
    fn record(&mut self, mutate: impl FnOnce(&mut Vec<Annotation>)) {
        let Some(list) = self.current_annotations_mut() else {
            log::debug!("No current image, ignoring edit");
            return;
        };
        let snapshot = list.clone();
        mutate(list);
        self.history.push(snapshot);
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Restore the previous snapshot. Returns false when there was nothing
    /// to undo. Always clears the selection on success.
    pub fn undo(&mut self) -> bool {
        if self.current_image().is_none() {
            return false;
        }
        let current = self.current_annotations().to_vec();
        let Some(previous) = self.history.undo(current) else {
            return false;
        };
        self.restore(previous);
        log::debug!("Undo ({} left)", self.history.undo_count());
        true
    }

    /// Re-apply the most recently undone snapshot. Returns false when there
    /// was nothing to redo. Always clears the selection on success.
    pub fn redo(&mut self) -> bool {
        if self.current_image().is_none() {
            return false;
        }
        let current = self.current_annotations().to_vec();
        let Some(next) = self.history.redo(current) else {
            return false;
        };
        self.restore(next);
        log::debug!("Redo ({} left)", self.history.redo_count());
        true
    }

    /// Replace the live list with a snapshot and drop the selection.
    fn restore(&mut self, snapshot: Vec<Annotation>) {
        if let Some(list) = self.current_annotations_mut() {
            *list = snapshot;
        }
        self.selected_annotation_id = None;
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.current_image_id.is_some() && self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.current_image_id.is_some() && self.history.can_redo()
    }

    /// Number of undo steps available
    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    /// Number of redo steps available
    pub fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    // ------------------------------------------------------------------
    // Selection, tool, label
    // ------------------------------------------------------------------

    /// Currently selected annotation id.
    pub fn selected_annotation_id(&self) -> Option<&str> {
        self.selected_annotation_id.as_deref()
    }

    /// Currently selected annotation.
    pub fn selected_annotation(&self) -> Option<&Annotation> {
        let id = self.selected_annotation_id.as_deref()?;
        self.current_annotations().iter().find(|a| a.id == id)
    }

    /// Select an annotation of the current image, or clear with `None`.
    /// Ids not on the current image are ignored.
    pub fn select_annotation(&mut self, id: Option<&str>) {
        match id {
            None => self.selected_annotation_id = None,
            Some(id) if self.current_annotations().iter().any(|a| a.id == id) => {
                self.selected_annotation_id = Some(id.to_string());
            }
            Some(id) => log::debug!("select_annotation: no annotation '{}'", id),
        }
    }

    /// Top-most annotation of the current image containing `point`.
    pub fn hit_test(&self, point: Point) -> Option<&Annotation> {
        self.current_annotations()
            .iter()
            .rev()
            .find(|a| a.shape.contains_point(point))
    }

    /// Active drawing tool.
    pub fn current_tool(&self) -> ShapeKind {
        self.current_tool
    }

    /// Switch the drawing tool.
    pub fn set_tool(&mut self, tool: ShapeKind) {
        self.current_tool = tool;
    }

    /// Label applied to new drawings.
    pub fn current_label_id(&self) -> Option<&str> {
        self.current_label_id.as_deref()
    }

    /// Set the label applied to new drawings.
    pub fn set_current_label(&mut self, label_id: Option<String>) {
        self.current_label_id = label_id;
    }

    /// Whether a draw gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    /// Mark a draw gesture as started or finished.
    pub fn set_drawing(&mut self, drawing: bool) {
        self.is_drawing = drawing;
    }

    // ------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------

    /// Current view transform.
    pub fn view(&self) -> ViewTransform {
        self.view
    }

    /// Current zoom scale.
    pub fn zoom_scale(&self) -> f64 {
        self.view.scale
    }

    /// Zoom in one step.
    pub fn zoom_in(&mut self) {
        self.view = self.view.zoom_in(ZOOM_STEP);
    }

    /// Zoom out one step.
    pub fn zoom_out(&mut self) {
        self.view = self.view.zoom_out(ZOOM_STEP);
    }

    /// Zoom to `scale` about a screen-space anchor.
    pub fn zoom_to(&mut self, scale: f64, anchor: Point) {
        self.view = self.view.zoom_at(scale, anchor);
    }

    /// Pan by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.view = self.view.pan_by(dx, dy);
    }

    /// Reset to the identity transform.
    pub fn reset_view(&mut self) {
        self.view = ViewTransform::identity();
    }
}
