//! Per-image edit history.
//!
//! The session records the current image's annotation list before each
//! mutation. Entries are full clones, so a restored list never aliases live
//! annotations and editing after an undo cannot reach back into history.

use crate::constants::HISTORY_LIMIT;

/// Bounded past/future history of annotation-list snapshots.
///
/// `T` is whatever the session snapshots; in practice `Vec<Annotation>`.
/// Recording a new edit forgets the future, and once `capacity` past entries
/// exist the oldest is dropped.
///
/// ```
/// use tagzero::model::{Annotation, Shape};
/// use tagzero::geometry::BoundingBox;
/// use tagzero::undo::UndoStack;
///
/// let box_a = Annotation::new(
///     "a",
///     "cat",
///     Shape::Rect { rect: BoundingBox::new(0.0, 0.0, 10.0, 10.0) },
///     "#FF0000",
/// );
///
/// let mut history: UndoStack<Vec<Annotation>> = UndoStack::new(50);
/// let mut annotations = Vec::new();
///
/// history.push(annotations.clone());
/// annotations.push(box_a);
///
/// let restored = history.undo(annotations).unwrap_or_default();
/// assert!(restored.is_empty());
/// assert!(history.can_redo());
/// ```
#[derive(Debug, Clone)]
pub struct UndoStack<T: Clone> {
    past: Vec<T>,
    future: Vec<T>,
    capacity: usize,
}

impl<T: Clone> Default for UndoStack<T> {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

impl<T: Clone> UndoStack<T> {
    /// Empty history keeping at most `capacity` undo steps.
    pub fn new(capacity: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            capacity,
        }
    }

    /// Record the pre-edit snapshot. Discards any redo steps.
    pub fn push(&mut self, snapshot: T) {
        self.future.clear();
        self.past.push(snapshot);
        self.evict_oldest();
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Step back. `current` becomes the next redo step; returns `None` and
    /// leaves both sides untouched when there is nothing to undo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let snapshot = self.past.pop()?;
        self.future.push(current);
        Some(snapshot)
    }

    /// Step forward, the mirror of [`undo`](Self::undo).
    pub fn redo(&mut self, current: T) -> Option<T> {
        let snapshot = self.future.pop()?;
        self.past.push(current);
        self.evict_oldest();
        Some(snapshot)
    }

    pub fn undo_count(&self) -> usize {
        self.past.len()
    }

    pub fn redo_count(&self) -> usize {
        self.future.len()
    }

    pub fn max_history(&self) -> usize {
        self.capacity
    }

    /// Forget everything, e.g. when the current image changes.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    fn evict_oldest(&mut self) {
        let excess = self.past.len().saturating_sub(self.capacity);
        if excess > 0 {
            self.past.drain(..excess);
        }
    }
}
