//! Data models for the TagZero editor.

mod annotation;
mod image;
mod label;

pub use annotation::{Annotation, AnnotationId, AnnotationPatch, Shape, ShapeKind};
pub use image::{ImageFile, ImageId};
pub use label::{LabelItem, LabelSet, LabelSetPatch, PRESET_COLORS};
