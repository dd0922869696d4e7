//! Export format implementations.

mod coco;
mod native;
mod pascal_voc;
mod yolo;

#[cfg(test)]
mod tests;

pub use coco::CocoFormat;
pub use native::{NativeAnnotation, NativeDocument, NativeFormat, NativeImage};
pub use pascal_voc::PascalVocFormat;
pub use yolo::YoloFormat;
