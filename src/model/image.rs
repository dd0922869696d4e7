//! Image entries and their annotation lists.

use serde::{Deserialize, Serialize};

use super::annotation::Annotation;

/// Unique identifier for an image.
pub type ImageId = String;

/// An image with its annotations.
///
/// Annotation order is both render z-order (last drawn on top) and export
/// order. Pixel dimensions are deliberately absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFile {
    pub id: ImageId,
    /// Original filename, extension included
    pub name: String,
    /// Where the pixels live (object URL, path, ...)
    #[serde(rename = "url", default)]
    pub source: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl ImageFile {
    /// Create an image with no annotations.
    pub fn new(id: impl Into<ImageId>, name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source: source.into(),
            annotations: Vec::new(),
        }
    }

    /// Attach annotations (builder style).
    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    /// Look up an annotation by id.
    pub fn annotation(&self, id: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    /// Filename with its last extension removed (`"a.b.jpg"` -> `"a.b"`).
    ///
    /// A leading dot is not treated as an extension separator.
    pub fn stem(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) if idx > 0 => &self.name[..idx],
            _ => &self.name,
        }
    }
}
