//! Format registry for discovering and accessing export formats.

use std::collections::HashMap;

use crate::format::error::FormatError;
use crate::format::formats::{CocoFormat, NativeFormat, PascalVocFormat, YoloFormat};
use crate::format::traits::AnnotationFormat;

/// Registry of available export formats.
///
/// All built-in formats are registered automatically on creation.
pub struct FormatRegistry {
    formats: HashMap<&'static str, Box<dyn AnnotationFormat>>,
}

impl FormatRegistry {
    /// Create a new registry with all built-in formats registered.
    pub fn new() -> Self {
        let mut registry = Self {
            formats: HashMap::new(),
        };

        registry.register(Box::new(NativeFormat));
        registry.register(Box::new(CocoFormat));
        registry.register(Box::new(YoloFormat));
        registry.register(Box::new(PascalVocFormat));

        registry
    }

    /// Register a format implementation, replacing any with the same id.
    pub fn register(&mut self, format: Box<dyn AnnotationFormat>) {
        self.formats.insert(format.id(), format);
    }

    /// Get a format by its ID.
    pub fn get(&self, id: &str) -> Option<&dyn AnnotationFormat> {
        self.formats.get(id).map(|f| f.as_ref())
    }

    /// Get a format by ID or alias, failing for unknown ids.
    ///
    /// `"native"` is accepted as an alias of the native format.
    pub fn resolve(&self, id: &str) -> Result<&dyn AnnotationFormat, FormatError> {
        let key = if id == "native" { "tagzero" } else { id };
        self.get(key)
            .ok_or_else(|| FormatError::unsupported_format(id))
    }

    /// Get all registered formats, sorted by id.
    pub fn all(&self) -> Vec<&dyn AnnotationFormat> {
        let mut formats: Vec<_> = self.formats.values().map(|f| f.as_ref()).collect();
        formats.sort_by_key(|f| f.id());
        formats
    }

    /// Get all format IDs, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.formats.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Get formats that package per-image files into an archive.
    pub fn archive_formats(&self) -> Vec<&dyn AnnotationFormat> {
        self.all().into_iter().filter(|f| f.is_archive()).collect()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_formats() {
        let registry = FormatRegistry::new();

        assert!(registry.get("tagzero").is_some());
        assert!(registry.get("coco").is_some());
        assert!(registry.get("yolo").is_some());
        assert!(registry.get("voc").is_some());
        assert_eq!(registry.ids(), vec!["coco", "tagzero", "voc", "yolo"]);
    }

    #[test]
    fn test_resolve_alias_and_unknown() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.resolve("native").unwrap().id(), "tagzero");

        let err = registry.resolve("pdf").err().unwrap();
        assert!(matches!(err, FormatError::UnsupportedFormat { ref format } if format == "pdf"));
    }

    #[test]
    fn test_archive_formats() {
        let registry = FormatRegistry::new();
        let ids: Vec<_> = registry.archive_formats().iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec!["voc", "yolo"]);
        assert_eq!(registry.get("yolo").unwrap().mime_type(), "application/zip");
        assert_eq!(registry.get("coco").unwrap().mime_type(), "application/json");
    }
}
