//! Trait definitions for export format implementations.

use chrono::{DateTime, Utc};

use crate::format::error::FormatError;
use crate::model::{ImageFile, LabelSet};

/// Trait for export format implementations.
///
/// Each format (native JSON, COCO, YOLO, Pascal VOC) turns the same document
/// into a single downloadable artifact. Formats hold no state.
pub trait AnnotationFormat: Send + Sync {
    /// Unique identifier for this format (e.g., "tagzero", "coco", "yolo", "voc").
    fn id(&self) -> &'static str;

    /// Human-readable name for UI display.
    fn display_name(&self) -> &'static str;

    /// Extension of the produced artifact (`"json"` or `"zip"`).
    fn extension(&self) -> &'static str;

    /// MIME type of the produced artifact.
    fn mime_type(&self) -> &'static str {
        if self.is_archive() {
            "application/zip"
        } else {
            "application/json"
        }
    }

    /// Prefix of the download name, followed by the export time in ms.
    fn file_prefix(&self) -> &'static str;

    /// Whether the artifact is a zip of per-image files.
    fn is_archive(&self) -> bool {
        self.extension() == "zip"
    }

    /// Download name for an export taken at `at`.
    fn file_name(&self, at: DateTime<Utc>) -> String {
        format!(
            "{}_{}.{}",
            self.file_prefix(),
            at.timestamp_millis(),
            self.extension()
        )
    }

    /// Produce the artifact for `request`.
    fn export(&self, request: &ExportRequest<'_>) -> Result<ExportOutcome, FormatError>;
}

/// Everything an export reads.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    /// Images in export order
    pub images: &'a [ImageFile],
    /// Label set used to resolve annotation labels
    pub label_set: Option<&'a LabelSet>,
    /// Timestamp written into the artifact and its file name
    pub exported_at: DateTime<Utc>,
}

impl<'a> ExportRequest<'a> {
    /// Create a request stamped with the current time.
    pub fn new(images: &'a [ImageFile], label_set: Option<&'a LabelSet>) -> Self {
        Self {
            images,
            label_set,
            exported_at: Utc::now(),
        }
    }

    /// Override the export timestamp.
    pub fn at(mut self, exported_at: DateTime<Utc>) -> Self {
        self.exported_at = exported_at;
        self
    }

    /// ISO-8601 timestamp with millisecond precision and a `Z` suffix.
    pub fn timestamp(&self) -> String {
        self.exported_at
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }
}

/// A finished export, ready to be saved or offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Artifact plus the report of how it was produced.
#[derive(Debug)]
pub struct ExportOutcome {
    pub artifact: ExportArtifact,
    pub result: ExportResult,
}

/// Result of an export operation.
#[derive(Debug, Default)]
pub struct ExportResult {
    /// Number of images exported.
    pub images_exported: usize,

    /// Number of annotations exported.
    pub annotations_exported: usize,

    /// Warnings generated during export (e.g., skipped annotations).
    pub warnings: Vec<FormatWarning>,

    /// Entries written into an archive, in order. Empty for single files.
    pub files_created: Vec<String>,
}

impl ExportResult {
    /// Create a new export result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the result.
    pub fn add_warning(&mut self, warning: FormatWarning) {
        self.warnings.push(warning);
    }

    /// Check if there were any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub(crate) fn log_summary(&self, format: &str) {
        log::info!(
            "Exported {} images with {} annotations as {} ({} warnings)",
            self.images_exported,
            self.annotations_exported,
            format,
            self.warnings.len()
        );
    }
}

/// Warning generated during format conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatWarning {
    /// Name of the image this warning relates to (if applicable).
    pub image: Option<String>,

    /// Human-readable warning message.
    pub message: String,

    /// Severity level of the warning.
    pub severity: WarningSeverity,
}

impl FormatWarning {
    /// Create a new warning.
    pub fn new(message: impl Into<String>, severity: WarningSeverity) -> Self {
        Self {
            image: None,
            message: message.into(),
            severity,
        }
    }

    /// Create an info-level warning.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, WarningSeverity::Info)
    }

    /// Create a warning-level warning.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, WarningSeverity::Warning)
    }

    /// Set the image this warning relates to.
    pub fn with_image(mut self, name: impl Into<String>) -> Self {
        self.image = Some(name.into());
        self
    }

    /// Warning for an annotation whose label id does not resolve.
    pub(crate) fn unresolved_label(image: &ImageFile, label_id: &str) -> Self {
        Self::warning(format!(
            "Skipped annotation with unknown label '{}'",
            label_id
        ))
        .with_image(&image.name)
    }
}

/// Severity level for format warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    /// Informational message, not a problem.
    Info,
    /// Warning that something was skipped or modified.
    Warning,
}
