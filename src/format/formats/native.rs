//! Native JSON format.
//!
//! The full document: label set, every image and every annotation with its
//! geometry, plus a resolved `labelName` on each annotation. This is the only
//! format that can be read back.

use serde::{Deserialize, Serialize};

use crate::constants::{NATIVE_FORMAT_VERSION, UNKNOWN_LABEL};
use crate::format::error::FormatError;
use crate::format::traits::{
    AnnotationFormat, ExportArtifact, ExportOutcome, ExportRequest, ExportResult, FormatWarning,
};
use crate::model::{Annotation, ImageFile, LabelSet};

/// Native JSON format.
pub struct NativeFormat;

impl AnnotationFormat for NativeFormat {
    fn id(&self) -> &'static str {
        "tagzero"
    }

    fn display_name(&self) -> &'static str {
        "TagZero (JSON)"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn file_prefix(&self) -> &'static str {
        "tagzero_export"
    }

    fn export(&self, request: &ExportRequest<'_>) -> Result<ExportOutcome, FormatError> {
        let mut result = ExportResult::new();
        let document = NativeDocument::build(request, &mut result);

        let bytes = serde_json::to_vec_pretty(&document)?;
        result.log_summary(self.id());

        Ok(ExportOutcome {
            artifact: ExportArtifact {
                file_name: self.file_name(request.exported_at),
                mime_type: self.mime_type(),
                bytes,
            },
            result,
        })
    }
}

/// Top-level native document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeDocument {
    pub version: String,
    /// ISO-8601 export time
    pub exported_at: String,
    pub label_set: Option<LabelSet>,
    pub images: Vec<NativeImage>,
}

/// One image in a native document. The image source is not exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeImage {
    pub id: String,
    pub name: String,
    pub annotations: Vec<NativeAnnotation>,
}

/// An annotation with its label name resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeAnnotation {
    #[serde(flatten)]
    pub annotation: Annotation,
    pub label_name: String,
}

impl NativeDocument {
    fn build(request: &ExportRequest<'_>, result: &mut ExportResult) -> Self {
        let mut images = Vec::with_capacity(request.images.len());

        for image in request.images {
            let mut annotations = Vec::with_capacity(image.annotations.len());
            for ann in &image.annotations {
                let label = request.label_set.and_then(|set| set.find(&ann.label_id));
                let label_name = match label {
                    Some(label) => label.name.clone(),
                    None => {
                        result.add_warning(
                            FormatWarning::info(format!(
                                "Label '{}' not found, exported as {}",
                                ann.label_id, UNKNOWN_LABEL
                            ))
                            .with_image(&image.name),
                        );
                        UNKNOWN_LABEL.to_string()
                    }
                };
                annotations.push(NativeAnnotation {
                    annotation: ann.clone(),
                    label_name,
                });
            }

            result.annotations_exported += annotations.len();
            images.push(NativeImage {
                id: image.id.clone(),
                name: image.name.clone(),
                annotations,
            });
        }
        result.images_exported = images.len();

        Self {
            version: NATIVE_FORMAT_VERSION.to_string(),
            exported_at: request.timestamp(),
            label_set: request.label_set.cloned(),
            images,
        }
    }

    /// Parse a native export, rejecting other format versions.
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        let document: Self = serde_json::from_str(json)?;
        if document.version != NATIVE_FORMAT_VERSION {
            return Err(FormatError::VersionMismatch {
                expected: NATIVE_FORMAT_VERSION.to_string(),
                found: document.version,
            });
        }
        Ok(document)
    }

    /// Split into editable images and the label set. Label names are dropped;
    /// they are derived data.
    pub fn into_parts(self) -> (Vec<ImageFile>, Option<LabelSet>) {
        let images = self
            .images
            .into_iter()
            .map(|image| {
                ImageFile::new(image.id, image.name, "").with_annotations(
                    image
                        .annotations
                        .into_iter()
                        .map(|a| a.annotation)
                        .collect(),
                )
            })
            .collect();
        (images, self.label_set)
    }
}
