//! COCO JSON format implementation.
//!
//! Writes the standard `{info, licenses, images, annotations, categories}`
//! document. Every shape is exported as its axis-aligned bounding box;
//! segmentation is left empty. Image sizes are not tracked, so `width` and
//! `height` are placeholders.

use std::collections::HashMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::constants::PLACEHOLDER_DIMENSION;
use crate::format::error::FormatError;
use crate::format::traits::{
    AnnotationFormat, ExportArtifact, ExportOutcome, ExportRequest, ExportResult, FormatWarning,
};

/// COCO JSON format.
///
/// Category ids follow label order starting at 1. Image and annotation ids
/// are sequential from 1 across the whole export. Annotations whose label
/// is not in the label set are skipped with a warning.
pub struct CocoFormat;

impl AnnotationFormat for CocoFormat {
    fn id(&self) -> &'static str {
        "coco"
    }

    fn display_name(&self) -> &'static str {
        "COCO (JSON)"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn file_prefix(&self) -> &'static str {
        "coco_export"
    }

    fn export(&self, request: &ExportRequest<'_>) -> Result<ExportOutcome, FormatError> {
        let mut result = ExportResult::new();
        let timestamp = request.timestamp();
        let mut coco = CocoDataset::new(request.exported_at.year(), &timestamp);

        let labels = request.label_set.map(|s| s.labels.as_slice()).unwrap_or_default();
        let mut label_to_category: HashMap<&str, u32> = HashMap::with_capacity(labels.len());
        for (idx, label) in labels.iter().enumerate() {
            let id = idx as u32 + 1;
            // first occurrence wins for duplicate ids
            label_to_category.entry(label.id.as_str()).or_insert(id);
            coco.categories.push(CocoCategory {
                id,
                name: label.name.clone(),
                supercategory: "none".into(),
            });
        }

        let mut annotation_id = 1u64;
        for (img_idx, image) in request.images.iter().enumerate() {
            let image_id = img_idx as u64 + 1;
            coco.images.push(CocoImage {
                id: image_id,
                file_name: image.name.clone(),
                width: PLACEHOLDER_DIMENSION,
                height: PLACEHOLDER_DIMENSION,
                date_captured: timestamp.clone(),
            });

            for ann in &image.annotations {
                let Some(&category_id) = label_to_category.get(ann.label_id.as_str()) else {
                    log::warn!(
                        "COCO export: skipping annotation {} with unknown label '{}'",
                        ann.id,
                        ann.label_id
                    );
                    result.add_warning(FormatWarning::unresolved_label(image, &ann.label_id));
                    continue;
                };

                let bbox = ann.bounding_box();
                coco.annotations.push(CocoAnnotation {
                    id: annotation_id,
                    image_id,
                    category_id,
                    bbox: bbox.to_array(),
                    area: bbox.area(),
                    segmentation: Vec::new(),
                    iscrowd: 0,
                });
                annotation_id += 1;
            }
        }

        if !coco.images.is_empty() {
            result.add_warning(FormatWarning::info(
                "Image dimensions are not tracked; width and height are written as 0",
            ));
        }

        result.images_exported = coco.images.len();
        result.annotations_exported = coco.annotations.len();
        let bytes = serde_json::to_vec_pretty(&coco)?;
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

// ============================================================================
// COCO JSON structures
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CocoDataset {
    pub info: CocoInfo,
    pub licenses: Vec<CocoLicense>,
    pub images: Vec<CocoImage>,
    pub annotations: Vec<CocoAnnotation>,
    pub categories: Vec<CocoCategory>,
}

impl CocoDataset {
    fn new(year: i32, date_created: &str) -> Self {
        Self {
            info: CocoInfo {
                year,
                version: "1.0".into(),
                description: "Exported from TagZero".into(),
                contributor: String::new(),
                url: String::new(),
                date_created: date_created.to_string(),
            },
            licenses: Vec::new(),
            images: Vec::new(),
            annotations: Vec::new(),
            categories: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct CocoInfo {
    pub year: i32,
    pub version: String,
    pub description: String,
    pub contributor: String,
    pub url: String,
    pub date_created: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CocoImage {
    pub id: u64,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub date_captured: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CocoAnnotation {
    pub id: u64,
    pub image_id: u64,
    pub category_id: u32,
    /// `[x, y, width, height]`
    pub bbox: [f64; 4],
    pub area: f64,
    pub segmentation: Vec<Vec<f64>>,
    pub iscrowd: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CocoCategory {
    pub id: u32,
    pub name: String,
    pub supercategory: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CocoLicense {
    pub id: u32,
    pub name: String,
    pub url: String,
}
