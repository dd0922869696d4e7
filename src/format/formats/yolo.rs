//! YOLO TXT format implementation.
//!
//! Produces a zip with `classes.txt` plus one `<stem>.txt` per image. Each
//! line is `class cx cy w h` taken from the annotation's bounding box.
//!
//! Coordinates are in image pixels, not normalized to 0..1: normalizing needs
//! the image size, which the document does not track. Consumers expecting
//! standard YOLO must divide by the image width and height themselves.

use crate::format::archive::ArchiveBuilder;
use crate::format::error::FormatError;
use crate::format::traits::{
    AnnotationFormat, ExportArtifact, ExportOutcome, ExportRequest, ExportResult, FormatWarning,
};
use crate::model::{Annotation, ImageFile, LabelSet};

/// YOLO TXT format (zip archive).
pub struct YoloFormat;

impl AnnotationFormat for YoloFormat {
    fn id(&self) -> &'static str {
        "yolo"
    }

    fn display_name(&self) -> &'static str {
        "YOLO (TXT, zip)"
    }

    fn extension(&self) -> &'static str {
        "zip"
    }

    fn file_prefix(&self) -> &'static str {
        "yolo_export"
    }

    fn export(&self, request: &ExportRequest<'_>) -> Result<ExportOutcome, FormatError> {
        let mut result = ExportResult::new();
        let mut archive = ArchiveBuilder::new();

        archive.add_file("classes.txt", classes_txt(request.label_set).as_bytes())?;

        for image in request.images {
            let content = self.image_txt(image, request.label_set, &mut result);
            archive.add_image_file(image, "txt", content.as_bytes(), &mut result.warnings)?;
        }
        result.images_exported = request.images.len();

        result.add_warning(FormatWarning::info(
            "YOLO coordinates are in pixels; image dimensions are not tracked so they are not normalized",
        ));

        let (bytes, entries) = archive.finish()?;
        result.files_created = entries;
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

impl YoloFormat {
    /// Lines for one image, each terminated by a newline.
    fn image_txt(
        &self,
        image: &ImageFile,
        label_set: Option<&LabelSet>,
        result: &mut ExportResult,
    ) -> String {
        let mut content = String::new();
        for ann in &image.annotations {
            let Some(class_idx) = label_set.and_then(|set| set.index_of(&ann.label_id)) else {
                log::warn!(
                    "YOLO export: skipping annotation {} with unknown label '{}'",
                    ann.id,
                    ann.label_id
                );
                result.add_warning(FormatWarning::unresolved_label(image, &ann.label_id));
                continue;
            };
            content.push_str(&yolo_line(class_idx, ann));
            content.push('\n');
            result.annotations_exported += 1;
        }
        content
    }
}

/// Label names in set order, newline separated with no trailing newline.
fn classes_txt(label_set: Option<&LabelSet>) -> String {
    label_set
        .map(|set| {
            set.labels
                .iter()
                .map(|l| l.name.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}

/// `class cx cy w h` for one annotation, in pixels.
pub(crate) fn yolo_line(class_idx: usize, ann: &Annotation) -> String {
    let bbox = ann.bounding_box();
    format!(
        "{} {} {} {} {}",
        class_idx,
        bbox.center_x(),
        bbox.center_y(),
        bbox.width,
        bbox.height
    )
}
