//! Pascal VOC XML format implementation.
//!
//! One minimal VOC annotation document per image, packaged as a zip. Box
//! corners are rounded to integers; image size is a placeholder.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::constants::PLACEHOLDER_DIMENSION;
use crate::format::archive::ArchiveBuilder;
use crate::format::error::FormatError;
use crate::format::traits::{
    AnnotationFormat, ExportArtifact, ExportOutcome, ExportRequest, ExportResult, FormatWarning,
};
use crate::geometry::BoundingBox;
use crate::model::{ImageFile, LabelSet};

/// Pascal VOC XML format (zip archive).
pub struct PascalVocFormat;

impl AnnotationFormat for PascalVocFormat {
    fn id(&self) -> &'static str {
        "voc"
    }

    fn display_name(&self) -> &'static str {
        "Pascal VOC (XML, zip)"
    }

    fn extension(&self) -> &'static str {
        "zip"
    }

    fn file_prefix(&self) -> &'static str {
        "voc_export"
    }

    fn export(&self, request: &ExportRequest<'_>) -> Result<ExportOutcome, FormatError> {
        let mut result = ExportResult::new();
        let mut archive = ArchiveBuilder::new();

        for image in request.images {
            let xml = self.build_xml(image, request.label_set, &mut result)?;
            archive.add_image_file(image, "xml", &xml, &mut result.warnings)?;
        }
        result.images_exported = request.images.len();

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

impl PascalVocFormat {
    /// Build the XML document for an image.
    fn build_xml(
        &self,
        image: &ImageFile,
        label_set: Option<&LabelSet>,
        result: &mut ExportResult,
    ) -> Result<Vec<u8>, FormatError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
            .map_err(|e| FormatError::Xml(e.into()))?;
        self.start(&mut writer, "annotation")?;

        self.write_text_element(&mut writer, "filename", &image.name)?;

        self.start(&mut writer, "source")?;
        self.write_text_element(&mut writer, "database", "TagZero")?;
        self.end(&mut writer, "source")?;

        self.start(&mut writer, "size")?;
        let placeholder = PLACEHOLDER_DIMENSION.to_string();
        self.write_text_element(&mut writer, "width", &placeholder)?;
        self.write_text_element(&mut writer, "height", &placeholder)?;
        self.write_text_element(&mut writer, "depth", "3")?;
        self.end(&mut writer, "size")?;

        for ann in &image.annotations {
            let Some(label) = label_set.and_then(|set| set.find(&ann.label_id)) else {
                log::warn!(
                    "VOC export: skipping annotation {} with unknown label '{}'",
                    ann.id,
                    ann.label_id
                );
                result.add_warning(FormatWarning::unresolved_label(image, &ann.label_id));
                continue;
            };

            self.start(&mut writer, "object")?;
            self.write_text_element(&mut writer, "name", &label.name)?;
            self.write_text_element(&mut writer, "pose", "Unspecified")?;
            self.write_text_element(&mut writer, "truncated", "0")?;
            self.write_text_element(&mut writer, "difficult", "0")?;
            self.write_bndbox(&mut writer, &ann.bounding_box())?;
            self.end(&mut writer, "object")?;

            result.annotations_exported += 1;
        }

        self.end(&mut writer, "annotation")?;
        Ok(writer.into_inner())
    }

    fn write_bndbox<W: Write>(
        &self,
        writer: &mut Writer<W>,
        bbox: &BoundingBox,
    ) -> Result<(), FormatError> {
        self.start(writer, "bndbox")?;
        self.write_text_element(writer, "xmin", &round_half_up(bbox.x).to_string())?;
        self.write_text_element(writer, "ymin", &round_half_up(bbox.y).to_string())?;
        self.write_text_element(writer, "xmax", &round_half_up(bbox.right()).to_string())?;
        self.write_text_element(writer, "ymax", &round_half_up(bbox.bottom()).to_string())?;
        self.end(writer, "bndbox")
    }

    fn start<W: Write>(&self, writer: &mut Writer<W>, name: &str) -> Result<(), FormatError> {
        writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(|e| FormatError::Xml(e.into()))
    }

    fn end<W: Write>(&self, writer: &mut Writer<W>, name: &str) -> Result<(), FormatError> {
        writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(|e| FormatError::Xml(e.into()))
    }

    /// Write a simple text element. The value is escaped.
    fn write_text_element<W: Write>(
        &self,
        writer: &mut Writer<W>,
        name: &str,
        value: &str,
    ) -> Result<(), FormatError> {
        self.start(writer, name)?;
        writer
            .write_event(Event::Text(BytesText::new(value)))
            .map_err(|e| FormatError::Xml(e.into()))?;
        self.end(writer, name)
    }
}

/// Round to the nearest integer, halves toward positive infinity
/// (`2.5 -> 3`, `-2.5 -> -2`).
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
