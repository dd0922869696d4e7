//! Tests for the Pascal VOC XML format.

use super::*;
use crate::format::formats::PascalVocFormat;
use crate::format::traits::{AnnotationFormat, ExportRequest};

fn export_entry(images: &[ImageFile], name: &str) -> String {
    let labels = animals();
    let request = ExportRequest::new(images, Some(&labels)).at(fixed_time());
    let outcome = PascalVocFormat.export(&request).unwrap();
    zip_entry(&outcome.artifact.bytes, name)
}

#[test]
fn test_voc_format_metadata() {
    let format = PascalVocFormat;
    assert_eq!(format.id(), "voc");
    assert!(format.is_archive());
    assert_eq!(
        format.file_name(fixed_time()),
        format!("voc_export_{}.zip", FIXED_MILLIS)
    );
}

#[test]
fn test_voc_bndbox_corners() {
    let xml = export_entry(&single_cat_document(), "cat.xml");

    assert!(xml.starts_with(r#"<?xml version="1.0"?>"#));
    assert!(xml.contains("<filename>cat.jpg</filename>"));
    assert!(xml.contains("<database>TagZero</database>"));
    assert!(xml.contains("<width>0</width>"));
    assert!(xml.contains("<height>0</height>"));
    assert!(xml.contains("<depth>3</depth>"));
    assert!(xml.contains("<name>cat</name>"));
    assert!(xml.contains("<pose>Unspecified</pose>"));
    assert!(xml.contains("<truncated>0</truncated>"));
    assert!(xml.contains("<difficult>0</difficult>"));
    assert!(xml.contains("<xmin>10</xmin>"));
    assert!(xml.contains("<ymin>20</ymin>"));
    assert!(xml.contains("<xmax>40</xmax>"));
    assert!(xml.contains("<ymax>60</ymax>"));
    assert!(xml.trim_end().ends_with("</annotation>"));
}

#[test]
fn test_voc_rounds_corners() {
    let images = vec![ImageFile::new("i", "round.jpg", "").with_annotations(vec![
        Annotation::new(
            "a",
            "l-dog",
            Shape::Rect {
                rect: BoundingBox::new(10.4, 20.5, 30.2, 40.1),
            },
            "#FF0000",
        ),
    ])];
    let xml = export_entry(&images, "round.xml");

    assert!(xml.contains("<xmin>10</xmin>"));
    assert!(xml.contains("<ymin>21</ymin>"));
    // 10.4 + 30.2 = 40.6, 20.5 + 40.1 = 60.6
    assert!(xml.contains("<xmax>41</xmax>"));
    assert!(xml.contains("<ymax>61</ymax>"));
}

#[test]
fn test_voc_skips_unresolved_labels() {
    let xml = export_entry(&mixed_document(), "dogs.xml");
    assert_eq!(xml.matches("<object>").count(), 1);
    assert!(xml.contains("<name>dog</name>"));
}

#[test]
fn test_voc_escapes_text() {
    let images = vec![ImageFile::new("i", "a&b <1>.jpg", "").with_annotations(vec![cat_rect()])];
    let labels = LabelSet::new("s", "S").with_label(LabelItem::new("l-cat", "cats & dogs", "#000000"));
    let request = ExportRequest::new(&images, Some(&labels)).at(fixed_time());
    let outcome = PascalVocFormat.export(&request).unwrap();
    let xml = zip_entry(&outcome.artifact.bytes, "a&b <1>.xml");

    assert!(xml.contains("<filename>a&amp;b &lt;1&gt;.jpg</filename>"));
    assert!(xml.contains("<name>cats &amp; dogs</name>"));
}
