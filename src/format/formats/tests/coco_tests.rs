//! Tests for the COCO JSON format.

use super::*;
use crate::format::formats::CocoFormat;
use crate::format::traits::{AnnotationFormat, ExportRequest, WarningSeverity};

fn export_value(images: &[ImageFile], labels: Option<&LabelSet>) -> (serde_json::Value, usize) {
    let request = ExportRequest::new(images, labels).at(fixed_time());
    let outcome = CocoFormat.export(&request).unwrap();
    let value = serde_json::from_slice(&outcome.artifact.bytes).unwrap();
    (value, outcome.result.warnings.len())
}

#[test]
fn test_coco_format_metadata() {
    let format = CocoFormat;
    assert_eq!(format.id(), "coco");
    assert_eq!(format.display_name(), "COCO (JSON)");
    assert_eq!(
        format.file_name(fixed_time()),
        format!("coco_export_{}.json", FIXED_MILLIS)
    );
}

#[test]
fn test_coco_single_rect() {
    let labels = animals();
    let (value, _) = export_value(&single_cat_document(), Some(&labels));

    let anns = value["annotations"].as_array().unwrap();
    assert_eq!(anns.len(), 1);
    assert_eq!(anns[0]["bbox"], serde_json::json!([10.0, 20.0, 30.0, 40.0]));
    assert_eq!(anns[0]["area"], 1200.0);
    assert_eq!(anns[0]["id"], 1);
    assert_eq!(anns[0]["image_id"], 1);
    assert_eq!(anns[0]["category_id"], 1);
    assert_eq!(anns[0]["iscrowd"], 0);
    assert!(anns[0]["segmentation"].as_array().unwrap().is_empty());
}

#[test]
fn test_coco_header_and_images() {
    let labels = animals();
    let (value, _) = export_value(&mixed_document(), Some(&labels));

    let info = &value["info"];
    assert_eq!(info["year"], 2024);
    assert_eq!(info["version"], "1.0");
    assert_eq!(info["description"], "Exported from TagZero");
    assert_eq!(info["date_created"], "2024-01-02T03:04:05.000Z");
    assert!(value["licenses"].as_array().unwrap().is_empty());

    let images = value["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[1]["id"], 2);
    assert_eq!(images[1]["file_name"], "dogs.png");
    assert_eq!(images[1]["width"], 0);
    assert_eq!(images[1]["height"], 0);
}

#[test]
fn test_coco_categories_follow_label_order() {
    let labels = animals();
    let (value, _) = export_value(&[], Some(&labels));

    let cats = value["categories"].as_array().unwrap();
    assert_eq!(cats.len(), 2);
    assert_eq!(cats[0]["id"], 1);
    assert_eq!(cats[0]["name"], "cat");
    assert_eq!(cats[1]["id"], 2);
    assert_eq!(cats[1]["name"], "dog");
    assert_eq!(cats[1]["supercategory"], "none");
}

#[test]
fn test_coco_skips_unresolved_labels() {
    let images = mixed_document();
    let labels = animals();
    let request = ExportRequest::new(&images, Some(&labels)).at(fixed_time());
    let outcome = CocoFormat.export(&request).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&outcome.artifact.bytes).unwrap();

    let anns = value["annotations"].as_array().unwrap();
    assert_eq!(anns.len(), 2);
    // polygon reduced to its bounds, ids stay sequential across images
    assert_eq!(anns[1]["id"], 2);
    assert_eq!(anns[1]["image_id"], 2);
    assert_eq!(anns[1]["category_id"], 2);
    assert_eq!(anns[1]["bbox"], serde_json::json!([100.0, 50.0, 60.0, 40.0]));
    assert_eq!(anns[1]["area"], 2400.0);

    let skipped: Vec<_> = outcome
        .result
        .warnings
        .iter()
        .filter(|w| w.severity == WarningSeverity::Warning)
        .collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].image.as_deref(), Some("dogs.png"));
    assert_eq!(outcome.result.annotations_exported, 2);
}

#[test]
fn test_coco_without_label_set_exports_no_annotations() {
    let (value, warnings) = export_value(&single_cat_document(), None);
    assert!(value["categories"].as_array().unwrap().is_empty());
    assert!(value["annotations"].as_array().unwrap().is_empty());
    assert_eq!(value["images"].as_array().unwrap().len(), 1);
    // one skipped annotation plus the dimensions note
    assert_eq!(warnings, 2);
}
