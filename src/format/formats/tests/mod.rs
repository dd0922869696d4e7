//! Unit tests for export format implementations.
//!
//! Every format is exercised against the same small document so results can
//! be compared across formats.

mod coco_tests;
mod pascal_voc_tests;

use std::io::{Cursor, Read};

use chrono::{DateTime, TimeZone, Utc};
use zip::ZipArchive;

use crate::geometry::BoundingBox;
use crate::model::{Annotation, ImageFile, LabelItem, LabelSet, Shape};

/// 2024-01-02T03:04:05Z
fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
}

const FIXED_MILLIS: i64 = 1_704_164_645_000;

fn animals() -> LabelSet {
    LabelSet::new("set-1", "Animals")
        .with_label(LabelItem::new("l-cat", "cat", "#FF0000"))
        .with_label(LabelItem::new("l-dog", "dog", "#00FF00"))
}

fn cat_rect() -> Annotation {
    Annotation::new(
        "a1",
        "l-cat",
        Shape::Rect {
            rect: BoundingBox::new(10.0, 20.0, 30.0, 40.0),
        },
        "#FF0000",
    )
}

/// One image holding a single "cat" rectangle at (10, 20, 30, 40).
fn single_cat_document() -> Vec<ImageFile> {
    vec![ImageFile::new("img-1", "cat.jpg", "blob:1").with_annotations(vec![cat_rect()])]
}

/// Two images: the cat rectangle, then a dog polygon plus a circle whose
/// label id does not resolve.
fn mixed_document() -> Vec<ImageFile> {
    vec![
        ImageFile::new("img-1", "cat.jpg", "blob:1").with_annotations(vec![cat_rect()]),
        ImageFile::new("img-2", "dogs.png", "blob:2").with_annotations(vec![
            Annotation::new(
                "a2",
                "l-dog",
                Shape::Polygon {
                    points: vec![100.0, 50.0, 160.0, 50.0, 130.0, 90.0],
                },
                "#00FF00",
            ),
            Annotation::new(
                "a3",
                "l-gone",
                Shape::Circle {
                    rect: BoundingBox::new(0.0, 0.0, 8.0, 8.0),
                    radius: Some(4.0),
                },
                "#0000FF",
            ),
        ]),
    ]
}

fn zip_entries(bytes: &[u8]) -> Vec<String> {
    let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(str::to_string).collect()
}

fn zip_entry(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}
