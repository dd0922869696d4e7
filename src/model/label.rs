//! Label definitions used to classify annotations.

use serde::{Deserialize, Serialize};

use crate::constants::UNKNOWN_LABEL;

/// Palette offered for new labels and annotations.
///
/// High contrast colours come first, followed by hue families.
pub const PRESET_COLORS: &[&str] = &[
    "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#00FFFF", "#FF00FF", "#FFA500", "#800080",
    "#FF1493", "#00FA9A", "#1E90FF", "#FFD700", "#FF4500", "#DA70D6", "#87CEEB", "#32CD32",
    "#F08080", "#40E0D0",
    // reds / pinks
    "#DC143C", "#B22222", "#8B0000", "#FF69B4", "#C71585", "#DB7093",
    // oranges / yellows
    "#FF8C00", "#F0E68C", "#BDB76B", "#EEE8AA",
    // greens
    "#008000", "#006400", "#90EE90", "#20B2AA", "#2E8B57",
    // cyans / blues
    "#00CED1", "#4682B4", "#0000CD", "#000080",
    // purples
    "#8A2BE2", "#9400D3", "#9932CC", "#BA55D3", "#EE82EE", "#483D8B",
    // browns
    "#A52A2A", "#8B4513", "#D2691E", "#CD853F", "#F4A460", "#DEB887", "#D2B48C", "#BC8F8F",
    // grays
    "#808080", "#A9A9A9", "#C0C0C0", "#D3D3D3", "#708090", "#2F4F4F", "#556B2F", "#6B8E23",
    // pastels
    "#FF7F50", "#FA8072", "#E9967A", "#FF6347", "#FFDAB9", "#FFE4B5", "#F0FFF0", "#F0F8FF",
];

/// A single label definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelItem {
    /// Join key referenced by `Annotation::label_id`
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional free-form value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Display colour (`#rrggbb`)
    pub color: String,
}

impl LabelItem {
    /// Create a new label.
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: None,
            color: color.into(),
        }
    }

    /// Attach a value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// A named, ordered collection of labels.
///
/// Order matters: it defines class indices for YOLO (0-based) and category
/// ids for COCO (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSet {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_image: Option<String>,
    #[serde(default)]
    pub labels: Vec<LabelItem>,
}

impl LabelSet {
    /// Create an empty label set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            preset_image: None,
            labels: Vec::new(),
        }
    }

    /// Append a label (builder style).
    pub fn with_label(mut self, label: LabelItem) -> Self {
        self.labels.push(label);
        self
    }

    /// Look up a label by id.
    pub fn find(&self, label_id: &str) -> Option<&LabelItem> {
        self.labels.iter().find(|l| l.id == label_id)
    }

    /// Zero-based position of a label id.
    pub fn index_of(&self, label_id: &str) -> Option<usize> {
        self.labels.iter().position(|l| l.id == label_id)
    }

    /// Resolved label name, or `"Unknown"` for a dangling id.
    pub fn name_of(&self, label_id: &str) -> &str {
        self.find(label_id)
            .map(|l| l.name.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Overlay a partial update. The id never changes.
    pub fn apply(&mut self, patch: LabelSetPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(preset_image) = patch.preset_image {
            self.preset_image = preset_image;
        }
        if let Some(labels) = patch.labels {
            self.labels = labels;
        }
    }
}

/// Partial label set fields for `LabelLibrary::update_label_set`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSetPatch {
    pub name: Option<String>,
    /// `Some(None)` clears the preset image.
    pub preset_image: Option<Option<String>>,
    pub labels: Option<Vec<LabelItem>>,
}
