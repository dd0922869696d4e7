//! Annotation export system.
//!
//! A trait-based set of exporters sharing one geometric normalization: every
//! shape is reduced to its axis-aligned bounding box before serialization.
//!
//! ## Supported Formats
//!
//! - **TagZero JSON** (`tagzero`, alias `native`): full document, readable back
//! - **COCO JSON** (`coco`): boxes only, placeholder image sizes
//! - **YOLO TXT** (`yolo`): zip of per-image files, pixel coordinates
//! - **Pascal VOC XML** (`voc`): zip of per-image XML documents
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tagzero::format::{export, ExportRequest};
//!
//! let request = ExportRequest::new(&images, Some(&label_set));
//! let outcome = export("coco", &request)?;
//! std::fs::write(&outcome.artifact.file_name, &outcome.artifact.bytes)?;
//! ```

mod archive;
mod error;
mod export;
pub mod formats;
mod registry;
mod traits;

pub use error::FormatError;
pub use export::{export, export_to_dir, write_artifact};
pub use formats::NativeDocument;
pub use registry::FormatRegistry;
pub use traits::{
    AnnotationFormat, ExportArtifact, ExportOutcome, ExportRequest, ExportResult, FormatWarning,
    WarningSeverity,
};
