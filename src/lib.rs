//! TagZero - annotation editor core
//!
//! The document model, undo history, alignment engine and export pipeline
//! behind an image annotation editor. Rendering and input handling live in
//! the host; this crate only exposes commands and data.

pub mod alignment;
pub mod config;
pub mod constants;
pub mod format;
pub mod geometry;
pub mod labels;
pub mod model;
pub mod state;
pub mod undo;

pub use alignment::Aligner;
pub use config::EditorConfig;
pub use format::{ExportRequest, FormatError, FormatRegistry};
pub use labels::LabelLibrary;
pub use state::EditorSession;
