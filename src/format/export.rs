//! Export entry points.

use std::path::{Path, PathBuf};

use web_time::Instant;

use crate::format::error::FormatError;
use crate::format::registry::FormatRegistry;
use crate::format::traits::{ExportArtifact, ExportOutcome, ExportRequest};
use crate::model::{ImageFile, LabelSet};

/// Export a document in the format with id `format_id`.
///
/// Unknown ids fail with [`FormatError::UnsupportedFormat`] before anything is
/// produced. Data problems never fail; they come back as warnings.
pub fn export(format_id: &str, request: &ExportRequest<'_>) -> Result<ExportOutcome, FormatError> {
    let registry = FormatRegistry::new();
    let format = registry.resolve(format_id)?;

    let start = Instant::now();
    let outcome = format.export(request)?;
    log::debug!(
        "{} export of {} images took {:?}",
        format.display_name(),
        request.images.len(),
        start.elapsed()
    );
    Ok(outcome)
}

/// Save an artifact under `dir` using its file name, creating `dir` if needed.
pub async fn write_artifact(artifact: &ExportArtifact, dir: &Path) -> Result<PathBuf, FormatError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(&artifact.file_name);
    tokio::fs::write(&path, &artifact.bytes).await?;
    log::info!("Wrote {} ({} bytes)", path.display(), artifact.bytes.len());
    Ok(path)
}

/// Export and save in one step.
///
/// The inputs are copied before the first suspension point, so later edits
/// to the live document cannot leak into an export already in flight.
/// Serialization and zipping run on the blocking pool.
pub async fn export_to_dir(
    format_id: &str,
    images: &[ImageFile],
    label_set: Option<&LabelSet>,
    dir: &Path,
) -> Result<(PathBuf, ExportOutcome), FormatError> {
    let format_id = format_id.to_string();
    let images = images.to_vec();
    let label_set = label_set.cloned();

    let outcome = tokio::task::spawn_blocking(move || {
        let request = ExportRequest::new(&images, label_set.as_ref());
        export(&format_id, &request)
    })
    .await??;

    let path = write_artifact(&outcome.artifact, dir).await?;
    Ok((path, outcome))
}
