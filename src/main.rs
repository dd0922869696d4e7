//! Re-export a native TagZero document into another format.
//!
//! Usage: `tagzero-convert <native.json> <format> [out_dir]`

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tagzero::config::EditorConfig;
use tagzero::format::{FormatError, FormatRegistry, NativeDocument, WarningSeverity, export_to_dir};

#[tokio::main]
async fn main() -> ExitCode {
    let config = EditorConfig::load_or_default(Path::new(EditorConfig::default_filename()));
    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <native.json> <format> [out_dir]\nFormats: {}",
            args.first().map(String::as_str).unwrap_or("tagzero-convert"),
            FormatRegistry::new().ids().join(", ")
        );
        return ExitCode::FAILURE;
    }

    let out_dir = match args.get(3) {
        Some(dir) => PathBuf::from(dir),
        None if !config.export_folder.is_empty() => PathBuf::from(&config.export_folder),
        None => PathBuf::from("."),
    };

    match convert(Path::new(&args[1]), &args[2], &out_dir).await {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Conversion failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn convert(input: &Path, format: &str, out_dir: &Path) -> Result<PathBuf, FormatError> {
    let json = tokio::fs::read_to_string(input).await?;
    let (images, label_set) = NativeDocument::from_json(&json)?.into_parts();
    log::info!("Read {} images from {}", images.len(), input.display());

    let (path, outcome) = export_to_dir(format, &images, label_set.as_ref(), out_dir).await?;
    for warning in &outcome.result.warnings {
        let image = warning.image.as_deref().unwrap_or("-");
        match warning.severity {
            WarningSeverity::Info => log::info!("[{}] {}", image, warning.message),
            WarningSeverity::Warning => log::warn!("[{}] {}", image, warning.message),
        }
    }
    Ok(path)
}
