//! Zip packaging for per-image formats.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::format::error::FormatError;
use crate::format::traits::FormatWarning;
use crate::model::ImageFile;

/// In-memory zip builder with flat, collision-free entry names.
pub(crate) struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    used: HashSet<String>,
    entries: Vec<String>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            used: HashSet::new(),
            entries: Vec::new(),
        }
    }

    /// Add a file under a fixed name (e.g. `classes.txt`).
    pub fn add_file(&mut self, name: &str, contents: &[u8]) -> Result<(), FormatError> {
        self.writer.start_file(name, self.options)?;
        self.writer.write_all(contents)?;
        self.used.insert(name.to_string());
        self.entries.push(name.to_string());
        Ok(())
    }

    /// Add the per-image file for `image`, returning the entry name used.
    ///
    /// The name is the image stem plus `extension`. If another image already
    /// claimed it, the image id is appended to the stem and a warning is
    /// recorded instead of overwriting the earlier entry.
    pub fn add_image_file(
        &mut self,
        image: &ImageFile,
        extension: &str,
        contents: &[u8],
        warnings: &mut Vec<FormatWarning>,
    ) -> Result<String, FormatError> {
        let stem = image.stem();
        let mut name = format!("{}.{}", stem, extension);

        if self.used.contains(&name) {
            let mut candidate = format!("{}_{}.{}", stem, image.id, extension);
            let mut n = 1;
            while self.used.contains(&candidate) {
                candidate = format!("{}_{}_{}.{}", stem, image.id, n, extension);
                n += 1;
            }
            log::warn!("Archive entry '{}' already used, writing '{}'", name, candidate);
            warnings.push(
                FormatWarning::warning(format!(
                    "File name '{}' collides with another image, exported as '{}'",
                    name, candidate
                ))
                .with_image(&image.name),
            );
            name = candidate;
        }

        self.add_file(&name, contents)?;
        Ok(name)
    }

    /// Finish the archive, returning its bytes and the entry names in order.
    pub fn finish(self) -> Result<(Vec<u8>, Vec<String>), FormatError> {
        let cursor = self.writer.finish()?;
        Ok((cursor.into_inner(), self.entries))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;

    #[test]
    fn test_colliding_stems_are_disambiguated() {
        let mut warnings = Vec::new();
        let mut archive = ArchiveBuilder::new();

        let a = ImageFile::new("img-1", "photo.jpg", "");
        let b = ImageFile::new("img-2", "photo.png", "");
        assert_eq!(
            archive.add_image_file(&a, "txt", b"a", &mut warnings).unwrap(),
            "photo.txt"
        );
        assert_eq!(
            archive.add_image_file(&b, "txt", b"b", &mut warnings).unwrap(),
            "photo_img-2.txt"
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].image.as_deref(), Some("photo.png"));

        let (bytes, entries) = archive.finish().unwrap();
        assert_eq!(entries, vec!["photo.txt", "photo_img-2.txt"]);

        let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut content = String::new();
        zip.by_name("photo_img-2.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "b");
    }
}
