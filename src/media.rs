//! Storage of uploaded item images under the media root.

use std::fs;
use std::io;
use std::path::Path;

use actix_multipart::form::tempfile::TempFile;

/// Relative path of an item image: `<slug>/<slug>.<ext>`.
///
/// The extension is the segment after the first dot of the uploaded name;
/// names without a dot get no extension.
pub fn item_image_path(slug: &str, file_name: &str) -> String {
    match file_name.split('.').nth(1).filter(|ext| !ext.is_empty()) {
        Some(ext) => format!("{slug}/{slug}.{}", ext.to_ascii_lowercase()),
        None => format!("{slug}/{slug}"),
    }
}

/// Copy an uploaded image into `media_root` and return its relative path.
///
/// Empty uploads (a file input left blank) are ignored and yield `None`.
pub fn store_item_image(
    media_root: &Path,
    slug: &str,
    upload: &TempFile,
) -> io::Result<Option<String>> {
    if upload.size == 0 {
        return Ok(None);
    }

    let file_name = upload.file_name.as_deref().unwrap_or_default();
    let relative = item_image_path(slug, file_name);
    let destination = media_root.join(&relative);

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(upload.file.path(), &destination)?;

    log::info!("Stored image for item `{slug}` at {}", destination.display());

    Ok(Some(relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::{NamedTempFile, tempdir};

    fn upload(name: Option<&str>, contents: &[u8]) -> TempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(contents).expect("write upload");

        TempFile {
            file,
            content_type: None,
            file_name: name.map(str::to_string),
            size: contents.len(),
        }
    }

    #[test]
    fn item_image_path_uses_slug_folder() {
        assert_eq!(item_image_path("chaj", "photo.JPG"), "chaj/chaj.jpg");
        assert_eq!(item_image_path("chaj", "photo.tar.gz"), "chaj/chaj.tar");
        assert_eq!(item_image_path("chaj", "photo"), "chaj/chaj");
        assert_eq!(item_image_path("chaj", "photo."), "chaj/chaj");
    }

    #[test]
    fn store_item_image_copies_upload() {
        let media_root = tempdir().expect("create media root");
        let image = upload(Some("cup.png"), b"png-bytes");

        let stored = store_item_image(media_root.path(), "kruzhka", &image)
            .expect("store image")
            .expect("image path");

        assert_eq!(stored, "kruzhka/kruzhka.png");
        let written = fs::read(media_root.path().join(&stored)).expect("read stored image");
        assert_eq!(written, b"png-bytes");
    }

    #[test]
    fn store_item_image_skips_empty_upload() {
        let media_root = tempdir().expect("create media root");
        let image = upload(Some(""), b"");

        let stored = store_item_image(media_root.path(), "kruzhka", &image).expect("store image");

        assert!(stored.is_none());
        assert!(!media_root.path().join("kruzhka").exists());
    }
}
