//! Level and sprite enumeration.

use crate::util::{SpriteMatchError, SpriteMatchResult};
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions accepted as images, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "tif", "gif"];

/// Returns true if `path` has one of [`IMAGE_EXTENSIONS`].
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Lists the regular image files directly inside `dir`, sorted by name.
///
/// Subdirectories (such as the overlay output directory) and files with other
/// extensions are skipped.
pub fn list_images(dir: &Path) -> SpriteMatchResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|err| SpriteMatchError::io(dir, err))?;
    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| SpriteMatchError::io(dir, err))?;
        let path = entry.path();
        let is_file = entry
            .file_type()
            .map_err(|err| SpriteMatchError::io(&path, err))?
            .is_file();
        if is_file && is_image_file(&path) {
            images.push(path);
        }
    }
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

/// File name used as the sprite identifier in annotations.
pub fn sprite_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{is_image_file, sprite_id};
    use std::path::Path;

    #[test]
    fn extension_filter_is_case_insensitive() {
        assert!(is_image_file(Path::new("a/level.PNG")));
        assert!(is_image_file(Path::new("sprite.jpeg")));
        assert!(is_image_file(Path::new("x.tif")));
        assert!(!is_image_file(Path::new("x.tiff")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("png")));
    }

    #[test]
    fn sprite_id_keeps_extension() {
        assert_eq!(sprite_id(Path::new("Sprites/brick.png")), "brick.png");
    }
}
