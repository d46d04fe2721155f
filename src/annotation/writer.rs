//! Per-level annotation file.

use crate::annotation::{AnnotationFormat, AnnotationRecord};
use crate::util::{SpriteMatchError, SpriteMatchResult};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Annotation file for a level: `{data_dir}/{level_stem}.txt`.
pub fn annotation_path(data_dir: &Path, level_file: &Path) -> PathBuf {
    let stem = level_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    data_dir.join(format!("{stem}.txt"))
}

/// Appends annotation records to one level's file.
///
/// Creating the writer resets the file to empty; every later `append`
/// adds to it.
#[derive(Debug)]
pub struct AnnotationWriter {
    path: PathBuf,
    format: AnnotationFormat,
}

impl AnnotationWriter {
    /// Resets (or creates) the file at `path`.
    pub fn create(path: PathBuf, format: AnnotationFormat) -> SpriteMatchResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| SpriteMatchError::io(parent, err))?;
        }
        File::create(&path).map_err(|err| SpriteMatchError::io(&path, err))?;
        Ok(Self { path, format })
    }

    /// Resets the annotation file for `level_file` inside `data_dir`.
    pub fn for_level(
        data_dir: &Path,
        level_file: &Path,
        format: AnnotationFormat,
    ) -> SpriteMatchResult<Self> {
        Self::create(annotation_path(data_dir, level_file), format)
    }

    /// Path of the annotation file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one line per record.
    pub fn append(&self, records: &[AnnotationRecord]) -> SpriteMatchResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|err| SpriteMatchError::io(&self.path, err))?;
        let mut out = BufWriter::new(file);
        for record in records {
            writeln!(out, "{}", record.to_line(self.format))
                .map_err(|err| SpriteMatchError::io(&self.path, err))?;
        }
        out.flush().map_err(|err| SpriteMatchError::io(&self.path, err))
    }
}

#[cfg(test)]
mod tests {
    use super::annotation_path;
    use std::path::Path;

    #[test]
    fn path_uses_level_stem() {
        let path = annotation_path(Path::new("Data"), Path::new("Levels/world-1.png"));
        assert_eq!(path, Path::new("Data/world-1.txt"));
    }
}
