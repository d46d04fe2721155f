//! Directory layout for levels, sprites and annotation output.

use crate::util::{SpriteMatchError, SpriteMatchResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the overlay output directory inside the levels directory.
pub const TEMPLATES_DIR: &str = "Templates";

/// Which directory skeleton to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutKind {
    /// Unity project: `Assets/Resources/{Levels,Sprites}` and `Assets/Data`.
    #[default]
    Unity,
    /// Bare working directory: `Levels`, `Sprites`, `Data`.
    Standalone,
}

/// Resolved input and output directories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Directory of level images.
    pub levels: PathBuf,
    /// Directory of sprite images.
    pub sprites: PathBuf,
    /// Directory for annotation text files.
    pub data: PathBuf,
}

impl ProjectLayout {
    /// Default directories for `kind` under `root`.
    pub fn new(root: &Path, kind: LayoutKind) -> Self {
        match kind {
            LayoutKind::Unity => {
                let resources = root.join("Assets").join("Resources");
                Self {
                    levels: resources.join("Levels"),
                    sprites: resources.join("Sprites"),
                    data: root.join("Assets").join("Data"),
                }
            }
            LayoutKind::Standalone => Self {
                levels: root.join("Levels"),
                sprites: root.join("Sprites"),
                data: root.join("Data"),
            },
        }
    }

    /// Overlay output directory, `{levels}/Templates`.
    pub fn templates(&self) -> PathBuf {
        self.levels.join(TEMPLATES_DIR)
    }

    /// Creates every directory of the layout that does not exist yet.
    pub fn ensure(&self) -> SpriteMatchResult<()> {
        for dir in [&self.levels, &self.templates(), &self.sprites, &self.data] {
            fs::create_dir_all(dir).map_err(|err| SpriteMatchError::io(dir, err))?;
        }
        Ok(())
    }
}
