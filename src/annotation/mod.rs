//! Level-editor annotation records.
//!
//! One record per detected sprite, written as whitespace-separated fields.
//! The level loader works in a bottom-left origin, so `y` is flipped from
//! image rows: `world_y = level_height - sprite_height - row`.

mod writer;

pub use writer::{annotation_path, AnnotationWriter};

use crate::candidate::{MatchPoint, MatchSet};
use std::fmt;

/// Line layout expected by the level loader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnnotationFormat {
    /// `sprite x y width height`
    #[default]
    Simple,
    /// `sprite x y z rot_x rot_y rot_z width height depth` with fixed depth
    /// and rotation placeholders, for the 3D block loader.
    Extended,
}

/// One detected sprite in level-editor coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationRecord {
    /// Sprite identifier (file name, including extension).
    pub sprite: String,
    /// Left edge in pixels.
    pub x: usize,
    /// Bottom edge in pixels, measured up from the level's bottom row.
    pub y: usize,
    /// Sprite width at the matched scale.
    pub width: usize,
    /// Sprite height at the matched scale.
    pub height: usize,
}

/// Converts a top-left image row to a bottom-left world coordinate.
pub fn flip_y(level_height: usize, sprite_height: usize, y: usize) -> usize {
    level_height.saturating_sub(sprite_height).saturating_sub(y)
}

impl AnnotationRecord {
    /// Builds a record for `point` in a level of height `level_height`.
    pub fn from_match(
        sprite: &str,
        point: MatchPoint,
        sprite_width: usize,
        sprite_height: usize,
        level_height: usize,
    ) -> Self {
        Self {
            sprite: sprite.to_owned(),
            x: point.x,
            y: flip_y(level_height, sprite_height, point.y),
            width: sprite_width,
            height: sprite_height,
        }
    }

    /// Builds one record per point of `matches`.
    pub fn from_set(sprite: &str, matches: &MatchSet, level_height: usize) -> Vec<Self> {
        matches
            .points
            .iter()
            .map(|&p| {
                Self::from_match(
                    sprite,
                    p,
                    matches.sprite_width,
                    matches.sprite_height,
                    level_height,
                )
            })
            .collect()
    }

    /// Renders the record as one line without the trailing newline.
    pub fn to_line(&self, format: AnnotationFormat) -> String {
        match format {
            AnnotationFormat::Simple => self.to_string(),
            AnnotationFormat::Extended => format!(
                "{} {} {} 0 0 90 0 {} {} {}",
                self.sprite, self.x, self.y, self.width, self.height, self.width
            ),
        }
    }
}

impl fmt::Display for AnnotationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.sprite, self.x, self.y, self.width, self.height
        )
    }
}
