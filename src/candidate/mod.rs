//! Match candidates and overlap suppression.

pub(crate) mod overlap;

pub use overlap::{overlaps, suppress, Suppression};

/// Top-left corner of a detected sprite occurrence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchPoint {
    /// Column of the sprite's top-left pixel.
    pub x: usize,
    /// Row of the sprite's top-left pixel.
    pub y: usize,
    /// Correlation score at this placement.
    pub score: f32,
}

/// Deduplicated detections of one sprite at one scale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchSet {
    /// Sprite width at the matched scale.
    pub sprite_width: usize,
    /// Sprite height at the matched scale.
    pub sprite_height: usize,
    /// Retained points, no two of which overlap.
    pub points: Vec<MatchPoint>,
}

impl MatchSet {
    /// Creates an empty set for a sprite of the given size.
    pub fn empty(sprite_width: usize, sprite_height: usize) -> Self {
        Self {
            sprite_width,
            sprite_height,
            points: Vec::new(),
        }
    }

    /// Number of retained detections.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when nothing was detected.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
