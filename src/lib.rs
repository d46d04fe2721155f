//! spritematch locates sprite images inside level images and writes
//! bounding-box annotations for a level editor.
//!
//! Matching is brute-force normalized cross-correlation with first-seen
//! overlap suppression. When a sprite is not found at its native size, an
//! optional linear width sweep retries it at every scale that fits.

pub mod annotation;
pub mod assets;
pub mod candidate;
pub mod image;
pub mod kernel;
pub mod layout;
pub mod search;
pub mod template;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use annotation::{AnnotationFormat, AnnotationRecord, AnnotationWriter};
pub use candidate::{MatchPoint, MatchSet, Suppression};
pub use crate::image::{ImageView, OwnedImage};
pub use kernel::{IntegralImage, Kernel, ResponseMap};
pub use layout::{LayoutKind, ProjectLayout};
pub use search::{
    select_best, Located, MatchConfig, Matcher, Metric, MultiscaleConfig, ScaleCandidate,
};
pub use template::TemplatePlan;
pub use util::{SpriteMatchError, SpriteMatchResult};
