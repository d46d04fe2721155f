//! Linear width sweep over resized sprites.
//!
//! Each step `i` in `min_width..level_width` resizes the sprite by
//! `i / sprite_width` and runs native-scale matching on the result. The
//! sweep stops at the first scale whose sprite no longer fits strictly
//! inside the level. The level's window sums are shared by every step.

use crate::candidate::MatchSet;
use crate::image::resize::{resize_scaled, scaled_dims};
use crate::image::OwnedImage;
use crate::kernel::IntegralImage;
use crate::search::{single, MatchConfig, MultiscaleConfig};
use crate::trace::{trace_event, trace_span};
use crate::util::{SpriteMatchError, SpriteMatchResult};
use crate::ImageView;

/// One evaluated step of the width sweep.
#[derive(Clone, Debug)]
pub struct ScaleCandidate {
    /// Scale factor relative to the native sprite.
    pub scale: f64,
    /// Sprite resized to `scale`.
    pub sprite: OwnedImage,
    /// Matches found with the resized sprite.
    pub matches: MatchSet,
}

impl ScaleCandidate {
    /// Number of matches at this scale.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// Picks the candidate with the most matches; equal counts go to the
/// smallest scale.
pub fn select_best<I>(candidates: I) -> Option<ScaleCandidate>
where
    I: IntoIterator<Item = ScaleCandidate>,
{
    candidates.into_iter().fold(None, |best, cand| match best {
        Some(b)
            if b.match_count() > cand.match_count()
                || (b.match_count() == cand.match_count() && b.scale <= cand.scale) =>
        {
            Some(b)
        }
        _ => Some(cand),
    })
}

pub(crate) fn sweep_scales(
    level: ImageView<'_, u8>,
    sums: &IntegralImage,
    sprite: ImageView<'_, u8>,
    cfg: &MatchConfig,
    ms: &MultiscaleConfig,
) -> SpriteMatchResult<Vec<ScaleCandidate>> {
    if ms.step == 0 {
        return Err(SpriteMatchError::InvalidInput("multiscale step must be positive"));
    }
    if ms.min_width == 0 {
        return Err(SpriteMatchError::InvalidInput("multiscale min_width must be positive"));
    }
    let _span = trace_span!(
        "sweep_scales",
        level_width = level.width(),
        sprite_width = sprite.width()
    )
    .entered();

    let last = ms
        .max_width
        .map_or(level.width(), |max| max.saturating_add(1).min(level.width()));
    let native_width = sprite.width() as f64;
    let mut out = Vec::new();
    for width in (ms.min_width..last).step_by(ms.step) {
        let scale = width as f64 / native_width;
        let (w, h) = scaled_dims(sprite.width(), sprite.height(), scale);
        if w >= level.width() || h >= level.height() {
            trace_event!("sweep_abort", width = w, height = h);
            break;
        }

        let resized = resize_scaled(sprite, scale)?;
        let matches = single::match_single(level, sums, resized.view(), cfg)?;
        trace_event!("sweep_step", scale = scale, matches = matches.len());
        out.push(ScaleCandidate {
            scale,
            sprite: resized,
            matches,
        });
    }
    Ok(out)
}
