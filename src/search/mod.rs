//! Sprite search at native scale with an optional multiscale fallback.

pub(crate) mod multiscale;
pub(crate) mod single;

use crate::candidate::{MatchSet, Suppression};
use crate::kernel::IntegralImage;
use crate::util::{SpriteMatchError, SpriteMatchResult};
use crate::ImageView;

pub use multiscale::{select_best, ScaleCandidate};

/// Similarity metric used to score placements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Metric {
    /// Zero-mean normalized cross-correlation.
    #[default]
    Zncc,
    /// Normalized cross-correlation on raw intensities.
    Ncc,
}

/// Configuration for single-scale matching.
#[derive(Clone, Debug)]
pub struct MatchConfig {
    /// Similarity metric.
    pub metric: Metric,
    /// Minimum score for a placement to count as a match, in `[0, 1]`.
    pub threshold: f32,
    /// Policy for collapsing overlapping placements.
    pub suppression: Suppression,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            metric: Metric::Zncc,
            threshold: 0.8,
            suppression: Suppression::FirstSeen,
        }
    }
}

/// Configuration for the multiscale width sweep.
#[derive(Clone, Debug)]
pub struct MultiscaleConfig {
    /// First sprite width tried, inclusive.
    pub min_width: usize,
    /// Last sprite width tried, inclusive. `None` sweeps up to the level width.
    pub max_width: Option<usize>,
    /// Width increment between steps.
    pub step: usize,
}

impl Default for MultiscaleConfig {
    fn default() -> Self {
        Self {
            min_width: 16,
            max_width: None,
            step: 1,
        }
    }
}

/// Outcome of locating one sprite in one level.
#[derive(Clone, Debug, PartialEq)]
pub struct Located {
    /// Scale the matches were found at; `1.0` for native-scale matches.
    pub scale: f64,
    /// Deduplicated matches, sized for the matched scale.
    pub matches: MatchSet,
}

/// Sprite matcher.
#[derive(Clone, Debug, Default)]
pub struct Matcher {
    cfg: MatchConfig,
}

impl Matcher {
    /// Creates a matcher with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the matching configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Matches `sprite` at native scale.
    ///
    /// A sprite larger than the level in either dimension yields an empty set.
    pub fn match_single(
        &self,
        level: ImageView<'_, u8>,
        sprite: ImageView<'_, u8>,
    ) -> SpriteMatchResult<MatchSet> {
        validate(&self.cfg)?;
        single::match_single(level, &IntegralImage::from_view(level), sprite, &self.cfg)
    }

    /// Evaluates every scale of the width sweep, in ascending order.
    pub fn sweep_scales(
        &self,
        level: ImageView<'_, u8>,
        sprite: ImageView<'_, u8>,
        ms: &MultiscaleConfig,
    ) -> SpriteMatchResult<Vec<ScaleCandidate>> {
        validate(&self.cfg)?;
        let sums = IntegralImage::from_view(level);
        multiscale::sweep_scales(level, &sums, sprite, &self.cfg, ms)
    }

    /// Runs the width sweep and returns the scale with the most matches.
    pub fn match_multiscale(
        &self,
        level: ImageView<'_, u8>,
        sprite: ImageView<'_, u8>,
        ms: &MultiscaleConfig,
    ) -> SpriteMatchResult<Option<ScaleCandidate>> {
        Ok(select_best(self.sweep_scales(level, sprite, ms)?))
    }

    /// Matches at native scale and falls back to the sweep when that finds
    /// nothing and `multiscale` is given.
    pub fn locate(
        &self,
        level: ImageView<'_, u8>,
        sprite: ImageView<'_, u8>,
        multiscale: Option<&MultiscaleConfig>,
    ) -> SpriteMatchResult<Located> {
        self.locate_with(level, &IntegralImage::from_view(level), sprite, multiscale)
    }

    /// Like [`Matcher::locate`], reusing window sums built once for `level`.
    pub fn locate_with(
        &self,
        level: ImageView<'_, u8>,
        sums: &IntegralImage,
        sprite: ImageView<'_, u8>,
        multiscale: Option<&MultiscaleConfig>,
    ) -> SpriteMatchResult<Located> {
        validate(&self.cfg)?;
        let native = single::match_single(level, sums, sprite, &self.cfg)?;
        if !native.is_empty() {
            return Ok(Located {
                scale: 1.0,
                matches: native,
            });
        }
        if let Some(ms) = multiscale {
            let sweep = multiscale::sweep_scales(level, sums, sprite, &self.cfg, ms)?;
            if let Some(best) = select_best(sweep) {
                return Ok(Located {
                    scale: best.scale,
                    matches: best.matches,
                });
            }
        }
        Ok(Located {
            scale: 1.0,
            matches: native,
        })
    }
}

fn validate(cfg: &MatchConfig) -> SpriteMatchResult<()> {
    if !(0.0..=1.0).contains(&cfg.threshold) {
        return Err(SpriteMatchError::InvalidInput("threshold must lie in [0, 1]"));
    }
    Ok(())
}
