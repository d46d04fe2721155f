//! Sprite resampling for the multiscale sweep.
//!
//! Both filters are separable: a horizontal pass into an `f32` buffer, then a
//! vertical pass with rounding and clamping back to `u8`.
//!
//! - `Area` averages the source pixels covered by each destination pixel,
//!   weighting partially covered pixels by their covered fraction.
//! - `Cubic` is bicubic convolution with `a = -0.75` and replicated borders,
//!   sampling at pixel centers (`src = (dst + 0.5) * ratio - 0.5`).

use crate::image::{ImageView, OwnedImage};
use crate::util::{SpriteMatchError, SpriteMatchResult};

const CUBIC_A: f32 = -0.75;

/// Resampling filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeFilter {
    /// Coverage-weighted box average, used when shrinking.
    Area,
    /// Bicubic convolution, used when enlarging.
    Cubic,
}

impl ResizeFilter {
    /// Filter used for a uniform scale factor.
    pub fn for_scale(scale: f64) -> Self {
        if scale < 1.0 {
            ResizeFilter::Area
        } else {
            ResizeFilter::Cubic
        }
    }
}

/// Output dimensions for a uniform scale factor, rounded half-to-even and
/// never below one pixel.
pub fn scaled_dims(width: usize, height: usize, scale: f64) -> (usize, usize) {
    let scale_len = |len: usize| ((len as f64 * scale).round_ties_even() as usize).max(1);
    (scale_len(width), scale_len(height))
}

/// Resizes `src` by a uniform factor, picking the filter from the direction.
pub fn resize_scaled(src: ImageView<'_, u8>, scale: f64) -> SpriteMatchResult<OwnedImage> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(SpriteMatchError::InvalidInput("scale must be finite and positive"));
    }
    let (width, height) = scaled_dims(src.width(), src.height(), scale);
    resize(src, width, height, ResizeFilter::for_scale(scale))
}

/// Resizes `src` to exactly `width x height`.
pub fn resize(
    src: ImageView<'_, u8>,
    width: usize,
    height: usize,
    filter: ResizeFilter,
) -> SpriteMatchResult<OwnedImage> {
    if width == 0 || height == 0 {
        return Err(SpriteMatchError::InvalidDimensions { width, height });
    }
    if width == src.width() && height == src.height() {
        return Ok(OwnedImage::from_view(src));
    }
    let (taps_x, taps_y) = match filter {
        ResizeFilter::Area => (area_taps(src.width(), width), area_taps(src.height(), height)),
        ResizeFilter::Cubic => (
            cubic_taps(src.width(), width),
            cubic_taps(src.height(), height),
        ),
    };

    let mut horizontal = vec![0.0f32; src.height() * width];
    for y in 0..src.height() {
        let row = src.row_unchecked(y);
        let out = &mut horizontal[y * width..(y + 1) * width];
        for (dst, taps) in out.iter_mut().zip(&taps_x) {
            *dst = taps.iter().map(|tap| tap.weight * row[tap.index] as f32).sum();
        }
    }

    let mut data = Vec::with_capacity(width * height);
    for taps in &taps_y {
        for x in 0..width {
            let value: f32 = taps
                .iter()
                .map(|tap| tap.weight * horizontal[tap.index * width + x])
                .sum();
            data.push(value.round().clamp(0.0, 255.0) as u8);
        }
    }

    OwnedImage::new(data, width, height)
}

#[derive(Clone, Copy, Debug)]
struct Tap {
    index: usize,
    weight: f32,
}

fn area_taps(src_len: usize, dst_len: usize) -> Vec<Vec<Tap>> {
    let ratio = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            let start = d as f64 * ratio;
            let end = (start + ratio).min(src_len as f64);
            let mut taps = Vec::new();
            let mut s = start.floor() as usize;
            while s < src_len && (s as f64) < end {
                let covered = end.min((s + 1) as f64) - start.max(s as f64);
                if covered > 1e-9 {
                    taps.push(Tap {
                        index: s,
                        weight: (covered / ratio) as f32,
                    });
                }
                s += 1;
            }
            taps
        })
        .collect()
}

fn cubic_taps(src_len: usize, dst_len: usize) -> Vec<Vec<Tap>> {
    let ratio = src_len as f32 / dst_len as f32;
    let last = src_len as isize - 1;
    (0..dst_len)
        .map(|d| {
            let center = (d as f32 + 0.5) * ratio - 0.5;
            let base = center.floor();
            let weights = cubic_weights(center - base);
            let base = base as isize;
            (0..4)
                .map(|k| Tap {
                    index: (base - 1 + k as isize).clamp(0, last) as usize,
                    weight: weights[k],
                })
                .collect()
        })
        .collect()
}

fn cubic_weights(t: f32) -> [f32; 4] {
    let a = CUBIC_A;
    let w0 = ((a * (t + 1.0) - 5.0 * a) * (t + 1.0) + 8.0 * a) * (t + 1.0) - 4.0 * a;
    let w1 = ((a + 2.0) * t - (a + 3.0)) * t * t + 1.0;
    let u = 1.0 - t;
    let w2 = ((a + 2.0) * u - (a + 3.0)) * u * u + 1.0;
    [w0, w1, w2, 1.0 - w0 - w1 - w2]
}
