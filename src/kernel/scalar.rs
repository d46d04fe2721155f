//! Scalar reference kernels.
//!
//! Window sums `Σi` and `Σi²` come from an [`IntegralImage`]; only the cross
//! term is accumulated per placement. Accumulation is done in `f64`: window
//! sums of squared intensities reach `255² * w * h` and the variance is a
//! difference of two such sums.

use crate::kernel::{IntegralImage, Kernel, ResponseMap};
use crate::template::{TemplatePlan, DEGENERATE_EPS};
use crate::util::{SpriteMatchError, SpriteMatchResult};
use crate::ImageView;

/// Zero-mean normalized cross-correlation (`TM_CCOEFF_NORMED`).
///
/// A flat template scores `1.0` on flat windows and `0.0` elsewhere.
pub struct ZnccScalar;

/// Normalized cross-correlation without mean removal (`TM_CCORR_NORMED`).
pub struct NccScalar;

fn check_fit(image: ImageView<'_, u8>, plan: &TemplatePlan) -> SpriteMatchResult<(usize, usize)> {
    let (img_width, img_height) = (image.width(), image.height());
    let (tpl_width, tpl_height) = (plan.width(), plan.height());
    if img_width < tpl_width || img_height < tpl_height {
        return Err(SpriteMatchError::TemplateTooLarge {
            tpl_width,
            tpl_height,
            img_width,
            img_height,
        });
    }
    Ok((img_width - tpl_width + 1, img_height - tpl_height + 1))
}

fn in_range(image: ImageView<'_, u8>, plan: &TemplatePlan, x: usize, y: usize) -> bool {
    image.width() >= plan.width()
        && image.height() >= plan.height()
        && x <= image.width() - plan.width()
        && y <= image.height() - plan.height()
}

/// Window sums computed directly, for single placements.
fn direct_sums(image: ImageView<'_, u8>, plan: &TemplatePlan, x: usize, y: usize) -> (u64, u64) {
    let mut sum = 0u64;
    let mut sum_sq = 0u64;
    for ty in 0..plan.height() {
        for &value in &image.row_unchecked(y + ty)[x..x + plan.width()] {
            let v = u64::from(value);
            sum += v;
            sum_sq += v * v;
        }
    }
    (sum, sum_sq)
}

fn scan_surface(
    image: ImageView<'_, u8>,
    sums: &IntegralImage,
    plan: &TemplatePlan,
    window: impl Fn(usize, usize, u64, u64) -> f32,
) -> SpriteMatchResult<ResponseMap> {
    if sums.width() != image.width() || sums.height() != image.height() {
        return Err(SpriteMatchError::InvalidInput(
            "window sums were built for a different image",
        ));
    }
    let (width, height) = check_fit(image, plan)?;
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let (sum_i, sum_i2) = sums.window(x, y, plan.width(), plan.height());
            data.push(window(x, y, sum_i, sum_i2));
        }
    }
    Ok(ResponseMap::new(width, height, data))
}

/// Cut-off for a window's normalization term, relative to its energy.
fn window_floor(sum_i2: f64) -> f64 {
    (10.0 * f64::from(f32::EPSILON) * sum_i2).clamp(DEGENERATE_EPS, 0.5)
}

fn finish(num: f64, denom: f64) -> f32 {
    let score = num / denom;
    if score.is_finite() {
        score.clamp(-1.0, 1.0) as f32
    } else {
        0.0
    }
}

/// `Σ tpl * i` over the window at `(x, y)`.
fn cross(image: ImageView<'_, u8>, plan: &TemplatePlan, tpl: &[f64], x: usize, y: usize) -> f64 {
    let tpl_width = plan.width();
    let mut dot = 0.0f64;
    for ty in 0..plan.height() {
        let img_row = &image.row_unchecked(y + ty)[x..x + tpl_width];
        let tpl_row = &tpl[ty * tpl_width..(ty + 1) * tpl_width];
        for (&t, &value) in tpl_row.iter().zip(img_row) {
            dot += t * f64::from(value);
        }
    }
    dot
}

impl ZnccScalar {
    fn window(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        x: usize,
        y: usize,
        sum_i: u64,
        sum_i2: u64,
    ) -> f32 {
        let n = (plan.width() * plan.height()) as f64;
        let (sum_i, sum_i2) = (sum_i as f64, sum_i2 as f64);
        let var_i = sum_i2 - sum_i * sum_i / n;
        let flat_window = var_i <= window_floor(sum_i2);
        if plan.is_flat() {
            return if flat_window { 1.0 } else { 0.0 };
        }
        if flat_window {
            return 0.0;
        }
        // Zero-mean template: Σ t'(i - ī) == Σ t' i.
        let dot = cross(image, plan, plan.zero_mean(), x, y);
        finish(dot, (plan.var_t() * var_i).sqrt())
    }
}

impl Kernel for ZnccScalar {
    fn score_at(image: ImageView<'_, u8>, plan: &TemplatePlan, x: usize, y: usize) -> f32 {
        if !in_range(image, plan, x, y) {
            return f32::NEG_INFINITY;
        }
        let (sum_i, sum_i2) = direct_sums(image, plan, x, y);
        Self::window(image, plan, x, y, sum_i, sum_i2)
    }

    fn response_with(
        image: ImageView<'_, u8>,
        sums: &IntegralImage,
        plan: &TemplatePlan,
    ) -> SpriteMatchResult<ResponseMap> {
        scan_surface(image, sums, plan, |x, y, sum_i, sum_i2| {
            Self::window(image, plan, x, y, sum_i, sum_i2)
        })
    }
}

impl NccScalar {
    fn window(image: ImageView<'_, u8>, plan: &TemplatePlan, x: usize, y: usize, sum_i2: u64) -> f32 {
        let sum_i2 = sum_i2 as f64;
        if sum_i2 <= DEGENERATE_EPS || plan.sum_sq_t() <= DEGENERATE_EPS {
            return 0.0;
        }
        let dot = cross(image, plan, plan.raw(), x, y);
        finish(dot, (plan.sum_sq_t() * sum_i2).sqrt())
    }
}

impl Kernel for NccScalar {
    fn score_at(image: ImageView<'_, u8>, plan: &TemplatePlan, x: usize, y: usize) -> f32 {
        if !in_range(image, plan, x, y) {
            return f32::NEG_INFINITY;
        }
        let (_, sum_i2) = direct_sums(image, plan, x, y);
        Self::window(image, plan, x, y, sum_i2)
    }

    fn response_with(
        image: ImageView<'_, u8>,
        sums: &IntegralImage,
        plan: &TemplatePlan,
    ) -> SpriteMatchResult<ResponseMap> {
        scan_surface(image, sums, plan, |x, y, _, sum_i2| {
            Self::window(image, plan, x, y, sum_i2)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{NccScalar, ZnccScalar};
    use crate::kernel::{IntegralImage, Kernel};
    use crate::template::TemplatePlan;
    use crate::{ImageView, SpriteMatchError};

    fn textured(width: usize, height: usize, seed: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(((x * 17 + y * 9 + x * y + seed) & 0xFF) as u8);
            }
        }
        data
    }

    fn reference_zncc(
        image: &[u8],
        img_width: usize,
        tpl: &[u8],
        tw: usize,
        th: usize,
        x: usize,
        y: usize,
    ) -> f64 {
        let n = (tw * th) as f64;
        let tpl_mean = tpl.iter().map(|&v| v as f64).sum::<f64>() / n;
        let mut win = Vec::with_capacity(tw * th);
        for ty in 0..th {
            for tx in 0..tw {
                win.push(image[(y + ty) * img_width + x + tx] as f64);
            }
        }
        let win_mean = win.iter().sum::<f64>() / n;
        let mut num = 0.0;
        let mut den_t = 0.0;
        let mut den_i = 0.0;
        for (t, i) in tpl.iter().zip(&win) {
            let dt = *t as f64 - tpl_mean;
            let di = i - win_mean;
            num += dt * di;
            den_t += dt * dt;
            den_i += di * di;
        }
        num / (den_t * den_i).sqrt()
    }

    #[test]
    fn zncc_response_matches_bruteforce() {
        let (img_width, img_height) = (9, 7);
        let (tw, th) = (3, 2);
        let image = textured(img_width, img_height, 0);
        let tpl = textured(tw, th, 5);

        let view = ImageView::from_slice(&image, img_width, img_height).unwrap();
        let plan = TemplatePlan::from_view(ImageView::from_slice(&tpl, tw, th).unwrap());
        let map = ZnccScalar::response(view, &plan).unwrap();
        assert_eq!((map.width(), map.height()), (7, 6));

        for y in 0..map.height() {
            for x in 0..map.width() {
                let expected = reference_zncc(&image, img_width, &tpl, tw, th, x, y);
                let got = map.get(x, y).unwrap() as f64;
                assert!((got - expected).abs() < 1e-5, "({x},{y}): {got} vs {expected}");
                assert_eq!(ZnccScalar::score_at(view, &plan, x, y), map.get(x, y).unwrap());
            }
        }
    }

    #[test]
    fn exact_patch_scores_one() {
        let (img_width, img_height) = (12, 10);
        let image = textured(img_width, img_height, 3);
        let mut tpl = Vec::new();
        for y in 4..8 {
            tpl.extend_from_slice(&image[y * img_width + 5..y * img_width + 9]);
        }
        let view = ImageView::from_slice(&image, img_width, img_height).unwrap();
        let plan = TemplatePlan::from_view(ImageView::from_slice(&tpl, 4, 4).unwrap());
        assert!(ZnccScalar::score_at(view, &plan, 5, 4) > 0.9999);
        assert!(NccScalar::score_at(view, &plan, 5, 4) > 0.9999);
    }

    #[test]
    fn flat_window_scores_zero_for_textured_template() {
        let image = vec![40u8; 36];
        let view = ImageView::from_slice(&image, 6, 6).unwrap();
        let tpl = textured(3, 3, 1);
        let plan = TemplatePlan::from_view(ImageView::from_slice(&tpl, 3, 3).unwrap());
        assert_eq!(ZnccScalar::score_at(view, &plan, 1, 1), 0.0);
    }

    #[test]
    fn flat_template_scores_one_only_on_flat_windows() {
        let (img_width, img_height) = (10, 8);
        let mut image = textured(img_width, img_height, 4);
        for y in 2..5 {
            image[y * img_width + 3..y * img_width + 6].fill(200);
        }
        let view = ImageView::from_slice(&image, img_width, img_height).unwrap();
        let flat = [90u8; 9];
        let flat_plan = TemplatePlan::from_view(ImageView::from_slice(&flat, 3, 3).unwrap());

        let map = ZnccScalar::response(view, &flat_plan).unwrap();
        let hits: Vec<(usize, usize)> = map.points_at_least(0.5).iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(hits, vec![(3, 2)]);
        assert_eq!(map.get(3, 2), Some(1.0));
        assert_eq!(ZnccScalar::score_at(view, &flat_plan, 3, 2), 1.0);
        assert_eq!(ZnccScalar::score_at(view, &flat_plan, 0, 0), 0.0);
        assert!(NccScalar::score_at(view, &flat_plan, 3, 2) > 0.9999);
    }

    #[test]
    fn mismatched_window_sums_are_rejected() {
        let image = textured(6, 6, 0);
        let other = textured(5, 6, 0);
        let view = ImageView::from_slice(&image, 6, 6).unwrap();
        let sums = IntegralImage::from_view(ImageView::from_slice(&other, 5, 6).unwrap());
        let tpl = textured(3, 3, 2);
        let plan = TemplatePlan::from_view(ImageView::from_slice(&tpl, 3, 3).unwrap());
        assert!(matches!(
            NccScalar::response_with(view, &sums, &plan),
            Err(SpriteMatchError::InvalidInput(_))
        ));
    }

    #[test]
    fn out_of_range_placement_is_negative_infinity() {
        let image = textured(5, 5, 0);
        let view = ImageView::from_slice(&image, 5, 5).unwrap();
        let tpl = textured(3, 3, 2);
        let plan = TemplatePlan::from_view(ImageView::from_slice(&tpl, 3, 3).unwrap());
        assert_eq!(ZnccScalar::score_at(view, &plan, 3, 0), f32::NEG_INFINITY);
        assert_eq!(NccScalar::score_at(view, &plan, 0, 3), f32::NEG_INFINITY);
    }

    #[test]
    fn oversized_template_is_rejected() {
        let image = textured(4, 4, 0);
        let view = ImageView::from_slice(&image, 4, 4).unwrap();
        let tpl = textured(5, 2, 0);
        let plan = TemplatePlan::from_view(ImageView::from_slice(&tpl, 5, 2).unwrap());
        let err = ZnccScalar::response(view, &plan).unwrap_err();
        assert_eq!(
            err,
            SpriteMatchError::TemplateTooLarge {
                tpl_width: 5,
                tpl_height: 2,
                img_width: 4,
                img_height: 4,
            }
        );
    }
}
