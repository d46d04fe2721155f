//! Template statistics precomputed once per sprite and scale.

use crate::image::ImageView;

/// Squared-norm floor below which a template or window is treated as flat.
pub(crate) const DEGENERATE_EPS: f64 = 1e-8;

/// Precomputed sums and buffers for correlation scoring.
pub struct TemplatePlan {
    width: usize,
    height: usize,
    mean: f64,
    var_t: f64,
    sum_sq_t: f64,
    zero_mean: Vec<f64>,
    raw: Vec<f64>,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    pub fn from_view(tpl: ImageView<'_, u8>) -> Self {
        let width = tpl.width();
        let height = tpl.height();
        let count = width * height;

        let mut raw = Vec::with_capacity(count);
        for y in 0..height {
            raw.extend(tpl.row_unchecked(y).iter().map(|&v| f64::from(v)));
        }
        let sum: f64 = raw.iter().sum();
        let sum_sq_t: f64 = raw.iter().map(|v| v * v).sum();
        let mean = sum / count as f64;
        let zero_mean: Vec<f64> = raw.iter().map(|v| v - mean).collect();
        let var_t: f64 = zero_mean.iter().map(|v| v * v).sum();

        Self {
            width,
            height,
            mean,
            var_t,
            sum_sq_t,
            zero_mean,
            raw,
        }
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the mean intensity of the template.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sum of squared deviations from the mean, `Σ(t - mean)²`.
    pub fn var_t(&self) -> f64 {
        self.var_t
    }

    /// Sum of squared intensities, `Σt²`.
    pub fn sum_sq_t(&self) -> f64 {
        self.sum_sq_t
    }

    /// True when the template has no intensity variation.
    pub fn is_flat(&self) -> bool {
        self.var_t <= DEGENERATE_EPS
    }

    /// Zero-mean template values in row-major order.
    pub fn zero_mean(&self) -> &[f64] {
        &self.zero_mean
    }

    /// Raw template values in row-major order.
    pub fn raw(&self) -> &[f64] {
        &self.raw
    }
}
