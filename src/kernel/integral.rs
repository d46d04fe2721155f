//! Summed-area tables over a level image.
//!
//! Built once per level, they give the window sums `Σi` and `Σi²` of any
//! placement in constant time, for every sprite and every sweep step.

use crate::ImageView;

/// Integral images of intensities and squared intensities.
///
/// Both tables are `(width + 1) x (height + 1)` with a zero first row and
/// column. Sums are exact in `u64`.
#[derive(Clone, Debug)]
pub struct IntegralImage {
    width: usize,
    height: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl IntegralImage {
    /// Builds both tables from `image`.
    pub fn from_view(image: ImageView<'_, u8>) -> Self {
        let (width, height) = (image.width(), image.height());
        let stride = width + 1;
        let mut sum = vec![0u64; stride * (height + 1)];
        let mut sum_sq = vec![0u64; stride * (height + 1)];
        for y in 0..height {
            let mut row_sum = 0u64;
            let mut row_sq = 0u64;
            for (x, &value) in image.row_unchecked(y).iter().enumerate() {
                let v = u64::from(value);
                row_sum += v;
                row_sq += v * v;
                let idx = (y + 1) * stride + x + 1;
                sum[idx] = sum[idx - stride] + row_sum;
                sum_sq[idx] = sum_sq[idx - stride] + row_sq;
            }
        }
        Self {
            width,
            height,
            sum,
            sum_sq,
        }
    }

    /// Width of the source image.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the source image.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(Σi, Σi²)` over the `w x h` window with top-left corner `(x, y)`.
    ///
    /// The window must lie inside the source image.
    pub fn window(&self, x: usize, y: usize, w: usize, h: usize) -> (u64, u64) {
        debug_assert!(x + w <= self.width && y + h <= self.height);
        let stride = self.width + 1;
        let top = y * stride;
        let bottom = (y + h) * stride;
        let rect = |table: &[u64]| {
            table[bottom + x + w] + table[top + x] - table[top + x + w] - table[bottom + x]
        };
        (rect(&self.sum), rect(&self.sum_sq))
    }
}
