//! Correlation kernels and the response surface they produce.

use crate::candidate::MatchPoint;
use crate::template::TemplatePlan;
use crate::util::SpriteMatchResult;
use crate::ImageView;

pub mod integral;
pub mod scalar;

pub use integral::IntegralImage;

/// Kernel trait for scoring a template against an image.
///
/// Scores are in `[-1, 1]`. A flat window scores `0.0`, except that a flat
/// template scores `1.0` against it under the zero-mean metric.
pub trait Kernel {
    /// Computes the score at a single placement (top-left coordinates).
    ///
    /// Returns `f32::NEG_INFINITY` when the placement is out of range.
    fn score_at(image: ImageView<'_, u8>, plan: &TemplatePlan, x: usize, y: usize) -> f32;

    /// Scores every valid placement and returns the response surface.
    fn response(image: ImageView<'_, u8>, plan: &TemplatePlan) -> SpriteMatchResult<ResponseMap> {
        Self::response_with(image, &IntegralImage::from_view(image), plan)
    }

    /// Like [`Kernel::response`], reusing window sums built for `image`.
    ///
    /// Each placement still costs `O(w * h)` for the cross term.
    fn response_with(
        image: ImageView<'_, u8>,
        sums: &IntegralImage,
        plan: &TemplatePlan,
    ) -> SpriteMatchResult<ResponseMap>;
}

/// Row-major correlation scores of size `(W - w + 1) x (H - h + 1)`.
#[derive(Clone, Debug)]
pub struct ResponseMap {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl ResponseMap {
    pub(crate) fn new(width: usize, height: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Number of placement columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of placement rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major scores.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Score at placement `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// All placements scoring at least `threshold`, in row-major order.
    pub fn points_at_least(&self, threshold: f32) -> Vec<MatchPoint> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &score)| score >= threshold)
            .map(|(idx, &score)| MatchPoint {
                x: idx % self.width,
                y: idx / self.width,
                score,
            })
            .collect()
    }

    /// Highest-scoring placement, first in row-major order on ties.
    pub fn best(&self) -> Option<MatchPoint> {
        let mut best: Option<MatchPoint> = None;
        for (idx, &score) in self.data.iter().enumerate() {
            if best.map_or(true, |b| score > b.score) {
                best = Some(MatchPoint {
                    x: idx % self.width,
                    y: idx / self.width,
                    score,
                });
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::ResponseMap;

    #[test]
    fn threshold_selection_is_row_major() {
        let map = ResponseMap::new(3, 2, vec![0.9, 0.1, 0.8, 0.85, 0.95, 0.2]);
        let points: Vec<(usize, usize)> = map
            .points_at_least(0.8)
            .iter()
            .map(|p| (p.x, p.y))
            .collect();
        assert_eq!(points, vec![(0, 0), (2, 0), (0, 1), (1, 1)]);
        assert_eq!(map.get(1, 1), Some(0.95));
        assert_eq!(map.get(3, 0), None);
    }

    #[test]
    fn best_prefers_first_on_ties() {
        let map = ResponseMap::new(2, 2, vec![0.5, 0.7, 0.7, 0.1]);
        let best = map.best().unwrap();
        assert_eq!((best.x, best.y), (1, 0));
    }
}
