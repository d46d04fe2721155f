//! Overlap suppression for thresholded match points.
//!
//! The overlap test is one-sided: `overlaps(pt, w, h, other)` only looks at
//! `other` lying strictly inside the box anchored at `pt`, or on the same
//! column below it, or on the same row to its right, within one sprite span.
//! Combined with a row-major candidate order this is what the first-seen
//! policy relies on: a later point can never overlap an earlier one.

use crate::candidate::MatchPoint;
use std::cmp::Ordering;

/// How overlapping candidates are collapsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Suppression {
    /// Greedy in scan order: the first-seen point wins regardless of score.
    #[default]
    FirstSeen,
    /// Greedy in descending score order, checking overlap both ways.
    ScoreRanked,
}

/// Returns true if `other` falls within the sprite-sized box anchored at `pt`.
pub fn overlaps(pt: MatchPoint, width: usize, height: usize, other: MatchPoint) -> bool {
    let inside_x = pt.x < other.x && other.x < pt.x + width;
    let inside_y = pt.y < other.y && other.y < pt.y + height;
    (inside_x && inside_y) || (pt.x == other.x && inside_y) || (pt.y == other.y && inside_x)
}

/// Collapses overlapping candidates according to `policy`.
pub fn suppress(
    points: &[MatchPoint],
    width: usize,
    height: usize,
    policy: Suppression,
) -> Vec<MatchPoint> {
    match policy {
        Suppression::FirstSeen => suppress_first_seen(points, width, height),
        Suppression::ScoreRanked => suppress_score_ranked(points, width, height),
    }
}

fn suppress_first_seen(points: &[MatchPoint], width: usize, height: usize) -> Vec<MatchPoint> {
    let mut removed = vec![false; points.len()];
    for (i, &pt) in points.iter().enumerate() {
        if removed[i] {
            continue;
        }
        for (j, &other) in points.iter().enumerate().skip(i + 1) {
            if !removed[j] && overlaps(pt, width, height, other) {
                removed[j] = true;
            }
        }
    }
    points
        .iter()
        .zip(removed)
        .filter_map(|(&pt, gone)| (!gone).then_some(pt))
        .collect()
}

fn score_cmp_desc(a: &MatchPoint, b: &MatchPoint) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.y.cmp(&b.y))
        .then_with(|| a.x.cmp(&b.x))
}

fn suppress_score_ranked(points: &[MatchPoint], width: usize, height: usize) -> Vec<MatchPoint> {
    let mut ranked = points.to_vec();
    ranked.sort_by(score_cmp_desc);

    let mut kept: Vec<MatchPoint> = Vec::new();
    'outer: for pt in ranked {
        for &k in &kept {
            if overlaps(k, width, height, pt) || overlaps(pt, width, height, k) {
                continue 'outer;
            }
        }
        kept.push(pt);
    }
    kept
}
