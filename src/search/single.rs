//! Native-scale matching: response surface, threshold, suppression.

use crate::candidate::{suppress, MatchSet};
use crate::kernel::scalar::{NccScalar, ZnccScalar};
use crate::kernel::{IntegralImage, Kernel, ResponseMap};
use crate::search::{MatchConfig, Metric};
use crate::template::TemplatePlan;
use crate::trace::{trace_event, trace_span};
use crate::util::SpriteMatchResult;
use crate::ImageView;

pub(crate) fn response(
    level: ImageView<'_, u8>,
    sums: &IntegralImage,
    plan: &TemplatePlan,
    metric: Metric,
) -> SpriteMatchResult<ResponseMap> {
    match metric {
        Metric::Zncc => ZnccScalar::response_with(level, sums, plan),
        Metric::Ncc => NccScalar::response_with(level, sums, plan),
    }
}

pub(crate) fn match_single(
    level: ImageView<'_, u8>,
    sums: &IntegralImage,
    sprite: ImageView<'_, u8>,
    cfg: &MatchConfig,
) -> SpriteMatchResult<MatchSet> {
    let (width, height) = (sprite.width(), sprite.height());
    if width > level.width() || height > level.height() {
        trace_event!("sprite_too_large", width = width, height = height);
        return Ok(MatchSet::empty(width, height));
    }

    let _span = trace_span!("match_single", width = width, height = height).entered();
    let plan = TemplatePlan::from_view(sprite);
    let map = response(level, sums, &plan, cfg.metric)?;
    let candidates = map.points_at_least(cfg.threshold);
    let points = suppress(&candidates, width, height, cfg.suppression);

    trace_event!(
        "match_single_done",
        candidates = candidates.len(),
        kept = points.len(),
        best = map.best().map_or(f32::NEG_INFINITY, |p| p.score)
    );

    Ok(MatchSet {
        sprite_width: width,
        sprite_height: height,
        points,
    })
}
