//! Sprite scoring plans.

mod plan;

pub(crate) use plan::DEGENERATE_EPS;
pub use plan::TemplatePlan;
