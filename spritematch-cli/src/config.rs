//! JSON run configuration and its conversion into library settings.

use clap::ValueEnum;
use serde::Deserialize;
use spritematch::{
    AnnotationFormat, LayoutKind, MatchConfig, Metric, MultiscaleConfig, ProjectLayout,
    Suppression,
};
use std::path::{Path, PathBuf};

use crate::render::OverlayStyle;

#[derive(Clone, Copy, Debug, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MetricConfig {
    #[default]
    Zncc,
    Ncc,
}

impl From<MetricConfig> for Metric {
    fn from(value: MetricConfig) -> Self {
        match value {
            MetricConfig::Zncc => Metric::Zncc,
            MetricConfig::Ncc => Metric::Ncc,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SuppressionConfig {
    #[default]
    FirstSeen,
    ScoreRanked,
}

impl From<SuppressionConfig> for Suppression {
    fn from(value: SuppressionConfig) -> Self {
        match value {
            SuppressionConfig::FirstSeen => Suppression::FirstSeen,
            SuppressionConfig::ScoreRanked => Suppression::ScoreRanked,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FormatConfig {
    #[default]
    Simple,
    Extended,
}

impl From<FormatConfig> for AnnotationFormat {
    fn from(value: FormatConfig) -> Self {
        match value {
            FormatConfig::Simple => AnnotationFormat::Simple,
            FormatConfig::Extended => AnnotationFormat::Extended,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LayoutConfig {
    #[default]
    Unity,
    Standalone,
}

impl From<LayoutConfig> for LayoutKind {
    fn from(value: LayoutConfig) -> Self {
        match value {
            LayoutConfig::Unity => LayoutKind::Unity,
            LayoutConfig::Standalone => LayoutKind::Standalone,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfigJson {
    pub metric: MetricConfig,
    pub threshold: f32,
    pub suppression: SuppressionConfig,
}

impl Default for MatchConfigJson {
    fn default() -> Self {
        Self {
            metric: MetricConfig::Zncc,
            threshold: MatchConfig::default().threshold,
            suppression: SuppressionConfig::FirstSeen,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfigJson {
    pub min_width: usize,
    pub max_width: Option<usize>,
    pub step: usize,
}

impl Default for SweepConfigJson {
    fn default() -> Self {
        let cfg = MultiscaleConfig::default();
        Self {
            min_width: cfg.min_width,
            max_width: cfg.max_width,
            step: cfg.step,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotationConfigJson {
    pub format: FormatConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfigJson {
    pub enabled: bool,
    pub color: [u8; 3],
    pub thickness: u32,
}

impl Default for OverlayConfigJson {
    fn default() -> Self {
        Self {
            enabled: true,
            color: [0, 0, 255],
            thickness: 1,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub layout: LayoutConfig,
    pub levels_path: Option<PathBuf>,
    pub sprites_path: Option<PathBuf>,
    pub data_path: Option<PathBuf>,
    pub multiscale: bool,
    #[serde(rename = "match")]
    pub match_cfg: MatchConfigJson,
    pub sweep: SweepConfigJson,
    pub annotation: AnnotationConfigJson,
    pub overlay: OverlayConfigJson,
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Fully resolved settings for one pipeline run.
#[derive(Debug)]
pub struct Settings {
    pub layout: ProjectLayout,
    pub multiscale: Option<MultiscaleConfig>,
    pub match_cfg: MatchConfig,
    pub format: AnnotationFormat,
    pub overlay: Option<OverlayStyle>,
}

impl Settings {
    /// Resolves directory defaults relative to `root`.
    pub fn resolve(config: Config, root: &Path) -> Self {
        let mut layout = ProjectLayout::new(root, config.layout.into());
        if let Some(levels) = config.levels_path {
            layout.levels = levels;
        }
        if let Some(sprites) = config.sprites_path {
            layout.sprites = sprites;
        }
        if let Some(data) = config.data_path {
            layout.data = data;
        }

        let multiscale = config.multiscale.then(|| MultiscaleConfig {
            min_width: config.sweep.min_width,
            max_width: config.sweep.max_width,
            step: config.sweep.step,
        });
        let overlay = config.overlay.enabled.then(|| OverlayStyle {
            color: image::Rgb(config.overlay.color),
            thickness: config.overlay.thickness.max(1),
        });

        Self {
            layout,
            multiscale,
            match_cfg: MatchConfig {
                metric: config.match_cfg.metric.into(),
                threshold: config.match_cfg.threshold,
                suppression: config.match_cfg.suppression.into(),
            },
            format: config.annotation.format.into(),
            overlay,
        }
    }
}
