//! Batch driver: every level against every sprite.

use crate::config::Settings;
use crate::render::draw_matches;
use spritematch::assets::{list_images, sprite_id};
use spritematch::io::{load_gray_image, open_image, owned_from_dynamic_image};
use spritematch::{AnnotationRecord, AnnotationWriter, IntegralImage, Matcher, OwnedImage};
use std::error::Error;
use std::fs;
use std::path::Path;
use tracing::{debug, info, info_span};

/// Totals reported at the end of a run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub levels: usize,
    pub sprites: usize,
    pub matches: usize,
}

struct Sprite {
    id: String,
    image: OwnedImage,
}

fn load_sprites(dir: &Path) -> Result<Vec<Sprite>, Box<dyn Error>> {
    let mut sprites = Vec::new();
    for path in list_images(dir)? {
        let image = load_gray_image(&path)?;
        debug!(
            sprite = %path.display(),
            width = image.width(),
            height = image.height(),
            "loaded sprite"
        );
        sprites.push(Sprite {
            id: sprite_id(&path),
            image,
        });
    }
    Ok(sprites)
}

pub fn run(settings: &Settings) -> Result<RunSummary, Box<dyn Error>> {
    let layout = &settings.layout;
    let levels = list_images(&layout.levels)?;
    let sprites = load_sprites(&layout.sprites)?;
    info!(
        levels = levels.len(),
        sprites = sprites.len(),
        levels_path = %layout.levels.display(),
        sprites_path = %layout.sprites.display(),
        "found assets"
    );

    let matcher = Matcher::new().with_config(settings.match_cfg.clone());
    let mut summary = RunSummary {
        levels: levels.len(),
        sprites: sprites.len(),
        matches: 0,
    };

    for level_path in &levels {
        let level_name = sprite_id(level_path);
        let _span = info_span!("level", level = %level_name).entered();

        let writer = AnnotationWriter::for_level(&layout.data, level_path, settings.format)?;
        let decoded = open_image(level_path)?;
        let level = owned_from_dynamic_image(&decoded)?;
        let sums = IntegralImage::from_view(level.view());
        let mut canvas = settings.overlay.map(|_| decoded.to_rgb8());

        let mut level_matches = 0;
        for (idx, sprite) in sprites.iter().enumerate() {
            info!(sprite = %sprite.id, "sprite {}/{}", idx + 1, sprites.len());
            let located = matcher.locate_with(
                level.view(),
                &sums,
                sprite.image.view(),
                settings.multiscale.as_ref(),
            )?;
            if located.matches.is_empty() {
                continue;
            }
            info!(
                sprite = %sprite.id,
                matches = located.matches.len(),
                scale = located.scale,
                "sprite located"
            );

            let records = AnnotationRecord::from_set(&sprite.id, &located.matches, level.height());
            writer.append(&records)?;
            if let (Some(canvas), Some(style)) = (canvas.as_mut(), settings.overlay.as_ref()) {
                draw_matches(canvas, &located.matches, style);
            }
            level_matches += located.matches.len();
        }

        if let Some(canvas) = canvas.filter(|_| level_matches > 0) {
            let templates = layout.templates();
            fs::create_dir_all(&templates)?;
            let out = templates.join(&level_name);
            canvas.save(&out)?;
            debug!(overlay = %out.display(), "wrote overlay");
        }
        info!(
            matches = level_matches,
            annotations = %writer.path().display(),
            "level done"
        );
        summary.matches += level_matches;
    }

    Ok(summary)
}
