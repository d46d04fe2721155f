use spritematch::image::resize::{resize, resize_scaled, ResizeFilter};
use spritematch::{ImageView, IntegralImage, Matcher, MultiscaleConfig, SpriteMatchError};

fn noise(width: usize, height: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..width * height)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect()
}

fn paste(level: &mut [u8], level_width: usize, sprite: &[u8], sprite_width: usize, x0: usize, y0: usize) {
    for (row_idx, row) in sprite.chunks(sprite_width).enumerate() {
        let start = (y0 + row_idx) * level_width + x0;
        level[start..start + sprite_width].copy_from_slice(row);
    }
}

/// 64x48 level holding an 8x8 noise sprite enlarged to 16x16 at (30, 12).
fn enlarged_scene() -> (Vec<u8>, Vec<u8>) {
    let sprite = noise(8, 8, 7);
    let enlarged = resize_scaled(ImageView::from_slice(&sprite, 8, 8).unwrap(), 2.0).unwrap();
    assert_eq!((enlarged.width(), enlarged.height()), (16, 16));
    let mut level = vec![0u8; 64 * 48];
    paste(&mut level, 64, enlarged.data(), 16, 30, 12);
    (level, sprite)
}

#[test]
fn sweep_recovers_enlarged_sprite() {
    let (level, sprite) = enlarged_scene();
    let level_view = ImageView::from_slice(&level, 64, 48).unwrap();
    let sprite_view = ImageView::from_slice(&sprite, 8, 8).unwrap();
    let matcher = Matcher::new();

    assert!(matcher.match_single(level_view, sprite_view).unwrap().is_empty());

    let best = matcher
        .match_multiscale(level_view, sprite_view, &MultiscaleConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(best.scale, 2.0);
    assert_eq!(best.match_count(), 1);
    assert_eq!((best.matches.points[0].x, best.matches.points[0].y), (30, 12));
    assert_eq!((best.sprite.width(), best.sprite.height()), (16, 16));
}

#[test]
fn locate_falls_back_only_when_enabled() {
    let (level, sprite) = enlarged_scene();
    let level_view = ImageView::from_slice(&level, 64, 48).unwrap();
    let sprite_view = ImageView::from_slice(&sprite, 8, 8).unwrap();
    let matcher = Matcher::new();

    let native_only = matcher.locate(level_view, sprite_view, None).unwrap();
    assert!(native_only.matches.is_empty());
    assert_eq!(native_only.scale, 1.0);

    let located = matcher
        .locate(level_view, sprite_view, Some(&MultiscaleConfig::default()))
        .unwrap();
    assert_eq!(located.scale, 2.0);
    assert_eq!(located.matches.sprite_width, 16);
    assert_eq!(located.matches.len(), 1);
}

#[test]
fn sweep_never_reaches_level_dimensions() {
    let (level, sprite) = enlarged_scene();
    let level_view = ImageView::from_slice(&level, 64, 48).unwrap();
    let sprite_view = ImageView::from_slice(&sprite, 8, 8).unwrap();

    let candidates = Matcher::new()
        .sweep_scales(level_view, sprite_view, &MultiscaleConfig::default())
        .unwrap();
    // Widths 16..=47; width 48 would equal the level height.
    assert_eq!(candidates.len(), 32);
    assert_eq!(candidates[0].scale, 2.0);
    for cand in &candidates {
        assert!(cand.sprite.width() < 64 && cand.sprite.height() < 48);
    }
    assert!(candidates.windows(2).all(|w| w[0].scale < w[1].scale));
}

#[test]
fn sweep_respects_width_cap_and_step() {
    let (level, sprite) = enlarged_scene();
    let level_view = ImageView::from_slice(&level, 64, 48).unwrap();
    let sprite_view = ImageView::from_slice(&sprite, 8, 8).unwrap();
    let cfg = MultiscaleConfig {
        min_width: 16,
        max_width: Some(24),
        step: 4,
    };
    let widths: Vec<usize> = Matcher::new()
        .sweep_scales(level_view, sprite_view, &cfg)
        .unwrap()
        .iter()
        .map(|c| c.sprite.width())
        .collect();
    assert_eq!(widths, vec![16, 20, 24]);

    let err = Matcher::new()
        .sweep_scales(level_view, sprite_view, &MultiscaleConfig { step: 0, ..cfg.clone() })
        .unwrap_err();
    assert!(matches!(err, SpriteMatchError::InvalidInput(_)));
}

#[test]
fn zero_min_width_is_rejected_before_resizing() {
    let level = noise(64, 48, 2);
    let sprite = noise(8, 8, 9);
    let cfg = MultiscaleConfig {
        min_width: 0,
        ..MultiscaleConfig::default()
    };
    let matcher = Matcher::new();
    let level_view = ImageView::from_slice(&level, 64, 48).unwrap();
    let sprite_view = ImageView::from_slice(&sprite, 8, 8).unwrap();
    for err in [
        matcher.sweep_scales(level_view, sprite_view, &cfg).unwrap_err(),
        matcher.locate(level_view, sprite_view, Some(&cfg)).unwrap_err(),
    ] {
        assert_eq!(
            err,
            SpriteMatchError::InvalidInput("multiscale min_width must be positive")
        );
    }
}

#[test]
fn shared_window_sums_give_the_same_result() {
    let (level, sprite) = enlarged_scene();
    let level_view = ImageView::from_slice(&level, 64, 48).unwrap();
    let sprite_view = ImageView::from_slice(&sprite, 8, 8).unwrap();
    let ms = MultiscaleConfig::default();
    let matcher = Matcher::new();

    let sums = IntegralImage::from_view(level_view);
    let shared = matcher.locate_with(level_view, &sums, sprite_view, Some(&ms)).unwrap();
    let fresh = matcher.locate(level_view, sprite_view, Some(&ms)).unwrap();
    assert_eq!(shared, fresh);

    let other = IntegralImage::from_view(ImageView::from_slice(&level[..64 * 8], 64, 8).unwrap());
    assert!(matches!(
        matcher.locate_with(level_view, &other, sprite_view, None),
        Err(SpriteMatchError::InvalidInput(_))
    ));
}

#[test]
fn narrow_level_evaluates_no_scale() {
    let level = noise(16, 40, 3);
    let sprite = noise(4, 4, 4);
    let best = Matcher::new()
        .match_multiscale(
            ImageView::from_slice(&level, 16, 40).unwrap(),
            ImageView::from_slice(&sprite, 4, 4).unwrap(),
            &MultiscaleConfig::default(),
        )
        .unwrap();
    assert!(best.is_none());
}

#[test]
fn sweep_recovers_shrunken_sprite() {
    let base = noise(8, 8, 5);
    let sprite = resize(ImageView::from_slice(&base, 8, 8).unwrap(), 32, 32, ResizeFilter::Cubic)
        .unwrap();
    let small = resize(sprite.view(), 20, 20, ResizeFilter::Area).unwrap();
    let mut level = vec![0u8; 64 * 48];
    paste(&mut level, 64, small.data(), 20, 9, 21);

    let best = Matcher::new()
        .match_multiscale(
            ImageView::from_slice(&level, 64, 48).unwrap(),
            sprite.view(),
            &MultiscaleConfig::default(),
        )
        .unwrap()
        .unwrap();
    assert!(best.scale > 0.5 && best.scale < 0.7, "scale {}", best.scale);
    let hit = best.matches.points[0];
    assert!(hit.x.abs_diff(9) <= 2 && hit.y.abs_diff(21) <= 2, "hit {hit:?}");
}
