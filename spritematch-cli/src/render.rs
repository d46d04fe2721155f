//! Debug overlay: rectangles around every match on a copy of the level.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use spritematch::MatchSet;

/// Rectangle color and line thickness for overlays.
#[derive(Clone, Copy, Debug)]
pub struct OverlayStyle {
    pub color: Rgb<u8>,
    pub thickness: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: Rgb([0, 0, 255]),
            thickness: 1,
        }
    }
}

/// Draws one rectangle per match, with corners `(x, y)` and `(x + w, y + h)`
/// both on the outline. Thicker lines grow outwards; parts outside the
/// canvas are clipped.
pub fn draw_matches(canvas: &mut RgbImage, matches: &MatchSet, style: &OverlayStyle) {
    let (width, height) = (matches.sprite_width as u32, matches.sprite_height as u32);
    for point in &matches.points {
        for inset in 0..style.thickness {
            let grow = inset as i32;
            let rect = Rect::at(point.x as i32 - grow, point.y as i32 - grow)
                .of_size(width + 1 + 2 * inset, height + 1 + 2 * inset);
            draw_hollow_rect_mut(canvas, rect, style.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{draw_matches, OverlayStyle};
    use image::{Rgb, RgbImage};
    use spritematch::{MatchPoint, MatchSet};

    #[test]
    fn outline_includes_far_corner() {
        let mut canvas = RgbImage::new(20, 20);
        let matches = MatchSet {
            sprite_width: 5,
            sprite_height: 4,
            points: vec![MatchPoint {
                x: 3,
                y: 6,
                score: 1.0,
            }],
        };
        draw_matches(&mut canvas, &matches, &OverlayStyle::default());

        let blue = Rgb([0, 0, 255]);
        assert_eq!(*canvas.get_pixel(3, 6), blue);
        assert_eq!(*canvas.get_pixel(8, 10), blue);
        assert_eq!(*canvas.get_pixel(8, 7), blue);
        assert_eq!(*canvas.get_pixel(5, 10), blue);
        assert_eq!(*canvas.get_pixel(7, 9), Rgb([0, 0, 0]));
        assert_eq!(*canvas.get_pixel(9, 6), Rgb([0, 0, 0]));
        assert_eq!(*canvas.get_pixel(5, 11), Rgb([0, 0, 0]));
    }

    #[test]
    fn thick_outline_grows_outwards_and_clips() {
        let mut canvas = RgbImage::new(10, 10);
        let matches = MatchSet {
            sprite_width: 4,
            sprite_height: 4,
            points: vec![MatchPoint {
                x: 0,
                y: 0,
                score: 1.0,
            }],
        };
        let style = OverlayStyle {
            color: Rgb([255, 0, 0]),
            thickness: 2,
        };
        draw_matches(&mut canvas, &matches, &style);
        assert_eq!(*canvas.get_pixel(4, 2), Rgb([255, 0, 0]));
        assert_eq!(*canvas.get_pixel(5, 2), Rgb([255, 0, 0]));
        assert_eq!(*canvas.get_pixel(6, 2), Rgb([0, 0, 0]));
        assert_eq!(*canvas.get_pixel(2, 2), Rgb([0, 0, 0]));
    }
}
