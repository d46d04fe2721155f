//! Decoding helpers built on the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{ImageView, OwnedImage};
use crate::util::{SpriteMatchError, SpriteMatchResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> SpriteMatchResult<ImageView<'_, u8>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Converts a decoded image of any color type to 8-bit luma.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> SpriteMatchResult<OwnedImage> {
    let gray = img.to_luma8();
    let width = gray.width() as usize;
    let height = gray.height() as usize;
    OwnedImage::new(gray.into_raw(), width, height)
}

/// Decodes an image file from disk.
pub fn open_image<P: AsRef<Path>>(path: P) -> SpriteMatchResult<image::DynamicImage> {
    let path = path.as_ref();
    image::open(path).map_err(|err| SpriteMatchError::ImageIo {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

/// Loads an image from disk and converts it to a grayscale owned image.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> SpriteMatchResult<OwnedImage> {
    let img = open_image(path)?;
    owned_from_dynamic_image(&img)
}
