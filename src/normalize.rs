use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbImage};
use tracing::debug;

use crate::error::FaceCropError;

/// Make an image detector-compatible: even dimensions, 8-bit RGB pixels.
///
/// Takes ownership of the input; an already-compliant image moves through
/// without reallocation. Superseded intermediate buffers are dropped as
/// each stage replaces them.
pub(crate) fn normalize(image: DynamicImage) -> Result<RgbImage, FaceCropError> {
    let image = ensure_even_dimensions(image)?;
    Ok(to_rgb(image))
}

/// Pad odd dimensions by one pixel and rescale without smoothing.
fn ensure_even_dimensions(image: DynamicImage) -> Result<DynamicImage, FaceCropError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(FaceCropError::InvalidImage(
            "image dimensions are zero".into(),
        ));
    }

    let target_width = width + width % 2;
    let target_height = height + height % 2;
    if target_width == width && target_height == height {
        return Ok(image);
    }

    debug!(
        from_width = width,
        from_height = height,
        to_width = target_width,
        to_height = target_height,
        "padding odd dimensions"
    );
    Ok(image.resize_exact(target_width, target_height, FilterType::Nearest))
}

/// Convert to the fixed 8-bit RGB detector format.
///
/// Non-RGB inputs are composited over an opaque black background; RGB
/// inputs pass through by move.
fn to_rgb(image: DynamicImage) -> RgbImage {
    match image {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => flatten_over_black(&other),
    }
}

/// Composite onto black, discarding alpha.
fn flatten_over_black(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    let mut rgb = RgbImage::new(width, height);

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as f32 / 255.0;
        let out_r = (r as f32 * alpha).round() as u8;
        let out_g = (g as f32 * alpha).round() as u8;
        let out_b = (b as f32 * alpha).round() as u8;
        rgb.put_pixel(x, y, image::Rgb([out_r, out_g, out_b]));
    }

    rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba, RgbaImage};

    #[test]
    fn odd_dimensions_are_padded_to_even() {
        let image = DynamicImage::new_rgb8(101, 150);
        let normalized = normalize(image).unwrap();
        assert_eq!(normalized.dimensions(), (102, 150));
    }

    #[test]
    fn both_odd_dimensions_are_padded() {
        let image = DynamicImage::new_rgb8(33, 45);
        let normalized = normalize(image).unwrap();
        assert_eq!(normalized.dimensions(), (34, 46));
    }

    #[test]
    fn even_rgb_passes_through_unchanged() {
        let mut rgb = RgbImage::new(64, 48);
        rgb.put_pixel(10, 10, Rgb([1, 2, 3]));
        let normalized = normalize(DynamicImage::ImageRgb8(rgb)).unwrap();
        assert_eq!(normalized.dimensions(), (64, 48));
        assert_eq!(normalized.get_pixel(10, 10), &Rgb([1, 2, 3]));
    }

    #[test]
    fn zero_dimension_is_invalid() {
        let image = DynamicImage::new_rgb8(0, 100);
        assert!(matches!(
            normalize(image),
            Err(FaceCropError::InvalidImage(_))
        ));
    }

    #[test]
    fn rgba_is_flattened_over_black() {
        let mut rgba = RgbaImage::new(4, 4);
        rgba.put_pixel(0, 0, Rgba([200, 100, 50, 255]));
        rgba.put_pixel(1, 0, Rgba([200, 100, 50, 0]));
        let normalized = normalize(DynamicImage::ImageRgba8(rgba)).unwrap();
        assert_eq!(normalized.get_pixel(0, 0), &Rgb([200, 100, 50]));
        // Fully transparent pixel becomes the black background.
        assert_eq!(normalized.get_pixel(1, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn nearest_scaling_preserves_flat_color() {
        let mut rgb = RgbImage::new(7, 8);
        for pixel in rgb.pixels_mut() {
            *pixel = Rgb([9, 8, 7]);
        }
        let normalized = normalize(DynamicImage::ImageRgb8(rgb)).unwrap();
        assert_eq!(normalized.dimensions(), (8, 8));
        // Nearest-neighbor scaling introduces no blended pixels.
        for pixel in normalized.pixels() {
            assert_eq!(pixel, &Rgb([9, 8, 7]));
        }
    }
}
