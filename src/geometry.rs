use crate::face_detector::FaceDetection;
use crate::SizingPolicy;

/// Axis-aligned rectangle in pixel coordinates, `min` inclusive and `max`
/// exclusive, clipped to the image it was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRegion {
    /// Left edge.
    pub min_x: u32,
    /// Top edge.
    pub min_y: u32,
    /// Right edge (exclusive).
    pub max_x: u32,
    /// Bottom edge (exclusive).
    pub max_y: u32,
}

impl FaceRegion {
    /// The full extent of a `width` × `height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            max_x: width,
            max_y: height,
        }
    }

    /// Region width in pixels.
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    /// Region height in pixels.
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    /// Whether this region covers the whole `width` × `height` image.
    pub fn is_full(&self, width: u32, height: u32) -> bool {
        *self == Self::full(width, height)
    }
}

/// Square bounding box for a single detection.
///
/// The box diameter is three times the eye distance plus the policy margin,
/// floored at `min_face_size`. The top-left corner is clamped to zero
/// before the extent is added, and the bottom-right is clamped to the image
/// afterwards, so a face near an edge gets a smaller box rather than a
/// shifted one.
pub(crate) fn face_box(
    detection: &FaceDetection,
    policy: SizingPolicy,
    min_face_size: u32,
    image_width: u32,
    image_height: u32,
) -> FaceRegion {
    // Eye distance times three approximates the face's enclosing circle.
    let mut diameter = (detection.eyes_distance * 3.0).round() as i64;

    match policy {
        // Margin applies on both sides of each axis.
        SizingPolicy::FaceMargin(margin) => diameter += i64::from(margin) * 2,
        SizingPolicy::EyeMargin(factor) => {
            diameter += (detection.eyes_distance * factor).round() as i64;
        }
    }

    diameter = diameter.max(i64::from(min_face_size));

    let half = (diameter / 2) as f32;
    let min_x = ((detection.mid_x - half) as i64).max(0);
    let min_y = ((detection.mid_y - half) as i64).max(0);

    let max_x = (min_x + diameter).min(i64::from(image_width));
    let max_y = (min_y + diameter).min(i64::from(image_height));

    FaceRegion {
        min_x: min_x as u32,
        min_y: min_y as u32,
        max_x: max_x as u32,
        max_y: max_y as u32,
    }
}

/// Smallest rectangle enclosing every region, clipped to the image extent.
///
/// `regions` must be non-empty; the caller substitutes the full image for
/// zero detections.
pub(crate) fn union_regions(
    regions: &[FaceRegion],
    image_width: u32,
    image_height: u32,
) -> FaceRegion {
    debug_assert!(!regions.is_empty());

    let mut min_x = image_width;
    let mut min_y = image_height;
    let mut max_x = 0;
    let mut max_y = 0;

    for region in regions {
        min_x = min_x.min(region.min_x);
        min_y = min_y.min(region.min_y);
        max_x = max_x.max(region.max_x);
        max_y = max_y.max(region.max_y);
    }

    // Guard against a union edge pushed past the image by per-box rounding.
    let mut width = max_x - min_x;
    let mut height = max_y - min_y;
    if min_x + width > image_width {
        width = image_width - min_x;
    }
    if min_y + height > image_height {
        height = image_height - min_y;
    }

    FaceRegion {
        min_x,
        min_y,
        max_x: min_x + width,
        max_y: min_y + height,
    }
}
