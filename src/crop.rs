use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_hollow_circle_mut};
use tracing::debug;

use crate::error::FaceCropError;
use crate::face_detector::FaceDetector;
use crate::geometry::{face_box, union_regions, FaceRegion};
use crate::normalize::normalize;
use crate::CropConfig;

/// Marker color for midpoints and eye circles.
pub(crate) const MARKER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Outline color for the final union region.
pub(crate) const REGION_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Normalized image plus the region enclosing all detected faces.
///
/// Consumed immediately by the caller: either the region is extracted as a
/// sub-image or an outline is drawn over the full image.
pub(crate) struct CropOutcome {
    pub image: RgbImage,
    pub region: FaceRegion,
}

/// Run the crop pipeline: normalize, detect, size each face, take the union.
///
/// With `draw_markers`, each detection's midpoint and eye circle are painted
/// onto the working image before the union is computed.
pub(crate) fn crop_pipeline(
    image: image::DynamicImage,
    config: &CropConfig,
    detector: &dyn FaceDetector,
    draw_markers: bool,
) -> Result<CropOutcome, FaceCropError> {
    let mut canvas = normalize(image)?;
    let (width, height) = (canvas.width(), canvas.height());

    let detections = detector
        .find_faces(&canvas, config.max_faces)
        .map_err(|e| FaceCropError::DetectionFailed(e.to_string()))?;
    debug!(faces = detections.len(), "face detection complete");

    if detections.is_empty() {
        return Ok(CropOutcome {
            image: canvas,
            region: FaceRegion::full(width, height),
        });
    }

    let mut boxes = Vec::with_capacity(detections.len().min(config.max_faces));
    for detection in detections.iter().take(config.max_faces) {
        if draw_markers {
            let center = (detection.mid_x as i32, detection.mid_y as i32);
            draw_cross_mut(&mut canvas, MARKER_COLOR, center.0, center.1);
            let radius = (detection.eyes_distance * 1.5) as i32;
            draw_hollow_circle_mut(&mut canvas, center, radius, MARKER_COLOR);
        }

        boxes.push(face_box(
            detection,
            config.sizing_policy,
            config.min_face_size,
            width,
            height,
        ));
    }

    let region = union_regions(&boxes, width, height);
    Ok(CropOutcome {
        image: canvas,
        region,
    })
}
