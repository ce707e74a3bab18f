//! Face-aware image cropping: run an external face detector over an image
//! and crop to the single rectangle enclosing every detected face.
//!
//! Detection itself is pluggable — any engine that can report a midpoint
//! and eye distance per face implements [`FaceDetector`]. The crate owns
//! the geometry around it: normalizing input images into a form the
//! detector accepts, sizing a square box per face under a configurable
//! policy, and merging the boxes into one clipped crop region.
//!
//! # Example
//!
//! ```no_run
//! use facecrop::{FaceCropper, FaceDetection, FaceDetector};
//! use image::RgbImage;
//!
//! struct MyDetector;
//! impl FaceDetector for MyDetector {
//!     fn find_faces(
//!         &self,
//!         image: &RgbImage,
//!         max_faces: usize,
//!     ) -> Result<Vec<FaceDetection>, Box<dyn std::error::Error + Send + Sync>> {
//!         // Your detection engine here
//!         Ok(vec![])
//!     }
//! }
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let cropper = FaceCropper::new(Box::new(MyDetector));
//! let cropped = cropper.crop_face_bytes(&bytes).unwrap();
//! cropped.save("faces.png").unwrap();
//! ```
#![warn(missing_docs)]

mod crop;
mod error;
/// Face detection trait and data types.
pub mod face_detector;
mod geometry;
mod normalize;

use image::DynamicImage;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

/// Error type returned by facecrop operations.
pub use error::FaceCropError;
/// Face detection trait and per-face detection data.
pub use face_detector::{FaceDetection, FaceDetector};
/// Rectangle enclosing detected faces.
pub use geometry::FaceRegion;

/// How a detection's eye distance becomes a bounding-box diameter.
///
/// The two margins are mutually exclusive; the engine's policy setters
/// replace the whole variant, so the last one set wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizingPolicy {
    /// Fixed pixel margin added on both sides of each axis.
    FaceMargin(u32),

    /// Margin proportional to the eye distance.
    EyeMargin(f32),
}

/// Default maximum number of faces per detection call.
const MAX_FACES: usize = 8;

/// Default minimum face box diameter in pixels.
const MIN_FACE_SIZE: u32 = 200;

/// Default eye-distance factor for the [`SizingPolicy::EyeMargin`] policy.
const EYE_MARGIN_FACTOR: f32 = 2.0;

/// Cropping configuration, read as a snapshot at the start of each crop
/// call. Mutating the engine mid-call from another thread does not affect
/// an operation already in flight.
#[derive(Debug, Clone, Copy)]
pub struct CropConfig {
    /// Maximum number of faces passed to the detector. Must be > 0.
    pub max_faces: usize,
    /// Minimum face box diameter in pixels. Must be > 0.
    pub min_face_size: u32,
    /// Active sizing policy.
    pub sizing_policy: SizingPolicy,
    /// Draw midpoint markers in the plain crop path as well.
    pub debug: bool,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            max_faces: MAX_FACES,
            min_face_size: MIN_FACE_SIZE,
            sizing_policy: SizingPolicy::EyeMargin(EYE_MARGIN_FACTOR),
            debug: false,
        }
    }
}

/// Face-cropping engine.
///
/// Holds a detector and mutable configuration. Every crop call reads the
/// configuration once; callers that reconfigure concurrently with cropping
/// must serialize externally (or use one engine per caller).
pub struct FaceCropper {
    config: CropConfig,
    detector: Box<dyn FaceDetector>,
}

impl FaceCropper {
    /// Create an engine with default configuration:
    /// up to 8 faces, 200px minimum face size, `EyeMargin(2.0)` policy.
    pub fn new(detector: Box<dyn FaceDetector>) -> Self {
        Self {
            config: CropConfig::default(),
            detector,
        }
    }

    /// Create an engine with the `FaceMargin` policy pre-selected.
    pub fn with_face_margin(detector: Box<dyn FaceDetector>, margin_px: u32) -> Self {
        let mut cropper = Self::new(detector);
        cropper.set_face_margin_px(margin_px);
        cropper
    }

    /// Create an engine with the `EyeMargin` policy pre-selected.
    pub fn with_eye_distance_margin(detector: Box<dyn FaceDetector>, factor: f32) -> Self {
        let mut cropper = Self::new(detector);
        cropper.set_eye_distance_factor_margin(factor);
        cropper
    }

    /// Create an engine from an explicit configuration snapshot.
    pub fn with_config(detector: Box<dyn FaceDetector>, config: CropConfig) -> Self {
        Self { config, detector }
    }

    /// Crop to the region enclosing all detected faces.
    ///
    /// Zero detections is not an error: the normalized image is returned
    /// whole, so callers expecting a face-sized crop should compare the
    /// output dimensions against the input.
    pub fn crop_face(&self, image: DynamicImage) -> Result<image::RgbImage, FaceCropError> {
        let config = self.config;
        let outcome = crop::crop_pipeline(image, &config, self.detector.as_ref(), config.debug)?;

        let (width, height) = outcome.image.dimensions();
        if outcome.region.is_full(width, height) {
            return Ok(outcome.image);
        }

        let region = outcome.region;
        Ok(image::imageops::crop_imm(
            &outcome.image,
            region.min_x,
            region.min_y,
            region.width(),
            region.height(),
        )
        .to_image())
    }

    /// Decode raw bytes (JPEG, PNG, WebP, ...) and crop as [`Self::crop_face`].
    pub fn crop_face_bytes(&self, bytes: &[u8]) -> Result<image::RgbImage, FaceCropError> {
        self.crop_face(decode_image(bytes)?)
    }

    /// Run the full pipeline with debug annotation: a cross at each face's
    /// midpoint, a circle of radius 1.5 × eye distance around it, and the
    /// final crop region outlined. Returns the full, uncropped image.
    pub fn crop_face_debug(&self, image: DynamicImage) -> Result<image::RgbImage, FaceCropError> {
        let config = self.config;
        let mut outcome = crop::crop_pipeline(image, &config, self.detector.as_ref(), true)?;

        let region = outcome.region;
        let rect = Rect::at(region.min_x as i32, region.min_y as i32)
            .of_size(region.width(), region.height());
        draw_hollow_rect_mut(&mut outcome.image, rect, crop::REGION_COLOR);

        Ok(outcome.image)
    }

    /// Decode raw bytes and annotate as [`Self::crop_face_debug`].
    pub fn crop_face_debug_bytes(&self, bytes: &[u8]) -> Result<image::RgbImage, FaceCropError> {
        self.crop_face_debug(decode_image(bytes)?)
    }

    /// Maximum number of faces per detection call.
    pub fn max_faces(&self) -> usize {
        self.config.max_faces
    }

    /// Set the maximum number of faces per detection call.
    pub fn set_max_faces(&mut self, max_faces: usize) {
        self.config.max_faces = max_faces;
    }

    /// Minimum face box diameter in pixels.
    pub fn face_min_size(&self) -> u32 {
        self.config.min_face_size
    }

    /// Set the minimum face box diameter in pixels.
    pub fn set_face_min_size(&mut self, min_face_size: u32) {
        self.config.min_face_size = min_face_size;
    }

    /// The active sizing policy.
    pub fn sizing_policy(&self) -> SizingPolicy {
        self.config.sizing_policy
    }

    /// Set a fixed pixel margin and switch to the `FaceMargin` policy.
    pub fn set_face_margin_px(&mut self, margin_px: u32) {
        self.config.sizing_policy = SizingPolicy::FaceMargin(margin_px);
    }

    /// Set an eye-distance factor and switch to the `EyeMargin` policy.
    pub fn set_eye_distance_factor_margin(&mut self, factor: f32) {
        self.config.sizing_policy = SizingPolicy::EyeMargin(factor);
    }

    /// Whether the plain crop path draws midpoint markers.
    pub fn debug(&self) -> bool {
        self.config.debug
    }

    /// Enable or disable marker drawing in the plain crop path.
    pub fn set_debug(&mut self, debug: bool) {
        self.config.debug = debug;
    }
}

/// Decode input bytes into a `DynamicImage`.
fn decode_image(bytes: &[u8]) -> Result<DynamicImage, FaceCropError> {
    image::load_from_memory(bytes).map_err(|e| FaceCropError::InvalidImage(e.to_string()))
}
