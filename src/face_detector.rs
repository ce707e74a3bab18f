use image::RgbImage;

/// One face found by a detector: the midpoint between the eyes and the
/// eye-to-eye distance, both in pixel coordinates of the detected image.
///
/// Detections are ephemeral — coordinates are only meaningful for the
/// image that produced them.
#[derive(Debug, Clone, Copy)]
pub struct FaceDetection {
    /// X coordinate of the midpoint between the eyes.
    pub mid_x: f32,
    /// Y coordinate of the midpoint between the eyes.
    pub mid_y: f32,
    /// Distance between the eyes in pixels. Always positive.
    pub eyes_distance: f32,
}

/// Pluggable face detection backend.
///
/// Implement this trait to plug in any face detection engine (SeetaFace,
/// ONNX, dlib, a platform API) and pass it to [`crate::FaceCropper::new`].
///
/// The image handed to `find_faces` always has even dimensions and 8-bit
/// RGB pixels — [`crate::FaceCropper`] normalizes before every call, so
/// implementations may rely on that and reject anything else.
pub trait FaceDetector: Send + Sync {
    /// Detect up to `max_faces` faces in the image.
    ///
    /// Returning an empty vector means no faces were found; it is not an
    /// error. Errors are reserved for a detector that cannot process the
    /// image at all.
    fn find_faces(
        &self,
        image: &RgbImage,
        max_faces: usize,
    ) -> Result<Vec<FaceDetection>, Box<dyn std::error::Error + Send + Sync>>;
}
