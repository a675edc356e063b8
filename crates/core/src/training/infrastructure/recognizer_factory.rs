use crate::training::domain::face_recognizer::FaceRecognizer;

/// Returns the eigenface recognizer for this build.
///
/// Only builds with the `opencv` feature carry a recognizer implementation.
pub fn create_recognizer() -> Result<Box<dyn FaceRecognizer>, Box<dyn std::error::Error>> {
    #[cfg(feature = "opencv")]
    {
        use super::opencv_eigen_recognizer::OpencvEigenRecognizer;
        Ok(Box::new(OpencvEigenRecognizer::default()))
    }
    #[cfg(not(feature = "opencv"))]
    {
        Err("eigenface recognition is unavailable: rebuild with `--features opencv`".into())
    }
}
