use crate::classification::domain::face_tensor::FaceTensor;

/// Domain interface for emotion classification.
///
/// Returns one probability per label in
/// [`EmotionLabel::ALL`](crate::shared::emotion::EmotionLabel::ALL)
/// order. Deterministic for a given tensor. Errors are per-face
/// recoverable: the caller skips the face, the session continues.
pub trait EmotionClassifier: Send {
    fn classify(&mut self, face: &FaceTensor) -> Result<Vec<f32>, Box<dyn std::error::Error>>;
}
