use crate::shared::constants::DEFAULT_COOLDOWN_FRAMES;
use crate::shared::emotion::EmotionLabel;

/// Decides when a detected emotion may be spoken.
///
/// An announcement fires only on frames whose counter is a multiple of
/// the cooldown, and only when the emotion differs from the one most
/// recently announced. Firing records the emotion, so a face showing
/// the same emotion on the next eligible frame stays silent until a
/// different emotion is announced in between.
pub struct AnnouncementGate {
    cooldown_frames: u64,
    last_announced: Option<EmotionLabel>,
}

impl AnnouncementGate {
    pub fn new(cooldown_frames: u64) -> Self {
        Self {
            cooldown_frames: cooldown_frames.max(1),
            last_announced: None,
        }
    }

    /// Returns true when `emotion` should be announced for the frame
    /// with counter `frame_count`, updating the gate state on success.
    pub fn maybe_announce(&mut self, frame_count: u64, emotion: EmotionLabel) -> bool {
        if frame_count % self.cooldown_frames != 0 {
            return false;
        }
        if self.last_announced == Some(emotion) {
            return false;
        }
        self.last_announced = Some(emotion);
        true
    }

    pub fn last_announced(&self) -> Option<EmotionLabel> {
        self.last_announced
    }
}

impl Default for AnnouncementGate {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN_FRAMES)
    }
}
