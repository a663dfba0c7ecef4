use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Builds the per-session output path `emotion_YYYYMMDD_HHMMSS.mp4`
/// inside `dir`, stamped with the session start time.
pub fn session_output_path(dir: &Path, started_at: DateTime<Local>) -> PathBuf {
    dir.join(format!("emotion_{}.mp4", started_at.format("%Y%m%d_%H%M%S")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_filename_uses_timestamp() {
        let ts = Local.with_ymd_and_hms(2026, 8, 30, 14, 5, 9).unwrap();
        let path = session_output_path(Path::new("/tmp/recordings"), ts);
        assert_eq!(
            path,
            PathBuf::from("/tmp/recordings/emotion_20260830_140509.mp4")
        );
    }

    #[test]
    fn test_distinct_seconds_give_distinct_files() {
        let a = Local.with_ymd_and_hms(2026, 8, 30, 14, 5, 9).unwrap();
        let b = Local.with_ymd_and_hms(2026, 8, 30, 14, 5, 10).unwrap();
        let dir = Path::new(".");
        assert_ne!(session_output_path(dir, a), session_output_path(dir, b));
    }
}
