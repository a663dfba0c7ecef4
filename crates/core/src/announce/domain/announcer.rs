/// Port for speaking an announcement out loud.
///
/// Implementations block until the utterance finishes so consecutive
/// announcements never overlap.
pub trait Announcer: Send {
    fn speak(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>>;
}
