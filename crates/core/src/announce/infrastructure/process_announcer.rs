use std::process::{Command, Stdio};

use crate::announce::domain::announcer::Announcer;

#[cfg(target_os = "macos")]
const DEFAULT_SPEECH_COMMAND: &str = "say";
#[cfg(not(target_os = "macos"))]
const DEFAULT_SPEECH_COMMAND: &str = "espeak";

/// Speaks by running an external text-to-speech program, passing the
/// text as the final argument and waiting for the process to exit.
pub struct ProcessAnnouncer {
    program: String,
    args: Vec<String>,
}

impl ProcessAnnouncer {
    /// Uses the platform's conventional speech program (`say` on macOS,
    /// `espeak` elsewhere).
    pub fn new() -> Self {
        Self::with_command(DEFAULT_SPEECH_COMMAND, &[])
    }

    pub fn with_command(program: &str, args: &[String]) -> Self {
        Self {
            program: program.to_string(),
            args: args.to_vec(),
        }
    }
}

impl Default for ProcessAnnouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Announcer for ProcessAnnouncer {
    fn speak(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;

        if !status.success() {
            return Err(format!("speech command '{}' exited with {status}", self.program).into());
        }
        Ok(())
    }
}
