pub mod recording_sink;
pub mod session_file;
