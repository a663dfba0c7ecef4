pub mod announcement_gate;
pub mod announcer;
