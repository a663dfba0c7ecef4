pub mod process_announcer;
