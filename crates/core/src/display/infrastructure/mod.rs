pub mod minifb_display;
pub mod null_display;
