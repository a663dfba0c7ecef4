pub mod annotation;
pub mod announce;
pub mod capture;
pub mod classification;
pub mod detection;
pub mod display;
pub mod pipeline;
pub mod recording;
pub mod shared;
