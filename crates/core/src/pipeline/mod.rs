pub mod pipeline_logger;
pub mod record_emotions_use_case;
