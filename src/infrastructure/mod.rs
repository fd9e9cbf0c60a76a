pub mod log_redact;
pub mod log_sanitizer;
pub mod logging;
pub mod relay_cache;
