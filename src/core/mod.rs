//! Core infrastructure shared by drivers
//!
//! Logging macros (`log_info!`, `log_warn!`, `log_error!`, `log_debug!`,
//! `log_trace!`) are exported at crate root via `#[macro_export]`.

pub mod logging;
