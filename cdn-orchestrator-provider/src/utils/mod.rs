//! Utility modules.

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;

/// Time zone aware timestamp formatting, paging arithmetic and statistics grids.
pub mod time;
