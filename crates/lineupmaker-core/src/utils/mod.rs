//! Utility functions for string formatting and comparison.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{cmp_ignore_case, contains_ignore_case, format_age_minutes, format_weight, truncate_string};
