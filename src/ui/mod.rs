//! User interface module - console output for CI logs.

pub mod formatter;

pub use formatter::{
    display_error, display_outcome, display_status, display_success, format_outcome,
};
