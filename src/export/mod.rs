//! Export functionality for scan results.
//!
//! Results are exported as a single pretty-printed JSON document.

mod json;

pub use json::{to_json_string, write_json_report};
