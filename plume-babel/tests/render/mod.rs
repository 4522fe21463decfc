//! Markdown → HTML pipeline tests
//!
//! End-to-end renders checked through the resulting HTML string.

mod pipeline;
mod refine;
mod safe_mode;
mod sanitize;
