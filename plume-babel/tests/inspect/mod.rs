//! Pasted HTML inspection tests
//!
//! Normalization, reports, inference, preset extraction and Markdown conversion.

mod extract;
mod infer;
mod markdown;
mod report;
