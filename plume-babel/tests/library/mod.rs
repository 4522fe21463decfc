//! Template and preset library tests

mod presets;
mod templates;
