//! Style model: the [`StyleConfig`] record, its validator, the per-kind compiler and the
//! refinement resolver.
//!
//!     field.rs      field table (names, defaults, constraints) and the generated record
//!     config.rs     partial configs ([`StylePatch`]) and serde glue
//!     validate.rs   the forgiving validator, the only way external data becomes a config
//!     kind.rs       element kinds and their editable-field allow-lists
//!     compiler.rs   config -> inline declaration strings
//!     refine.rs     per-kind patches and their resolution over a base config

pub mod compiler;
pub mod config;
pub mod field;
pub mod kind;
pub mod refine;
pub mod validate;

pub use config::{StylePatch, SAMPLE_MARKDOWN};
pub use field::{FieldConstraint, Keyword, StyleConfig, StyleField, StyleValue, TextAlign, WordBreak};
pub use kind::ElementKind;
pub use refine::{resolve, RefineByTypePatch, ResolvedStyles};
pub use validate::validate;
