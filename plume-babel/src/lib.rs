//! Markdown to inline-styled HTML for rich-text hosts, and back
//!
//!     Rich-text hosts (publishing editors, mail composers) throw away stylesheets and classes
//!     on paste and keep only a short list of tags with inline `style` attributes. This crate
//!     compiles Markdown into exactly that shape, and reads such HTML back into style data.
//!
//!     This is a pure lib: it powers plume-cli but is shell agnostic. No code here reads files,
//!     environment variables or prints to stdout. Every function takes its inputs by value or
//!     reference and returns fresh values; nothing is cached between calls.
//!
//! Architecture
//!
//!     Both directions share one tree type (markup5ever_rcdom) and one style model:
//!
//!     Forward:  Markdown → Comrak AST → element tree → StyleInjection → [SafeModeDegrade]
//!               → Sanitizer → HTML string
//!     Reverse:  HTML → html5ever tree → normalize → report | inferred config | presets | Markdown
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── dom.rs                  # rcdom helpers shared by both directions
//!     ├── style
//!     │   ├── field.rs            # field table, StyleConfig
//!     │   ├── config.rs           # StylePatch, serde glue
//!     │   ├── validate.rs         # the forgiving validator
//!     │   ├── kind.rs             # element kinds, editable-field allow-lists
//!     │   ├── compiler.rs         # config → inline declarations
//!     │   └── refine.rs           # per-kind patches and their resolution
//!     ├── render
//!     │   ├── lower.rs            # Comrak AST → element tree
//!     │   ├── inject.rs           # style injection pass
//!     │   ├── safe.rs             # safe-mode degrade pass
//!     │   └── sanitize.rs         # allow-list sanitizer pass
//!     ├── inspect
//!     │   ├── normalize.rs        # editor-artifact cleanup
//!     │   ├── declarations.rs     # inline style parsing, frequency tables
//!     │   ├── report.rs           # per-tag statistics
//!     │   ├── infer.rs            # probe table, whole-document inference
//!     │   ├── extract.rs          # per-kind presets
//!     │   └── to_markdown.rs      # HTML → CommonMark
//!     └── library
//!         ├── template.rs         # templates, import/export, apply
//!         ├── preset.rs           # presets and the preset library
//!         └── mapping.rs          # template preset references → refine patch
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     └── <area>
//!         └── <testname>.rs
//!
//!     Rust does not discover tests in subdirectories by default, so tests/lib.rs includes each
//!     area as a module.
//!
//! Validation
//!
//!     External style data is never trusted. `validate` turns any partial config into a total
//!     one: unknown fields are ignored, out-of-range numbers are clamped, malformed colours and
//!     keywords fall back to defaults. It never fails. The only hard rejection in the crate is
//!     template import, which reports every offending field at once.
//!
//! Library Choices
//!
//!     We never write a Markdown parser or an HTML parser/serializer ourselves: comrak parses
//!     and formats CommonMark, html5ever parses and serializes HTML, url classifies link
//!     schemes. The code here only adapts between their trees.

pub mod dom;
pub mod error;
pub mod inspect;
pub mod library;
pub mod render;
pub mod style;

pub use error::{BabelError, ImportIssue, TemplateImportError};
pub use inspect::{
    extract_presets, infer_config, inspect, inspect_with_limit, normalize, to_markdown,
    ExtractedElementPreset, ExtractionResult, FormatInspectionReport,
};
pub use library::{
    apply_template, derive_refine_by_type, export_template_json, parse_template_import,
    ElementStylePreset, StyleLibrary, StyleTemplate,
};
pub use render::{render, render_markdown, RenderMode, RenderOptions};
pub use style::{
    resolve, validate, ElementKind, RefineByTypePatch, StyleConfig, StyleField, StylePatch,
    StyleValue,
};
