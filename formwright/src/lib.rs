//! # formwright
//!
//! Declarative form compiler. A form definition is turned into
//! attribute-complete items, checked for consistency, and rendered together
//! with a client-side validation routine that mirrors its rules. Rendered
//! output can be cached so later requests skip the pipeline entirely.
//!
//! This crate re-exports the sub-crates; depend on them directly for
//! finer-grained control.
//!
//! ```rust
//! # #[cfg(feature = "forms")]
//! # {
//! use formwright::forms::{FieldType, Form, FormConfig, Item, MemoryStore, RuleKind};
//!
//! let mut form = Form::builder(FormConfig::new("/contact"))
//!     .store(MemoryStore::new())
//!     .build()
//!     .unwrap();
//! form.item(
//!     Item::builder(FieldType::Email)
//!         .label("E-mail")
//!         .rule(RuleKind::Email, "")
//!         .build(),
//! );
//! assert!(form.check().is_empty());
//! # }
//! ```

/// Error type, logging, and text helpers.
pub use formwright_core as core;

/// Items, resolver, validation, client compiler, cache, and rendering.
#[cfg(feature = "forms")]
pub use formwright_forms as forms;

/// The `formwright` command framework and built-in commands.
#[cfg(feature = "cli")]
pub use formwright_cli as cli;

pub use formwright_core::{FormwrightError, FormwrightResult};

/// Third-party crates re-exported for convenience.
pub mod deps {
    pub use serde;
    pub use serde_json;
    pub use tracing;
    pub use tracing_subscriber;
}
