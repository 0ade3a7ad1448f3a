//! # formwright-forms
//!
//! Turns a declarative form definition into validated, attribute-complete
//! items, rendered markup, and a matching client-side validation routine.
//!
//! ## Pipeline
//!
//! ```text
//! FormConfig + items ──▶ AutoAttributes ──▶ validation ──▶ compile + render ──▶ cache
//! ```
//!
//! ## Modules
//!
//! - [`item`] - Items, options, and validation rules
//! - [`config`] - Form options and loose boolean toggles
//! - [`resolver`] - Name, id, option value, class, and tab position inference
//! - [`validation`] - Form-level, cache, and cross-item consistency checks
//! - [`client`] - Client validation IR, compiler, and script emitter
//! - [`captcha`] - Challenge code derivation and markup
//! - [`cache`] - Render cache state machine and artifact stores
//! - [`markup`] - Item markup
//! - [`form`] - The form pipeline
//! - [`loader`] - TOML and JSON definitions

pub mod cache;
pub mod captcha;
pub mod client;
pub mod config;
pub mod form;
pub mod item;
pub mod loader;
pub mod markup;
pub mod resolver;
pub mod validation;

pub use cache::{ArtifactStore, CacheMachine, CacheState, FileStore, MemoryStore};
pub use captcha::{Challenge, ClientIdentity, CodeOrder};
pub use client::{compile, ClientProgram, ScriptEmitter};
pub use config::{FormConfig, Markup, Toggle};
pub use form::{Form, FormBuilder};
pub use item::{FieldType, Item, ItemOption, RenderMethod, RuleKind, Rules};
pub use loader::FormDefinition;
pub use resolver::AutoAttributes;
pub use validation::Report;
