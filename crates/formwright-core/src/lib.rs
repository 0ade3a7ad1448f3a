//! # formwright-core
//!
//! Core types shared by the formwright crates: the error type, tracing setup,
//! the text rules used to derive names and ids, and keyed digests.
//!
//! ## Modules
//!
//! - [`error`] - Error type and result alias
//! - [`logging`] - Tracing subscriber setup and render spans
//! - [`text`] - Name, id, and value derivation from labels
//! - [`signing`] - Keyed digests and base64 helpers

pub mod error;
pub mod logging;
pub mod signing;
pub mod text;

// Re-export the most commonly used types at the crate root.
pub use error::{FormwrightError, FormwrightResult};
