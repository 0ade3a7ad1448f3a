//! Form-level configuration.
//!
//! [`FormConfig`] holds exactly the recognised form options. Definitions are
//! deserialized into it with serde, so unknown keys are ignored at
//! construction time. Boolean options are [`Toggle`]s: the declarative input
//! may carry blanks or non-boolean values, which the validation engine
//! coerces with a warning.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

use crate::item::scalar_to_string;

/// A boolean form option as declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggle {
    /// A strict boolean.
    Set(bool),
    /// Declared but empty (`""` or `null`).
    Blank,
    /// Declared with something that is not a boolean.
    Invalid(String),
}

impl Toggle {
    /// Returns the loose truth value of the toggle.
    ///
    /// Blank is false; invalid values are true unless empty or `"0"`/`"false"`.
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Set(b) => *b,
            Self::Blank => false,
            Self::Invalid(raw) => !matches!(raw.trim(), "" | "0" | "false"),
        }
    }

    /// Returns `true` if the toggle holds a strict boolean.
    pub const fn is_strict(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// Coerces a non-strict toggle to a boolean: blank becomes `true`, any
    /// other value becomes `false`.
    ///
    /// Returns the assigned value when a coercion happened.
    pub fn coerce(&mut self) -> Option<bool> {
        let assigned = match self {
            Self::Set(_) => return None,
            Self::Blank => true,
            Self::Invalid(_) => false,
        };
        *self = Self::Set(assigned);
        Some(assigned)
    }
}

impl From<bool> for Toggle {
    fn from(value: bool) -> Self {
        Self::Set(value)
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set(b) => write!(f, "{b}"),
            Self::Blank => f.write_str(""),
            Self::Invalid(raw) => f.write_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for Toggle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Bool(b) => Self::Set(b),
            serde_json::Value::Null => Self::Blank,
            serde_json::Value::String(s) if s.is_empty() => Self::Blank,
            serde_json::Value::String(s) => Self::Invalid(s),
            other => Self::Invalid(other.to_string()),
        })
    }
}

/// Markup dialect of the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// HTML: void elements are not self-closed.
    Html,
    /// XHTML: void elements self-close and boolean attributes carry values.
    Xhtml,
}

impl Markup {
    /// Parses a dialect name case-insensitively. Anything unknown is HTML.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("xhtml") {
            Self::Xhtml
        } else {
            Self::Html
        }
    }
}

/// A custom button rendered after the submit and reset buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ButtonSpec {
    /// Caption. Buttons without a title are not rendered.
    pub title: Option<String>,
    /// Submission name; derived from the title when absent.
    pub name: Option<String>,
    /// Element id.
    pub id: Option<String>,
    /// Extra CSS classes.
    pub class: Option<String>,
    /// Inline click handler.
    pub onclick: Option<String>,
}

/// The complete set of form options.
///
/// # Examples
///
/// ```
/// use formwright_forms::config::FormConfig;
///
/// let config = FormConfig::new("/contact");
/// assert_eq!(config.method, "post");
/// assert_eq!(config.prefix, "form_");
/// assert!(config.validate.is_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    // ── Form element ─────────────────────────────────────────────────

    /// Submission target.
    #[serde(deserialize_with = "loose_text")]
    pub action: String,
    /// Submission method, `get` or `post`.
    #[serde(deserialize_with = "loose_text")]
    pub method: String,
    /// Encoding type.
    #[serde(deserialize_with = "loose_text")]
    pub enctype: String,
    /// Markup dialect, `html` or `xhtml`.
    #[serde(deserialize_with = "loose_text")]
    pub markup: String,
    /// Form element id.
    #[serde(deserialize_with = "loose_text")]
    pub id: String,
    /// Prefix for generated DOM attribute values.
    #[serde(deserialize_with = "loose_text")]
    pub prefix: String,
    /// Prefix for generated script identifiers.
    #[serde(deserialize_with = "loose_text")]
    pub prefix_js: String,
    /// Title rendered above the form.
    #[serde(deserialize_with = "loose_text")]
    pub title: String,

    // ── Attribute inference ──────────────────────────────────────────

    /// Add `{prefix}item` and `{prefix}item_{type}` classes to items.
    pub auto_class: Toggle,
    /// Derive ids from names.
    pub auto_id: Toggle,
    /// Derive names from labels.
    pub auto_name: Toggle,
    /// Derive option values from option names.
    pub auto_option_value: Toggle,
    /// Assign tab positions.
    #[serde(alias = "auto_tabindex")]
    pub auto_tab_index: Toggle,

    // ── Behaviour ────────────────────────────────────────────────────

    /// Run the consistency checks before rendering.
    pub validate: Toggle,
    /// Show warnings and a configuration dump in the output.
    pub debug: Toggle,
    /// Append a honeypot field.
    pub honeypot: Toggle,
    /// Append a captcha challenge (requires `js`).
    pub captcha: Toggle,
    /// Emit the client-side validation routine.
    pub js: Toggle,
    /// Wrap the output in a container div.
    pub container: Toggle,

    // ── Assets ───────────────────────────────────────────────────────

    /// Stylesheet linked before the form.
    #[serde(deserialize_with = "loose_text")]
    pub css_file: String,
    /// Script loaded before the form.
    #[serde(deserialize_with = "loose_text")]
    pub js_file: String,
    /// Location of the rich-text editor script.
    #[serde(deserialize_with = "loose_text")]
    pub editor: String,

    // ── Captcha ──────────────────────────────────────────────────────

    /// Label of the captcha challenge.
    #[serde(deserialize_with = "loose_text")]
    pub captcha_label: String,
    /// Secret the challenge code is keyed with.
    #[serde(deserialize_with = "loose_text")]
    pub captcha_key: String,

    // ── Cache ────────────────────────────────────────────────────────

    /// Directory the cache artifact lives in.
    #[serde(deserialize_with = "loose_text")]
    pub cache_directory: String,
    /// Artifact filename; empty disables caching.
    #[serde(deserialize_with = "loose_text")]
    pub cache: String,

    // ── Buttons ──────────────────────────────────────────────────────

    /// Reset button caption; empty renders no reset button.
    #[serde(deserialize_with = "loose_text")]
    pub reset: String,
    /// Submit button caption; empty renders no submit button.
    #[serde(deserialize_with = "loose_text")]
    pub submit: String,
    /// Extra buttons.
    #[serde(alias = "button")]
    pub buttons: Vec<ButtonSpec>,
}

/// Reads a string option, taking numbers and booleans as their text so the
/// consistency checks can correct them instead of the load failing.
fn loose_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            action: String::new(),
            method: "post".to_string(),
            enctype: DEFAULT_ENCTYPE.to_string(),
            markup: "html".to_string(),
            id: String::new(),
            prefix: "form_".to_string(),
            prefix_js: "form".to_string(),
            title: String::new(),
            auto_class: Toggle::Set(true),
            auto_id: Toggle::Set(true),
            auto_name: Toggle::Set(true),
            auto_option_value: Toggle::Set(true),
            auto_tab_index: Toggle::Set(true),
            validate: Toggle::Set(true),
            debug: Toggle::Set(false),
            honeypot: Toggle::Set(false),
            captcha: Toggle::Set(false),
            js: Toggle::Set(true),
            container: Toggle::Set(true),
            css_file: String::new(),
            js_file: String::new(),
            editor: "/ckeditor/ckeditor.js".to_string(),
            captcha_label: "Security Question:".to_string(),
            captcha_key: "xxeeTT".to_string(),
            cache_directory: "cache/".to_string(),
            cache: String::new(),
            reset: String::new(),
            submit: "Submit".to_string(),
            buttons: Vec::new(),
        }
    }
}

/// The urlencoded default encoding type.
pub const DEFAULT_ENCTYPE: &str = "application/x-www-form-urlencoded";

/// The multipart encoding type.
pub const MULTIPART_ENCTYPE: &str = "multipart/form-data";

impl FormConfig {
    /// Creates a configuration with the given submission target and defaults elsewhere.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Self::default()
        }
    }

    /// Returns the resolved markup dialect.
    pub fn markup(&self) -> Markup {
        Markup::parse(&self.markup)
    }

    /// Returns a copy safe to show in debug output, with the captcha secret masked.
    pub fn redacted(&self) -> Self {
        Self {
            captcha_key: "********".to_string(),
            ..self.clone()
        }
    }

    /// Returns the artifact location when both a directory and a filename are configured.
    pub fn cache_location(&self) -> Option<PathBuf> {
        if self.cache.is_empty() || self.cache_directory.is_empty() {
            return None;
        }
        Some(PathBuf::from(&self.cache_directory).join(&self.cache))
    }
}
