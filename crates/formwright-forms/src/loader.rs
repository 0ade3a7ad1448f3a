//! Form definitions from TOML and JSON files.
//!
//! A definition holds a `form` table of options and an `items` array of item
//! records:
//!
//! ```toml
//! [form]
//! action = "/contact"
//! cache = "contact.html"
//!
//! [[items]]
//! type = "text"
//! label = "Full Name:"
//! validation = { required = "", maxlength = 40 }
//!
//! [[items]]
//! type = "radio"
//! label = "Size"
//! option = [{ label = "Small" }, { label = "Large", selected = true }]
//! ```
//!
//! Unknown form options are ignored. Item records that do not have the
//! expected shape are skipped.
//!
//! ## Environment overrides
//!
//! Applied after loading, highest priority:
//!
//! | Env Var | Option |
//! |---|---|
//! | `FORMWRIGHT_CACHE_DIRECTORY` | `cache_directory` |
//! | `FORMWRIGHT_DEBUG` | `debug` |
//! | `FORMWRIGHT_PREFIX` | `prefix` |
//! | `FORMWRIGHT_PREFIX_JS` | `prefix_js` |

use std::path::Path;

use serde::{Deserialize, Deserializer};

use formwright_core::{FormwrightError, FormwrightResult};

use crate::config::{FormConfig, Toggle};
use crate::item::{scalar_to_string, FieldType, Item, ItemOption, Rules};

/// A loaded form definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefinition {
    /// Form options.
    pub form: FormConfig,
    /// Items in declaration order.
    pub items: Vec<Item>,
}

#[derive(Deserialize)]
struct RawDefinition {
    #[serde(default)]
    form: FormConfig,
    #[serde(default, alias = "item")]
    items: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct ItemRecord {
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    label: String,
    #[serde(default, deserialize_with = "loose_string")]
    value: Option<String>,
    #[serde(default)]
    validation: Rules,
    #[serde(default, alias = "options")]
    option: Vec<OptionRecord>,
    #[serde(default)]
    class: ClassList,
    #[serde(default)]
    tabindex: Option<u32>,
    #[serde(default)]
    autofocus: bool,
    #[serde(default = "default_true")]
    container: bool,
}

#[derive(Deserialize)]
struct OptionRecord {
    #[serde(default)]
    id: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    value: Option<String>,
    #[serde(default)]
    tabindex: Option<u32>,
    #[serde(default)]
    selected: bool,
}

/// Classes given either as one space-separated string or as a list.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClassList {
    One(String),
    Many(Vec<String>),
}

impl Default for ClassList {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl ClassList {
    fn into_tokens(self) -> Vec<String> {
        match self {
            Self::One(s) => s.split_whitespace().map(str::to_string).collect(),
            Self::Many(v) => v,
        }
    }
}

const fn default_true() -> bool {
    true
}

fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.map(|v| scalar_to_string(&v)))
}

impl From<OptionRecord> for ItemOption {
    fn from(record: OptionRecord) -> Self {
        Self {
            id: record.id,
            label: record.label,
            name: record.name,
            value: record.value,
            tabindex: record.tabindex,
            selected: record.selected,
        }
    }
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        let mut builder = Self::builder(FieldType::parse(&record.field_type))
            .id(record.id)
            .name(record.name)
            .label(record.label)
            .value(record.value.unwrap_or_default())
            .rules(record.validation)
            .autofocus(record.autofocus)
            .container(record.container);
        if let Some(tabindex) = record.tabindex {
            builder = builder.tabindex(tabindex);
        }
        for option in record.option {
            builder = builder.option(option.into());
        }
        for class in record.class.into_tokens() {
            builder = builder.class(class);
        }
        builder.build()
    }
}

/// Loads a definition from a TOML string.
pub fn from_toml_str(toml_str: &str) -> FormwrightResult<FormDefinition> {
    let value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| FormwrightError::Configuration(format!("Failed to parse TOML: {e}")))?;
    definition_from_json(toml_to_json(value))
}

/// Loads a definition from a JSON string.
pub fn from_json_str(json_str: &str) -> FormwrightResult<FormDefinition> {
    let value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| FormwrightError::Serialization(format!("Failed to parse JSON: {e}")))?;
    definition_from_json(value)
}

/// Loads a definition file, choosing the format by extension (`.toml` or `.json`).
pub fn from_file(path: impl AsRef<Path>) -> FormwrightResult<FormDefinition> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        FormwrightError::Configuration(format!(
            "Failed to read definition file '{}': {e}",
            path.display()
        ))
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => from_toml_str(&content),
        Some(ext) if ext.eq_ignore_ascii_case("json") => from_json_str(&content),
        _ => Err(FormwrightError::Configuration(format!(
            "Unsupported definition format '{}', expected .toml or .json",
            path.display()
        ))),
    }
}

/// Loads a definition file and applies environment overrides.
pub fn from_file_with_env(path: impl AsRef<Path>) -> FormwrightResult<FormDefinition> {
    let mut definition = from_file(path)?;
    apply_env_overrides(&mut definition.form);
    Ok(definition)
}

/// Applies `FORMWRIGHT_*` environment variables to a configuration.
pub fn apply_env_overrides(config: &mut FormConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

/// Applies overrides read through `lookup`, keyed by environment variable name.
pub fn apply_overrides_from(config: &mut FormConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("FORMWRIGHT_CACHE_DIRECTORY") {
        config.cache_directory = val;
    }
    if let Some(val) = lookup("FORMWRIGHT_DEBUG") {
        config.debug = Toggle::Set(matches!(
            val.to_lowercase().as_str(),
            "true" | "1" | "yes"
        ));
    }
    if let Some(val) = lookup("FORMWRIGHT_PREFIX") {
        config.prefix = val;
    }
    if let Some(val) = lookup("FORMWRIGHT_PREFIX_JS") {
        config.prefix_js = val;
    }
}

fn definition_from_json(value: serde_json::Value) -> FormwrightResult<FormDefinition> {
    let raw: RawDefinition = serde_json::from_value(value).map_err(|e| {
        FormwrightError::Configuration(format!("Failed to read form definition: {e}"))
    })?;

    let items = raw
        .items
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value::<ItemRecord>(value) {
            Ok(record) => Some(Item::from(record)),
            Err(e) => {
                tracing::debug!(position = i + 1, error = %e, "skipping malformed item record");
                None
            }
        })
        .collect();

    Ok(FormDefinition {
        form: raw.form,
        items,
    })
}

/// Converts a TOML value into JSON, keeping table order.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
