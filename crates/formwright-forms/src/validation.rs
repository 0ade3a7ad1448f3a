//! Consistency checks for a form definition.
//!
//! The engine runs three passes and accumulates everything it finds rather
//! than stopping at the first problem:
//!
//! 1. The form-level pass checks each setting against a fixed policy table,
//!    correcting what has a safe default and recording a warning for it.
//! 2. The cache pass disables caching when the artifact directory cannot be
//!    written to.
//! 3. The item pass folds every item's [`ItemSummary`] into form-wide lists and
//!    runs the cross-item checks (duplicate ids, names, and tab positions,
//!    autofocus count, `match` references).
//!
//! Errors block rendering; warnings do not.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::Path;

use formwright_core::text::{contains_whitespace, starts_with_digit};

use crate::cache::{ArtifactStore, CacheMachine};
use crate::config::{FormConfig, Toggle, DEFAULT_ENCTYPE, MULTIPART_ENCTYPE};
use crate::item::{Item, ItemSummary, RuleKind};

/// The messages produced by one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Blocking problems, in the order they were found.
    pub errors: Vec<String>,
    /// Corrected or non-blocking problems, in the order they were found.
    pub warnings: Vec<String>,
}

impl Report {
    /// Creates an empty report.
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Records a blocking problem.
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Records a non-blocking problem.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Returns `true` if any blocking problem was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if nothing at all was recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Runs every pass unless the form's `validate` toggle is off, in which case
/// the definition is trusted as-is and an empty report is returned.
pub fn validate(
    config: &mut FormConfig,
    items: &[Item],
    cache: &mut CacheMachine,
    store: &dyn ArtifactStore,
) -> Report {
    let mut report = Report::new();
    if !config.validate.is_enabled() {
        tracing::debug!("consistency checks disabled");
        return report;
    }
    check_form(config, &mut report);
    check_cache(config, cache, store, &mut report);
    check_items(items, &mut report);
    tracing::debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "consistency checks finished"
    );
    report
}

/// Checks the form's own settings, correcting them where a safe default exists.
pub fn check_form(config: &mut FormConfig, report: &mut Report) {
    require_value("action", &config.action, report);
    coerce_toggle("auto_class", &mut config.auto_class, report);
    coerce_toggle("auto_id", &mut config.auto_id, report);
    coerce_toggle("auto_tab_index", &mut config.auto_tab_index, report);
    coerce_toggle("captcha", &mut config.captcha, report);
    coerce_toggle("debug", &mut config.debug, report);

    let enctype = config.enctype.to_lowercase();
    if enctype != MULTIPART_ENCTYPE && enctype != DEFAULT_ENCTYPE {
        report.warning(format!(
            "Form attribute [enctype] must be set to '{MULTIPART_ENCTYPE}' or '{DEFAULT_ENCTYPE}'.  System assigned default value : {DEFAULT_ENCTYPE}."
        ));
        config.enctype = DEFAULT_ENCTYPE.to_string();
    }

    coerce_toggle("honeypot", &mut config.honeypot, report);

    if contains_whitespace(&config.id) {
        report.error("Form id has spacing in it");
    } else if starts_with_digit(&config.id) {
        report.error("Form id starts with a number");
    }

    let markup = config.markup.to_lowercase();
    if markup != "html" && markup != "xhtml" {
        report.warning(
            "Form attribute [markup] must be set to 'html' or 'xhtml'.  System assigned default value : html.",
        );
        config.markup = "html".to_string();
    }

    let method = config.method.to_lowercase();
    if method != "get" && method != "post" {
        report.warning(
            "Form attribute [method] must be set to 'get' or 'post'.  System assigned default value : post.",
        );
        config.method = "post".to_string();
    }

    require_value("prefix", &config.prefix, report);
    coerce_toggle("validate", &mut config.validate, report);
}

/// Disables caching when a cache filename is configured but its directory
/// cannot be written to.
pub fn check_cache(
    config: &FormConfig,
    cache: &mut CacheMachine,
    store: &dyn ArtifactStore,
    report: &mut Report,
) {
    if config.cache.is_empty() {
        return;
    }
    if !store.is_writable(Path::new(&config.cache_directory)) {
        report.warning(format!(
            "Cache folder [{}] is not writeable. Cache system has been disabled.",
            config.cache_directory
        ));
        cache.disable();
    }
}

/// Folds every item's self-check into form-wide totals and runs the cross-item checks.
pub fn check_items(items: &[Item], report: &mut Report) {
    if items.is_empty() {
        report.error("Form is required to have at least one item assigned to it");
    }

    let totals = items
        .iter()
        .enumerate()
        .map(|(i, item)| item.check(i + 1))
        .fold(ItemSummary::default(), merge);

    report.errors.extend(totals.errors);
    report.warnings.extend(totals.warnings);

    if totals.autofocus_count > 1 {
        report.warning("Form has multiple autofocus items assigned");
    }

    for (id, count) in duplicates(&totals.ids) {
        report.error(format!("Item ID [ {id} ] was entered [ {count} ] times"));
    }

    for (i, item) in items.iter().enumerate() {
        if let Some(target) = item.rules.get(RuleKind::Match) {
            if !target.is_empty() && !totals.ids.iter().any(|id| id == target) {
                report.warning(format!(
                    "Item [ {} ] was provided with a match validation id that does not exist [ {target} ]",
                    i + 1
                ));
            }
        }
    }

    for (name, count) in duplicates(&totals.names) {
        report.error(format!("Item name [ {name} ] was entered [ {count} ] times"));
    }

    for (tabindex, count) in duplicates(&totals.tabindices) {
        report.warning(format!(
            "Item tabindex [ {tabindex} ] was entered [ {count} ] times"
        ));
    }
}

fn merge(mut acc: ItemSummary, next: ItemSummary) -> ItemSummary {
    acc.errors.extend(next.errors);
    acc.warnings.extend(next.warnings);
    acc.ids.extend(next.ids);
    acc.names.extend(next.names);
    acc.tabindices.extend(next.tabindices);
    acc.autofocus_count += next.autofocus_count;
    acc
}

/// Returns every value that occurs more than once with its count, in first-seen order.
fn duplicates<T: Eq + Hash + Clone>(values: &[T]) -> Vec<(T, usize)> {
    let mut counts: HashMap<&T, usize> = HashMap::new();
    let mut order = Vec::new();
    for value in values {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }
    order
        .into_iter()
        .filter_map(|value| {
            let count = counts[value];
            (count > 1).then(|| (value.clone(), count))
        })
        .collect()
}

fn require_value(attribute: &str, value: &str, report: &mut Report) {
    if value.trim().is_empty() {
        report.error(format!(
            "Form attribute [{attribute}] is required to have a value."
        ));
    }
}

fn coerce_toggle(attribute: &str, toggle: &mut Toggle, report: &mut Report) {
    if let Some(assigned) = toggle.coerce() {
        report.warning(format!(
            "Form attribute [{attribute}] is a boolean value and should be true or false.  System assigned : {assigned}."
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::item::{FieldType, ItemOption};

    fn text(id: &str) -> Item {
        Item::builder(FieldType::Text).id(id).name(id).build()
    }

    #[test]
    fn test_clean_form_has_no_messages() {
        let mut config = FormConfig::new("/contact");
        let mut report = Report::new();
        check_form(&mut config, &mut report);
        assert!(report.is_empty(), "{report:?}");
    }

    #[test]
    fn test_required_settings() {
        let mut config = FormConfig::new("");
        config.prefix = String::new();
        let mut report = Report::new();
        check_form(&mut config, &mut report);
        assert_eq!(
            report.errors,
            vec![
                "Form attribute [action] is required to have a value.",
                "Form attribute [prefix] is required to have a value.",
            ]
        );
    }

    #[test]
    fn test_method_is_corrected_to_post() {
        let mut config = FormConfig::new("/go");
        config.method = "PUT".into();
        let mut report = Report::new();
        check_form(&mut config, &mut report);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("[method]"));
        assert_eq!(config.method, "post");
    }

    #[test]
    fn test_uppercase_get_is_accepted() {
        let mut config = FormConfig::new("/go");
        config.method = "GET".into();
        let mut report = Report::new();
        check_form(&mut config, &mut report);
        assert!(report.is_empty());
        assert_eq!(config.method, "GET");
    }

    #[test]
    fn test_markup_and_enctype_defaults() {
        let mut config = FormConfig::new("/go");
        config.markup = "sgml".into();
        config.enctype = "text/plain".into();
        let mut report = Report::new();
        check_form(&mut config, &mut report);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(config.markup, "html");
        assert_eq!(config.enctype, DEFAULT_ENCTYPE);
    }

    #[test]
    fn test_toggle_coercion_warnings() {
        let mut config = FormConfig::new("/go");
        config.debug = Toggle::Blank;
        config.honeypot = Toggle::Invalid("sometimes".into());
        let mut report = Report::new();
        check_form(&mut config, &mut report);
        assert_eq!(
            report.warnings,
            vec![
                "Form attribute [debug] is a boolean value and should be true or false.  System assigned : true.",
                "Form attribute [honeypot] is a boolean value and should be true or false.  System assigned : false.",
            ]
        );
        assert_eq!(config.debug, Toggle::Set(true));
        assert_eq!(config.honeypot, Toggle::Set(false));
    }

    #[test]
    fn test_form_id_rules() {
        let mut config = FormConfig::new("/go");
        config.id = "my form".into();
        let mut report = Report::new();
        check_form(&mut config, &mut report);
        assert_eq!(report.errors, vec!["Form id has spacing in it"]);

        config.id = "2nd".into();
        let mut report = Report::new();
        check_form(&mut config, &mut report);
        assert_eq!(report.errors, vec!["Form id starts with a number"]);
    }

    #[test]
    fn test_unwritable_cache_is_disabled_with_warning() {
        let mut config = FormConfig::new("/go");
        config.cache = "contact.html".into();
        let store = MemoryStore::read_only();
        let mut cache = CacheMachine::new(config.cache_location());
        cache.evaluate(&store).unwrap();
        let mut report = Report::new();
        check_cache(&config, &mut cache, &store, &mut report);
        assert_eq!(
            report.warnings,
            vec!["Cache folder [cache/] is not writeable. Cache system has been disabled."]
        );
        assert!(report.errors.is_empty());
        assert_eq!(cache.state(), crate::cache::CacheState::Off);
    }

    #[test]
    fn test_empty_item_list() {
        let mut report = Report::new();
        check_items(&[], &mut report);
        assert_eq!(
            report.errors,
            vec!["Form is required to have at least one item assigned to it"]
        );
    }

    #[test]
    fn test_duplicate_ids_cite_count() {
        let items = vec![
            Item::builder(FieldType::Text).id("email").name("a").build(),
            Item::builder(FieldType::Text).id("email").name("b").build(),
        ];
        let mut report = Report::new();
        check_items(&items, &mut report);
        assert_eq!(report.errors, vec!["Item ID [ email ] was entered [ 2 ] times"]);
    }

    #[test]
    fn test_duplicate_names_are_errors() {
        let items = vec![
            Item::builder(FieldType::Text).id("a").name("email").build(),
            Item::builder(FieldType::Text).id("b").name("email").build(),
            Item::builder(FieldType::Text).id("c").name("email").build(),
        ];
        let mut report = Report::new();
        check_items(&items, &mut report);
        assert_eq!(report.errors, vec!["Item name [ email ] was entered [ 3 ] times"]);
    }

    #[test]
    fn test_duplicate_tabindex_is_only_a_warning() {
        let items = vec![
            Item::builder(FieldType::Text).id("a").tabindex(1).build(),
            Item::builder(FieldType::Radio)
                .id("b")
                .option(ItemOption::new("x").id("b_1").tabindex(1))
                .build(),
        ];
        let mut report = Report::new();
        check_items(&items, &mut report);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings, vec!["Item tabindex [ 1 ] was entered [ 2 ] times"]);
    }

    #[test]
    fn test_multiple_autofocus() {
        let items = vec![
            Item::builder(FieldType::Text).id("a").autofocus(true).build(),
            Item::builder(FieldType::Text).id("b").autofocus(true).build(),
        ];
        let mut report = Report::new();
        check_items(&items, &mut report);
        assert_eq!(report.warnings, vec!["Form has multiple autofocus items assigned"]);
    }

    #[test]
    fn test_match_reference() {
        let items = vec![
            text("password"),
            Item::builder(FieldType::Text)
                .id("confirm")
                .rule(RuleKind::Match, "passwrd")
                .build(),
            Item::builder(FieldType::Text)
                .id("again")
                .rule(RuleKind::Match, "password")
                .build(),
        ];
        let mut report = Report::new();
        check_items(&items, &mut report);
        assert!(report.errors.is_empty());
        assert_eq!(
            report.warnings,
            vec!["Item [ 2 ] was provided with a match validation id that does not exist [ passwrd ]"]
        );
    }

    #[test]
    fn test_item_errors_precede_cross_item_errors() {
        let items = vec![text("dup"), text("dup"), Item::builder(FieldType::Text).build()];
        let mut report = Report::new();
        check_items(&items, &mut report);
        assert_eq!(report.errors[0], "Item [ 3 ] is required to have an id");
        assert!(report.errors[1].starts_with("Item ID [ dup ]"));
        assert!(report.errors[2].starts_with("Item name [ dup ]"));
    }

    #[test]
    fn test_disabled_validation_trusts_input() {
        let mut config = FormConfig::new("");
        config.validate = Toggle::Set(false);
        config.method = "PUT".into();
        let mut cache = CacheMachine::new(None);
        let report = validate(&mut config, &[], &mut cache, &MemoryStore::new());
        assert!(report.is_empty());
        assert_eq!(config.method, "PUT");
    }

    #[test]
    fn test_duplicates_first_seen_order() {
        assert_eq!(
            duplicates(&["b", "a", "b", "c", "a", "b"]),
            vec![("b", 3), ("a", 2)]
        );
        assert!(duplicates::<u32>(&[1, 2, 3]).is_empty());
    }
}
