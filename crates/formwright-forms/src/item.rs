//! Field item model.
//!
//! An [`Item`] is one form control: its type, identity, validation rules,
//! choice options, and layout attributes. Items are built with
//! [`Item::builder`], mutated in place by the
//! [`AutoAttributes`](crate::resolver::AutoAttributes) resolver, and checked
//! through [`Item::check`], which returns an immutable [`ItemSummary`] the
//! validation engine folds into form-wide totals.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use formwright_core::text::{contains_whitespace, starts_with_digit};

/// The closed set of item types.
///
/// Types that are not recognised are carried as [`FieldType::Other`] and
/// treated like plain text inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// `<input type="text">`.
    Text,
    /// `<input type="password">`.
    Password,
    /// `<input type="email">`.
    Email,
    /// `<textarea>`.
    Textarea,
    /// A `<textarea>` upgraded to a rich-text editor after page load.
    Editor,
    /// `<input type="hidden">`.
    Hidden,
    /// A group of `<input type="radio">` controls.
    Radio,
    /// A group of `<input type="checkbox">` controls submitted under one list key.
    Checkbox,
    /// `<select>`.
    Select,
    /// `<button type="button">`.
    Button,
    /// A raw markup block with no value of its own.
    Html,
    /// Any other input type, rendered as `<input type="...">`.
    Other(String),
}

impl FieldType {
    /// Parses a type name case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use formwright_forms::item::FieldType;
    ///
    /// assert_eq!(FieldType::parse("Radio"), FieldType::Radio);
    /// assert_eq!(FieldType::parse("date"), FieldType::Other("date".into()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "text" => Self::Text,
            "password" => Self::Password,
            "email" => Self::Email,
            "textarea" => Self::Textarea,
            "editor" => Self::Editor,
            "hidden" => Self::Hidden,
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            "select" => Self::Select,
            "button" => Self::Button,
            "html" => Self::Html,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the canonical type name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Email => "email",
            Self::Textarea => "textarea",
            Self::Editor => "editor",
            Self::Hidden => "hidden",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::Button => "button",
            Self::Html => "html",
            Self::Other(name) => name,
        }
    }

    /// Returns the render method this type is laid out and validated with.
    pub const fn render_method(&self) -> RenderMethod {
        match self {
            Self::Hidden => RenderMethod::Hidden,
            Self::Radio | Self::Checkbox => RenderMethod::Choice,
            Self::Select => RenderMethod::Select,
            Self::Button | Self::Html => RenderMethod::Output,
            Self::Text
            | Self::Password
            | Self::Email
            | Self::Textarea
            | Self::Editor
            | Self::Other(_) => RenderMethod::Text,
        }
    }

    /// Returns `true` for types that carry options (radio, checkbox, select).
    pub const fn has_options(&self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox | Self::Select)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies how an item is laid out and which validation shape it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMethod {
    /// Text-entry controls. Never auto-tabindexed.
    Text,
    /// Radio and checkbox groups (`option`): one control per option.
    Choice,
    /// A `<select>` with nested options.
    Select,
    /// Hidden inputs. Never auto-tabindexed.
    Hidden,
    /// Buttons and markup blocks. Never compiled into client checks.
    Output,
}

impl RenderMethod {
    /// Returns the classifier name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Choice => "option",
            Self::Select => "select",
            Self::Hidden => "hidden",
            Self::Output => "output",
        }
    }
}

/// A named validation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Value length must not exceed the parameter.
    MaxLength,
    /// Value length must not be below the parameter.
    MinLength,
    /// A value (or, for choice groups, a checked option) must be present.
    Required,
    /// Value must equal the parameter literally.
    Equals,
    /// Value must equal the live value of the item whose id is the parameter.
    Match,
    /// E-mail address.
    Email,
    /// Phone number of 7, 10, or 11 digits.
    Phone,
    /// 5 or 5+4 digit zip code.
    Zip,
    /// ASCII letters only.
    Alpha,
    /// Digits only.
    Numeric,
    /// ASCII letters and digits only.
    AlphaNumeric,
    /// ASCII letters, digits, and spaces only.
    AlphaNumericSpace,
    /// `XX/XX/XXXX`.
    Date,
    /// `DD/MM/YYYY HH:MM AM`.
    DateTime,
    /// `HH:MM AM`.
    Time,
    /// Absolute http/https/ftp URL.
    Url,
    /// Price such as `1,299.00`.
    Price,
}

impl RuleKind {
    /// Every rule kind, in table order.
    pub const ALL: [Self; 17] = [
        Self::MaxLength,
        Self::MinLength,
        Self::Required,
        Self::Equals,
        Self::Match,
        Self::Email,
        Self::Phone,
        Self::Zip,
        Self::Alpha,
        Self::Numeric,
        Self::AlphaNumeric,
        Self::AlphaNumericSpace,
        Self::Date,
        Self::DateTime,
        Self::Time,
        Self::Url,
        Self::Price,
    ];

    /// Parses a rule kind by its declarative name.
    ///
    /// # Examples
    ///
    /// ```
    /// use formwright_forms::item::RuleKind;
    ///
    /// assert_eq!(RuleKind::parse("dateTime"), Some(RuleKind::DateTime));
    /// assert_eq!(RuleKind::parse("unknown"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Returns the declarative name of this rule kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MaxLength => "maxlength",
            Self::MinLength => "minlength",
            Self::Required => "required",
            Self::Equals => "equals",
            Self::Match => "match",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Zip => "zip",
            Self::Alpha => "alpha",
            Self::Numeric => "numeric",
            Self::AlphaNumeric => "alpha_numeric",
            Self::AlphaNumericSpace => "alpha_numeric_space",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::Time => "time",
            Self::Url => "url",
            Self::Price => "price",
        }
    }

    /// Returns `true` for kinds checked against a shared regular expression.
    pub const fn is_pattern(self) -> bool {
        !matches!(
            self,
            Self::MaxLength | Self::MinLength | Self::Required | Self::Equals | Self::Match
        )
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation rule: a kind and its (possibly empty) parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// The rule kind.
    pub kind: RuleKind,
    /// The parameter, kept as text exactly as declared.
    pub param: String,
}

/// An ordered rule set with at most one rule per kind.
///
/// Declaration order is preserved; it is the order the client routine
/// evaluates the rules in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rules(Vec<Rule>);

impl Rules {
    /// Creates an empty rule set.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a rule, replacing the parameter in place if the kind is already present.
    pub fn insert(&mut self, kind: RuleKind, param: impl Into<String>) {
        let param = param.into();
        match self.0.iter_mut().find(|rule| rule.kind == kind) {
            Some(existing) => existing.param = param,
            None => self.0.push(Rule { kind, param }),
        }
    }

    /// Returns the parameter of the given kind, if declared.
    pub fn get(&self, kind: RuleKind) -> Option<&str> {
        self.0
            .iter()
            .find(|rule| rule.kind == kind)
            .map(|rule| rule.param.as_str())
    }

    /// Returns `true` if the given kind is declared.
    pub fn contains(&self, kind: RuleKind) -> bool {
        self.get(kind).is_some()
    }

    /// Iterates rules in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.0.iter()
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no rules are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Rules {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'de> Deserialize<'de> for Rules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RulesVisitor;

        impl<'de> Visitor<'de> for RulesVisitor {
            type Value = Rules;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of rule kind to parameter")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Rules, A::Error> {
                let mut rules = Rules::new();
                while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
                    let Some(kind) = RuleKind::parse(&key) else {
                        tracing::warn!(rule = %key, "ignoring unknown validation rule");
                        continue;
                    };
                    rules.insert(kind, scalar_to_string(&value));
                }
                Ok(rules)
            }
        }

        deserializer.deserialize_map(RulesVisitor)
    }
}

/// Renders a scalar parameter as text; compound values fall back to their JSON form.
pub(crate) fn scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// One selectable value of a radio, checkbox, or select item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemOption {
    /// Element id (radio and checkbox controls only).
    pub id: String,
    /// Display text.
    pub label: String,
    /// Submission name. Radio and checkbox options inherit the group name.
    pub name: Option<String>,
    /// Submitted value. Inferred from the label or name when absent.
    pub value: Option<String>,
    /// Tab order position.
    pub tabindex: Option<u32>,
    /// Whether the option starts checked/selected.
    pub selected: bool,
}

impl ItemOption {
    /// Creates an option with the given display text.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Sets the submitted value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the submission name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the element id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the tab order position.
    #[must_use]
    pub const fn tabindex(mut self, tabindex: u32) -> Self {
        self.tabindex = Some(tabindex);
        self
    }

    /// Marks the option as initially selected.
    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Returns the text shown for this option: the label, else the name.
    pub fn display_text(&self) -> &str {
        if self.label.is_empty() {
            self.name.as_deref().unwrap_or_default()
        } else {
            &self.label
        }
    }
}

/// One form control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// The item type.
    pub field_type: FieldType,
    /// Element id.
    pub id: String,
    /// Submission name.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Initial value (markup content for [`FieldType::Html`]).
    pub value: String,
    /// Validation rules in declaration order.
    pub rules: Rules,
    /// Options of choice and select items.
    pub options: Vec<ItemOption>,
    /// CSS class tokens.
    pub classes: Vec<String>,
    /// Tab order position.
    pub tabindex: Option<u32>,
    /// Whether the control requests autofocus.
    pub autofocus: bool,
    /// Whether the control is wrapped in an error container (`{id}_container`).
    pub container: bool,
}

impl Item {
    /// Starts building an item of the given type.
    ///
    /// # Examples
    ///
    /// ```
    /// use formwright_forms::item::{FieldType, Item, RuleKind};
    ///
    /// let item = Item::builder(FieldType::Text)
    ///     .label("Full Name:")
    ///     .rule(RuleKind::Required, "")
    ///     .rule(RuleKind::MaxLength, "40")
    ///     .build();
    /// assert_eq!(item.rules.get(RuleKind::MaxLength), Some("40"));
    /// ```
    pub fn builder(field_type: FieldType) -> ItemBuilder {
        ItemBuilder::new(field_type)
    }

    /// Returns the render method derived from the item type.
    pub const fn render_method(&self) -> RenderMethod {
        self.field_type.render_method()
    }

    /// Returns `true` if the markup wraps this item in `{id}_container`.
    ///
    /// Hidden inputs and raw markup blocks are never wrapped, whatever
    /// `container` says.
    pub fn has_container(&self) -> bool {
        self.container
            && !self.id.is_empty()
            && self.render_method() != RenderMethod::Hidden
            && self.field_type != FieldType::Html
    }

    /// Returns the name shown to users in messages: label, else name, else id,
    /// with surrounding whitespace and trailing colons removed.
    pub fn display_name(&self) -> String {
        display_name(&[&self.label, &self.name, &self.id])
    }

    /// Checks this item on its own and reports what it contributes to form-wide checks.
    ///
    /// `position` is the 1-based position of the item in the form and is only
    /// used in messages.
    pub fn check(&self, position: usize) -> ItemSummary {
        let mut summary = ItemSummary {
            autofocus_count: usize::from(self.autofocus),
            ..ItemSummary::default()
        };

        if self.id.is_empty() {
            summary
                .errors
                .push(format!("Item [ {position} ] is required to have an id"));
        } else if contains_whitespace(&self.id) {
            summary.errors.push(format!(
                "Item [ {position} ] id [ {} ] has spacing in it",
                self.id
            ));
        } else if starts_with_digit(&self.id) {
            summary.errors.push(format!(
                "Item [ {position} ] id [ {} ] starts with a number",
                self.id
            ));
        }

        if self.field_type.has_options() && self.options.is_empty() {
            summary.errors.push(format!(
                "Item [ {position} ] of type [ {} ] is required to have at least one option",
                self.field_type
            ));
        }

        let mut lengths = [None, None];
        for (slot, kind) in [RuleKind::MinLength, RuleKind::MaxLength].into_iter().enumerate() {
            if let Some(param) = self.rules.get(kind) {
                match param.trim().parse::<usize>() {
                    Ok(n) => lengths[slot] = Some(n),
                    Err(_) => summary.errors.push(format!(
                        "Item [ {position} ] validation [ {kind} ] requires a whole number, found [ {param} ]"
                    )),
                }
            }
        }
        if let [Some(min), Some(max)] = lengths {
            if min > max {
                summary.warnings.push(format!(
                    "Item [ {position} ] has a minlength of [ {min} ] above its maxlength of [ {max} ]"
                ));
            }
        }

        if !self.id.is_empty() {
            summary.ids.push(self.id.clone());
        }
        if !self.name.is_empty() {
            summary.names.push(self.name.clone());
        }
        summary.tabindices.extend(self.tabindex);

        if self.field_type.has_options() {
            for option in &self.options {
                if !option.id.is_empty() {
                    summary.ids.push(option.id.clone());
                }
                summary.tabindices.extend(option.tabindex);
                // Options of one group share a submission name; count it once per item.
                if let Some(name) = option.name.as_deref() {
                    if !name.is_empty() && !summary.names.iter().any(|n| n == name) {
                        summary.names.push(name.to_string());
                    }
                }
            }
        }

        summary
    }
}

/// Picks the first non-empty candidate and strips whitespace and trailing colons.
pub(crate) fn display_name(candidates: &[&str]) -> String {
    candidates
        .iter()
        .find(|candidate| !candidate.is_empty())
        .map(|candidate| candidate.trim().trim_end_matches(':').to_string())
        .unwrap_or_default()
}

/// Builder for [`Item`].
#[derive(Debug, Clone)]
pub struct ItemBuilder {
    item: Item,
}

impl ItemBuilder {
    /// Creates a builder for an item of the given type.
    pub fn new(field_type: FieldType) -> Self {
        Self {
            item: Item {
                field_type,
                id: String::new(),
                name: String::new(),
                label: String::new(),
                value: String::new(),
                rules: Rules::new(),
                options: Vec::new(),
                classes: Vec::new(),
                tabindex: None,
                autofocus: false,
                container: true,
            },
        }
    }

    /// Sets the element id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.item.id = id.into();
        self
    }

    /// Sets the submission name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.item.name = name.into();
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.item.label = label.into();
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.item.value = value.into();
        self
    }

    /// Adds a validation rule.
    #[must_use]
    pub fn rule(mut self, kind: RuleKind, param: impl Into<String>) -> Self {
        self.item.rules.insert(kind, param);
        self
    }

    /// Replaces the whole rule set.
    #[must_use]
    pub fn rules(mut self, rules: Rules) -> Self {
        self.item.rules = rules;
        self
    }

    /// Adds an option.
    #[must_use]
    pub fn option(mut self, option: ItemOption) -> Self {
        self.item.options.push(option);
        self
    }

    /// Adds a CSS class token.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.item.classes.push(class.into());
        self
    }

    /// Sets the tab order position.
    #[must_use]
    pub const fn tabindex(mut self, tabindex: u32) -> Self {
        self.item.tabindex = Some(tabindex);
        self
    }

    /// Requests autofocus.
    #[must_use]
    pub const fn autofocus(mut self, autofocus: bool) -> Self {
        self.item.autofocus = autofocus;
        self
    }

    /// Sets whether the item is wrapped in an error container.
    #[must_use]
    pub const fn container(mut self, container: bool) -> Self {
        self.item.container = container;
        self
    }

    /// Finishes the item.
    pub fn build(self) -> Item {
        self.item
    }
}

/// What one item's self-check produced.
///
/// Summaries are immutable once returned; the validation engine folds them
/// into form-wide totals instead of keeping running counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSummary {
    /// Blocking problems found on this item.
    pub errors: Vec<String>,
    /// Non-blocking problems found on this item.
    pub warnings: Vec<String>,
    /// Element ids this item occupies (its own and its options').
    pub ids: Vec<String>,
    /// Submission names this item occupies.
    pub names: Vec<String>,
    /// Tab positions this item occupies.
    pub tabindices: Vec<u32>,
    /// 1 if the item requests autofocus, else 0.
    pub autofocus_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(id: &str) -> Item {
        Item::builder(FieldType::Text).id(id).build()
    }

    #[test]
    fn test_field_type_render_methods() {
        assert_eq!(FieldType::Text.render_method(), RenderMethod::Text);
        assert_eq!(FieldType::Hidden.render_method(), RenderMethod::Hidden);
        assert_eq!(FieldType::Radio.render_method(), RenderMethod::Choice);
        assert_eq!(FieldType::Checkbox.render_method(), RenderMethod::Choice);
        assert_eq!(FieldType::Select.render_method(), RenderMethod::Select);
        assert_eq!(FieldType::Button.render_method(), RenderMethod::Output);
        assert_eq!(FieldType::parse("date").render_method(), RenderMethod::Text);
        assert_eq!(RenderMethod::Choice.as_str(), "option");
    }

    #[test]
    fn test_rule_kind_round_trip_names() {
        for kind in RuleKind::ALL {
            assert_eq!(RuleKind::parse(kind.as_str()), Some(kind));
        }
        assert!(RuleKind::Email.is_pattern());
        assert!(!RuleKind::Match.is_pattern());
    }

    #[test]
    fn test_rules_keep_declaration_order_and_replace_in_place() {
        let mut rules = Rules::new();
        rules.insert(RuleKind::Required, "");
        rules.insert(RuleKind::Email, "");
        rules.insert(RuleKind::Required, "yes");
        let kinds: Vec<_> = rules.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RuleKind::Required, RuleKind::Email]);
        assert_eq!(rules.get(RuleKind::Required), Some("yes"));
    }

    #[test]
    fn test_rules_deserialize_in_document_order() {
        let rules: Rules =
            serde_json::from_str(r#"{"zip": true, "maxlength": 10, "bogus": 1, "required": null}"#)
                .unwrap();
        let kinds: Vec<_> = rules.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RuleKind::Zip, RuleKind::MaxLength, RuleKind::Required]);
        assert_eq!(rules.get(RuleKind::MaxLength), Some("10"));
        assert_eq!(rules.get(RuleKind::Required), Some(""));
    }

    #[test]
    fn test_display_name_precedence() {
        let item = Item::builder(FieldType::Text)
            .id("email")
            .name("email_address")
            .label(" E-mail: ")
            .build();
        assert_eq!(item.display_name(), "E-mail");

        let item = Item::builder(FieldType::Text).id("email").name("email_address").build();
        assert_eq!(item.display_name(), "email_address");

        assert_eq!(text("email").display_name(), "email");
    }

    #[test]
    fn test_check_clean_item() {
        let summary = Item::builder(FieldType::Text)
            .id("age")
            .name("age")
            .tabindex(3)
            .autofocus(true)
            .build()
            .check(1);
        assert!(summary.errors.is_empty());
        assert_eq!(summary.ids, vec!["age"]);
        assert_eq!(summary.names, vec!["age"]);
        assert_eq!(summary.tabindices, vec![3]);
        assert_eq!(summary.autofocus_count, 1);
    }

    #[test]
    fn test_check_missing_id() {
        let summary = Item::builder(FieldType::Text).build().check(4);
        assert_eq!(summary.errors, vec!["Item [ 4 ] is required to have an id"]);
        assert!(summary.ids.is_empty());
    }

    #[test]
    fn test_check_bad_ids() {
        assert!(text("first name").check(1).errors[0].contains("has spacing"));
        assert!(text("1st").check(1).errors[0].contains("starts with a number"));
    }

    #[test]
    fn test_check_choice_without_options() {
        let summary = Item::builder(FieldType::Radio).id("size").build().check(2);
        assert_eq!(
            summary.errors,
            vec!["Item [ 2 ] of type [ radio ] is required to have at least one option"]
        );
    }

    #[test]
    fn test_check_length_parameters() {
        let summary = Item::builder(FieldType::Text)
            .id("code")
            .rule(RuleKind::MaxLength, "ten")
            .build()
            .check(1);
        assert_eq!(summary.errors.len(), 1);
        assert!(summary.errors[0].contains("[ maxlength ]"));

        let summary = Item::builder(FieldType::Text)
            .id("code")
            .rule(RuleKind::MinLength, "8")
            .rule(RuleKind::MaxLength, "4")
            .build()
            .check(1);
        assert!(summary.errors.is_empty());
        assert_eq!(summary.warnings.len(), 1);
    }

    #[test]
    fn test_check_collects_option_ids_and_group_name_once() {
        let summary = Item::builder(FieldType::Checkbox)
            .id("toppings")
            .name("toppings[]")
            .option(ItemOption::new("Ham").id("toppings_1").name("toppings[]").tabindex(1))
            .option(ItemOption::new("Olive").id("toppings_2").name("toppings[]").tabindex(2))
            .build()
            .check(1);
        assert_eq!(summary.ids, vec!["toppings", "toppings_1", "toppings_2"]);
        assert_eq!(summary.names, vec!["toppings[]"]);
        assert_eq!(summary.tabindices, vec![1, 2]);
    }
}
