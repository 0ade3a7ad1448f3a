//! Auto-attribute resolver.
//!
//! Fills in missing classes, names, ids, option values, and tab positions
//! from other attributes of the same item. Values that are already present
//! are never overwritten, so running the resolver twice changes nothing the
//! second time.

use formwright_core::text::{group_name_from_label, id_from_name, name_from_label, value_from_name};

use crate::config::FormConfig;
use crate::item::{FieldType, Item, RenderMethod};

/// Which attributes the resolver may infer, and the class prefix it uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoAttributes {
    /// Add `{prefix}item` / `{prefix}item_{type}` classes.
    pub class: bool,
    /// Derive names from labels.
    pub name: bool,
    /// Derive ids from names.
    pub id: bool,
    /// Derive option values from option labels or names.
    pub option_value: bool,
    /// Assign tab positions.
    pub tabindex: bool,
    /// Prefix of generated class tokens.
    pub prefix: String,
}

impl AutoAttributes {
    /// Reads the auto-* toggles of a form configuration.
    pub fn from_config(config: &FormConfig) -> Self {
        Self {
            class: config.auto_class.is_enabled(),
            name: config.auto_name.is_enabled(),
            id: config.auto_id.is_enabled(),
            option_value: config.auto_option_value.is_enabled(),
            tabindex: config.auto_tab_index.is_enabled(),
            prefix: config.prefix.clone(),
        }
    }

    /// Resolves every item in list order.
    ///
    /// Tab positions come from one counter shared by the whole list, starting
    /// at 1. Text and hidden items are skipped; choice groups take one position
    /// per option.
    pub fn resolve(&self, items: &mut [Item]) {
        let mut next_tab = 1;
        for item in items.iter_mut() {
            if self.class {
                self.apply_classes(item);
            }
            if self.name {
                infer_names(item);
            }
            if self.option_value
                && matches!(item.render_method(), RenderMethod::Choice | RenderMethod::Select)
            {
                infer_option_values(item);
            }
            if self.id {
                infer_ids(item);
            }
            if self.tabindex {
                next_tab = assign_tabindex(item, next_tab);
            }
        }
    }

    fn apply_classes(&self, item: &mut Item) {
        let tokens = [
            format!("{}item", self.prefix),
            format!("{}item_{}", self.prefix, item.field_type),
        ];
        for token in tokens {
            if !item.classes.contains(&token) {
                item.classes.push(token);
            }
        }
    }
}

fn infer_names(item: &mut Item) {
    if item.render_method() != RenderMethod::Choice {
        if item.name.is_empty() && !item.label.is_empty() {
            item.name = name_from_label(&item.label);
        }
        return;
    }

    let group = if !item.name.is_empty() {
        item.name.clone()
    } else if !item.label.is_empty() {
        let mut derived = group_name_from_label(&item.label);
        if derived.is_empty() {
            return;
        }
        if item.field_type == FieldType::Checkbox {
            derived.push_str("[]");
        }
        item.name.clone_from(&derived);
        derived
    } else {
        return;
    };

    for option in &mut item.options {
        if option.name.is_none() {
            option.name = Some(group.clone());
        }
    }
}

fn infer_option_values(item: &mut Item) {
    for option in &mut item.options {
        if option.value.is_some() {
            continue;
        }
        let source = if option.label.is_empty() {
            option.name.as_deref()
        } else {
            Some(option.label.as_str())
        };
        if let Some(source) = source {
            option.value = Some(value_from_name(source));
        }
    }
}

fn infer_ids(item: &mut Item) {
    if item.id.is_empty() && !item.name.is_empty() {
        item.id = id_from_name(&item.name);
    }
    if item.render_method() != RenderMethod::Choice || item.id.is_empty() {
        return;
    }
    for (n, option) in item.options.iter_mut().enumerate() {
        if option.id.is_empty() {
            option.id = format!("{}_{}", item.id, n + 1);
        }
    }
}

/// Assigns tab positions to one item and returns the next free counter value.
fn assign_tabindex(item: &mut Item, mut next: u32) -> u32 {
    match item.render_method() {
        RenderMethod::Text | RenderMethod::Hidden => {}
        RenderMethod::Choice => {
            for option in &mut item.options {
                if option.tabindex.is_none() {
                    option.tabindex = Some(next);
                    next += 1;
                }
            }
        }
        RenderMethod::Select | RenderMethod::Output => {
            if item.tabindex.is_none() {
                item.tabindex = Some(next);
                next += 1;
            }
        }
    }
    next
}
