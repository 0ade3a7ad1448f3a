//! Client-side validation compiler.
//!
//! [`compile`] lowers the rules of a resolved item list into a
//! [`ClientProgram`], and [`ScriptEmitter`] renders that program as one
//! `<script>` block.
//!
//! Items are compiled in list order and each item's rules in declaration
//! order. Radio and checkbox groups compile every rule once per option,
//! except `required`, which becomes one check that passes when any option of
//! the group is checked. Output items (buttons, markup blocks) and items
//! without an id produce no checks.
//!
//! A failing check flags the item's `{id}_container` and cancels the
//! submission. Items rendered without a container flag the control itself and
//! let the remaining checks run, so every such field's error surfaces at once.

pub mod emit;
pub mod ir;
pub mod patterns;

pub use emit::ScriptEmitter;
pub use ir::{CheckKind, ClientProgram, ErrorTarget, RuleCheck};

use crate::captcha::{Challenge, CodeOrder};
use crate::item::{display_name, FieldType, Item, ItemOption, RenderMethod, Rule, RuleKind};

/// Compiles the rules of every item, followed by the captcha checks when a
/// challenge is given.
pub fn compile(items: &[Item], captcha: Option<&Challenge>) -> ClientProgram {
    let mut program = ClientProgram::default();

    for item in items {
        if item.render_method() == RenderMethod::Output || item.id.is_empty() {
            continue;
        }
        if item.field_type == FieldType::Editor {
            program.editors.push(item.id.clone());
        }
        if item.render_method() == RenderMethod::Choice {
            compile_group(item, &mut program.checks);
        } else {
            let target = target_for(item, &item.id);
            let name = item.display_name();
            for rule in &item.rules {
                if let Some(kind) = lower(rule, item) {
                    program.checks.push(RuleCheck {
                        field_id: item.id.clone(),
                        display_name: name.clone(),
                        kind,
                        target: target.clone(),
                    });
                }
            }
        }
    }

    if let Some(challenge) = captcha {
        let target = ErrorTarget::Container(challenge.wrapper_id().to_string());
        for (position, expected) in challenge.code(CodeOrder::Original).chars().enumerate() {
            program.checks.push(RuleCheck {
                field_id: challenge.input_id().to_string(),
                display_name: "captcha".to_string(),
                kind: CheckKind::CaptchaChar { position, expected },
                target: target.clone(),
            });
        }
    }

    tracing::debug!(
        checks = program.checks.len(),
        editors = program.editors.len(),
        "compiled client validation"
    );
    program
}

fn compile_group(item: &Item, checks: &mut Vec<RuleCheck>) {
    for rule in &item.rules {
        if rule.kind == RuleKind::Required {
            let ids: Vec<String> = item
                .options
                .iter()
                .filter(|option| !option.id.is_empty())
                .map(|option| option.id.clone())
                .collect();
            if !ids.is_empty() {
                checks.push(RuleCheck {
                    field_id: item.id.clone(),
                    display_name: item.display_name(),
                    kind: CheckKind::ChoiceRequired(ids),
                    target: target_for(item, &item.id),
                });
            }
            continue;
        }

        for option in item.options.iter().filter(|option| !option.id.is_empty()) {
            if let Some(kind) = lower(rule, item) {
                checks.push(RuleCheck {
                    field_id: option.id.clone(),
                    display_name: option_display_name(item, option),
                    kind,
                    target: target_for(item, &option.id),
                });
            }
        }
    }
}

/// Option checks prefer the option's own label over the group's.
fn option_display_name(item: &Item, option: &ItemOption) -> String {
    display_name(&[
        &option.label,
        &item.label,
        option.name.as_deref().unwrap_or_default(),
        &option.id,
    ])
}

fn target_for(item: &Item, field_id: &str) -> ErrorTarget {
    if item.has_container() {
        ErrorTarget::Container(format!("{}_container", item.id))
    } else {
        ErrorTarget::Element(field_id.to_string())
    }
}

/// Lowers one declared rule. Length rules with unusable parameters are dropped.
fn lower(rule: &Rule, item: &Item) -> Option<CheckKind> {
    let kind = match rule.kind {
        RuleKind::MaxLength | RuleKind::MinLength => {
            let Ok(limit) = rule.param.trim().parse::<usize>() else {
                tracing::warn!(
                    item = %item.id,
                    rule = %rule.kind,
                    param = %rule.param,
                    "skipping length check with a non-numeric limit"
                );
                return None;
            };
            if rule.kind == RuleKind::MaxLength {
                CheckKind::MaxLength(limit)
            } else {
                CheckKind::MinLength(limit)
            }
        }
        RuleKind::Required => CheckKind::Required,
        RuleKind::Equals => CheckKind::Equals(rule.param.clone()),
        RuleKind::Match => CheckKind::Match(rule.param.clone()),
        pattern => CheckKind::Pattern(pattern),
    };
    Some(kind)
}
