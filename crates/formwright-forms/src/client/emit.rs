//! Script emitter for a compiled [`ClientProgram`].
//!
//! The emitted block declares, under the script prefix `p`:
//!
//! - one variable per pattern (`{p}EmailRegex`, ...),
//! - `{p}Elem(id)`, the element lookup,
//! - `{p}ApplyError(id)`, which adds the `{p}_error` class, focuses the element
//!   and scrolls it into view,
//! - `{p}RemoveError(id)`, which strips that class again,
//! - `{p}Validate()`, the submit handler, returning `false` to cancel.
//!
//! Every check has the same shape:
//!
//! ```text
//! if(<failure>){alert(<message>);<p>ApplyError('<target>'); return false; } else { <p>RemoveError('<target>'); };
//! ```
//!
//! with `return false;` present only for container targets.

use std::fmt::Write as _;

use formwright_core::signing::base64_encode;
use formwright_core::text::escape_script_literal;

use super::ir::{CheckKind, ClientProgram, RuleCheck};
use super::patterns::{pattern, PATTERNS};

const ORDINALS: [&str; 5] = ["first", "second", "third", "fourth", "fifth"];

/// Renders compiled programs under one script prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEmitter {
    prefix: String,
}

impl ScriptEmitter {
    /// Creates an emitter for the given script identifier prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Name of the submit handler, e.g. `formValidate`.
    pub fn entry_point(&self) -> String {
        format!("{}Validate", self.prefix)
    }

    /// Renders the validation block, followed by the editor bootstrap block
    /// when the program lists editor fields.
    pub fn emit(&self, program: &ClientProgram, editor_src: &str) -> String {
        let p = &self.prefix;
        let mut out = String::from("<script>");

        for pat in &PATTERNS {
            let _ = write!(out, "var {} = {};", pat.variable(p), pat.literal);
        }

        let _ = write!(
            out,
            "function {p}Elem(id){{var elem = false;if(document.getElementById){{elem=document.getElementById(id);}}else if(document.all){{elem=document.all[id];}}else if(document.layers){{elem=document.layers[id];}}return elem;}};"
        );
        let _ = write!(
            out,
            "function {p}ApplyError(itemid){{var tempElem={p}Elem(itemid);tempElem.className += ' {p}_error';tempElem.focus(); tempElem.scrollIntoView(true); }};"
        );
        let _ = write!(
            out,
            "function {p}RemoveError(itemid){{var tempElem={p}Elem(itemid);if(tempElem.className){{tempElem.className = tempElem.className.replace(/(?:^|\\s){p}_error(?!\\S)/g, '');}};}};"
        );

        let _ = write!(out, "function {}(){{", self.entry_point());
        for check in &program.checks {
            out.push_str(&self.check(check));
        }
        out.push_str("return true;}</script>");

        if !program.editors.is_empty() {
            let _ = write!(
                out,
                r#"<script src="{}"></script><script>"#,
                editor_src.replace('"', "&quot;")
            );
            for id in &program.editors {
                let _ = write!(
                    out,
                    r#"window.addEventListener("load", function (){{ CKEDITOR.replace("{}"); }});"#,
                    escape_script_literal(id)
                );
            }
            out.push_str("</script>");
        }
        out
    }

    /// Renders one guarded check.
    pub fn check(&self, check: &RuleCheck) -> String {
        let p = &self.prefix;
        let target = escape_script_literal(check.target.id());
        let abort = if check.target.aborts() { " return false;" } else { "" };
        format!(
            "if({}){{alert({});{p}ApplyError('{target}');{abort} }} else {{ {p}RemoveError('{target}'); }};",
            self.condition(check),
            self.message(check),
        )
    }

    fn elem(&self, id: &str) -> String {
        format!("{}Elem('{}')", self.prefix, escape_script_literal(id))
    }

    fn condition(&self, check: &RuleCheck) -> String {
        let field = self.elem(&check.field_id);
        match &check.kind {
            CheckKind::MaxLength(limit) => format!("{field}.value.length > {limit}"),
            CheckKind::MinLength(limit) => format!("{field}.value.length < {limit}"),
            CheckKind::Required => format!("{field}.value.length == 0"),
            CheckKind::ChoiceRequired(ids) => {
                let any = ids
                    .iter()
                    .map(|id| format!("{}.checked", self.elem(id)))
                    .collect::<Vec<_>>()
                    .join(" || ");
                format!("!({any})")
            }
            CheckKind::Equals(value) => {
                format!("{field}.value != '{}'", escape_script_literal(value))
            }
            CheckKind::Match(other) => format!("{field}.value != {}.value", self.elem(other)),
            CheckKind::Pattern(kind) => match pattern(*kind) {
                Some(pat) => format!(
                    "{field}.value.length > 0 && {}.test({field}.value) == false",
                    pat.variable(&self.prefix)
                ),
                None => "false".to_string(),
            },
            CheckKind::CaptchaChar { position, expected } => format!(
                "btoa({field}.value.charAt({position})) != '{}'",
                base64_encode(&expected.to_string())
            ),
        }
    }

    fn message(&self, check: &RuleCheck) -> String {
        let name = &check.display_name;
        let text = match &check.kind {
            CheckKind::MaxLength(limit) => format!("{name} exceeds the maximum length of {limit}"),
            CheckKind::MinLength(limit) => {
                format!("{name} does not reach the minimum length of {limit}")
            }
            CheckKind::Required | CheckKind::ChoiceRequired(_) => {
                format!("{name} is a required field and must have a value")
            }
            CheckKind::Equals(value) if value.is_empty() => {
                format!("{name} is required to have the empty value")
            }
            CheckKind::Equals(value) => {
                format!("{name} is required to have the value of : {value}")
            }
            CheckKind::Match(other) => {
                let prefix = format!(
                    "{name} must match the value of form field {other} with a current value of "
                );
                return format!(
                    "'{}'+{}.value",
                    escape_script_literal(&prefix),
                    self.elem(other)
                );
            }
            CheckKind::Pattern(kind) => match pattern(*kind) {
                Some(pat) => format!("{name} {}", pat.message),
                None => name.clone(),
            },
            CheckKind::CaptchaChar { position, .. } => format!(
                "The {} character of your captcha is incorrect",
                ORDINALS.get(*position).copied().unwrap_or("next")
            ),
        };
        format!("'{}'", escape_script_literal(&text))
    }
}
