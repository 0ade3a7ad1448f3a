//! The form pipeline.
//!
//! A [`Form`] owns its configuration, its items, and its cache decision.
//! Rendering runs the pipeline once:
//!
//! 1. Serve the cached artifact if the cache is `complete`.
//! 2. Resolve auto-attributes and run the consistency checks.
//! 3. If any error was found, emit only the messages.
//! 4. Otherwise emit the form markup and the client routine, and persist the
//!    output when the cache is `primed`.
//!
//! The cache is evaluated when the form is built, before any item is added,
//! so item calls on a form whose artifact already exists are no-ops.

use std::fmt::Write as _;

use rand::Rng;

use formwright_core::logging::render_span;
use formwright_core::text::{escape_html, name_from_label};
use formwright_core::{FormwrightError, FormwrightResult};

use crate::cache::{ArtifactStore, CacheMachine, CacheState, FileStore};
use crate::captcha::{Challenge, ClientIdentity};
use crate::client::{compile, ScriptEmitter};
use crate::config::{FormConfig, Markup};
use crate::item::{FieldType, Item, RuleKind};
use crate::markup::render_item;
use crate::resolver::AutoAttributes;
use crate::validation::{validate, Report};

/// Label of the honeypot field.
pub const HONEYPOT_LABEL: &str = "Leave blank to send form";

/// Builder for [`Form`].
pub struct FormBuilder {
    config: FormConfig,
    store: Box<dyn ArtifactStore>,
    identity: ClientIdentity,
    clear_cache: bool,
}

impl FormBuilder {
    /// Starts a form with the given configuration, stored on the filesystem.
    pub fn new(config: FormConfig) -> Self {
        Self {
            config,
            store: Box::new(FileStore),
            identity: ClientIdentity::default(),
            clear_cache: false,
        }
    }

    /// Uses another artifact store.
    #[must_use]
    pub fn store(mut self, store: impl ArtifactStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    /// Sets the request identity the captcha challenge is derived from.
    #[must_use]
    pub fn identity(mut self, identity: ClientIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Requests that an existing cache artifact be deleted and rendered afresh.
    #[must_use]
    pub const fn clear_cache(mut self, clear: bool) -> Self {
        self.clear_cache = clear;
        self
    }

    /// Builds the form and decides its cache state.
    pub fn build(self) -> FormwrightResult<Form> {
        let mut cache = CacheMachine::new(self.config.cache_location());
        if self.clear_cache {
            cache.request_clear();
        }
        cache.evaluate(self.store.as_ref())?;

        Ok(Form {
            config: self.config,
            items: Vec::new(),
            report: Report::new(),
            cache,
            store: self.store,
            identity: self.identity,
            prepared: false,
        })
    }
}

/// A form definition on its way to rendered output.
///
/// # Examples
///
/// ```
/// use formwright_forms::cache::MemoryStore;
/// use formwright_forms::config::FormConfig;
/// use formwright_forms::form::Form;
/// use formwright_forms::item::{FieldType, Item, RuleKind};
///
/// let mut form = Form::builder(FormConfig::new("/contact"))
///     .store(MemoryStore::new())
///     .build()
///     .unwrap();
/// form.item(
///     Item::builder(FieldType::Text)
///         .label("Full Name:")
///         .rule(RuleKind::Required, "")
///         .build(),
/// );
/// let html = form.render().unwrap();
/// assert!(html.contains(r#"name="full_name""#));
/// assert!(html.contains("function formValidate()"));
/// ```
pub struct Form {
    config: FormConfig,
    items: Vec<Item>,
    report: Report,
    cache: CacheMachine,
    store: Box<dyn ArtifactStore>,
    identity: ClientIdentity,
    prepared: bool,
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("config", &self.config)
            .field("items", &self.items)
            .field("report", &self.report)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl Form {
    /// Starts building a form.
    pub fn builder(config: FormConfig) -> FormBuilder {
        FormBuilder::new(config)
    }

    /// Builds a form with filesystem caching and no request identity.
    pub fn new(config: FormConfig) -> FormwrightResult<Self> {
        FormBuilder::new(config).build()
    }

    /// Appends an item. Has no effect once the cache is complete.
    pub fn item(&mut self, item: Item) -> &mut Self {
        if self.cache.is_complete() {
            tracing::trace!(id = %item.id, "cache complete, ignoring item");
            return self;
        }
        self.items.push(item);
        self.prepared = false;
        self
    }

    /// Appends several items. Has no effect once the cache is complete.
    pub fn items(&mut self, items: impl IntoIterator<Item = Item>) -> &mut Self {
        for item in items {
            self.item(item);
        }
        self
    }

    /// Returns the configuration as currently corrected.
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Returns the items as currently resolved.
    pub fn item_list(&self) -> &[Item] {
        &self.items
    }

    /// Returns the cache state.
    pub const fn cache_state(&self) -> CacheState {
        self.cache.state()
    }

    /// Resolves attributes and runs the consistency checks, returning their report.
    pub fn check(&mut self) -> &Report {
        self.prepare();
        &self.report
    }

    /// Renders the form with a thread-local random source for captcha decoys.
    pub fn render(&mut self) -> FormwrightResult<String> {
        self.render_with_rng(&mut rand::thread_rng())
    }

    /// Renders the form with the given random source for captcha decoys.
    pub fn render_with_rng<R: Rng>(&mut self, rng: &mut R) -> FormwrightResult<String> {
        let span = render_span(&self.config.id);
        let _guard = span.enter();

        if let Some(bytes) = self.cache.load(self.store.as_ref())? {
            tracing::debug!(bytes = bytes.len(), "serving cached artifact");
            return String::from_utf8(bytes)
                .map_err(|e| FormwrightError::Cache(format!("cached artifact is not UTF-8: {e}")));
        }

        self.prepare();
        let mut html = self.messages();
        if self.report.has_errors() {
            tracing::warn!(
                errors = self.report.errors.len(),
                "form has blocking errors, rendering messages only"
            );
            return Ok(html);
        }

        if self.config.honeypot.is_enabled() {
            self.add_honeypot();
        }
        html.push_str(&self.body(rng));

        if let Err(err) = self.cache.persist(self.store.as_ref(), html.as_bytes()) {
            tracing::warn!(%err, "could not persist cache artifact, cache disabled");
            self.cache.disable();
        }
        Ok(html)
    }

    fn prepare(&mut self) {
        if self.prepared {
            return;
        }
        AutoAttributes::from_config(&self.config).resolve(&mut self.items);
        self.report = validate(
            &mut self.config,
            &self.items,
            &mut self.cache,
            self.store.as_ref(),
        );
        self.prepared = true;
    }

    fn add_honeypot(&mut self) {
        let id = format!("{}honeypot", self.config.prefix);
        if self.items.iter().any(|item| item.id == id) {
            return;
        }
        self.items.push(
            Item::builder(FieldType::Text)
                .id(&id)
                .name(&id)
                .class(&id)
                .label(HONEYPOT_LABEL)
                .rule(RuleKind::Equals, "")
                .build(),
        );
    }

    fn messages(&self) -> String {
        let prefix = &self.config.prefix;
        let mut out = String::new();
        if self.report.has_errors() {
            out.push_str(&message_block(
                &format!("{prefix}error"),
                "Your form has the following errors:",
                &self.report.errors,
            ));
        }
        if self.config.debug.is_enabled() {
            if !self.report.warnings.is_empty() {
                out.push_str(&message_block(
                    &format!("{prefix}warning"),
                    "Your form has the following warnings:",
                    &self.report.warnings,
                ));
            }
            let dump = format!("{:#?}\n{:#?}", self.config.redacted(), self.items);
            let _ = write!(out, r#"<pre id="{prefix}debug">{}</pre>"#, escape_html(&dump));
        }
        out
    }

    fn body<R: Rng>(&self, rng: &mut R) -> String {
        let config = &self.config;
        let prefix = &config.prefix;
        let markup = config.markup();
        let js = config.js.is_enabled();
        let challenge = (js && config.captcha.is_enabled())
            .then(|| Challenge::new(&config.captcha_key, &self.identity, &config.prefix_js));
        let emitter = ScriptEmitter::new(&config.prefix_js);
        let close = if markup == Markup::Xhtml { " />" } else { ">" };

        let mut out = String::new();
        if !config.css_file.is_empty() {
            let _ = write!(
                out,
                r#"<link rel="stylesheet" href="{}"{close}"#,
                escape_html(&config.css_file)
            );
        }
        if !config.js_file.is_empty() {
            let _ = write!(out, r#"<script src="{}"></script>"#, escape_html(&config.js_file));
        }
        if config.container.is_enabled() {
            let _ = write!(out, r#"<div id="{prefix}container">"#);
        }
        if !config.title.is_empty() {
            let _ = write!(
                out,
                r#"<div id="{prefix}title">{}</div>"#,
                escape_html(&config.title)
            );
        }

        let _ = write!(
            out,
            r#"<form method="{}" enctype="{}" action="{}""#,
            config.method.to_lowercase(),
            escape_html(&config.enctype),
            escape_html(&config.action)
        );
        if !config.id.is_empty() {
            let _ = write!(out, r#" id="{}""#, escape_html(&config.id));
        }
        if js {
            let _ = write!(out, r#" onsubmit="return({}());""#, emitter.entry_point());
        }
        out.push('>');

        for item in &self.items {
            out.push_str(&render_item(item, prefix, markup));
        }
        if let Some(challenge) = &challenge {
            out.push_str(&challenge.render(&config.captcha_label, prefix, markup, rng));
        }
        out.push_str(&self.buttons(close));
        out.push_str("</form>");
        if config.container.is_enabled() {
            out.push_str("</div>");
        }

        if js {
            let program = compile(&self.items, challenge.as_ref());
            out.push_str(&emitter.emit(&program, &config.editor));
        }
        out
    }

    fn buttons(&self, close: &str) -> String {
        let config = &self.config;
        let prefix = &config.prefix;
        let mut out = String::new();
        for (kind, caption) in [("reset", &config.reset), ("submit", &config.submit)] {
            if caption.is_empty() {
                continue;
            }
            let _ = write!(
                out,
                r#"<div id="{prefix}{kind}"><input type="{kind}" name="{}" value="{}"{close}</div>"#,
                name_from_label(caption),
                escape_html(caption)
            );
        }
        for button in &config.buttons {
            let Some(title) = button.title.as_deref().filter(|t| !t.is_empty()) else {
                continue;
            };
            let name = button
                .name
                .clone()
                .unwrap_or_else(|| name_from_label(title));
            let _ = write!(out, r#"<input type="button" name="{}""#, escape_html(&name));
            for (key, value) in [
                ("id", &button.id),
                ("class", &button.class),
                ("onclick", &button.onclick),
            ] {
                if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                    let _ = write!(out, r#" {key}="{}""#, escape_html(value));
                }
            }
            let _ = write!(out, r#" value="{}"{close}"#, escape_html(title));
        }
        out
    }
}

fn message_block(id: &str, heading: &str, messages: &[String]) -> String {
    let items: String = messages
        .iter()
        .map(|message| format!("<li>{}</li>", escape_html(message)))
        .collect();
    format!(r#"<div id="{id}">{heading}<ul>{items}</ul></div>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::config::{ButtonSpec, Toggle};
    use crate::item::ItemOption;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn form(config: FormConfig) -> Form {
        Form::builder(config).store(MemoryStore::new()).build().unwrap()
    }

    fn name_item() -> Item {
        Item::builder(FieldType::Text)
            .label("Full Name:")
            .rule(RuleKind::Required, "")
            .build()
    }

    #[test]
    fn test_render_clean_form() {
        let mut form = form(FormConfig::new("/contact"));
        form.item(name_item());
        let html = form.render().unwrap();
        assert!(html.starts_with(r#"<div id="form_container"><form method="post""#));
        assert!(html.contains(r#"onsubmit="return(formValidate());""#));
        assert!(html.contains(r#"<div id="full_name_container" class="form_item_container">"#));
        assert!(html.contains(r#"<div id="form_submit"><input type="submit" name="submit" value="Submit"></div>"#));
        assert!(html.contains("formElem('full_name').value.length == 0"));
        assert!(!html.contains("form_error"));
    }

    #[test]
    fn test_errors_suppress_the_form() {
        let mut form = form(FormConfig::new("/contact"));
        form.items([
            Item::builder(FieldType::Text).id("dup").build(),
            Item::builder(FieldType::Text).id("dup").build(),
        ]);
        let html = form.render().unwrap();
        assert_eq!(
            html,
            r#"<div id="form_error">Your form has the following errors:<ul><li>Item ID [ dup ] was entered [ 2 ] times</li></ul></div>"#
        );
    }

    #[test]
    fn test_warnings_shown_only_in_debug() {
        let mut config = FormConfig::new("/contact");
        config.method = "PUT".into();
        let mut quiet = form(config.clone());
        quiet.item(name_item());
        let html = quiet.render().unwrap();
        assert!(!html.contains("form_warning"));
        assert!(html.contains(r#"<form method="post""#));

        config.debug = Toggle::Set(true);
        let mut loud = form(config);
        loud.item(name_item());
        let html = loud.render().unwrap();
        assert!(html.starts_with(r#"<div id="form_warning">Your form has the following warnings:<ul><li>Form attribute [method]"#));
        assert!(html.contains(r#"<pre id="form_debug">"#));
    }

    #[test]
    fn test_honeypot_is_appended_and_compiled() {
        let mut config = FormConfig::new("/contact");
        config.honeypot = Toggle::Set(true);
        let mut form = form(config);
        form.item(name_item());
        let html = form.render().unwrap();
        assert!(html.contains(r#"<label for="form_honeypot">Leave blank to send form</label>"#));
        assert!(html.contains(r#"class="form_honeypot""#));
        assert!(html.contains("formElem('form_honeypot').value != ''"));
        assert_eq!(form.item_list().len(), 2);

        // Rendering again does not add a second honeypot.
        form.render().unwrap();
        assert_eq!(form.item_list().len(), 2);
    }

    #[test]
    fn test_js_off_omits_script_and_handler() {
        let mut config = FormConfig::new("/contact");
        config.js = Toggle::Set(false);
        config.captcha = Toggle::Set(true);
        let mut form = form(config);
        form.item(name_item());
        let html = form.render().unwrap();
        assert!(!html.contains("<script>"));
        assert!(!html.contains("onsubmit"));
        assert!(!html.contains("Captcha"));
    }

    #[test]
    fn test_captcha_block_and_checks() {
        let mut config = FormConfig::new("/contact");
        config.captcha = Toggle::Set(true);
        let mut form = Form::builder(config)
            .store(MemoryStore::new())
            .identity(ClientIdentity {
                user_agent: "Mozilla/5.0".into(),
                ..ClientIdentity::default()
            })
            .build()
            .unwrap();
        form.item(name_item());
        let html = form.render_with_rng(&mut StdRng::seed_from_u64(3)).unwrap();
        assert!(html.contains(r#"<label for="formCaptcha">Security Question:</label>"#));
        assert_eq!(html.matches("btoa(formElem('formCaptcha').value.charAt(").count(), 5);
        assert!(html.contains("formApplyError('formCaptchaWrapper')"));
    }

    #[test]
    fn test_buttons() {
        let mut config = FormConfig::new("/contact");
        config.reset = "Start Over".into();
        config.submit = String::new();
        config.buttons = vec![
            ButtonSpec {
                title: Some("Preview".into()),
                id: Some("preview".into()),
                onclick: Some("show()".into()),
                ..ButtonSpec::default()
            },
            ButtonSpec::default(),
        ];
        config.markup = "xhtml".into();
        let mut form = form(config);
        form.item(name_item());
        let html = form.render().unwrap();
        assert!(html.contains(r#"<div id="form_reset"><input type="reset" name="start_over" value="Start Over" /></div>"#));
        assert!(!html.contains("form_submit"));
        assert!(html.contains(r#"<input type="button" name="preview" id="preview" onclick="show()" value="Preview" />"#));
        assert_eq!(html.matches(r#"type="button""#).count(), 1);
    }

    #[test]
    fn test_check_resolves_and_reports() {
        let mut form = form(FormConfig::new("/contact"));
        form.item(
            Item::builder(FieldType::Radio)
                .label("Size")
                .option(ItemOption::new("S"))
                .build(),
        );
        assert!(form.check().is_empty());
        assert_eq!(form.item_list()[0].options[0].id, "size_1");
    }

    #[test]
    fn test_failed_persist_still_returns_the_form() {
        let mut config = FormConfig::new("/contact");
        config.cache = "contact.html".into();
        config.validate = Toggle::Set(false);
        let mut form = Form::builder(config)
            .store(MemoryStore::read_only())
            .build()
            .unwrap();
        assert_eq!(form.cache_state(), CacheState::Primed);
        form.item(Item::builder(FieldType::Text).id("note").build());
        let html = form.render().unwrap();
        assert!(html.contains("<form"));
        assert_eq!(form.cache_state(), CacheState::Off);
    }

    #[test]
    fn test_debug_dump_masks_captcha_key() {
        let mut config = FormConfig::new("/contact");
        config.debug = Toggle::Set(true);
        config.captcha_key = "s3cret-key".into();
        let mut form = form(config);
        form.item(name_item());
        let html = form.render().unwrap();
        assert!(html.contains(r#"<pre id="form_debug">"#));
        assert!(!html.contains("s3cret-key"));
        assert_eq!(form.config().captcha_key, "s3cret-key");
    }

    #[test]
    fn test_primed_render_persists_and_completes() {
        let mut config = FormConfig::new("/contact");
        config.cache = "contact.html".into();
        let mut form = form(config);
        assert_eq!(form.cache_state(), CacheState::Primed);
        form.item(name_item());
        let first = form.render().unwrap();
        assert_eq!(form.cache_state(), CacheState::Complete);
        assert_eq!(form.render().unwrap(), first);
    }
}
