//! Item markup.
//!
//! Each item is rendered according to its render method. Controls are
//! wrapped in `<div id="{id}_container" class="{prefix}item_container">`,
//! the element the client routine flags on failure, unless the item opts out.
//! Hidden inputs and raw markup blocks are never wrapped; see
//! [`Item::has_container`].

use formwright_core::text::escape_html;

use crate::config::Markup;
use crate::item::{FieldType, Item, ItemOption, RenderMethod, RuleKind};

/// Ordered attribute list of one element. Empty values are omitted.
#[derive(Debug, Default)]
struct Attrs {
    parts: Vec<(&'static str, String)>,
    flags: Vec<&'static str>,
}

impl Attrs {
    fn set(mut self, key: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.parts.push((key, value));
        }
        self
    }

    fn flag(mut self, key: &'static str, on: bool) -> Self {
        if on {
            self.flags.push(key);
        }
        self
    }

    fn render(&self, markup: Markup) -> String {
        let mut out = String::new();
        for (key, value) in &self.parts {
            out.push_str(&format!(r#" {key}="{}""#, escape_html(value)));
        }
        for key in &self.flags {
            match markup {
                Markup::Html => out.push_str(&format!(" {key}")),
                Markup::Xhtml => out.push_str(&format!(r#" {key}="{key}""#)),
            }
        }
        out
    }
}

fn void(tag: &str, attrs: &Attrs, markup: Markup) -> String {
    let close = if markup == Markup::Xhtml { " />" } else { ">" };
    format!("<{tag}{}{close}", attrs.render(markup))
}

fn tabindex(value: Option<u32>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

/// Renders one item.
pub fn render_item(item: &Item, prefix: &str, markup: Markup) -> String {
    let body = match item.render_method() {
        RenderMethod::Hidden => {
            let attrs = Attrs::default()
                .set("type", "hidden")
                .set("id", &item.id)
                .set("name", &item.name)
                .set("value", &item.value);
            return void("input", &attrs, markup);
        }
        RenderMethod::Output if item.field_type == FieldType::Html => return item.value.clone(),
        RenderMethod::Output => {
            let attrs = Attrs::default()
                .set("type", "button")
                .set("id", &item.id)
                .set("name", &item.name)
                .set("class", item.classes.join(" "))
                .set("tabindex", tabindex(item.tabindex))
                .flag("autofocus", item.autofocus);
            format!(
                "<button{}>{}</button>",
                attrs.render(markup),
                escape_html(&item.display_name())
            )
        }
        RenderMethod::Text => format!("{}{}", label_for(item), text_control(item, markup)),
        RenderMethod::Select => format!("{}{}", label_for(item), select_control(item, markup)),
        RenderMethod::Choice => choice_group(item, prefix, markup),
    };

    if item.has_container() {
        format!(
            r#"<div id="{}_container" class="{prefix}item_container">{body}</div>"#,
            escape_html(&item.id)
        )
    } else {
        body
    }
}

fn label_for(item: &Item) -> String {
    if item.label.is_empty() {
        return String::new();
    }
    format!(
        r#"<label for="{}">{}</label>"#,
        escape_html(&item.id),
        escape_html(&item.label)
    )
}

fn text_control(item: &Item, markup: Markup) -> String {
    let common = |attrs: Attrs| {
        attrs
            .set("id", &item.id)
            .set("name", &item.name)
            .set("class", item.classes.join(" "))
            .set("tabindex", tabindex(item.tabindex))
            .set("maxlength", item.rules.get(RuleKind::MaxLength).unwrap_or_default().trim())
            .flag("autofocus", item.autofocus)
    };

    match item.field_type {
        FieldType::Textarea | FieldType::Editor => format!(
            "<textarea{}>{}</textarea>",
            common(Attrs::default()).render(markup),
            escape_html(&item.value)
        ),
        _ => {
            let attrs = common(Attrs::default().set("type", item.field_type.as_str()))
                .set("value", &item.value);
            void("input", &attrs, markup)
        }
    }
}

fn select_control(item: &Item, markup: Markup) -> String {
    let attrs = Attrs::default()
        .set("id", &item.id)
        .set("name", &item.name)
        .set("class", item.classes.join(" "))
        .set("tabindex", tabindex(item.tabindex))
        .flag("autofocus", item.autofocus);
    let options: String = item
        .options
        .iter()
        .map(|option| {
            let attrs = Attrs::default()
                .set("value", option.value.as_deref().unwrap_or_default())
                .flag("selected", option.selected);
            format!(
                "<option{}>{}</option>",
                attrs.render(markup),
                escape_html(option.display_text())
            )
        })
        .collect();
    format!("<select{}>{options}</select>", attrs.render(markup))
}

fn choice_group(item: &Item, prefix: &str, markup: Markup) -> String {
    let mut out = String::new();
    if !item.label.is_empty() {
        out.push_str(&format!(
            r#"<span class="{prefix}group_label">{}</span>"#,
            escape_html(&item.label)
        ));
    }
    for (n, option) in item.options.iter().enumerate() {
        out.push_str(&choice_option(item, option, n == 0, markup));
    }
    out
}

fn choice_option(item: &Item, option: &ItemOption, first: bool, markup: Markup) -> String {
    let name = option.name.as_deref().unwrap_or(&item.name);
    let attrs = Attrs::default()
        .set("type", item.field_type.as_str())
        .set("id", &option.id)
        .set("name", name)
        .set("value", option.value.as_deref().unwrap_or_default())
        .set("class", item.classes.join(" "))
        .set("tabindex", tabindex(option.tabindex))
        .flag("checked", option.selected)
        .flag("autofocus", first && item.autofocus);
    let label = if option.id.is_empty() {
        format!("<span>{}</span>", escape_html(option.display_text()))
    } else {
        format!(
            r#"<label for="{}">{}</label>"#,
            escape_html(&option.id),
            escape_html(option.display_text())
        )
    };
    format!("{}{label}", void("input", &attrs, markup))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_item_in_container() {
        let item = Item::builder(FieldType::Text)
            .id("full_name")
            .name("full_name")
            .label("Full Name:")
            .class("form_item")
            .rule(RuleKind::MaxLength, "40")
            .build();
        assert_eq!(
            render_item(&item, "form_", Markup::Html),
            concat!(
                r#"<div id="full_name_container" class="form_item_container">"#,
                r#"<label for="full_name">Full Name:</label>"#,
                r#"<input type="text" id="full_name" name="full_name" class="form_item" maxlength="40">"#,
                "</div>"
            )
        );
    }

    #[test]
    fn test_xhtml_self_closes_and_values_flags() {
        let item = Item::builder(FieldType::Email)
            .id("email")
            .autofocus(true)
            .container(false)
            .build();
        assert_eq!(
            render_item(&item, "form_", Markup::Xhtml),
            r#"<input type="email" id="email" autofocus="autofocus" />"#
        );
    }

    #[test]
    fn test_hidden_has_no_container() {
        let item = Item::builder(FieldType::Hidden)
            .id("token")
            .name("token")
            .value("a&b")
            .build();
        assert_eq!(
            render_item(&item, "form_", Markup::Html),
            r#"<input type="hidden" id="token" name="token" value="a&amp;b">"#
        );
    }

    #[test]
    fn test_textarea_escapes_value() {
        let item = Item::builder(FieldType::Editor)
            .id("body")
            .value("<b>hi</b>")
            .container(false)
            .build();
        assert_eq!(
            render_item(&item, "form_", Markup::Html),
            r#"<textarea id="body">&lt;b&gt;hi&lt;/b&gt;</textarea>"#
        );
    }

    #[test]
    fn test_select_options() {
        let item = Item::builder(FieldType::Select)
            .id("size")
            .name("size")
            .tabindex(2)
            .container(false)
            .option(ItemOption::new("Small").value("S"))
            .option(ItemOption::new("Large").value("L").selected(true))
            .build();
        assert_eq!(
            render_item(&item, "form_", Markup::Html),
            concat!(
                r#"<select id="size" name="size" tabindex="2">"#,
                r#"<option value="S">Small</option>"#,
                r#"<option value="L" selected>Large</option>"#,
                "</select>"
            )
        );
    }

    #[test]
    fn test_checkbox_group() {
        let item = Item::builder(FieldType::Checkbox)
            .id("extras")
            .name("extras[]")
            .label("Extras")
            .container(false)
            .option(ItemOption::new("Gift wrap").id("extras_1").value("Giftwrap").tabindex(1))
            .build();
        assert_eq!(
            render_item(&item, "form_", Markup::Html),
            concat!(
                r#"<span class="form_group_label">Extras</span>"#,
                r#"<input type="checkbox" id="extras_1" name="extras[]" value="Giftwrap" tabindex="1">"#,
                r#"<label for="extras_1">Gift wrap</label>"#
            )
        );
    }

    #[test]
    fn test_html_block_is_verbatim() {
        let item = Item::builder(FieldType::Html).id("intro").value("<p>Hello</p>").build();
        assert_eq!(render_item(&item, "form_", Markup::Html), "<p>Hello</p>");
    }

    #[test]
    fn test_button() {
        let item = Item::builder(FieldType::Button)
            .id("help")
            .label("Help")
            .tabindex(4)
            .build();
        assert_eq!(
            render_item(&item, "form_", Markup::Html),
            r#"<div id="help_container" class="form_item_container"><button type="button" id="help" tabindex="4">Help</button></div>"#
        );
    }
}
