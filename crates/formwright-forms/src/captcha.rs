//! Captcha challenge.
//!
//! The challenge code is the first five characters of a keyed digest over
//! the request's identity signals, so the same client sees the same code on
//! every render without any server-side state. The code is shown reversed,
//! interleaved with decoy characters hidden by a generated stylesheet, and the
//! user is asked to type it back in reverse. The client routine therefore
//! compares the submitted text against the code in its original order.

use rand::Rng;

use formwright_core::signing::keyed_hex_digest;
use formwright_core::text::escape_html;

use crate::config::Markup;

/// Number of characters in a challenge code.
pub const CODE_LENGTH: usize = 5;

const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The request identity signals a challenge is derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientIdentity {
    /// The client's user agent string.
    pub user_agent: String,
    /// The host name the request was served under.
    pub server_name: String,
    /// The server's address.
    pub server_addr: String,
    /// The client's address.
    pub remote_addr: String,
}

impl ClientIdentity {
    fn signature(&self) -> String {
        format!(
            "{}{}{}{}",
            self.user_agent, self.server_name, self.server_addr, self.remote_addr
        )
    }
}

/// Character order of a challenge code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeOrder {
    /// As derived; what the user must type.
    Original,
    /// As displayed.
    Reversed,
}

/// Derives the challenge code for an identity under a secret key.
///
/// # Examples
///
/// ```
/// use formwright_forms::captcha::{challenge_code, ClientIdentity, CodeOrder};
///
/// let identity = ClientIdentity { user_agent: "curl/8".into(), ..Default::default() };
/// let code = challenge_code("xxeeTT", &identity, CodeOrder::Original);
/// let shown = challenge_code("xxeeTT", &identity, CodeOrder::Reversed);
/// assert_eq!(code.len(), 5);
/// assert_eq!(shown.chars().rev().collect::<String>(), code);
/// ```
pub fn challenge_code(key: &str, identity: &ClientIdentity, order: CodeOrder) -> String {
    let code: String = keyed_hex_digest(key, &identity.signature())
        .chars()
        .take(CODE_LENGTH)
        .collect();
    match order {
        CodeOrder::Original => code,
        CodeOrder::Reversed => code.chars().rev().collect(),
    }
}

/// A challenge bound to one form's script prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    code: String,
    input_id: String,
    wrapper_id: String,
}

impl Challenge {
    /// Derives the challenge for an identity.
    pub fn new(key: &str, identity: &ClientIdentity, prefix_js: &str) -> Self {
        Self {
            code: challenge_code(key, identity, CodeOrder::Original),
            input_id: format!("{prefix_js}Captcha"),
            wrapper_id: format!("{prefix_js}CaptchaWrapper"),
        }
    }

    /// Returns the code in the given order.
    pub fn code(&self, order: CodeOrder) -> String {
        match order {
            CodeOrder::Original => self.code.clone(),
            CodeOrder::Reversed => self.code.chars().rev().collect(),
        }
    }

    /// Id of the text input the user types into.
    pub fn input_id(&self) -> &str {
        &self.input_id
    }

    /// Id of the element flagged when a character is wrong.
    pub fn wrapper_id(&self) -> &str {
        &self.wrapper_id
    }

    /// Renders the challenge block.
    ///
    /// Before every displayed character, one to five decoy characters are
    /// inserted in spans whose random classes are hidden by the leading
    /// `<style>` block.
    pub fn render<R: Rng>(
        &self,
        label: &str,
        prefix: &str,
        markup: Markup,
        rng: &mut R,
    ) -> String {
        let mut hidden: Vec<String> = Vec::new();
        let mut text = String::new();

        for real in self.code(CodeOrder::Reversed).chars() {
            let decoys = rng.gen_range(1..=5);
            for _ in 0..decoys {
                let class = random_class(rng);
                let decoy = char::from(CHARSET[rng.gen_range(0..CHARSET.len())]);
                text.push_str(&format!(r#"<span class="{class}">{decoy}</span>"#));
                hidden.push(class);
            }
            let mut class = random_class(rng);
            while hidden.contains(&class) {
                class = random_class(rng);
            }
            text.push_str(&format!(r#"<span class="{class}">{real}</span>"#));
        }

        let style: String = hidden
            .iter()
            .map(|class| format!(".{class}{{display:none;}}"))
            .collect();
        let close = if markup == Markup::Xhtml { " />" } else { ">" };

        format!(
            concat!(
                "<style>{style}</style>",
                r#"<div id="{prefix}captcha_container">"#,
                r#"<label for="{input}">{label}</label>"#,
                r#"<div id="{prefix}captcha_text">Please enter the following text in reverse : {text}</div>"#,
                r#"<div id="{wrapper}"><input type="text" id="{input}" name="{input}"{close}</div>"#,
                "</div>",
            ),
            style = style,
            prefix = prefix,
            input = self.input_id,
            label = escape_html(label),
            text = text,
            wrapper = self.wrapper_id,
            close = close,
        )
    }
}

fn random_class<R: Rng>(rng: &mut R) -> String {
    let mut class = String::from("char");
    for _ in 0..6 {
        class.push(char::from(CHARSET[rng.gen_range(0..CHARSET.len())]));
    }
    class
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn identity() -> ClientIdentity {
        ClientIdentity {
            user_agent: "Mozilla/5.0".into(),
            server_name: "example.org".into(),
            server_addr: "10.0.0.1".into(),
            remote_addr: "127.0.0.1".into(),
        }
    }

    /// Returns the visible characters of the rendered challenge text.
    fn visible_text(html: &str) -> String {
        let style_end = html.find("</style>").unwrap();
        let hidden: Vec<&str> = html["<style>".len()..style_end]
            .split("{display:none;}")
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_start_matches('.'))
            .collect();

        let mut visible = String::new();
        for part in html.split(r#"<span class=""#).skip(1) {
            let (class, rest) = part.split_once(r#"">"#).unwrap();
            if !hidden.contains(&class) {
                visible.push(rest.chars().next().unwrap());
            }
        }
        visible
    }

    #[test]
    fn test_code_is_stable_per_identity() {
        let a = challenge_code("xxeeTT", &identity(), CodeOrder::Original);
        assert_eq!(a, challenge_code("xxeeTT", &identity(), CodeOrder::Original));
        assert_eq!(a.len(), CODE_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));

        let mut other = identity();
        other.remote_addr = "127.0.0.2".into();
        let b = challenge_code("xxeeTT", &other, CodeOrder::Original);
        let c = challenge_code("another key", &identity(), CodeOrder::Original);
        assert!(a != b || a != c);
    }

    #[test]
    fn test_challenge_ids_use_script_prefix() {
        let challenge = Challenge::new("xxeeTT", &identity(), "contact");
        assert_eq!(challenge.input_id(), "contactCaptcha");
        assert_eq!(challenge.wrapper_id(), "contactCaptchaWrapper");
    }

    #[test]
    fn test_render_shows_reversed_code() {
        let challenge = Challenge::new("xxeeTT", &identity(), "form");
        let mut rng = StdRng::seed_from_u64(7);
        let html = challenge.render("Security Question:", "form_", Markup::Html, &mut rng);

        assert!(html.contains("Please enter the following text in reverse : "));
        assert!(html.contains(r#"<div id="formCaptchaWrapper"><input type="text" id="formCaptcha" name="formCaptcha"></div>"#));
        assert_eq!(visible_text(&html), challenge.code(CodeOrder::Reversed));
    }

    #[test]
    fn test_render_decoy_count_bounds() {
        let challenge = Challenge::new("xxeeTT", &identity(), "form");
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let html = challenge.render("", "form_", Markup::Html, &mut rng);
            let decoys = html.matches("{display:none;}").count();
            assert!((CODE_LENGTH..=CODE_LENGTH * 5).contains(&decoys), "{decoys}");
            assert_eq!(html.matches("<span").count(), decoys + CODE_LENGTH);
        }
    }

    #[test]
    fn test_render_is_deterministic_for_a_seed() {
        let challenge = Challenge::new("xxeeTT", &identity(), "form");
        let a = challenge.render("Q", "form_", Markup::Xhtml, &mut StdRng::seed_from_u64(1));
        let b = challenge.render("Q", "form_", Markup::Xhtml, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
        assert!(a.contains(r#"name="formCaptcha" />"#));
    }
}
