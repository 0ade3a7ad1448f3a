//! The shared pattern library of the client routine.
//!
//! Each pattern rule kind is bound to one regular expression literal. The
//! emitter declares every literal once per script block, under the script
//! prefix, and all checks of that kind refer to the same variable.

use crate::item::RuleKind;

/// A pattern rule kind's regular expression and failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    /// The rule kind this pattern implements.
    pub kind: RuleKind,
    /// Variable name stem; the emitted variable is `{prefix}{stem}Regex`.
    pub stem: &'static str,
    /// Regular expression literal in script syntax, slashes included.
    pub literal: &'static str,
    /// Message suffix shown after the field's display name.
    pub message: &'static str,
}

impl Pattern {
    /// Returns the variable name of this pattern under a script prefix.
    pub fn variable(&self, prefix: &str) -> String {
        format!("{prefix}{}Regex", self.stem)
    }
}

/// Every pattern, in declaration order.
pub const PATTERNS: [Pattern; 12] = [
    Pattern {
        kind: RuleKind::Email,
        stem: "Email",
        literal: r"/(.+)@(.+){2,}\.(.+){2,}/",
        message: "must be a valid email address",
    },
    Pattern {
        kind: RuleKind::Phone,
        stem: "Phone",
        literal: r"/(\W|^)[(]{0,1}\d{3}[)]{0,1}[\s-]{0,1}\d{3}[\s-]{0,1}\d{4}(\W|$)/",
        message: "must be a valid phone number [7, 10, 11 digits with or without hyphens]",
    },
    Pattern {
        kind: RuleKind::Zip,
        stem: "Zip",
        literal: r"/^\d{5}$|^\d{5}-\d{4}$/",
        message: "must be a valid zip code [5 or 5-4 digits]",
    },
    Pattern {
        kind: RuleKind::Alpha,
        stem: "Alpha",
        literal: r"/^[a-zA-Z]+$/",
        message: "is only allowed to have alphabetic characters",
    },
    Pattern {
        kind: RuleKind::Numeric,
        stem: "Numeric",
        literal: r"/^[0-9]+$/",
        message: "is only allowed to have numeric characters",
    },
    Pattern {
        kind: RuleKind::AlphaNumeric,
        stem: "AlphaNumeric",
        literal: r"/^[a-zA-Z0-9]+$/",
        message: "is only allowed to have alphanumeric characters",
    },
    Pattern {
        kind: RuleKind::AlphaNumericSpace,
        stem: "AlphaNumericSpace",
        literal: r"/^[a-zA-Z0-9 ]+$/",
        message: "is only allowed to have alphanumeric characters and spaces",
    },
    Pattern {
        kind: RuleKind::Date,
        stem: "Date",
        literal: r"/^\d{2}\/\d{2}\/\d{4}$/",
        message: "must be a valid date [XX/XX/XXXX]",
    },
    Pattern {
        kind: RuleKind::DateTime,
        stem: "DateTime",
        literal: r"/^[0,1]?\d\/(([0-2]?\d)|([3][01]))\/((199\d)|([2-9]\d{3}))\s[0-2]?[0-9]:[0-5][0-9] (AM|am|aM|Am|PM|pm|pM|Pm)?$/",
        message: "must be a valid date [DD/MM/YY HH:MM AM]",
    },
    Pattern {
        kind: RuleKind::Time,
        stem: "Time",
        literal: r"/^ *(1[0-2]|[1-9]):[0-5][0-9] *(a|p|A|P)(m|M) *$/",
        message: "must be in a valid time format [HH:MM AM]",
    },
    Pattern {
        kind: RuleKind::Url,
        stem: "Url",
        literal: r"/(http|ftp|https):\/\/[\w\-_]+(\.[\w\-_]+)+([\w\-\.,@?^=%&:\/~\+#]*[\w\-\@?^=%&\/~\+#])?/",
        message: "must be in a valid url [http://www.example.com]",
    },
    Pattern {
        kind: RuleKind::Price,
        stem: "Price",
        literal: r"/^(\d*([.,](?=\d{3}))?\d+)+((?!\2)[.,]\d\d)?$/",
        message: "must be in a valid price [XXX.XX]",
    },
];

/// Looks up the pattern of a rule kind. Non-pattern kinds have none.
pub fn pattern(kind: RuleKind) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pattern_kind_has_one_entry() {
        for kind in RuleKind::ALL {
            let count = PATTERNS.iter().filter(|p| p.kind == kind).count();
            assert_eq!(count, usize::from(kind.is_pattern()), "{kind}");
        }
    }

    #[test]
    fn test_literals_are_delimited() {
        for p in &PATTERNS {
            assert!(p.literal.starts_with('/') && p.literal.ends_with('/'), "{}", p.stem);
            assert!(!p.literal.contains("&amp;"));
        }
    }

    #[test]
    fn test_variable_names_are_prefixed() {
        assert_eq!(pattern(RuleKind::Zip).unwrap().variable("contact"), "contactZipRegex");
        assert!(pattern(RuleKind::Required).is_none());
    }
}
