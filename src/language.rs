//! The stylesheet languages served by the bridge and their static editing
//! configuration.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// A language this bridge applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    Css,
    Scss,
    Less,
}

impl LanguageId {
    /// The document selector: every language the bridge registers for.
    pub const ALL: [LanguageId; 3] = [LanguageId::Css, LanguageId::Scss, LanguageId::Less];

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageId::Css => "css",
            LanguageId::Scss => "scss",
            LanguageId::Less => "less",
        }
    }

    /// Parse a host language identifier; unknown ids are `None`.
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "css" => Some(LanguageId::Css),
            "scss" => Some(LanguageId::Scss),
            "less" => Some(LanguageId::Less),
            _ => None,
        }
    }

    /// Host configuration key gating color decorations for this language.
    pub fn decorators_setting_key(self) -> String {
        format!("{}.colorDecorators.enable", self.as_str())
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Word pattern in the host's own regex syntax.
///
/// Matches numeric values with units, pseudo-selectors, and identifier-ish
/// tokens with the prefixes CSS allows. The host's word engine consumes this
/// verbatim (it uses lookahead, which [`regex`] does not support), so it is
/// kept as an opaque string rather than compiled here.
const WORD_PATTERN: &str =
    r"(#?-?\d*\.\d\w*%?)|(::?[\w-]*(?=[^,{;]*[,{]))|(([@#.!])?[\w-?]+%?)|[@#!.]";

/// Static editing metadata registered with the host once at activation.
#[derive(Debug)]
pub struct LanguageConfiguration {
    /// Host-syntax word-boundary pattern.
    pub word_pattern: &'static str,
    increase_indent: Regex,
    decrease_indent: Regex,
}

impl LanguageConfiguration {
    /// Whether a line ending inside an open block should indent the next
    /// line.
    pub fn increases_indent(&self, line: &str) -> bool {
        self.increase_indent.is_match(line)
    }

    /// Whether a line closing a block should dedent.
    pub fn decreases_indent(&self, line: &str) -> bool {
        self.decrease_indent.is_match(line)
    }
}

/// Editing configuration for `id`.
///
/// The three languages currently share one rule set; the per-language
/// signature leaves room for dialect differences.
pub fn configuration(id: LanguageId) -> &'static LanguageConfiguration {
    static SHARED: OnceLock<LanguageConfiguration> = OnceLock::new();
    let _ = id;
    SHARED.get_or_init(|| LanguageConfiguration {
        word_pattern: WORD_PATTERN,
        increase_indent: Regex::new(r"(^.*\{[^}]*$)").unwrap(),
        decrease_indent: Regex::new(r"^\s*\}").unwrap(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_has_exactly_three_members() {
        assert_eq!(LanguageId::ALL.len(), 3);
        for id in LanguageId::ALL {
            assert_eq!(LanguageId::parse(id.as_str()), Some(id));
        }
        assert_eq!(LanguageId::parse("sass"), None);
    }

    #[test]
    fn setting_keys_follow_the_host_shape() {
        assert_eq!(
            LanguageId::Css.decorators_setting_key(),
            "css.colorDecorators.enable"
        );
        assert_eq!(
            LanguageId::Less.decorators_setting_key(),
            "less.colorDecorators.enable"
        );
    }

    #[test]
    fn indentation_rules() {
        let config = configuration(LanguageId::Css);
        assert!(config.increases_indent(".box {"));
        assert!(config.increases_indent("@media screen {"));
        assert!(!config.increases_indent(".box { color: red; }"));
        assert!(config.decreases_indent("}"));
        assert!(config.decreases_indent("   } /* end */"));
        assert!(!config.decreases_indent("color: red;"));
    }
}
