//! # Alias Regex Patterns
//!
//! Line-level patterns recognising the head of an alias statement. The value part is
//! decoded separately by the word reader in `dialect.rs`, because quote concatenation
//! like `'it'\''s'` cannot be expressed with Rust's `regex` crate (no backreferences).
//!
//! ## Adding New Patterns
//!
//! 1. Add pattern to `lazy_static!` block below
//! 2. Use it from the matching `Dialect` variant in `dialect.rs`

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches `alias name=value` (bash, zsh, sh and fish).
    ///
    /// Captures:
    /// - Group 1: alias name (anything up to `=` or whitespace, validated later)
    /// - Group 2: raw value text, possibly quoted, possibly empty
    pub static ref ALIAS_EQUALS_RE: Regex = Regex::new(
        r#"^alias\s+([^\s=]+)=(.*)$"#
    ).unwrap();

    /// Matches `alias name value` (fish).
    ///
    /// Captures:
    /// - Group 1: alias name
    /// - Group 2: remainder of the line
    pub static ref ALIAS_SPACE_RE: Regex = Regex::new(
        r#"^alias\s+([^\s=]+)\s+(\S.*)$"#
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_equals_re() {
        let caps = ALIAS_EQUALS_RE.captures("alias ll='ls -la'").unwrap();
        assert_eq!(&caps[1], "ll");
        assert_eq!(&caps[2], "'ls -la'");

        let caps = ALIAS_EQUALS_RE.captures(r"alias gs=git\ status").unwrap();
        assert_eq!(&caps[1], "gs");
        assert_eq!(&caps[2], r"git\ status");
    }

    #[test]
    fn test_alias_equals_special_names() {
        assert!(ALIAS_EQUALS_RE.captures("alias ..='cd ..'").is_some());
        assert!(ALIAS_EQUALS_RE.captures("alias ~='cd ~'").is_some());
    }

    #[test]
    fn test_alias_equals_rejects_space_form() {
        assert!(ALIAS_EQUALS_RE.captures("alias gco git checkout").is_none());
        assert!(ALIAS_EQUALS_RE.captures("alias").is_none());
    }

    #[test]
    fn test_alias_space_re() {
        let caps = ALIAS_SPACE_RE.captures("alias gco git checkout").unwrap();
        assert_eq!(&caps[1], "gco");
        assert_eq!(&caps[2], "git checkout");

        let caps = ALIAS_SPACE_RE.captures("alias ll 'ls -la'").unwrap();
        assert_eq!(&caps[2], "'ls -la'");
    }

    #[test]
    fn test_alias_space_re_rejects_equals_form() {
        assert!(ALIAS_SPACE_RE.captures("alias ll='ls -la'").is_none());
        assert!(ALIAS_SPACE_RE.captures("alias ll").is_none());
    }
}
