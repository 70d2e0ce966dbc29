//! # Alias Dialects
//!
//! Each dialect is a pure function from one config line to an optional [`Alias`].
//!
//! | Dialect | Shells | Accepted forms |
//! |---------|--------|----------------|
//! | [`Dialect::Posix`] | bash, zsh, sh | `alias name=value` |
//! | [`Dialect::Fish`] | fish | `alias name value`, `alias name=value` |
//!
//! A line is accepted only if it matches a form completely: an unclosed quote,
//! extra words after a `name=value` definition or an invalid name drops the line.

use super::patterns::{ALIAS_EQUALS_RE, ALIAS_SPACE_RE};
use crate::model::{Alias, ShellType};
use crate::utils::strings::{quote_fish, quote_posix};

/// Alias syntax variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Posix,
    Fish,
}

impl Dialect {
    /// Dialect for a shell tag; untagged sources are read as POSIX
    pub fn for_shell(shell: Option<ShellType>) -> Self {
        match shell {
            Some(ShellType::Fish) => Dialect::Fish,
            _ => Dialect::Posix,
        }
    }

    /// Parse one line into an alias, or `None` if it is not a well-formed definition.
    pub fn parse_line(self, line: &str) -> Option<Alias> {
        let line = line.trim();
        if !line.starts_with("alias") {
            return None;
        }

        match self {
            Dialect::Posix => parse_equals(line, WordRules::Posix),
            Dialect::Fish => {
                parse_equals(line, WordRules::Fish).or_else(|| parse_space(line))
            }
        }
    }

    /// Render an alias as a single statement in this dialect
    pub fn render(self, alias: &Alias) -> String {
        match self {
            Dialect::Posix => format!("alias {}={}", alias.name(), quote_posix(alias.command())),
            Dialect::Fish => format!("alias {} {}", alias.name(), quote_fish(alias.command())),
        }
    }
}

fn parse_equals(line: &str, rules: WordRules) -> Option<Alias> {
    let caps = ALIAS_EQUALS_RE.captures(line)?;
    let name = &caps[1];

    let (command, rest) = read_word(&caps[2], rules)?;
    if !is_trailing_comment(rest) {
        return None;
    }

    Alias::new(name, command).ok()
}

fn parse_space(line: &str) -> Option<Alias> {
    let caps = ALIAS_SPACE_RE.captures(line)?;
    let name = &caps[1];
    let remainder = &caps[2];

    let mut words = Vec::new();
    let mut rest = remainder;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() || rest.starts_with('#') {
            break;
        }
        let (word, next) = read_word(rest, WordRules::Fish)?;
        words.push(word);
        rest = next;
    }

    let command = match words.len() {
        0 => return None,
        1 => words.remove(0),
        // Several words: keep the remainder as written, minus any trailing comment
        _ => remainder[..remainder.len() - rest.len()].trim_end().to_string(),
    };

    Alias::new(name, command).ok()
}

fn is_trailing_comment(rest: &str) -> bool {
    let rest = rest.trim_start();
    rest.is_empty() || rest.starts_with('#')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordRules {
    Posix,
    Fish,
}

/// Read one shell word from the start of `input`.
///
/// Handles single quotes, double quotes, backslash escapes and concatenations of
/// those (`'it'\''s'`). Returns the decoded word and the unread remainder, which
/// starts at the first unquoted whitespace. `None` on an unclosed quote or empty word.
fn read_word(input: &str, rules: WordRules) -> Option<(String, &str)> {
    let mut word = String::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(idx, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                return (!word.is_empty()).then(|| (word, &input[idx..]));
            }
            '\'' => {
                chars.next();
                loop {
                    let (_, c) = chars.next()?;
                    match c {
                        '\'' => break,
                        '\\' if rules == WordRules::Fish => {
                            let (_, escaped) = chars.next()?;
                            if escaped != '\'' && escaped != '\\' {
                                word.push('\\');
                            }
                            word.push(escaped);
                        }
                        c => word.push(c),
                    }
                }
            }
            '"' => {
                chars.next();
                loop {
                    let (_, c) = chars.next()?;
                    match c {
                        '"' => break,
                        '\\' => {
                            let (_, escaped) = chars.next()?;
                            if !matches!(escaped, '"' | '\\' | '$' | '`') {
                                word.push('\\');
                            }
                            word.push(escaped);
                        }
                        c => word.push(c),
                    }
                }
            }
            '\\' => {
                chars.next();
                let (_, escaped) = chars.next()?;
                word.push(escaped);
            }
            c => {
                chars.next();
                word.push(c);
            }
        }
    }

    (!word.is_empty()).then(|| (word, &input[input.len()..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posix(line: &str) -> Option<(String, String)> {
        Dialect::Posix
            .parse_line(line)
            .map(|a| (a.name().to_string(), a.command().to_string()))
    }

    fn fish(line: &str) -> Option<(String, String)> {
        Dialect::Fish
            .parse_line(line)
            .map(|a| (a.name().to_string(), a.command().to_string()))
    }

    fn pair(name: &str, command: &str) -> Option<(String, String)> {
        Some((name.to_string(), command.to_string()))
    }

    #[test]
    fn test_posix_quoted_forms() {
        assert_eq!(posix("alias ll='ls -la'"), pair("ll", "ls -la"));
        assert_eq!(posix(r#"alias gs="git status""#), pair("gs", "git status"));
        assert_eq!(posix("alias v=nvim"), pair("v", "nvim"));
    }

    #[test]
    fn test_posix_backslash_escaped_space() {
        assert_eq!(posix(r"alias gs=git\ status"), pair("gs", "git status"));
    }

    #[test]
    fn test_posix_concatenated_quotes() {
        // what `alias -p` prints for a value containing a single quote
        assert_eq!(
            posix(r"alias say='echo it'\''s here'"),
            pair("say", "echo it's here")
        );
    }

    #[test]
    fn test_posix_double_quote_escapes() {
        assert_eq!(
            posix(r#"alias home="echo \"\$HOME\" \n""#),
            pair("home", r#"echo "$HOME" \n"#)
        );
    }

    #[test]
    fn test_posix_trailing_comment_and_indent() {
        assert_eq!(
            posix("    alias ll='ls -la'   # long listing"),
            pair("ll", "ls -la")
        );
        assert_eq!(posix("alias x=a#b"), pair("x", "a#b"));
    }

    #[test]
    fn test_posix_rejects_malformed() {
        assert_eq!(posix("alias"), None);
        assert_eq!(posix("not an alias"), None);
        assert_eq!(posix("alias ll='ls -la"), None);
        assert_eq!(posix("alias x="), None);
        assert_eq!(posix("alias x=''"), None);
        assert_eq!(posix("alias a=b c=d"), None);
        assert_eq!(posix("alias ll='ls' extra"), None);
        assert_eq!(posix("alias -g G='| grep'"), None);
        assert_eq!(posix("alias gco git checkout"), None);
        assert_eq!(posix("aliases=1"), None);
    }

    #[test]
    fn test_fish_space_form() {
        assert_eq!(fish("alias ll 'ls -la'"), pair("ll", "ls -la"));
        assert_eq!(fish("alias gco git checkout"), pair("gco", "git checkout"));
        assert_eq!(
            fish("alias e echo 'a b' # note"),
            pair("e", "echo 'a b'")
        );
    }

    #[test]
    fn test_fish_equals_form() {
        assert_eq!(fish("alias ll='ls -la'"), pair("ll", "ls -la"));
    }

    #[test]
    fn test_fish_single_quote_escapes() {
        assert_eq!(fish(r"alias say 'echo it\'s'"), pair("say", "echo it's"));
        assert_eq!(fish(r"alias bs 'echo \\o/'"), pair("bs", r"echo \o/"));
    }

    #[test]
    fn test_fish_rejects_malformed() {
        assert_eq!(fish("alias ll"), None);
        assert_eq!(fish("alias ll 'unclosed"), None);
        assert_eq!(fish("alias ll # only a comment"), None);
    }

    #[test]
    fn test_render_round_trips() {
        let alias = Alias::new("say", r#"echo "it's" \o/ $HOME"#).unwrap();
        for dialect in [Dialect::Posix, Dialect::Fish] {
            let line = dialect.render(&alias);
            let parsed = dialect.parse_line(&line).unwrap();
            assert_eq!(parsed.command(), alias.command(), "{:?}: {}", dialect, line);
        }
    }

    #[test]
    fn test_render_forms() {
        let alias = Alias::new("ll", "ls -la").unwrap();
        assert_eq!(Dialect::Posix.render(&alias), "alias ll='ls -la'");
        assert_eq!(Dialect::Fish.render(&alias), "alias ll 'ls -la'");
    }
}
