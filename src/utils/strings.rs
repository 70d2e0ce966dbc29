//! String quoting helpers for writing alias statements

/// Quote a value as a single POSIX shell word.
///
/// Single quotes keep everything literal; embedded single quotes are closed,
/// escaped and reopened (`'\''`), which is also what `alias -p` prints.
///
/// # Examples
///
/// ```
/// use alix::utils::strings::quote_posix;
///
/// assert_eq!(quote_posix("ls -la"), "'ls -la'");
/// assert_eq!(quote_posix("echo it's"), r"'echo it'\''s'");
/// ```
pub fn quote_posix(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Quote a value as a single fish word.
///
/// Inside fish single quotes only `\'` and `\\` are escapes.
///
/// # Examples
///
/// ```
/// use alix::utils::strings::quote_fish;
///
/// assert_eq!(quote_fish("ls -la"), "'ls -la'");
/// assert_eq!(quote_fish(r"echo it's \o/"), r"'echo it\'s \\o/'");
/// ```
pub fn quote_fish(value: &str) -> String {
    format!("'{}'", value.replace('\\', r"\\").replace('\'', r"\'"))
}
