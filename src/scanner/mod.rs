//! # Scanner Module
//!
//! Turns shell configuration text into [`Alias`] values.
//!
//! ## Architecture Overview
//!
//! ```text
//! scanner/
//! ├── mod.rs        - This file: Scanner (files, live shell, system sweep)
//! ├── dialect.rs    - Dialect enum: line -> Option<Alias>, alias -> line
//! └── patterns.rs   - Regex patterns for alias statement heads
//! ```
//!
//! ## Rules
//!
//! - Comment, blank and non-alias lines are ignored
//! - Malformed alias lines are skipped, never fatal
//! - Within one source the last definition of a name wins, as in the shell itself
//!
//! ## Usage
//!
//! ```rust,ignore
//! use alix::scanner::Scanner;
//!
//! let scanner = Scanner::new();
//! for (source, aliases) in scanner.scan_system() {
//!     println!("{}: {} aliases", source, aliases.len());
//! }
//! ```

mod dialect;
mod patterns;

pub use dialect::Dialect;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{AliasError, Result};
use crate::model::{run_alias_listing, Alias, ShellType};
use crate::utils::shell_detect::detect_from_file;

/// Startup files checked by [`Scanner::scan_system`], relative to the home directory
pub const STANDARD_SOURCES: &[&str] = &[
    ".bashrc",
    ".bash_profile",
    ".bash_aliases",
    ".profile",
    ".zshrc",
    ".zshenv",
    ".zprofile",
    ".zsh_aliases",
    ".shinit",
    ".config/fish/config.fish",
];

/// Parse config text written for `shell`.
///
/// Untagged text (`None`) is read as POSIX, with the fish space form accepted for lines
/// POSIX rejects. Every returned alias carries `shell` as its dialect tag.
pub fn scan_content(content: &str, shell: Option<ShellType>) -> Vec<Alias> {
    let dialect = Dialect::for_shell(shell);
    let mut aliases: Vec<Alias> = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parsed = match (dialect.parse_line(trimmed), shell) {
            (None, None) => Dialect::Fish.parse_line(trimmed),
            (parsed, _) => parsed,
        };
        let Some(mut alias) = parsed else {
            if trimmed.starts_with("alias ") {
                log::debug!("Line {}: skipping malformed alias: {}", idx + 1, trimmed);
            }
            continue;
        };

        alias.shell = shell;
        if let Some(pos) = aliases.iter().position(|a| a.name() == alias.name()) {
            aliases.remove(pos);
        }
        aliases.push(alias);
    }

    aliases
}

/// Parse the output of a shell's alias listing (`alias -p`, `alias -L`, fish `alias`)
pub fn parse_listing(output: &str, shell: ShellType) -> Vec<Alias> {
    scan_content(output, Some(shell))
}

/// Reads aliases from config files and live shells
#[derive(Debug, Clone)]
pub struct Scanner {
    home: PathBuf,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Scanner rooted at the current user's home directory
    pub fn new() -> Self {
        Self::with_home(dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")))
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Scan one file; the dialect tag is inferred from its name.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than failing the whole file.
    pub fn scan_file(&self, path: &Path) -> Result<Vec<Alias>> {
        let bytes = std::fs::read(path).map_err(|e| AliasError::unreadable(path, e))?;
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            log::debug!("{} is not valid UTF-8, reading it lossily", path.display());
        }
        let aliases = scan_content(&content, detect_from_file(path));
        log::debug!("Found {} aliases in {}", aliases.len(), path.display());
        Ok(aliases)
    }

    /// Query the detected shell's live alias table.
    pub fn get_active_aliases(&self) -> Result<Vec<Alias>> {
        self.active_aliases_for(ShellType::detect()?)
    }

    /// Query a specific shell's live alias table through its own listing command.
    pub fn active_aliases_for(&self, shell: ShellType) -> Result<Vec<Alias>> {
        let output = run_alias_listing(shell)?;
        Ok(parse_listing(&output, shell))
    }

    /// Scan every standard startup file that exists, keyed by its path relative to home.
    ///
    /// Missing files are left out; unreadable ones are logged and left out.
    pub fn scan_system(&self) -> BTreeMap<String, Vec<Alias>> {
        let mut results = BTreeMap::new();

        for source in STANDARD_SOURCES {
            let path = self.home.join(source);
            if !path.is_file() {
                continue;
            }

            match self.scan_file(&path) {
                Ok(aliases) => {
                    results.insert((*source).to_string(), aliases);
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn names(aliases: &[Alias]) -> Vec<&str> {
        aliases.iter().map(|a| a.name()).collect()
    }

    #[test]
    fn test_scan_content_basic() {
        let content = "# my aliases\n\nalias ll='ls -la'\nalias gs=git\\ status\nexport EDITOR=vim\n";
        let aliases = scan_content(content, Some(ShellType::Bash));

        assert_eq!(names(&aliases), vec!["ll", "gs"]);
        assert_eq!(aliases[0].command(), "ls -la");
        assert_eq!(aliases[1].command(), "git status");
        assert!(aliases.iter().all(|a| a.shell == Some(ShellType::Bash)));
    }

    #[test]
    fn test_scan_content_last_definition_wins() {
        let content = "alias g='git'\nalias ll='ls -l'\nalias g='git status'\n";
        let aliases = scan_content(content, None);

        assert_eq!(names(&aliases), vec!["ll", "g"]);
        assert_eq!(aliases[1].command(), "git status");
    }

    #[test]
    fn test_scan_content_skips_commented_alias() {
        let aliases = scan_content("# alias ll='ls -la'\n", None);
        assert!(aliases.is_empty());
    }

    #[test]
    fn test_scan_content_fish() {
        let content = "alias ll 'ls -la'\nalias gco git checkout\nset -x EDITOR vim\n";
        let aliases = scan_content(content, Some(ShellType::Fish));

        assert_eq!(names(&aliases), vec!["ll", "gco"]);
        assert_eq!(aliases[1].command(), "git checkout");
    }

    #[test]
    fn test_scan_content_untagged_accepts_fish_form() {
        let content = "alias ll='ls -la'\nalias gco git checkout\nalias bad='x' extra\n";
        let aliases = scan_content(content, None);

        assert_eq!(names(&aliases), vec!["ll", "gco"]);
        assert_eq!(aliases[1].command(), "git checkout");
        assert!(aliases.iter().all(|a| a.shell.is_none()));
    }

    #[test]
    fn test_scan_content_tagged_posix_stays_strict() {
        let aliases = scan_content("alias gco git checkout\n", Some(ShellType::Bash));
        assert!(aliases.is_empty());
    }

    #[test]
    fn test_parse_listing_bash() {
        let output = "alias grep='grep --color=auto'\nalias l='ls -CF'\n";
        let aliases = parse_listing(output, ShellType::Bash);
        assert_eq!(names(&aliases), vec!["grep", "l"]);
        assert_eq!(aliases[0].command(), "grep --color=auto");
    }

    #[test]
    fn test_parse_listing_fish() {
        let output = "alias la 'ls -A'\nalias vim nvim\n";
        let aliases = parse_listing(output, ShellType::Fish);
        assert_eq!(names(&aliases), vec!["la", "vim"]);
        assert!(aliases.iter().all(|a| a.shell == Some(ShellType::Fish)));
    }

    #[test]
    fn test_scan_file_tags_fish_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.fish");
        std::fs::write(&path, "alias ll 'ls -la'\n").unwrap();

        let aliases = Scanner::with_home(dir.path()).scan_file(&path).unwrap();
        assert_eq!(aliases.len(), 1);
        assert_eq!(aliases[0].shell, Some(ShellType::Fish));
    }

    #[test]
    fn test_scan_file_missing_is_unreadable() {
        let dir = tempdir().unwrap();
        let err = Scanner::with_home(dir.path())
            .scan_file(&dir.path().join(".bashrc"))
            .unwrap_err();
        assert!(matches!(err, AliasError::SourceUnreadable { .. }));
    }

    #[test]
    fn test_scan_system_only_existing_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(".bashrc"), "alias ll='ls -la'\n").unwrap();
        std::fs::create_dir_all(dir.path().join(".config/fish")).unwrap();
        std::fs::write(
            dir.path().join(".config/fish/config.fish"),
            "alias gco git checkout\n",
        )
        .unwrap();
        std::fs::write(dir.path().join(".zshrc"), "setopt autocd\n").unwrap();

        let results = Scanner::with_home(dir.path()).scan_system();

        assert_eq!(results.len(), 3);
        assert_eq!(results[".bashrc"].len(), 1);
        assert_eq!(results[".config/fish/config.fish"][0].command(), "git checkout");
        assert!(results[".zshrc"].is_empty());
        assert!(!results.contains_key(".profile"));
    }

    #[test]
    fn test_scan_file_tolerates_invalid_utf8() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(".bashrc"),
            b"alias ll='ls -la'\n# caf\xE9\nalias gs='git status'\n",
        )
        .unwrap();

        let results = Scanner::with_home(dir.path()).scan_system();

        assert_eq!(names(&results[".bashrc"]), vec!["ll", "gs"]);
    }

    #[test]
    fn test_scan_system_empty_home() {
        let dir = tempdir().unwrap();
        let results = Scanner::with_home(dir.path()).scan_system();
        assert!(results.is_empty());
    }
}
