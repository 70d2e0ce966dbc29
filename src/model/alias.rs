//! Canonical alias representation
//!
//! # Field Semantics
//! - `name`: shell identifier the alias is invoked by; validated on construction
//! - `command`: literal expansion text, never executed or interpreted
//! - `shell`: dialect the alias was authored for, when known (e.g. scanned from a fish config)
//! - `used_count`: invocation counter, only ever incremented
//! - `created_at`: set once at construction and preserved through storage

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::ShellType;
use crate::error::{AliasError, Result};

/// Characters accepted in alias names besides alphanumerics
const NAME_PUNCTUATION: &[char] = &['_', '-', '.', ':', '~', '@', '+', '%', ','];

/// Check that `name` is usable as an alias identifier in bash, zsh and fish.
///
/// Accepts alphanumerics plus a small set of punctuation so common names such as
/// `..`, `g:co` or `ll` pass, while rejecting whitespace, quotes, `=`, `/`, `$`
/// and a leading `-` (which the shells would read as an option).
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AliasError::Validation("alias name is empty".into()));
    }
    if name.starts_with('-') {
        return Err(AliasError::Validation(format!(
            "alias name '{}' must not start with '-'",
            name
        )));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !c.is_alphanumeric() && !NAME_PUNCTUATION.contains(c))
    {
        return Err(AliasError::Validation(format!(
            "alias name '{}' contains invalid character {:?}",
            name, bad
        )));
    }
    Ok(())
}

/// Check that `command` is non-empty and fits on one line.
pub fn validate_command(command: &str) -> Result<()> {
    if command.trim().is_empty() {
        return Err(AliasError::Validation("alias command is empty".into()));
    }
    if command.contains(&['\n', '\r'][..]) {
        return Err(AliasError::Validation(
            "alias command must be a single line".into(),
        ));
    }
    Ok(())
}

/// A shell alias
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AliasRecord")]
pub struct Alias {
    name: String,
    command: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    used_count: u64,
    pub shell: Option<ShellType>,
    pub group: Option<String>,
}

impl Alias {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let command = command.into();
        validate_name(&name)?;
        validate_command(&command)?;

        Ok(Self {
            name,
            command,
            description: None,
            tags: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
            used_count: 0,
            shell: None,
            group: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.trim().is_empty()).then_some(description);
        self
    }

    pub fn with_shell(mut self, shell: ShellType) -> Self {
        self.shell = Some(shell);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn used_count(&self) -> u64 {
        self.used_count
    }

    /// Count one invocation of this alias.
    pub fn record_use(&mut self) {
        self.used_count = self.used_count.saturating_add(1);
    }

    /// Take over the history of the entry this alias replaces
    pub(crate) fn inherit_history(mut self, previous: &Alias) -> Self {
        self.created_at = previous.created_at;
        self.used_count = self.used_count.max(previous.used_count);
        self
    }
}

impl std::fmt::Display for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}='{}'", self.name, self.command)
    }
}

/// On-disk form of an [`Alias`], validated before it becomes one.
#[derive(Deserialize)]
struct AliasRecord {
    name: String,
    command: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default = "OffsetDateTime::now_utc", with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(default)]
    used_count: u64,
    #[serde(default)]
    shell: Option<String>,
    #[serde(default)]
    group: Option<String>,
}

impl TryFrom<AliasRecord> for Alias {
    type Error = AliasError;

    fn try_from(record: AliasRecord) -> Result<Self> {
        validate_name(&record.name)?;
        validate_command(&record.command)?;

        // Unknown dialect tags are dropped rather than failing the whole entry
        let shell = record.shell.as_deref().and_then(|s| match s.parse() {
            Ok(shell) => Some(shell),
            Err(e) => {
                log::warn!("Alias '{}': {}, ignoring shell tag", record.name, e);
                None
            }
        });

        Ok(Self {
            name: record.name,
            command: record.command,
            description: record.description,
            tags: record.tags,
            created_at: record.created_at,
            used_count: record.used_count,
            shell,
            group: record.group,
        })
    }
}
