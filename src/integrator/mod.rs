//! # Shell Integration
//!
//! Keeps registry aliases in the shell's startup file, inside a marker-delimited block
//! that alix owns. Text outside the block is never changed.
//!
//! ```text
//! # user content ...
//!
//! # >>> alix managed aliases v1 >>>
//! # DO NOT EDIT - managed by 'alix apply'
//! alias gs='git status'
//! alias ll='ls -la'
//! # <<< alix managed aliases v1 <<<
//! ```
//!
//! Every write goes Detect → Locate block → Merge → Write → Report. The write is a temp
//! file renamed over the target, so a failure at any step leaves the original as it was.

mod block;

pub use block::{MARKER_END, MARKER_NOTICE, MARKER_START};

use std::collections::HashMap;
use std::ops::Range;
use std::path::{Path, PathBuf};

use block::Located;

use crate::backup::BackupManager;
use crate::error::{AliasError, Result};
use crate::model::{Alias, Config, ShellType};
use crate::registry::Registry;
use crate::scanner::Dialect;
use crate::utils::path::{read_optional, write_file_atomic};
use crate::utils::shell_detect::get_shell_type;

/// Outcome of an integrator write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub target: PathBuf,
    pub added: usize,
    pub replaced: usize,
    pub removed: usize,
    /// False when the file already had the requested content and was left alone
    pub changed: bool,
}

impl std::fmt::Display for ApplyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.changed {
            return write!(f, "{} is already up to date", self.target.display());
        }

        let mut parts = Vec::new();
        if self.added > 0 {
            parts.push(format!("{} added", self.added));
        }
        if self.replaced > 0 {
            parts.push(format!("{} replaced", self.replaced));
        }
        if self.removed > 0 {
            parts.push(format!("{} removed", self.removed));
        }

        if parts.is_empty() {
            write!(f, "Updated {}", self.target.display())
        } else {
            write!(f, "Updated {} ({})", self.target.display(), parts.join(", "))
        }
    }
}

/// Writes aliases into one shell's startup file
#[derive(Debug, Clone)]
pub struct Integrator {
    shell: ShellType,
    target: PathBuf,
    backups: Option<BackupManager>,
}

impl Integrator {
    /// Integrator for an explicit shell and startup file, without backups
    pub fn new(shell: ShellType, target: impl Into<PathBuf>) -> Self {
        Self {
            shell,
            target: target.into(),
            backups: None,
        }
    }

    /// Integrator for `shell`'s standard startup file under `home`
    pub fn for_shell(shell: ShellType, home: &Path) -> Self {
        Self::new(shell, shell.startup_file(home))
    }

    /// Detect the active shell; fails without a usable shell rather than guessing.
    pub fn detect(home: &Path) -> Result<Self> {
        Ok(Self::for_shell(ShellType::detect()?, home))
    }

    /// Integrator for the given or detected shell, backing up into the configured directory
    pub fn from_config(config: &Config, shell: Option<ShellType>) -> Result<Self> {
        let shell = get_shell_type(shell)?;
        Ok(Self::new(shell, shell.default_startup_file())
            .with_backups(BackupManager::for_shell(shell, config)))
    }

    /// Store a copy of the startup file in `backups` before each replacement
    pub fn with_backups(mut self, backups: BackupManager) -> Self {
        self.backups = Some(backups);
        self
    }

    pub fn shell(&self) -> ShellType {
        self.shell
    }

    pub fn get_target_file(&self) -> &Path {
        &self.target
    }

    pub fn backups(&self) -> Option<&BackupManager> {
        self.backups.as_ref()
    }

    fn dialect(&self) -> Dialect {
        Dialect::for_shell(Some(self.shell))
    }

    /// Aliases currently inside the managed block
    pub fn managed_aliases(&self) -> Result<Vec<Alias>> {
        let content = self.read()?.unwrap_or_default();
        match block::locate(&content) {
            Located::Absent => Ok(Vec::new()),
            Located::Found { body, .. } => Ok(block::parse_body(body, self.dialect())),
            Located::Malformed => Err(self.malformed()),
        }
    }

    /// Put one alias into the block: an existing name is replaced in place, a new one
    /// appended. The block is created if the file has none.
    pub fn apply_single_alias(&self, alias: &Alias) -> Result<ApplyReport> {
        let original = self.read()?;
        let content = original.as_deref().unwrap_or_default();
        let dialect = self.dialect();

        let (mut entries, span) = match block::locate(content) {
            Located::Absent => (Vec::new(), None),
            Located::Found { span, body } => (block::parse_body(body, dialect), Some(span)),
            Located::Malformed => return Err(self.malformed()),
        };

        let mut report = self.report();
        match entries.iter().position(|a| a.name() == alias.name()) {
            Some(pos) => {
                if dialect.render(&entries[pos]) != dialect.render(alias) {
                    report.replaced = 1;
                }
                entries[pos] = alias.clone();
            }
            None => {
                report.added = 1;
                entries.push(alias.clone());
            }
        }

        let updated = self.merge(content, span, &entries);
        report.changed = self.write_if_changed(original.as_deref(), &updated)?;
        Ok(report)
    }

    /// Replace the whole block with the registry's aliases, sorted by name.
    pub fn apply_all(&self, registry: &Registry) -> Result<ApplyReport> {
        let mut aliases: Vec<Alias> = registry.list_all().into_iter().cloned().collect();
        aliases.sort_by(|a, b| a.name().cmp(b.name()));
        self.apply_aliases(&aliases)
    }

    /// Replace the whole block with `aliases`, in the given order.
    pub fn apply_aliases(&self, aliases: &[Alias]) -> Result<ApplyReport> {
        let original = self.read()?;
        let content = original.as_deref().unwrap_or_default();
        let dialect = self.dialect();

        let (previous, span) = match block::locate(content) {
            Located::Absent => (Vec::new(), None),
            Located::Found { span, body } => (block::parse_body(body, dialect), Some(span)),
            Located::Malformed => return Err(self.malformed()),
        };

        let before: HashMap<&str, String> = previous
            .iter()
            .map(|a| (a.name(), dialect.render(a)))
            .collect();

        let mut report = self.report();
        for alias in aliases {
            match before.get(alias.name()) {
                None => report.added += 1,
                Some(line) if *line != dialect.render(alias) => report.replaced += 1,
                Some(_) => {}
            }
        }
        report.removed = previous
            .iter()
            .filter(|old| !aliases.iter().any(|a| a.name() == old.name()))
            .count();

        let updated = self.merge(content, span, aliases);
        report.changed = self.write_if_changed(original.as_deref(), &updated)?;
        Ok(report)
    }

    /// Strip the managed block. Returns `false` when the file has none.
    pub fn remove_block(&self) -> Result<bool> {
        let Some(content) = self.read()? else {
            return Ok(false);
        };

        match block::locate(&content) {
            Located::Absent => Ok(false),
            Located::Malformed => Err(self.malformed()),
            Located::Found { span, .. } => {
                let updated = block::cut(&content, span);
                self.write_if_changed(Some(&content), &updated)
            }
        }
    }

    fn report(&self) -> ApplyReport {
        ApplyReport {
            target: self.target.clone(),
            added: 0,
            replaced: 0,
            removed: 0,
            changed: false,
        }
    }

    fn malformed(&self) -> AliasError {
        AliasError::MalformedBlock {
            path: self.target.clone(),
        }
    }

    fn read(&self) -> Result<Option<String>> {
        read_optional(&self.target).map_err(|e| AliasError::unreadable(&self.target, e))
    }

    fn merge(&self, content: &str, span: Option<Range<usize>>, aliases: &[Alias]) -> String {
        let rendered = block::render(aliases, self.dialect());
        match span {
            Some(span) => block::splice(content, span, &rendered),
            None => block::append(content, &rendered),
        }
    }

    /// Write `updated` unless it equals `original`; returns whether the file changed.
    fn write_if_changed(&self, original: Option<&str>, updated: &str) -> Result<bool> {
        if original == Some(updated) {
            log::debug!("{} unchanged, skipping write", self.target.display());
            return Ok(false);
        }

        if let (Some(_), Some(backups)) = (original, &self.backups) {
            backups
                .create_backup(&self.target)
                .map_err(|e| AliasError::write(backups.backup_dir(), e))?;
        }

        write_file_atomic(&self.target, updated)
            .map_err(|e| AliasError::write(&self.target, e))?;
        log::debug!("Wrote managed block to {}", self.target.display());

        if let Some(backups) = &self.backups {
            if let Err(e) = backups.cleanup_old_backups() {
                log::warn!("Could not prune backups in {}: {}", backups.backup_dir().display(), e);
            }
        }
        Ok(true)
    }
}
