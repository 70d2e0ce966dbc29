//! Alias registry
//!
//! The registry is the durable name → [`Alias`] map. Every mutation is write-through:
//! the pre-mutation state is stored as a snapshot in the backup directory, then the new
//! state replaces the storage file atomically. The in-memory map only changes once both
//! steps succeed, so memory and disk never disagree.
//!
//! One registry handle is the only writer of its storage file. Two processes mutating the
//! same file are not coordinated: the last writer wins.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::backup::BackupManager;
use crate::error::{AliasError, Result};
use crate::model::{Alias, Config};
use crate::utils::path::{read_optional, write_file_atomic};

/// What to do when an imported alias name is already registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictStrategy {
    #[default]
    Skip,
    Overwrite,
}

/// Outcome of [`Registry::import`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub replaced: usize,
    pub skipped: usize,
}

impl ImportSummary {
    pub fn changed(&self) -> bool {
        self.imported + self.replaced > 0
    }
}

impl std::fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Imported {} aliases", self.imported)?;
        if self.replaced > 0 {
            write!(f, ", replaced {}", self.replaced)?;
        }
        if self.skipped > 0 {
            write!(f, " (skipped {} existing)", self.skipped)?;
        }
        Ok(())
    }
}

/// Durable, deduplicated alias collection
#[derive(Debug)]
pub struct Registry {
    storage_path: PathBuf,
    backups: BackupManager,
    aliases: BTreeMap<String, Alias>,
    load_warning: Option<String>,
    /// Set when the storage file could neither be loaded nor copied aside
    read_only: bool,
}

impl Registry {
    /// Open the registry at `storage_path`, snapshotting into `backups`.
    ///
    /// Never fails: unreadable or corrupt storage yields an empty registry and a
    /// warning available through [`Registry::load_warning`]. The damaged file is copied
    /// into `backups` first; if that copy fails the registry refuses every mutation.
    pub fn open(storage_path: impl Into<PathBuf>, backups: BackupManager) -> Self {
        let storage_path = storage_path.into();
        let loaded = load(&storage_path, &backups);
        if let Some(warning) = &loaded.warning {
            log::warn!("{}", warning);
        }

        Self {
            storage_path,
            backups,
            aliases: loaded.aliases,
            load_warning: loaded.warning,
            read_only: loaded.read_only,
        }
    }

    /// Open the registry at the configured location
    pub fn from_config(config: &Config) -> Self {
        Self::open(config.registry_path(), BackupManager::for_registry(config))
    }

    /// Insert `alias` unless its name is taken. Returns `false` without writing anything
    /// when the name already exists.
    pub fn add(&mut self, alias: Alias) -> Result<bool> {
        if self.aliases.contains_key(alias.name()) {
            return Ok(false);
        }

        let mut next = self.aliases.clone();
        next.insert(alias.name().to_string(), alias);
        self.commit(next)?;
        Ok(true)
    }

    /// Delete the alias called `name`. Returns `false` when there is none.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        if !self.aliases.contains_key(name) {
            return Ok(false);
        }

        let mut next = self.aliases.clone();
        next.remove(name);
        self.commit(next)?;
        Ok(true)
    }

    pub fn lookup(&self, name: &str) -> Option<&Alias> {
        self.aliases.get(name)
    }

    /// All aliases; callers sort as they need
    pub fn list_all(&self) -> Vec<&Alias> {
        self.aliases.values().collect()
    }

    /// Count one invocation of `name`. Returns `false` when there is no such alias.
    pub fn record_use(&mut self, name: &str) -> Result<bool> {
        let mut next = self.aliases.clone();
        match next.get_mut(name) {
            Some(alias) => alias.record_use(),
            None => return Ok(false),
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Merge a batch of aliases as a single mutation (one snapshot, one write).
    ///
    /// An alias whose command matches the registered one is skipped in either mode.
    /// Overwriting keeps the replaced entry's `created_at` and `used_count`.
    pub fn import(
        &mut self,
        aliases: impl IntoIterator<Item = Alias>,
        strategy: ConflictStrategy,
    ) -> Result<ImportSummary> {
        let mut next = self.aliases.clone();
        let mut summary = ImportSummary::default();

        for alias in aliases {
            match next.get(alias.name()) {
                None => {
                    summary.imported += 1;
                    next.insert(alias.name().to_string(), alias);
                }
                Some(existing) if existing.command() == alias.command() => {
                    summary.skipped += 1;
                }
                Some(_) if strategy == ConflictStrategy::Skip => {
                    summary.skipped += 1;
                }
                Some(existing) => {
                    let alias = alias.inherit_history(existing);
                    summary.replaced += 1;
                    next.insert(alias.name().to_string(), alias);
                }
            }
        }

        if summary.changed() {
            self.commit(next)?;
        }
        Ok(summary)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// Warning recorded while loading, if storage was unreadable or partly invalid
    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    /// Snapshot the current state, then persist `next` and adopt it.
    ///
    /// Retention pruning runs only after the new state is on disk.
    fn commit(&mut self, next: BTreeMap<String, Alias>) -> Result<()> {
        if self.read_only {
            return Err(AliasError::persistence(
                &self.storage_path,
                io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "existing registry could not be loaded or backed up; refusing to overwrite it",
                ),
            ));
        }

        let label = self
            .storage_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "aliases.json".to_string());

        let previous = serialize(&self.aliases)
            .map_err(|e| AliasError::persistence(&self.storage_path, e))?;
        let snapshot = self
            .backups
            .create_snapshot(&label, &previous)
            .map_err(|e| AliasError::persistence(self.backups.backup_dir(), e))?;

        let content =
            serialize(&next).map_err(|e| AliasError::persistence(&self.storage_path, e))?;
        if let Err(e) = write_file_atomic(&self.storage_path, &content) {
            // a failed mutation leaves no snapshot behind
            let _ = std::fs::remove_file(&snapshot);
            return Err(AliasError::persistence(&self.storage_path, e));
        }

        log::debug!(
            "Saved {} aliases to {}",
            next.len(),
            self.storage_path.display()
        );
        self.aliases = next;

        if let Err(e) = self.backups.cleanup_old_backups() {
            log::warn!("Could not prune registry backups: {}", e);
        }
        Ok(())
    }
}

fn serialize(aliases: &BTreeMap<String, Alias>) -> io::Result<String> {
    let mut content = serde_json::to_string_pretty(aliases).map_err(io::Error::from)?;
    content.push('\n');
    Ok(content)
}

/// Registry state recovered from storage
struct Loaded {
    aliases: BTreeMap<String, Alias>,
    warning: Option<String>,
    read_only: bool,
}

impl Loaded {
    fn empty() -> Self {
        Self {
            aliases: BTreeMap::new(),
            warning: None,
            read_only: false,
        }
    }

    /// Start empty after copying the damaged file aside
    fn recovered(path: &Path, backups: &BackupManager, problem: String) -> Self {
        let (kept, read_only) = preserve_copy(path, backups);
        Self {
            aliases: BTreeMap::new(),
            warning: Some(format!("{}; starting empty{}", problem, kept)),
            read_only,
        }
    }
}

/// Read the registry file, recovering from anything short of a good file.
fn load(path: &Path, backups: &BackupManager) -> Loaded {
    let content = match read_optional(path) {
        Ok(Some(content)) => content,
        Ok(None) => return Loaded::empty(),
        Err(e) => {
            let problem = format!("Cannot read registry {}: {}", path.display(), e);
            return Loaded::recovered(path, backups, problem);
        }
    };

    if content.trim().is_empty() {
        return Loaded::empty();
    }

    let raw: BTreeMap<String, serde_json::Value> = match serde_json::from_str(&content) {
        Ok(raw) => raw,
        Err(e) => {
            let problem = format!("Registry {} is corrupt ({})", path.display(), e);
            return Loaded::recovered(path, backups, problem);
        }
    };

    let mut aliases = BTreeMap::new();
    let mut skipped = Vec::new();
    for (key, value) in raw {
        match serde_json::from_value::<Alias>(value) {
            Ok(alias) => {
                if alias.name() != key {
                    log::warn!(
                        "Registry key '{}' holds alias '{}', using the alias name",
                        key,
                        alias.name()
                    );
                }
                aliases.insert(alias.name().to_string(), alias);
            }
            Err(e) => {
                log::warn!("Skipping invalid registry entry '{}': {}", key, e);
                skipped.push(key);
            }
        }
    }

    if skipped.is_empty() {
        return Loaded {
            aliases,
            warning: None,
            read_only: false,
        };
    }

    let (kept, read_only) = preserve_copy(path, backups);
    let warning = format!(
        "Skipped {} invalid registry entries ({}){}",
        skipped.len(),
        skipped.join(", "),
        kept
    );
    Loaded {
        aliases,
        warning: Some(warning),
        read_only,
    }
}

/// Copy a damaged registry file aside before the next write replaces it.
///
/// Returns the note for the load warning and whether the registry must stay read-only
/// because no copy could be made.
fn preserve_copy(path: &Path, backups: &BackupManager) -> (String, bool) {
    match backups.create_backup(path) {
        Ok(copy) => (format!("; original kept at {}", copy.display()), false),
        Err(e) => {
            log::warn!("Could not back up {}: {}", path.display(), e);
            (
                format!("; backup failed ({}), changes are disabled", e),
                true,
            )
        }
    }
}
