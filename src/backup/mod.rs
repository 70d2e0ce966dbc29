//! Backup management module
//!
//! Backups live in one directory per owner (`backups/registry`, `backups/bash`, ...)
//! and are named `<timestamp>_<source name>.bak`. The timestamp prefix has a fixed
//! width, so sorting file names sorts backups chronologically.

use std::io;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

use crate::model::{Config, ShellType};
use crate::utils::path::write_file_atomic;

/// Backup entry information
#[derive(Debug, Clone)]
pub struct BackupEntry {
    pub id: String,
    pub path: PathBuf,
    pub timestamp: String,
    pub filename: String,
    pub size: u64,
}

/// Backup manager
#[derive(Debug, Clone)]
pub struct BackupManager {
    backup_dir: PathBuf,
    max_count: Option<usize>,
}

impl BackupManager {
    pub fn new(backup_dir: impl Into<PathBuf>, max_count: Option<usize>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
            max_count,
        }
    }

    /// Manager for registry snapshots
    pub fn for_registry(config: &Config) -> Self {
        Self::new(
            Config::backups_dir().join("registry"),
            config.backup.max_count,
        )
    }

    /// Manager for copies of a shell's startup file
    pub fn for_shell(shell_type: ShellType, config: &Config) -> Self {
        Self::new(
            Config::backups_dir().join(shell_type.name()),
            config.backup.max_count,
        )
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Ensure backup directory exists
    fn ensure_dir(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.backup_dir)
    }

    /// Pick an unused backup path; a clash within the same nanosecond moves the stamp forward
    fn next_backup_path(&self, label: &str) -> PathBuf {
        let mut now = OffsetDateTime::now_utc();
        loop {
            let backup_name = format!("{}_{}.bak", format_timestamp(now), label);
            let backup_path = self.backup_dir.join(&backup_name);
            if !backup_path.exists() {
                return backup_path;
            }
            now += time::Duration::nanoseconds(1);
        }
    }

    /// Create a backup copy of the specified file
    ///
    /// Does not prune: call [`BackupManager::cleanup_old_backups`] once the write the
    /// backup guards has succeeded.
    pub fn create_backup(&self, source_file: &Path) -> io::Result<PathBuf> {
        self.ensure_dir()?;

        let filename = source_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "config".to_string());

        let backup_path = self.next_backup_path(&filename);
        std::fs::copy(source_file, &backup_path)?;
        log::debug!("Backed up {} to {}", source_file.display(), backup_path.display());
        Ok(backup_path)
    }

    /// Store `content` as a new snapshot labelled `label`; like `create_backup`, no pruning
    pub fn create_snapshot(&self, label: &str, content: &str) -> io::Result<PathBuf> {
        self.ensure_dir()?;

        let backup_path = self.next_backup_path(label);
        write_file_atomic(&backup_path, content)?;
        log::debug!("Wrote snapshot {}", backup_path.display());
        Ok(backup_path)
    }

    /// List all backups (newest first)
    pub fn list_backups(&self) -> io::Result<Vec<BackupEntry>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();

        for entry in std::fs::read_dir(&self.backup_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().map(|e| e == "bak").unwrap_or(false) {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();

                let metadata = entry.metadata()?;
                let size = metadata.len();

                // Extract date and time-of-day from filename
                let timestamp = filename.split('_').take(2).collect::<Vec<_>>().join("_");

                let id = filename.trim_end_matches(".bak").to_string();

                entries.push(BackupEntry {
                    id,
                    path: path.clone(),
                    timestamp,
                    filename,
                    size,
                });
            }
        }

        entries.sort_by(|a, b| b.filename.cmp(&a.filename));

        Ok(entries)
    }

    /// Restore a backup by ID over `target_file`, backing up the current state first
    pub fn restore_backup(&self, id: &str, target_file: &Path) -> io::Result<BackupEntry> {
        let backup = self.get_backup(id)?.ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("Backup not found: {}", id))
        })?;

        if target_file.exists() {
            self.create_backup(target_file)?;
        }

        let content = std::fs::read(&backup.path)?;
        write_file_atomic(target_file, &content)?;
        self.cleanup_old_backups()?;

        Ok(backup)
    }

    /// Clean up old backups according to the configured limit
    pub fn cleanup_old_backups(&self) -> io::Result<usize> {
        match self.max_count {
            Some(keep) => self.cleanup_keep(keep),
            None => Ok(0),
        }
    }

    /// Clean up backups, keeping only the specified number
    pub fn cleanup_keep(&self, keep: usize) -> io::Result<usize> {
        let backups = self.list_backups()?;

        if backups.len() <= keep {
            return Ok(0);
        }

        let mut removed = 0;
        for backup in backups.into_iter().skip(keep) {
            std::fs::remove_file(&backup.path)?;
            removed += 1;
        }

        Ok(removed)
    }

    /// Get a specific backup by ID
    pub fn get_backup(&self, id: &str) -> io::Result<Option<BackupEntry>> {
        let backups = self.list_backups()?;
        Ok(backups
            .into_iter()
            .find(|b| b.id == id || b.filename.contains(id)))
    }
}

fn format_timestamp(now: OffsetDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02}_{:02}{:02}{:02}_{:09}",
        now.year(),
        now.month() as u8,
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
        now.nanosecond()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_backup_creation() {
        let temp_dir = tempdir().unwrap();
        let source_file = temp_dir.path().join("test.bashrc");
        std::fs::write(&source_file, "alias ll='ls -la'").unwrap();

        let manager = BackupManager::new(temp_dir.path().join("backups"), None);

        let backup_path = manager.create_backup(&source_file).unwrap();
        assert!(backup_path.exists());
        assert_eq!(
            std::fs::read_to_string(backup_path).unwrap(),
            "alias ll='ls -la'"
        );
    }

    #[test]
    fn test_snapshots_are_unique_and_ordered() {
        let temp_dir = tempdir().unwrap();
        let manager = BackupManager::new(temp_dir.path(), None);

        for i in 0..5 {
            manager
                .create_snapshot("aliases.json", &format!("{{\"n\": {}}}", i))
                .unwrap();
        }

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 5);
        // newest first
        let newest = std::fs::read_to_string(&backups[0].path).unwrap();
        let oldest = std::fs::read_to_string(&backups[4].path).unwrap();
        assert_eq!(newest, "{\"n\": 4}");
        assert_eq!(oldest, "{\"n\": 0}");
    }

    #[test]
    fn test_max_count_prunes_oldest() {
        let temp_dir = tempdir().unwrap();
        let manager = BackupManager::new(temp_dir.path(), Some(2));

        for i in 0..4 {
            manager
                .create_snapshot("aliases.json", &i.to_string())
                .unwrap();
        }
        // creating never prunes
        assert_eq!(manager.list_backups().unwrap().len(), 4);

        assert_eq!(manager.cleanup_old_backups().unwrap(), 2);
        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert_eq!(std::fs::read_to_string(&backups[1].path).unwrap(), "2");
    }

    #[test]
    fn test_restore_keeps_raw_bytes() {
        let temp_dir = tempdir().unwrap();
        let source = temp_dir.path().join("aliases.json");
        let raw = b"{\"caf\xE9\": 1}".to_vec();
        std::fs::write(&source, &raw).unwrap();

        let manager = BackupManager::new(temp_dir.path().join("backups"), None);
        let copy = manager.create_backup(&source).unwrap();
        std::fs::remove_file(&source).unwrap();

        let id = copy
            .file_name()
            .unwrap()
            .to_string_lossy()
            .trim_end_matches(".bak")
            .to_string();
        manager.restore_backup(&id, &source).unwrap();

        assert_eq!(std::fs::read(&source).unwrap(), raw);
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let temp_dir = tempdir().unwrap();
        let manager = BackupManager::new(temp_dir.path().join("none"), None);
        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_restore_backup() {
        let temp_dir = tempdir().unwrap();
        let target = temp_dir.path().join(".zshrc");
        std::fs::write(&target, "v1\n").unwrap();

        let manager = BackupManager::new(temp_dir.path().join("backups"), None);
        let first = manager.create_backup(&target).unwrap();
        std::fs::write(&target, "v2\n").unwrap();

        let id = first
            .file_name()
            .unwrap()
            .to_string_lossy()
            .trim_end_matches(".bak")
            .to_string();
        manager.restore_backup(&id, &target).unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "v1\n");
        // the overwritten state was kept too
        assert_eq!(manager.list_backups().unwrap().len(), 2);
    }

    #[test]
    fn test_restore_unknown_id() {
        let temp_dir = tempdir().unwrap();
        let manager = BackupManager::new(temp_dir.path(), None);
        let err = manager
            .restore_backup("nope", &temp_dir.path().join("x"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
