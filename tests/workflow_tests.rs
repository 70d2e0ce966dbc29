//! End-to-end tests of scan → registry → startup file through the library API

use std::fs;

use alix::backup::BackupManager;
use alix::{Alias, ConflictStrategy, Integrator, Registry, Scanner, ShellType};
use tempfile::tempdir;

fn registry_in(dir: &std::path::Path) -> Registry {
    Registry::open(
        dir.join(".alix/aliases.json"),
        BackupManager::new(dir.join(".alix/backups/registry"), None),
    )
}

#[test]
fn test_scanned_aliases_survive_apply_and_rescan() {
    let home = tempdir().unwrap();
    fs::write(
        home.path().join(".bash_aliases"),
        "alias ll='ls -la'\nalias say='echo it'\\''s'\nalias gs=git\\ status\n",
    )
    .unwrap();

    let scanner = Scanner::with_home(home.path());
    let mut registry = registry_in(home.path());
    for (_, aliases) in scanner.scan_system() {
        registry.import(aliases, ConflictStrategy::Skip).unwrap();
    }
    assert_eq!(registry.len(), 3);

    let integrator = Integrator::for_shell(ShellType::Bash, home.path());
    integrator.apply_all(&registry).unwrap();

    let rescanned = scanner.scan_file(integrator.get_target_file()).unwrap();
    assert_eq!(rescanned.len(), 3);
    for alias in &rescanned {
        let stored = registry.lookup(alias.name()).unwrap();
        assert_eq!(stored.command(), alias.command());
    }
}

#[test]
fn test_fish_block_rescans_in_fish_dialect() {
    let home = tempdir().unwrap();
    let mut registry = registry_in(home.path());
    registry
        .add(Alias::new("bs", r"echo \o/ it's").unwrap())
        .unwrap();

    let integrator = Integrator::for_shell(ShellType::Fish, home.path());
    integrator.apply_all(&registry).unwrap();

    let rescanned = Scanner::with_home(home.path())
        .scan_file(integrator.get_target_file())
        .unwrap();
    assert_eq!(rescanned.len(), 1);
    assert_eq!(rescanned[0].command(), r"echo \o/ it's");
    assert_eq!(rescanned[0].shell, Some(ShellType::Fish));
}

#[test]
fn test_registry_reopens_with_history() {
    let home = tempdir().unwrap();
    let created = {
        let mut registry = registry_in(home.path());
        registry.add(Alias::new("gs", "git status").unwrap()).unwrap();
        registry.record_use("gs").unwrap();
        registry.lookup("gs").unwrap().created_at()
    };

    let registry = registry_in(home.path());
    let gs = registry.lookup("gs").unwrap();
    assert_eq!(gs.used_count(), 1);
    assert_eq!(gs.created_at(), created);
}

#[test]
fn test_user_edits_outside_block_are_kept() {
    let home = tempdir().unwrap();
    let rc = home.path().join(".zshrc");
    let mut registry = registry_in(home.path());
    registry.add(Alias::new("ll", "ls -la").unwrap()).unwrap();

    let integrator = Integrator::for_shell(ShellType::Zsh, home.path());
    fs::write(&rc, "setopt autocd\n").unwrap();
    integrator.apply_all(&registry).unwrap();

    // the user appends more config after the block
    let mut content = fs::read_to_string(&rc).unwrap();
    content.push_str("bindkey -e\n");
    fs::write(&rc, &content).unwrap();

    registry.add(Alias::new("gs", "git status").unwrap()).unwrap();
    integrator.apply_all(&registry).unwrap();

    let content = fs::read_to_string(&rc).unwrap();
    assert!(content.starts_with("setopt autocd\n"));
    assert!(content.ends_with("bindkey -e\n"));
    assert!(content.contains("alias gs='git status'\nalias ll='ls -la'\n"));
}
