//! Shell type detection and startup file paths

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{AliasError, Result};

/// Supported shell types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    Sh,
}

impl ShellType {
    pub const ALL: [ShellType; 4] = [
        ShellType::Bash,
        ShellType::Zsh,
        ShellType::Fish,
        ShellType::Sh,
    ];

    /// Detect the active shell from `$SHELL`, falling back to the parent process.
    pub fn detect() -> Result<Self> {
        let shell_var = env::var("SHELL").ok();
        let parent = parent_process_name();
        Self::from_env_values(shell_var.as_deref(), parent.as_deref())
    }

    /// Resolve a shell from an explicit `$SHELL` value and parent process name.
    pub fn from_env_values(shell_var: Option<&str>, parent: Option<&str>) -> Result<Self> {
        if let Some(shell) = shell_var.and_then(Self::from_program) {
            log::debug!("Detected shell {} from $SHELL", shell);
            return Ok(shell);
        }

        if let Some(shell) = parent.and_then(Self::from_program) {
            log::debug!("Detected shell {} from parent process", shell);
            return Ok(shell);
        }

        Err(AliasError::ShellDetection(format!(
            "unsupported or unknown shell (SHELL={}, parent={})",
            shell_var.unwrap_or("<unset>"),
            parent.unwrap_or("<unknown>")
        )))
    }

    /// Map a program path or process name (`/usr/bin/zsh`, `-bash`) to a shell.
    pub fn from_program(program: &str) -> Option<Self> {
        let base = Path::new(program.trim())
            .file_name()
            .and_then(|n| n.to_str())?
            .trim_start_matches('-')
            .to_lowercase();

        match base.as_str() {
            "bash" => Some(ShellType::Bash),
            "zsh" => Some(ShellType::Zsh),
            "fish" => Some(ShellType::Fish),
            "sh" | "dash" => Some(ShellType::Sh),
            _ => None,
        }
    }

    /// Startup file sourced by new interactive sessions, relative to `home`
    pub fn startup_file(&self, home: &Path) -> PathBuf {
        match self {
            ShellType::Bash => home.join(".bashrc"),
            ShellType::Zsh => home.join(".zshrc"),
            ShellType::Fish => home.join(".config").join("fish").join("config.fish"),
            ShellType::Sh => home.join(".profile"),
        }
    }

    /// Get the default startup file path in the user's home directory
    pub fn default_startup_file(&self) -> PathBuf {
        self.startup_file(&dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")))
    }

    /// Get shell name as string
    pub fn name(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
            ShellType::Sh => "sh",
        }
    }

    /// Command that prints the live alias table as `alias` statements
    pub fn alias_listing_command(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            ShellType::Bash => Some(("bash", &["-i", "-c", "alias -p"])),
            ShellType::Zsh => Some(("zsh", &["-i", "-c", "alias -L"])),
            ShellType::Fish => Some(("fish", &["-c", "alias"])),
            // POSIX sh prints bare `name=value` pairs, not alias statements
            ShellType::Sh => None,
        }
    }
}

#[cfg(target_os = "linux")]
fn parent_process_name() -> Option<String> {
    let ppid = std::os::unix::process::parent_id();
    std::fs::read_to_string(format!("/proc/{}/comm", ppid))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(all(unix, not(target_os = "linux")))]
fn parent_process_name() -> Option<String> {
    let ppid = std::os::unix::process::parent_id();
    Command::new("ps")
        .args(["-o", "comm=", "-p", &ppid.to_string()])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(not(unix))]
fn parent_process_name() -> Option<String> {
    None
}

/// Run the shell's own alias listing and capture its stdout
pub(crate) fn run_alias_listing(shell: ShellType) -> Result<String> {
    let (program, args) = shell.alias_listing_command().ok_or_else(|| {
        AliasError::unreadable(
            shell.name(),
            std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "shell has no alias listing in statement form",
            ),
        )
    })?;

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| AliasError::unreadable(program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AliasError::unreadable(
            program,
            std::io::Error::other(format!("alias listing failed: {}", stderr.trim())),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ShellType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bash" => Ok(ShellType::Bash),
            "zsh" => Ok(ShellType::Zsh),
            "fish" => Ok(ShellType::Fish),
            "sh" => Ok(ShellType::Sh),
            _ => Err(format!("Unknown shell type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_type_name() {
        assert_eq!(ShellType::Bash.name(), "bash");
        assert_eq!(ShellType::Fish.name(), "fish");
    }

    #[test]
    fn test_shell_type_from_str() {
        assert_eq!("bash".parse::<ShellType>().unwrap(), ShellType::Bash);
        assert_eq!("ZSH".parse::<ShellType>().unwrap(), ShellType::Zsh);
        assert!("pwsh".parse::<ShellType>().is_err());
    }

    #[test]
    fn test_from_program() {
        assert_eq!(ShellType::from_program("/bin/bash"), Some(ShellType::Bash));
        assert_eq!(
            ShellType::from_program("/usr/local/bin/fish"),
            Some(ShellType::Fish)
        );
        assert_eq!(ShellType::from_program("-zsh"), Some(ShellType::Zsh));
        assert_eq!(ShellType::from_program("dash"), Some(ShellType::Sh));
        assert_eq!(ShellType::from_program("/usr/bin/python3"), None);
        assert_eq!(ShellType::from_program(""), None);
    }

    #[test]
    fn test_detection_prefers_shell_var() {
        let shell = ShellType::from_env_values(Some("/bin/zsh"), Some("bash")).unwrap();
        assert_eq!(shell, ShellType::Zsh);
    }

    #[test]
    fn test_detection_falls_back_to_parent() {
        let shell = ShellType::from_env_values(Some("/opt/xonsh"), Some("fish")).unwrap();
        assert_eq!(shell, ShellType::Fish);
    }

    #[test]
    fn test_detection_unknown_is_error() {
        let err = ShellType::from_env_values(None, Some("cargo")).unwrap_err();
        assert!(matches!(err, AliasError::ShellDetection(_)));
    }

    #[test]
    fn test_startup_file() {
        let home = Path::new("/home/user");
        assert_eq!(
            ShellType::Bash.startup_file(home),
            PathBuf::from("/home/user/.bashrc")
        );
        assert_eq!(
            ShellType::Fish.startup_file(home),
            PathBuf::from("/home/user/.config/fish/config.fish")
        );
        assert_eq!(
            ShellType::Sh.startup_file(home),
            PathBuf::from("/home/user/.profile")
        );
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ShellType::Fish).unwrap();
        assert_eq!(json, "\"fish\"");
        let parsed: ShellType = serde_json::from_str("\"zsh\"").unwrap();
        assert_eq!(parsed, ShellType::Zsh);
    }
}
