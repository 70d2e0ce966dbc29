//! Shell detection utilities

use crate::model::ShellType;
use std::path::Path;

/// Detect the shell a config file is written for from its name or extension
pub fn detect_from_file(path: &Path) -> Option<ShellType> {
    // First check filename for common patterns (for files without extensions)
    if let Some(filename) = path.file_name().and_then(|n| n.to_str()) {
        if filename.contains("bashrc")
            || filename.contains("bash_profile")
            || filename.contains("bash_aliases")
        {
            return Some(ShellType::Bash);
        }
        if filename.starts_with(".zsh") || filename == ".zprofile" || filename == ".zlogin" {
            return Some(ShellType::Zsh);
        }
        if filename == ".profile" || filename == ".shinit" {
            return Some(ShellType::Sh);
        }
    }

    // Then check extension
    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        match extension.to_lowercase().as_str() {
            "fish" => return Some(ShellType::Fish),
            "bash" => return Some(ShellType::Bash),
            "zsh" => return Some(ShellType::Zsh),
            "sh" => return Some(ShellType::Sh),
            _ => {}
        }
    }

    // Anything under a fish config directory (conf.d, functions)
    if path
        .components()
        .any(|c| c.as_os_str().to_str() == Some("fish"))
    {
        return Some(ShellType::Fish);
    }

    None
}

/// Get the shell to integrate with: an explicit choice wins over detection.
pub fn get_shell_type(specified: Option<ShellType>) -> crate::Result<ShellType> {
    match specified {
        Some(shell) => Ok(shell),
        None => ShellType::detect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_detect_from_file_bash() {
        let path = PathBuf::from("/home/user/.bashrc");
        assert_eq!(detect_from_file(&path), Some(ShellType::Bash));
        let path = PathBuf::from("/home/user/.bash_aliases");
        assert_eq!(detect_from_file(&path), Some(ShellType::Bash));
    }

    #[test]
    fn test_detect_from_file_zsh() {
        assert_eq!(
            detect_from_file(&PathBuf::from("/home/user/.zshrc")),
            Some(ShellType::Zsh)
        );
        assert_eq!(
            detect_from_file(&PathBuf::from("/home/user/.zprofile")),
            Some(ShellType::Zsh)
        );
    }

    #[test]
    fn test_detect_from_file_fish() {
        let path = PathBuf::from("/home/user/.config/fish/config.fish");
        assert_eq!(detect_from_file(&path), Some(ShellType::Fish));
        let path = PathBuf::from("/home/user/.config/fish/conf.d/aliases");
        assert_eq!(detect_from_file(&path), Some(ShellType::Fish));
    }

    #[test]
    fn test_detect_from_file_profile() {
        let path = PathBuf::from("/home/user/.profile");
        assert_eq!(detect_from_file(&path), Some(ShellType::Sh));
    }

    #[test]
    fn test_detect_from_file_unknown() {
        let path = PathBuf::from("/tmp/my_aliases.txt");
        assert_eq!(detect_from_file(&path), None);
    }

    #[test]
    fn test_get_shell_type_specified() {
        let result = get_shell_type(Some(ShellType::Fish)).unwrap();
        assert_eq!(result, ShellType::Fish);
    }
}
