//! Configuration loading and root folder resolution
//!
//! The root folder holds the database file and the upload directory.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. TUNEDROP_ROOT environment variable
/// 3. TOML config file (`root_folder` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("TUNEDROP_ROOT") {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Get default configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/tunedrop/config.toml first, then /etc/tunedrop/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("tunedrop").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/tunedrop/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        return Err(Error::Config("No config file found".to_string()));
    }

    let config_path = dirs::config_dir()
        .map(|d| d.join("tunedrop").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if config_path.exists() {
        Ok(config_path)
    } else {
        Err(Error::Config(format!(
            "Config file not found: {:?}",
            config_path
        )))
    }
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("tunedrop"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/tunedrop"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("tunedrop"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/tunedrop"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("tunedrop"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\tunedrop"))
    } else {
        PathBuf::from("./tunedrop_data")
    }
}

/// Database file location inside the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join("tunedrop.db")
}

/// Uploaded music directory inside the root folder
pub fn upload_dir(root: &Path) -> PathBuf {
    root.join("music")
}

/// Create the root folder and upload directory if missing
pub fn ensure_root_layout(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)?;
    std::fs::create_dir_all(upload_dir(root))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_arg_takes_priority() {
        let root = resolve_root_folder(Some("/tmp/tunedrop-test"));
        assert_eq!(root, PathBuf::from("/tmp/tunedrop-test"));
    }

    #[test]
    fn test_ensure_root_layout_creates_upload_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("data");

        ensure_root_layout(&root).unwrap();

        assert!(root.is_dir());
        assert!(upload_dir(&root).is_dir());
        assert_eq!(database_path(&root), root.join("tunedrop.db"));
    }
}
