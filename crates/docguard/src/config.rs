//! Security service configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use docguard_core::{EVERYONE, SYSTEM_USERNAME};

use crate::error::Result;

/// Configuration for the [`SecurityService`](crate::SecurityService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// User name granted everything without consulting policies or ACLs.
    /// Empty disables the bypass.
    pub system_username: String,

    /// Group every principal is expanded with.
    pub everyone: String,

    /// Load the default permission table and deploy the built-in policies.
    pub load_defaults: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            system_username: SYSTEM_USERNAME.to_string(),
            everyone: EVERYONE.to_string(),
            load_defaults: true,
        }
    }
}

impl SecurityConfig {
    /// Parse from JSON; missing fields take their default.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SecurityConfig::from_json(r#"{"system_username":"root"}"#).unwrap();
        assert_eq!(config.system_username, "root");
        assert_eq!(config.everyone, "Everyone");
        assert!(config.load_defaults);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("security.json");
        std::fs::write(&path, r#"{"load_defaults":false}"#).unwrap();

        let config = SecurityConfig::from_file(&path).unwrap();
        assert!(!config.load_defaults);
        assert_eq!(config.system_username, "system");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SecurityConfig::from_file(dir.path().join("absent.json")).is_err());
    }
}
