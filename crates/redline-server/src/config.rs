use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Configuration for the review API server.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Root directory of the filesystem document store.
    pub store_root: PathBuf,
    /// Browser origin allowed to call the API with credentials.
    /// `None` disables the CORS layer entirely.
    pub allowed_origin: Option<String>,
    /// Unchanged lines attached to each hunk as display context.
    pub context_lines: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".parse().unwrap(),
            store_root: PathBuf::from("."),
            allowed_origin: Some("http://localhost:3000".to_string()),
            context_lines: 3,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file. Missing keys take their
    /// defaults.
    pub fn from_file(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|err| ServerError::Config(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.store_root, PathBuf::from("."));
        assert_eq!(c.allowed_origin.as_deref(), Some("http://localhost:3000"));
        assert_eq!(c.context_lines, 3);
    }

    #[test]
    fn from_file_fills_missing_keys_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = \"0.0.0.0:9000\"").unwrap();
        writeln!(file, "store_root = \"/var/lib/redline\"").unwrap();

        let c = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.store_root, PathBuf::from("/var/lib/redline"));
        assert_eq!(c.context_lines, 3);
    }

    #[test]
    fn from_file_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = not-a-string").unwrap();

        assert!(matches!(
            ServerConfig::from_file(file.path()).unwrap_err(),
            ServerError::Config(_)
        ));
    }
}
