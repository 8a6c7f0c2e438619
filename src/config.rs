use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use crate::repository::DEFAULT_DOCUMENT;

/// Environment variable consulted for the admin token
pub const ADMIN_TOKEN_ENV: &str = "FOLIO_ADMIN_TOKEN";

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FolioConfig {
    pub database: Option<String>,
    pub document: Option<String>,
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub admin_token: Option<String>,
    pub static_dir: Option<String>,
}

/// Values given on the command line; they win over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database: Option<PathBuf>,
    pub bind: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub database: PathBuf,
    pub document: String,
    pub bind: IpAddr,
    pub port: u16,
    pub admin_token: Option<String>,
    pub static_dir: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(
        config: Option<FolioConfig>,
        overrides: Overrides,
        env_token: Option<String>,
    ) -> anyhow::Result<Self> {
        let config = config.unwrap_or_default();

        let database = overrides
            .database
            .or_else(|| config.database.map(PathBuf::from))
            .unwrap_or_else(|| default_database_path_in(Path::new(".")));

        let bind = overrides
            .bind
            .or(config.bind)
            .unwrap_or_else(|| "0.0.0.0".to_string());
        let bind: IpAddr = bind
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid bind address '{}': {}", bind, e))?;

        let admin_token = env_token
            .or(config.admin_token)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            database,
            document: config.document.unwrap_or_else(|| DEFAULT_DOCUMENT.to_string()),
            bind,
            port: overrides.port.or(config.port).unwrap_or(DEFAULT_PORT),
            admin_token,
            static_dir: config.static_dir.map(PathBuf::from),
        })
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("folio.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".folio").join("folio.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<FolioConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: FolioConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &FolioConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_gitignore(project_root: &Path) -> anyhow::Result<()> {
    let gitignore_path = project_root.join(".gitignore");
    let entry = ".folio/";

    let mut content = String::new();
    if gitignore_path.exists() {
        content = std::fs::read_to_string(&gitignore_path)?;
        if content.lines().any(|line| line.trim() == entry) {
            return Ok(());
        }
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
    }
    content.push_str(entry);
    content.push('\n');
    std::fs::write(&gitignore_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(None, Overrides::default(), None).unwrap();
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.document, DEFAULT_DOCUMENT);
        assert_eq!(settings.bind.to_string(), "0.0.0.0");
        assert!(settings.admin_token.is_none());
        assert!(settings.database.ends_with(".folio/folio.db"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = FolioConfig {
            database: Some("from-file.db".into()),
            port: Some(8080),
            admin_token: Some("file-token".into()),
            ..FolioConfig::default()
        };
        let overrides = Overrides {
            port: Some(9000),
            bind: Some("127.0.0.1".into()),
            ..Overrides::default()
        };
        let settings = Settings::resolve(Some(config), overrides, Some("env-token".into())).unwrap();
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.database, PathBuf::from("from-file.db"));
        assert_eq!(settings.admin_token.as_deref(), Some("env-token"));
        assert_eq!(settings.bind.to_string(), "127.0.0.1");
    }

    #[test]
    fn test_blank_token_disables_admin() {
        let config = FolioConfig {
            admin_token: Some("   ".into()),
            ..FolioConfig::default()
        };
        let settings = Settings::resolve(Some(config), Overrides::default(), None).unwrap();
        assert!(settings.admin_token.is_none());
    }

    #[test]
    fn test_invalid_bind_is_rejected() {
        let overrides = Overrides {
            bind: Some("not-an-ip".into()),
            ..Overrides::default()
        };
        assert!(Settings::resolve(None, overrides, None).is_err());
    }

    #[test]
    fn test_config_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        assert!(load_config(Some(&path)).unwrap().is_none());

        let config = FolioConfig {
            document: Some("sites/me".into()),
            port: Some(4000),
            ..FolioConfig::default()
        };
        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();

        assert_eq!(load_config(Some(&path)).unwrap(), Some(config));
    }

    #[test]
    fn test_gitignore_entry_added_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".gitignore"), "target/").unwrap();
        ensure_gitignore(dir.path()).unwrap();
        ensure_gitignore(dir.path()).unwrap();
        let content = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert_eq!(content, "target/\n.folio/\n");
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("folio.db");
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
    }
}
