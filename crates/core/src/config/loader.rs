use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use shellexpand::full;
use thiserror::Error;

use crate::config::types::{ConfigFile, LoggingConfig, ResolvedConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("failed to write {0}: {1}")]
    WriteError(String, #[source] std::io::Error),

    #[error("failed to serialise default config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("todos_daystoseek must be a positive integer, got {0}")]
    InvalidDaysToSeek(i64),

    #[error("home directory not available to expand '{0}'")]
    NoHome(String),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the config at `config_path` (or the default location), writing a
    /// default file first when none exists. The base, todos and memos
    /// directories are created.
    pub fn load_or_init(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            Self::write_default(&path)?;
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;
        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        let resolved = Self::resolve(&path, &cf)?;
        for dir in [&resolved.base_dir, &resolved.todos_dir, &resolved.memos_dir] {
            fs::create_dir_all(dir)
                .map_err(|e| ConfigError::WriteError(dir.display().to_string(), e))?;
        }
        Ok(resolved)
    }

    fn write_default(path: &Path) -> Result<(), ConfigError> {
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let cf = ConfigFile::with_base_dir(format!("{}/", default_base_dir(path).display()));

        let text = toml::to_string_pretty(&cf)?;
        fs::create_dir_all(config_dir)
            .map_err(|e| ConfigError::WriteError(config_dir.display().to_string(), e))?;
        fs::write(path, text).map_err(|e| ConfigError::WriteError(path.display().to_string(), e))?;
        tracing::info!("created default config at {}", path.display());
        Ok(())
    }

    fn resolve(path: &Path, cf: &ConfigFile) -> Result<ResolvedConfig, ConfigError> {
        let todos_days_to_seek = u32::try_from(cf.todos_daystoseek)
            .ok()
            .filter(|days| *days > 0)
            .ok_or(ConfigError::InvalidDaysToSeek(cf.todos_daystoseek))?;

        let base_dir = match &cf.base_dir {
            Some(dir) => expand_path(dir)?,
            None => default_base_dir(path),
        };
        let todos_dir = base_dir.join(folder(&cf.todos_foldername));
        let memos_dir = base_dir.join(folder(&cf.memos_foldername));

        let logging = match &cf.logging.file {
            Some(file) => LoggingConfig {
                file: Some(expand_path(&file.to_string_lossy())?),
                ..cf.logging.clone()
            },
            None => cf.logging.clone(),
        };

        Ok(ResolvedConfig {
            config_path: path.to_path_buf(),
            base_dir,
            todos_dir,
            memos_dir,
            todos_days_to_seek,
            editor_command: cf.editor_command.clone(),
            logging,
        })
    }
}

/// `$XDG_CONFIG_HOME/memov2/config.toml`, else `~/.config/memov2/config.toml`.
pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Path::new(&xdg).join("memov2").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("memov2").join("config.toml")
}

/// `dailymemo` in the directory holding the config file.
fn default_base_dir(config_path: &Path) -> PathBuf {
    absolute(config_path.parent().unwrap_or(Path::new("."))).join("dailymemo")
}

fn folder(name: &str) -> &str {
    name.trim_end_matches(['/', '\\'])
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    env::current_dir().map(|cwd| cwd.join(path)).unwrap_or_else(|_| path.to_path_buf())
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome(input.to_string()))?;
    Ok(PathBuf::from(expanded.to_string()))
}
