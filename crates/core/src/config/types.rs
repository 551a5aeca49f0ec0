use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk shape of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Defaults to `dailymemo/` next to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<String>,
    #[serde(default = "default_todos_foldername")]
    pub todos_foldername: String,
    #[serde(default = "default_memos_foldername")]
    pub memos_foldername: String,
    #[serde(default = "default_days_to_seek")]
    pub todos_daystoseek: i64,
    /// Editor argv; `{base_dir}` and `{path}` are substituted per call.
    #[serde(default = "default_editor_command")]
    pub editor_command: Vec<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigFile {
    pub fn with_base_dir(base_dir: impl Into<String>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
            todos_foldername: default_todos_foldername(),
            memos_foldername: default_memos_foldername(),
            todos_daystoseek: default_days_to_seek(),
            editor_command: default_editor_command(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_todos_foldername() -> String {
    "todos/".to_string()
}

fn default_memos_foldername() -> String {
    "memos/".to_string()
}

fn default_days_to_seek() -> i64 {
    10
}

pub fn default_editor_command() -> Vec<String> {
    ["code", "--folder-uri", "{base_dir}", "--goto", "{path}:7"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Configuration with every path expanded and validated.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// File the configuration was loaded from.
    pub config_path: PathBuf,
    pub base_dir: PathBuf,
    pub todos_dir: PathBuf,
    pub memos_dir: PathBuf,
    pub todos_days_to_seek: u32,
    pub editor_command: Vec<String>,
    pub logging: LoggingConfig,
}
