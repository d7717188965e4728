use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::{fs, io};

pub fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .map(|h| h.join("Library/Application Support/llmq"))
    }

    #[cfg(target_os = "linux")]
    {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
            .map(|c| c.join("llmq"))
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA")
            .map(PathBuf::from)
            .map(|a| a.join("llmq"))
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .map(|h| h.join(".config/llmq"))
    }
}

/// Optional defaults loaded from `config.toml` and `LLMQ_*` environment
/// variables. Command-line flags always win.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub model: Option<String>,
    pub system_prompt: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl AppConfig {
    #[must_use]
    pub fn load() -> Self {
        let mut builder = Config::builder();

        if let Some(path) = Self::get_config_path() {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder.add_source(Environment::with_prefix("LLMQ").try_parsing(true));

        builder
            .build()
            .and_then(Config::try_deserialize)
            .unwrap_or_else(|e| {
                eprintln!("Warning: Failed to load config: {e}");
                Self::default()
            })
    }

    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        get_config_dir().map(|dir| dir.join("config.toml"))
    }

    pub fn init_default() -> Result<PathBuf, io::Error> {
        let path = Self::get_config_path().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {}", path.display()),
            ));
        }

        fs::write(&path, include_str!("config.template.toml"))?;
        Ok(path)
    }
}
