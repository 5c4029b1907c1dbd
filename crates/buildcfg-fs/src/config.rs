//! Format-agnostic configuration loading and saving

use crate::{Error, NormalizedPath, Result, StrictDocument, io};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Conventional config file names, in discovery order.
pub const CONFIG_FILE_NAMES: [&str; 4] = [
    "buildcfg.toml",
    "buildcfg.json",
    "buildcfg.yaml",
    "buildcfg.yml",
];

/// Serialization format of a config file, detected from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from a path's extension.
    ///
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn from_path(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or("");
        match extension.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Format-agnostic configuration store.
///
/// Detects the format from the file extension and handles
/// serialization/deserialization transparently.
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Find the first conventional config file inside `dir`.
    pub fn discover(&self, dir: &NormalizedPath) -> Result<NormalizedPath> {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                tracing::debug!(path = %candidate, "Discovered config file");
                return Ok(candidate);
            }
        }
        Err(Error::ConfigNotFound {
            dir: dir.to_native(),
            candidates: CONFIG_FILE_NAMES.join(", "),
        })
    }

    /// Load configuration from a file.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let format = ConfigFormat::from_path(path)?;
        let content = io::read_text(path)?;
        self.parse(&content, format, path)
    }

    /// Load a config document as a value tree, rejecting duplicate keys.
    ///
    /// A blank file yields `Value::Null` in every format.
    pub fn load_document(&self, path: &NormalizedPath) -> Result<Value> {
        let format = ConfigFormat::from_path(path)?;
        let content = io::read_text(path)?;
        if content.trim().is_empty() {
            return Ok(Value::Null);
        }
        let document: StrictDocument = self.parse(&content, format, path)?;
        Ok(document.into_value())
    }

    /// Parse configuration text in a known format.
    ///
    /// `origin` is only used for error messages.
    pub fn parse<T: DeserializeOwned>(
        &self,
        content: &str,
        format: ConfigFormat,
        origin: &NormalizedPath,
    ) -> Result<T> {
        let parse_error = |message: String| Error::ConfigParse {
            path: origin.to_native(),
            format: format.name().into(),
            message,
        };
        match format {
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))
            }
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))
            }
        }
    }

    /// Save configuration to a file.
    ///
    /// Format is determined from the file extension. Uses an atomic write.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let format = ConfigFormat::from_path(path)?;
        let serialize_error = |message: String| Error::ConfigSerialize {
            path: path.to_native(),
            format: format.name().into(),
            message,
        };

        let mut content = match format {
            ConfigFormat::Toml => {
                toml::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))?
            }
            ConfigFormat::Json => {
                serde_json::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))?
            }
            ConfigFormat::Yaml => {
                serde_yaml::to_string(value).map_err(|e| serialize_error(e.to_string()))?
            }
        };
        if !content.ends_with('\n') {
            content.push('\n');
        }

        io::write_atomic(path, content.as_bytes())
    }
}
