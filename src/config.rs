use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize as _;

use crate::foundation::core::{Canvas, LayoutMode, TargetSurface};
use crate::foundation::error::{WallfitError, WallfitResult};

/// Runtime configuration, usually loaded from a JSON file.
///
/// Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WallfitConfig {
    /// Destination surface size.
    pub display: Canvas,
    /// Root directory of the file-backed surface writer.
    pub output_dir: PathBuf,
    /// Network and file acquisition limits.
    pub fetch: FetchConfig,
    /// Target used when a request names none.
    #[serde(deserialize_with = "from_str_value")]
    pub default_target: TargetSurface,
    /// Layout mode used when a request names none.
    #[serde(deserialize_with = "from_str_value")]
    pub default_display: LayoutMode,
}

impl Default for WallfitConfig {
    fn default() -> Self {
        Self {
            display: Canvas::default(),
            output_dir: PathBuf::from("wallpapers"),
            fetch: FetchConfig::default(),
            default_target: TargetSurface::Both,
            default_display: LayoutMode::Fill,
        }
    }
}

/// Limits applied while acquiring source bytes.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub max_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_bytes: 64 * 1024 * 1024,
        }
    }
}

impl WallfitConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> WallfitResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| WallfitError::config(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> WallfitResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            WallfitError::config(format!("open config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> WallfitResult<()> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(WallfitError::config(format!(
                "display must be positive, got {}x{}",
                self.display.width, self.display.height
            )));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(WallfitError::config("fetch.timeout_secs must be > 0"));
        }
        if self.fetch.max_bytes == 0 {
            return Err(WallfitError::config("fetch.max_bytes must be > 0"));
        }
        Ok(())
    }
}

// Config values go through the same case-insensitive parsers as request values.
fn from_str_value<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr<Err = WallfitError>,
{
    let raw = String::deserialize(de)?;
    raw.parse().map_err(serde::de::Error::custom)
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
