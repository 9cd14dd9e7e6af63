use anyhow::Result;
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use url::Url;

/// Dataset endpoint of the upstream publisher.
const DEFAULT_URL: &str =
    "https://data.moi.gov.tw/MoiOD/System/DownloadFile.aspx?DATA=72874C55-884D-4CEA-B7D6-F60B0BE85AB0";

/// Global configuration loaded from `~/.config/dsync/config.toml`.
///
/// Every component receives these values explicitly; nothing reads
/// process-wide globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Absolute URL of the dataset archive.
    pub url: String,
    /// Directory downloads land in and entries are extracted to.
    pub work_dir: PathBuf,
    /// Suffix identifying the payload entry inside the archive.
    pub payload_suffix: String,
    /// Label of the encoding zip entry names are stored in.
    pub entry_encoding: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            work_dir: std::env::temp_dir(),
            payload_suffix: ".shp".to_string(),
            entry_encoding: "Big5".to_string(),
        }
    }
}

impl SyncConfig {
    /// Resolved entry-name encoding. Labels are checked by
    /// [`SyncConfig::validate`]; an unknown label here falls back to Big5.
    pub fn entry_encoding(&self) -> &'static Encoding {
        Encoding::for_label(self.entry_encoding.as_bytes()).unwrap_or(encoding_rs::BIG5)
    }

    /// Rejects configs whose URL does not parse or whose encoding label is
    /// unknown to the WHATWG registry.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.url)?;
        if Encoding::for_label(self.entry_encoding.as_bytes()).is_none() {
            anyhow::bail!("unknown entry encoding label `{}`", self.entry_encoding);
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dsync")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SyncConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SyncConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SyncConfig = toml::from_str(&data)?;
    cfg.validate()?;
    Ok(cfg)
}
