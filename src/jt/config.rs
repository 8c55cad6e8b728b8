use crate::error::{JtError, Result};
use crate::tag::TagKind;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";
const APP_DIR: &str = "jdex";
const DB_FILENAME: &str = "jt.json";
pub const DEFAULT_VAULT: &str = "/mnt/nas";

/// Keys accepted by [`JtConfig::get`] and [`JtConfig::set`].
pub const KEYS: &[&str] = &[
    "vault",
    "db_path",
    "color_ac",
    "color_id",
    "color_ext",
    "color_dir",
    "color_ok",
    "color_err",
    "icon_tag",
    "icon_dir",
];

/// A 24-bit color, written `#rrggbb` in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = JtError;

    fn from_str(raw: &str) -> Result<Self> {
        let hex = raw.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(JtError::Config(format!(
                "invalid color '{}', expected #rrggbb",
                raw
            )));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        Ok(Rgb(channel(0), channel(2), channel(4)))
    }
}

impl TryFrom<String> for Rgb {
    type Error = JtError;

    fn try_from(raw: String) -> Result<Self> {
        raw.parse()
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Output colors and icons. Defaults are xterm colors 75, 107, 175, 141, 77
/// and 203 with Nerd Font tag and folder glyphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub color_ac: Rgb,
    pub color_id: Rgb,
    pub color_ext: Rgb,
    pub color_dir: Rgb,
    pub color_ok: Rgb,
    pub color_err: Rgb,
    pub icon_tag: String,
    pub icon_dir: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            color_ac: Rgb(95, 175, 255),
            color_id: Rgb(135, 175, 95),
            color_ext: Rgb(215, 135, 175),
            color_dir: Rgb(175, 135, 255),
            color_ok: Rgb(95, 215, 95),
            color_err: Rgb(255, 95, 95),
            icon_tag: "\u{f02b}".to_string(),
            icon_dir: "\u{f07b}".to_string(),
        }
    }
}

impl Palette {
    pub fn color_for(&self, kind: TagKind) -> Rgb {
        match kind {
            TagKind::Category => self.color_ac,
            TagKind::Id => self.color_id,
            TagKind::Extension => self.color_ext,
            TagKind::Directory => self.color_dir,
        }
    }

    pub fn icon_for(&self, kind: TagKind) -> &str {
        match kind {
            TagKind::Directory => &self.icon_dir,
            _ => &self.icon_tag,
        }
    }

    fn color_slot(&mut self, key: &str) -> Option<&mut Rgb> {
        match key {
            "color_ac" => Some(&mut self.color_ac),
            "color_id" => Some(&mut self.color_id),
            "color_ext" => Some(&mut self.color_ext),
            "color_dir" => Some(&mut self.color_dir),
            "color_ok" => Some(&mut self.color_ok),
            "color_err" => Some(&mut self.color_err),
            _ => None,
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        let color = match key {
            "icon_tag" => return Some(self.icon_tag.clone()),
            "icon_dir" => return Some(self.icon_dir.clone()),
            "color_ac" => self.color_ac,
            "color_id" => self.color_id,
            "color_ext" => self.color_ext,
            "color_dir" => self.color_dir,
            "color_ok" => self.color_ok,
            "color_err" => self.color_err,
            _ => return None,
        };
        Some(color.to_string())
    }

    /// `Ok(false)` when `key` is not a palette key.
    fn set(&mut self, key: &str, value: &str) -> Result<bool> {
        match key {
            "icon_tag" => self.icon_tag = value.trim().to_string(),
            "icon_dir" => self.icon_dir = value.trim().to_string(),
            _ => match self.color_slot(key) {
                Some(slot) => *slot = value.parse()?,
                None => return Ok(false),
            },
        }
        Ok(true)
    }
}

/// Configuration for jt, stored in `<config dir>/jdex/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JtConfig {
    /// Root folder holding the directory slots.
    #[serde(default = "default_vault")]
    pub vault: String,

    /// Database file. Falls back to `<cache dir>/jdex/jt.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,

    #[serde(default)]
    pub palette: Palette,
}

fn default_vault() -> String {
    DEFAULT_VAULT.to_string()
}

impl Default for JtConfig {
    fn default() -> Self {
        Self {
            vault: default_vault(),
            db_path: None,
            palette: Palette::default(),
        }
    }
}

/// `<platform config dir>/jdex`, if a home directory can be determined.
pub fn default_config_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|bd| bd.config_dir().join(APP_DIR))
}

/// `<platform cache dir>/jdex/jt.json`, if a home directory can be determined.
pub fn default_db_path() -> Option<PathBuf> {
    BaseDirs::new().map(|bd| bd.cache_dir().join(APP_DIR).join(DB_FILENAME))
}

impl JtConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(JtError::Io)?;
        let mut config: JtConfig = serde_json::from_str(&content).map_err(|e| {
            JtError::Config(format!("{}: {}", config_path.display(), e))
        })?;
        config.vault = normalize_vault(&config.vault);
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(JtError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(JtError::Serialization)?;
        fs::write(config_path, content).map_err(JtError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "vault" => Some(self.vault.clone()),
            "db_path" => Some(
                self.db_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            _ => self.palette.get(key),
        }
    }

    /// Sets a key from its string form. An empty `db_path` restores the default.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "vault" => {
                let vault = normalize_vault(value.trim());
                if vault.is_empty() {
                    return Err(JtError::Config("vault cannot be empty".to_string()));
                }
                self.vault = vault;
            }
            "db_path" => {
                let value = value.trim();
                self.db_path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => {
                if !self.palette.set(key, value)? {
                    return Err(JtError::Config(format!(
                        "Unknown config key: {} (expected one of: {})",
                        key,
                        KEYS.join(", ")
                    )));
                }
            }
        }
        Ok(())
    }

    /// The database path, or `fallback` when none is configured.
    pub fn db_path_or(&self, fallback: PathBuf) -> PathBuf {
        self.db_path.clone().unwrap_or(fallback)
    }
}

/// Strips trailing `/`, keeping a lone root.
fn normalize_vault(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() && raw.starts_with('/') {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_point_at_nas() {
        let config = JtConfig::default();
        assert_eq!(config.vault, "/mnt/nas");
        assert!(config.db_path.is_none());
    }

    #[test]
    fn load_missing_config_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = JtConfig::load(temp.path().join("absent")).unwrap();
        assert_eq!(config, JtConfig::default());
    }

    #[test]
    fn save_and_load() {
        let temp = TempDir::new().unwrap();
        let mut config = JtConfig::default();
        config.set("vault", "/srv/vault/").unwrap();
        config.set("db_path", "/tmp/tags.json").unwrap();
        config.save(temp.path()).unwrap();

        let loaded = JtConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.vault, "/srv/vault");
        assert_eq!(loaded.db_path, Some(PathBuf::from("/tmp/tags.json")));
    }

    #[test]
    fn missing_fields_use_defaults_and_trailing_slashes_drop() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"vault": "/data//"}"#).unwrap();
        let loaded = JtConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.vault, "/data");
        assert!(loaded.db_path.is_none());

        fs::write(temp.path().join(CONFIG_FILENAME), "{}").unwrap();
        assert_eq!(JtConfig::load(temp.path()).unwrap().vault, DEFAULT_VAULT);
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), "vault=/mnt/nas").unwrap();
        assert!(matches!(
            JtConfig::load(temp.path()),
            Err(JtError::Config(_))
        ));
    }

    #[test]
    fn get_and_set_reject_unknown_keys() {
        let mut config = JtConfig::default();
        assert!(config.get("colour").is_none());
        assert!(matches!(
            config.set("colour", "red"),
            Err(JtError::Config(_))
        ));
        assert!(config.set("vault", "  ").is_err());
    }

    #[test]
    fn empty_db_path_restores_default() {
        let mut config = JtConfig::default();
        config.set("db_path", "/x/jt.json").unwrap();
        config.set("db_path", "").unwrap();
        assert_eq!(
            config.db_path_or(PathBuf::from("/fallback.json")),
            PathBuf::from("/fallback.json")
        );
        assert_eq!(config.get("db_path").as_deref(), Some(""));
    }

    #[test]
    fn palette_defaults_fill_missing_fields() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r##"{"palette": {"icon_tag": "#", "color_ext": "#ff0000"}}"##,
        )
        .unwrap();
        let loaded = JtConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.palette.icon_tag, "#");
        assert_eq!(loaded.palette.color_ext, Rgb(255, 0, 0));
        assert_eq!(loaded.palette.color_ac, Palette::default().color_ac);
        assert_eq!(loaded.palette.icon_dir, "\u{f07b}");
    }

    #[test]
    fn palette_keys_round_trip_through_get_and_set() {
        let temp = TempDir::new().unwrap();
        let mut config = JtConfig::default();
        assert_eq!(config.get("color_ac").as_deref(), Some("#5fafff"));
        config.set("color_dir", "#00FF80").unwrap();
        config.set("icon_dir", " D ").unwrap();
        config.save(temp.path()).unwrap();

        let loaded = JtConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.get("color_dir").as_deref(), Some("#00ff80"));
        assert_eq!(loaded.palette.color_for(TagKind::Directory), Rgb(0, 255, 128));
        assert_eq!(loaded.palette.icon_for(TagKind::Directory), "D");
        for key in KEYS {
            assert!(loaded.get(key).is_some(), "{} has no value", key);
        }
    }

    #[test]
    fn bad_colors_are_rejected() {
        let mut config = JtConfig::default();
        assert!(matches!(
            config.set("color_ok", "green"),
            Err(JtError::Config(_))
        ));
        assert!(config.set("color_ok", "#12345").is_err());
        assert!(config.set("color_ok", "#gg0000").is_err());
        assert_eq!(config.palette.color_ok, Palette::default().color_ok);

        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r#"{"palette": {"color_id": "blue"}}"#,
        )
        .unwrap();
        assert!(matches!(
            JtConfig::load(temp.path()),
            Err(JtError::Config(_))
        ));
    }

    #[test]
    fn lone_root_survives_normalization() {
        assert_eq!(normalize_vault("/"), "/");
        assert_eq!(normalize_vault("/mnt/nas///"), "/mnt/nas");
    }
}
