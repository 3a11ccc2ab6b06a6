//! TOML desktop configuration.

use std::{
    fs, io,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::{appearance::Appearance, model::ScreenLayout, timers::ScreenSaverKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Generic TOML-backed config loader.
///
/// Handles only filesystem access and deserialization; semantic checks belong to the caller.
#[derive(Clone, Debug)]
pub struct ConfigLoader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> ConfigLoader<T>
where
    T: DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Load and deserialize the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] for missing or unreadable files and [`ConfigError::Parse`]
    /// for invalid TOML.
    pub fn load(&self) -> Result<T, ConfigError> {
        let body = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        toml::from_str(&body).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenSection {
    pub width: i32,
    pub height: i32,
    pub taskbar_height: i32,
}

impl Default for ScreenSection {
    fn default() -> Self {
        let layout = ScreenLayout::default();
        Self {
            width: layout.width,
            height: layout.height,
            taskbar_height: layout.taskbar_height,
        }
    }
}

impl From<ScreenSection> for ScreenLayout {
    fn from(section: ScreenSection) -> Self {
        Self {
            width: section.width,
            height: section.height,
            taskbar_height: section.taskbar_height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenSaverSection {
    pub kind: ScreenSaverKind,
    pub timeout_minutes: u32,
}

impl Default for ScreenSaverSection {
    fn default() -> Self {
        Self {
            kind: ScreenSaverKind::default(),
            timeout_minutes: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSection {
    pub interval_ms: u64,
}

impl Default for ClockSection {
    fn default() -> Self {
        Self { interval_ms: 1000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Directory holding the preferences file. Absent means state lives in memory only.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub screen: ScreenSection,
    pub screensaver: ScreenSaverSection,
    pub clock: ClockSection,
    pub storage: StorageSection,
    pub appearance: Appearance,
}

impl DesktopConfig {
    /// Loads `path`, falling back to defaults only when the file does not exist.
    ///
    /// # Errors
    ///
    /// Unreadable files and invalid TOML are still reported.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match ConfigLoader::<Self>::new(path).load() {
            Ok(config) => Ok(config),
            Err(err) if err.is_not_found() => Ok(Self::default()),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::appearance::WallpaperStyle;

    fn unique_test_root() -> PathBuf {
        std::env::temp_dir().join(format!(
            "desktop-config-test-{}-{}",
            std::process::id(),
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ))
    }

    #[test]
    fn partial_config_fills_remaining_defaults() {
        let root = unique_test_root();
        fs::create_dir_all(&root).expect("create temp root");
        let path = root.join("desktop.toml");
        fs::write(
            &path,
            "[screen]\nwidth = 800\n\n[screensaver]\nkind = \"matrix\"\n\n[storage]\ndir = \"/tmp/retro\"\n",
        )
        .expect("write config");

        let config = ConfigLoader::<DesktopConfig>::new(&path)
            .load()
            .expect("load config");
        assert_eq!(
            config,
            DesktopConfig {
                screen: ScreenSection {
                    width: 800,
                    height: 768,
                    taskbar_height: 30,
                },
                screensaver: ScreenSaverSection {
                    kind: ScreenSaverKind::Matrix,
                    timeout_minutes: 1,
                },
                clock: ClockSection { interval_ms: 1000 },
                storage: StorageSection {
                    dir: Some(PathBuf::from("/tmp/retro")),
                },
                appearance: Appearance::default(),
            }
        );

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let root = unique_test_root();
        let config =
            DesktopConfig::load_or_default(&root.join("absent.toml")).expect("default config");
        assert_eq!(config, DesktopConfig::default());
        assert_eq!(ScreenLayout::from(config.screen), ScreenLayout::default());
    }

    #[test]
    fn invalid_toml_is_reported_with_path() {
        let root = unique_test_root();
        fs::create_dir_all(&root).expect("create temp root");
        let path = root.join("broken.toml");
        fs::write(&path, "[screen\nwidth = ").expect("write broken config");

        let err = DesktopConfig::load_or_default(&path).expect_err("parse error");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn appearance_section_overrides_colors_and_wallpaper() {
        let root = unique_test_root();
        fs::create_dir_all(&root).expect("create temp root");
        let path = root.join("desktop.toml");
        fs::write(
            &path,
            "[appearance]\nwallpaper_image = \"bliss.png\"\nwallpaper_style = \"tile\"\nheader_color = \"#800080\"\n",
        )
        .expect("write config");

        let config = ConfigLoader::<DesktopConfig>::new(&path)
            .load()
            .expect("load config");
        assert_eq!(
            config.appearance,
            Appearance {
                wallpaper_image: Some("bliss.png".to_string()),
                wallpaper_style: WallpaperStyle::Tile,
                background_color: "#008080".to_string(),
                header_color: "#800080".to_string(),
            }
        );

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn unknown_screensaver_kind_is_a_parse_error() {
        let root = unique_test_root();
        fs::create_dir_all(&root).expect("create temp root");
        let path = root.join("desktop.toml");
        fs::write(&path, "[screensaver]\nkind = \"flying_toasters\"\n").expect("write config");

        assert!(matches!(
            ConfigLoader::<DesktopConfig>::new(&path).load(),
            Err(ConfigError::Parse { .. })
        ));

        let _ = fs::remove_dir_all(root);
    }
}
