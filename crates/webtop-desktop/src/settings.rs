//! Persisted appearance settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use webtop_types::error::{Result, WebtopError};

use crate::storage::{KeyValueStore, SETTINGS_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// The settings bundle stored under [`SETTINGS_KEY`].
///
/// Missing fields take their defaults when loading, so a stored bundle
/// from an older version merges over the current defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub theme: Theme,
    pub wallpaper: String,
    pub font_size: FontSize,
    pub animations: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Default,
            wallpaper: "gradient".to_string(),
            font_size: FontSize::Medium,
            animations: true,
        }
    }
}

impl Settings {
    /// Load from `store`. Absent or unreadable bundles give the defaults.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(raw) = store.get(SETTINGS_KEY) else {
            return Self::default();
        };
        let fields = match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::Object(fields)) => fields,
            Ok(other) => {
                log::warn!("settings: ignoring non-object bundle: {other}");
                return Self::default();
            },
            Err(e) => {
                log::warn!("settings: ignoring unreadable bundle: {e}");
                return Self::default();
            },
        };

        // Field by field, so one bad value does not discard the rest.
        let mut settings = Self::default();
        for (field, value) in &fields {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => other.to_string(),
            };
            if let Err(e) = settings.set(field, &text) {
                log::warn!("settings: skipping stored {field}: {e}");
            }
        }
        settings
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(self)?;
        store.set(SETTINGS_KEY, &json)
    }

    /// Update one field from text, e.g. `set("theme", "dark")`.
    pub fn set(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "theme" => self.theme = value.parse()?,
            "fontSize" | "font-size" | "fontsize" => self.font_size = value.parse()?,
            "wallpaper" => {
                if value.is_empty() {
                    return Err(WebtopError::Config("wallpaper must not be empty".into()));
                }
                self.wallpaper = value.to_string();
            },
            "animations" => {
                self.animations = match value {
                    "on" | "true" | "yes" => true,
                    "off" | "false" | "no" => false,
                    _ => {
                        return Err(WebtopError::Config(format!(
                            "animations: expected on/off, got '{value}'"
                        )));
                    },
                };
            },
            _ => return Err(WebtopError::Config(format!("unknown setting '{field}'"))),
        }
        Ok(())
    }

    /// `name: value` lines for display.
    pub fn describe(&self) -> Vec<String> {
        vec![
            format!("theme: {}", self.theme),
            format!("wallpaper: {}", self.wallpaper),
            format!("fontSize: {}", self.font_size),
            format!("animations: {}", if self.animations { "on" } else { "off" }),
        ]
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Default => "default",
            Theme::Dark => "dark",
            Theme::Light => "light",
        })
    }
}

impl FromStr for Theme {
    type Err = WebtopError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(Theme::Default),
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(WebtopError::Config(format!(
                "theme: expected default, dark or light, got '{s}'"
            ))),
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        })
    }
}

impl FromStr for FontSize {
    type Err = WebtopError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "small" => Ok(FontSize::Small),
            "medium" => Ok(FontSize::Medium),
            "large" => Ok(FontSize::Large),
            _ => Err(WebtopError::Config(format!(
                "fontSize: expected small, medium or large, got '{s}'"
            ))),
        }
    }
}
