//! Toolkit configuration.
//!
//! The toolkit reads the tag names it applies to widget nodes from a
//! [`ToolkitConfig`]. Every field has a default, so a configuration file only
//! needs to name what it overrides:
//!
//! ```
//! use trellis::config::ToolkitConfig;
//!
//! let config = ToolkitConfig::from_toml_str(
//!     r#"
//!     [classes]
//!     size_grip = "app-grip"
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.classes.size_grip, "app-grip");
//! assert_eq!(config.classes.pressed, "t-mod-pressed");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use trellis_core::logging::targets;

use crate::error::{ConfigError, ConfigResult};

/// Tag names the widgets put on their nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    /// Every size grip.
    pub size_grip: String,
    /// Prefix joined with the grip area name, e.g. `t-GripArea-BottomRight`.
    pub grip_area_prefix: String,
    /// Every button.
    pub button: String,
    /// Push buttons.
    pub push_button: String,
    /// The text element of a push button.
    pub push_button_text: String,
    /// The image element of a push button.
    pub push_button_image: String,
    /// A button while the primary button is held on it.
    pub pressed: String,
    /// Small text modifier.
    pub small_text: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            size_grip: "t-SizeGrip".into(),
            grip_area_prefix: "t-GripArea-".into(),
            button: "t-Button".into(),
            push_button: "t-PushButton".into(),
            push_button_text: "t-PushButton-text".into(),
            push_button_image: "t-PushButton-image".into(),
            pressed: "t-mod-pressed".into(),
            small_text: "t-mod-small-text".into(),
        }
    }
}

/// Toolkit-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Tag names applied by widgets.
    pub classes: ClassNames,
}

impl ToolkitConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded toolkit configuration");
        Ok(config)
    }

    /// Serialize the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
