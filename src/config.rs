// Desktop configuration: window defaults, snap geometry, icon grid, timings.
// Every field has a default so an empty (or missing) TOML file is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DesktopConfig {
    pub windows: WindowConfig,
    pub snap: SnapConfig,
    pub taskbar: TaskbarBand,
    pub icons: IconGridConfig,
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Size forced by `center`
    pub default_width: f64,
    pub default_height: f64,
    pub min_width: f64,
    pub min_height: f64,
    /// Diagonal offset between successive opens
    pub cascade_step: f64,
    /// Cascade offset wraps back to zero at this value
    pub cascade_wrap: f64,
    /// First z-order handed out is `z_base + 1`
    pub z_base: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            default_width: 800.0,
            default_height: 600.0,
            min_width: 300.0,
            min_height: 200.0,
            cascade_step: 30.0,
            cascade_wrap: 150.0,
            z_base: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Distance from a viewport edge that arms an edge zone
    pub edge_band: f64,
    /// Distance along an edge from a corner that arms a corner zone
    pub corner_band: f64,
    /// Gap kept around and between snapped windows
    pub margin: f64,
    /// Pointer travel needed before a maximized window tears off
    pub drag_threshold: f64,
    /// Vertical distance between the pointer and a torn-off window's top edge
    pub grab_offset: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            edge_band: 20.0,
            corner_band: 100.0,
            margin: 10.0,
            drag_threshold: 5.0,
            grab_offset: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskbarBand {
    /// Height reserved at the bottom of the viewport
    pub height: f64,
}

impl Default for TaskbarBand {
    fn default() -> Self {
        Self { height: 70.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconGridConfig {
    pub cell_width: f64,
    pub cell_height: f64,
    pub margin_x: f64,
    pub margin_y: f64,
}

impl Default for IconGridConfig {
    fn default() -> Self {
        Self {
            cell_width: 100.0,
            cell_height: 110.0,
            margin_x: 20.0,
            margin_y: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub close_animation_ms: u64,
    pub auto_launch_delay_ms: u64,
    pub auto_maximize_delay_ms: u64,
    /// App opened (then maximized) shortly after boot
    pub auto_launch: Option<String>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            close_animation_ms: 200,
            auto_launch_delay_ms: 1000,
            auto_maximize_delay_ms: 300,
            auto_launch: None,
        }
    }
}

impl DesktopConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;

        tracing::info!(
            event = "desk.config.loaded",
            path = %path.display(),
            auto_launch = ?config.timing.auto_launch
        );

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DesktopConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.windows;
        if w.min_width <= 0.0 || w.min_height <= 0.0 {
            return Err(invalid("windows.min_width and windows.min_height must be positive"));
        }
        if w.min_width > w.default_width || w.min_height > w.default_height {
            return Err(invalid("window minimum size must not exceed the default size"));
        }
        if w.cascade_wrap <= 0.0 {
            return Err(invalid("windows.cascade_wrap must be positive"));
        }
        if self.icons.cell_width <= 0.0 || self.icons.cell_height <= 0.0 {
            return Err(invalid("icons.cell_width and icons.cell_height must be positive"));
        }
        if self.snap.edge_band < 0.0 || self.snap.corner_band < self.snap.edge_band {
            return Err(invalid("snap.corner_band must be at least snap.edge_band"));
        }
        if self.taskbar.height < 0.0 || self.snap.margin < 0.0 {
            return Err(invalid("taskbar.height and snap.margin must not be negative"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = DesktopConfig::from_toml_str("").unwrap();
        assert_eq!(config, DesktopConfig::default());
        assert_eq!(config.windows.min_width, 300.0);
        assert_eq!(config.taskbar.height, 70.0);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = DesktopConfig::from_toml_str(
            r#"
            [snap]
            margin = 12.0

            [timing]
            auto_launch = "about"
            "#,
        )
        .unwrap();

        assert_eq!(config.snap.margin, 12.0);
        assert_eq!(config.snap.edge_band, 20.0);
        assert_eq!(config.timing.auto_launch.as_deref(), Some("about"));
        assert_eq!(config.timing.close_animation_ms, 200);
    }

    #[test]
    fn test_invalid_min_size_rejected() {
        let err = DesktopConfig::from_toml_str(
            r#"
            [windows]
            min_width = 900.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = DesktopConfig::from_toml_str("[windows\nmin_width = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[icons]\ncell_width = 120.0").unwrap();

        let config = DesktopConfig::load(file.path()).unwrap();
        assert_eq!(config.icons.cell_width, 120.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DesktopConfig::load(&dir.path().join("desk.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }
}
