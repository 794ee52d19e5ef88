// Colour themes and the user-tunable theme settings

use serde::{Deserialize, Serialize};

/// A named OS colour palette
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub bg: &'static str,
    pub card_bg: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
    pub particle_color: &'static str,
}

pub const THEMES: [Theme; 4] = [
    Theme {
        id: "default",
        name: "Default",
        bg: "#1e1e1e",
        card_bg: "rgba(30, 30, 30, 0.6)",
        accent: "#3daee9",
        text: "#eee",
        particle_color: "#3daee9",
    },
    Theme {
        id: "cyberpunk",
        name: "Cyberpunk",
        bg: "#0d0221",
        card_bg: "rgba(13, 2, 33, 0.6)",
        accent: "#ff006e",
        text: "#00f5ff",
        particle_color: "#ff006e",
    },
    Theme {
        id: "terminal",
        name: "Terminal",
        bg: "#001400",
        card_bg: "rgba(0, 30, 0, 0.7)",
        accent: "#00ff00",
        text: "#00ff00",
        particle_color: "#00ff00",
    },
    Theme {
        id: "sunset",
        name: "Sunset",
        bg: "#1a1a2e",
        card_bg: "rgba(26, 26, 46, 0.6)",
        accent: "#ff6b6b",
        text: "#f0e7d8",
        particle_color: "#ff6b6b",
    },
];

/// Look up a palette by id, falling back to the default palette
pub fn theme(id: &str) -> &'static Theme {
    THEMES.iter().find(|t| t.id == id).unwrap_or(&THEMES[0])
}

/// Base font size in pixels for a font size name
pub fn font_size_px(name: &str) -> u32 {
    match name {
        "small" => 12,
        "medium" => 14,
        "large" => 16,
        "xlarge" => 18,
        _ => 14,
    }
}

/// Appearance settings stored under `themeConfig`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    pub accent_color: String,
    pub icon_theme: String,
    pub window_opacity: f64,
    pub font_size: String,
    pub retro_mode: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: "#3daee9".to_string(),
            icon_theme: "default".to_string(),
            window_opacity: 0.95,
            font_size: "medium".to_string(),
            retro_mode: false,
        }
    }
}

impl ThemeConfig {
    pub fn font_size_px(&self) -> u32 {
        font_size_px(&self.font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_theme_falls_back_to_default() {
        assert_eq!(theme("cyberpunk").accent, "#ff006e");
        assert_eq!(theme("vaporwave").id, "default");
    }

    #[test]
    fn test_font_sizes() {
        assert_eq!(font_size_px("small"), 12);
        assert_eq!(font_size_px("xlarge"), 18);
        assert_eq!(font_size_px("huge"), 14);
    }

    #[test]
    fn test_partial_theme_config_fills_defaults() {
        let cfg: ThemeConfig = serde_json::from_str(r#"{"retroMode": true}"#).unwrap();
        assert!(cfg.retro_mode);
        assert_eq!(cfg.accent_color, "#3daee9");
        assert_eq!(cfg.window_opacity, 0.95);
    }
}
