//! Desktop wallpaper and window color theme.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKGROUND_COLOR: &str = "#008080";
pub const DEFAULT_HEADER_COLOR: &str = "#000080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
/// How a wallpaper image is laid out over the desktop background color.
pub enum WallpaperStyle {
    /// Repeat at intrinsic size.
    Tile,
    /// Render once at intrinsic size in the middle of the desktop.
    #[default]
    Center,
    /// Scale to the desktop size exactly.
    Stretch,
}

impl WallpaperStyle {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "tile" => Some(Self::Tile),
            "center" => Some(Self::Center),
            "stretch" => Some(Self::Stretch),
            _ => None,
        }
    }
}

/// Named desktop/title-bar color pair offered by the display properties dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorScheme {
    pub name: &'static str,
    pub desktop_color: &'static str,
    pub header_color: &'static str,
}

const COLOR_SCHEMES: [ColorScheme; 5] = [
    ColorScheme {
        name: "Windows Standard",
        desktop_color: DEFAULT_BACKGROUND_COLOR,
        header_color: DEFAULT_HEADER_COLOR,
    },
    ColorScheme {
        name: "Rainy Day",
        desktop_color: "#4A5D6E",
        header_color: "#4A5D6E",
    },
    ColorScheme {
        name: "Eggplant",
        desktop_color: "#400040",
        header_color: "#800080",
    },
    ColorScheme {
        name: "High Contrast Black",
        desktop_color: "#000000",
        header_color: "#800080",
    },
    ColorScheme {
        name: "Rose",
        desktop_color: "#DDA0DD",
        header_color: "#8B4969",
    },
];

pub fn color_schemes() -> &'static [ColorScheme] {
    &COLOR_SCHEMES
}

/// Case-insensitive lookup by scheme name.
pub fn color_scheme(name: &str) -> Option<ColorScheme> {
    COLOR_SCHEMES
        .iter()
        .find(|scheme| scheme.name.eq_ignore_ascii_case(name.trim()))
        .copied()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    /// Wallpaper image location; `None` shows the plain background color.
    pub wallpaper_image: Option<String>,
    pub wallpaper_style: WallpaperStyle,
    pub background_color: String,
    /// Window title-bar color.
    pub header_color: String,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            wallpaper_image: None,
            wallpaper_style: WallpaperStyle::default(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            header_color: DEFAULT_HEADER_COLOR.to_string(),
        }
    }
}

impl Appearance {
    pub fn set_wallpaper(&mut self, image: Option<String>, style: WallpaperStyle, color: String) {
        self.wallpaper_image = image;
        self.wallpaper_style = style;
        self.background_color = color;
    }

    pub fn set_theme(&mut self, header_color: String, desktop_color: String) {
        self.header_color = header_color;
        self.background_color = desktop_color;
    }

    /// Applies both scheme colors and removes the wallpaper image so the color shows.
    pub fn apply_scheme(&mut self, scheme: ColorScheme) {
        self.wallpaper_image = None;
        self.set_theme(
            scheme.header_color.to_string(),
            scheme.desktop_color.to_string(),
        );
    }
}

/// Accepts `#rgb` and `#rrggbb` hex colors.
pub fn is_hex_color(raw: &str) -> bool {
    raw.strip_prefix('#').is_some_and(|digits| {
        matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_teal_desktop_and_navy_title_bars() {
        let appearance = Appearance::default();
        assert_eq!(appearance.background_color, "#008080");
        assert_eq!(appearance.header_color, "#000080");
        assert_eq!(appearance.wallpaper_style, WallpaperStyle::Center);
        assert_eq!(appearance.wallpaper_image, None);
    }

    #[test]
    fn wallpaper_and_theme_share_the_background_color() {
        let mut appearance = Appearance::default();
        appearance.set_wallpaper(
            Some("bliss.png".to_string()),
            WallpaperStyle::Stretch,
            "#112233".to_string(),
        );
        appearance.set_theme("#800080".to_string(), "#400040".to_string());

        assert_eq!(appearance.wallpaper_image.as_deref(), Some("bliss.png"));
        assert_eq!(appearance.wallpaper_style, WallpaperStyle::Stretch);
        assert_eq!(appearance.background_color, "#400040");
        assert_eq!(appearance.header_color, "#800080");
    }

    #[test]
    fn applying_a_scheme_drops_the_wallpaper_image() {
        let mut appearance = Appearance {
            wallpaper_image: Some("azul.jpg".to_string()),
            ..Appearance::default()
        };
        let rose = color_scheme("rose").expect("rose scheme");

        appearance.apply_scheme(rose);

        assert_eq!(appearance.wallpaper_image, None);
        assert_eq!(appearance.background_color, "#DDA0DD");
        assert_eq!(appearance.header_color, "#8B4969");
        assert_eq!(color_scheme("Solarized"), None);
    }

    #[test]
    fn hex_colors_need_a_hash_and_three_or_six_digits() {
        assert!(is_hex_color("#008080"));
        assert!(is_hex_color("#fff"));
        assert!(!is_hex_color("008080"));
        assert!(!is_hex_color("#00808"));
        assert!(!is_hex_color("#zzzzzz"));
    }
}
