use ratatui::style::Color;

use crate::planner::tot::TotType;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub accent: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,
    pub today: Color,
    pub visit: Color,
    pub header: Color,
    pub muted: Color,
    pub status_bar: Color,
    pub help_section: Color,
    pub error: Color,
    pub success: Color,
    pub grab_target: Color,
    pub target_met: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            accent: Color::Cyan,
            cursor_bg: Color::Blue,
            cursor_fg: Color::White,
            today: Color::Green,
            visit: Color::Cyan,
            header: Color::Yellow,
            muted: Color::DarkGray,
            status_bar: Color::White,
            help_section: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            grab_target: Color::Magenta,
            target_met: Color::LightGreen,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            accent: Color::Rgb(251, 184, 108),
            cursor_bg: Color::Rgb(60, 56, 54),
            cursor_fg: Color::Rgb(235, 219, 178),
            today: Color::Rgb(184, 187, 38),
            visit: Color::Rgb(142, 192, 124),
            header: Color::Rgb(254, 128, 25),
            muted: Color::Rgb(146, 131, 116),
            status_bar: Color::Rgb(235, 219, 178),
            help_section: Color::Rgb(254, 128, 25),
            error: Color::Rgb(251, 73, 52),
            success: Color::Rgb(184, 187, 38),
            grab_target: Color::Rgb(211, 134, 155),
            target_met: Color::Rgb(184, 187, 38),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            accent: Color::Rgb(136, 192, 208),
            cursor_bg: Color::Rgb(59, 66, 82),
            cursor_fg: Color::Rgb(236, 239, 244),
            today: Color::Rgb(163, 190, 140),
            visit: Color::Rgb(129, 161, 193),
            header: Color::Rgb(235, 203, 139),
            muted: Color::Rgb(76, 86, 106),
            status_bar: Color::Rgb(216, 222, 233),
            help_section: Color::Rgb(235, 203, 139),
            error: Color::Rgb(191, 97, 106),
            success: Color::Rgb(163, 190, 140),
            grab_target: Color::Rgb(180, 142, 173),
            target_met: Color::Rgb(163, 190, 140),
        }
    }

    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            accent: Color::Rgb(139, 233, 253),
            cursor_bg: Color::Rgb(68, 71, 90),
            cursor_fg: Color::Rgb(248, 248, 242),
            today: Color::Rgb(80, 250, 123),
            visit: Color::Rgb(255, 121, 198),
            header: Color::Rgb(241, 250, 140),
            muted: Color::Rgb(98, 114, 164),
            status_bar: Color::Rgb(248, 248, 242),
            help_section: Color::Rgb(241, 250, 140),
            error: Color::Rgb(255, 85, 85),
            success: Color::Rgb(80, 250, 123),
            grab_target: Color::Rgb(189, 147, 249),
            target_met: Color::Rgb(80, 250, 123),
        }
    }

    /// Looks a theme up by name, case-insensitively.
    pub fn find(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_theme()),
            "gruvbox" => Some(Self::gruvbox()),
            "nord" => Some(Self::nord()),
            "dracula" => Some(Self::dracula()),
            _ => None,
        }
    }

    /// Like [`Theme::find`], falling back to the default theme.
    pub fn get_by_name(name: &str) -> Self {
        Self::find(name).unwrap_or_default()
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord", "dracula"]
    }

    pub fn tot_color(&self, kind: TotType) -> Color {
        let (r, g, b) = kind.attributes().color;
        Color::Rgb(r, g, b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_theme_resolves() {
        for name in Theme::available_themes() {
            assert_eq!(Theme::find(name).map(|t| t.name), Some(name.to_string()));
        }
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        assert_eq!(Theme::find("neon"), None);
        assert_eq!(Theme::get_by_name("neon"), Theme::default_theme());
    }

    #[test]
    fn theme_lookup_ignores_case() {
        assert_eq!(Theme::get_by_name("NORD").name, "nord");
    }

    #[test]
    fn tot_colors_come_from_the_type_table() {
        let (r, g, b) = TotType::SickLeave.attributes().color;
        assert_eq!(Theme::default().tot_color(TotType::SickLeave), Color::Rgb(r, g, b));
    }
}
