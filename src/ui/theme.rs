use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub secondary: ColorSpec,
    pub accent: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const fn rgb(r: u8, g: u8, b: u8) -> ColorSpec {
    ColorSpec { r, g, b }
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::tricolour()
    }
}

impl Theme {
    /// Saffron, white and green on a dark background.
    ///
    pub fn tricolour() -> Self {
        Theme {
            name: "tricolour".to_string(),
            primary: rgb(255, 153, 51),   // Saffron
            secondary: rgb(19, 136, 8),   // Green
            accent: rgb(0, 0, 128),       // Navy
            banner: rgb(255, 153, 51),    // Saffron
            text: rgb(238, 238, 238),     // White
            text_muted: rgb(150, 150, 150),
            success: rgb(19, 136, 8),
            warning: rgb(255, 193, 7),
            error: rgb(220, 53, 69),
            border_active: rgb(255, 153, 51),
            border_normal: rgb(110, 110, 110),
            highlight_bg: rgb(0, 0, 128),
            highlight_fg: rgb(255, 255, 255),
        }
    }

    /// Rose Pine theme.
    ///
    pub fn rose_pine() -> Self {
        Theme {
            name: "rose-pine".to_string(),
            primary: rgb(196, 167, 231),  // Iris
            secondary: rgb(156, 207, 216), // Foam
            accent: rgb(235, 188, 186),   // Rose
            banner: rgb(235, 111, 146),   // Love
            text: rgb(224, 222, 244),
            text_muted: rgb(110, 106, 134),
            success: rgb(49, 116, 143),   // Pine
            warning: rgb(246, 193, 119),  // Gold
            error: rgb(235, 111, 146),
            border_active: rgb(196, 167, 231),
            border_normal: rgb(64, 61, 82),
            highlight_bg: rgb(38, 35, 58),
            highlight_fg: rgb(224, 222, 244),
        }
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        Theme {
            name: "dracula".to_string(),
            primary: rgb(189, 147, 249),  // Purple
            secondary: rgb(80, 250, 123), // Green
            accent: rgb(255, 121, 198),   // Pink
            banner: rgb(255, 121, 198),
            text: rgb(248, 248, 242),
            text_muted: rgb(98, 114, 164),
            success: rgb(80, 250, 123),
            warning: rgb(241, 250, 140),
            error: rgb(255, 85, 85),
            border_active: rgb(189, 147, 249),
            border_normal: rgb(68, 71, 90),
            highlight_bg: rgb(68, 71, 90),
            highlight_fg: rgb(248, 248, 242),
        }
    }

    /// Get a theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tricolour" => Some(Self::tricolour()),
            "rose-pine" => Some(Self::rose_pine()),
            "dracula" => Some(Self::dracula()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec![
            "tricolour".to_string(),
            "rose-pine".to_string(),
            "dracula".to_string(),
        ]
    }
}
