//! Light and dark color palettes.
use std::fmt;

use clap::ValueEnum;
use console::Style;
use serde::{Deserialize, Serialize};

/// The active color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT_MODE,
            Theme::Dark => &DARK_MODE,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// A 24-bit color, rendered in the terminal as the closest xterm-256 entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Index into the 6x6x6 color cube of the xterm-256 palette.
    pub fn to_ansi256(self) -> u8 {
        fn level(v: u8) -> u8 {
            match v {
                0..=47 => 0,
                48..=114 => 1,
                _ => (v - 35) / 40,
            }
        }
        16 + 36 * level(self.0) + 6 * level(self.1) + level(self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Colors applied to every part of the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub bg: Rgb,
    pub fg: Rgb,
    pub button_bg: Rgb,
    pub button_fg: Rgb,
    pub entry_bg: Rgb,
    pub history_button_bg: Rgb,
    pub graph_bg: Rgb,
    pub graph_color: Rgb,
    pub button_active_bg: Rgb,
}

pub const LIGHT_MODE: Palette = Palette {
    bg: Rgb(0xff, 0xff, 0xff),
    fg: Rgb(0x33, 0x33, 0x33),
    button_bg: Rgb(0x4c, 0xaf, 0x50),
    button_fg: Rgb(0x00, 0x00, 0x00),
    entry_bg: Rgb(0xf9, 0xf9, 0xf9),
    history_button_bg: Rgb(0x21, 0x96, 0xf3),
    graph_bg: Rgb(0xff, 0xff, 0xff),
    // skyblue
    graph_color: Rgb(0x87, 0xce, 0xeb),
    button_active_bg: Rgb(0x45, 0xa0, 0x49),
};

pub const DARK_MODE: Palette = Palette {
    bg: Rgb(0x2d, 0x2d, 0x2d),
    fg: Rgb(0xff, 0xff, 0xff),
    button_bg: Rgb(0x4c, 0xaf, 0x50),
    button_fg: Rgb(0x00, 0x00, 0x00),
    entry_bg: Rgb(0x3d, 0x3d, 0x3d),
    history_button_bg: Rgb(0x21, 0x96, 0xf3),
    graph_bg: Rgb(0x2d, 0x2d, 0x2d),
    graph_color: Rgb(0x4a, 0x9e, 0xff),
    button_active_bg: Rgb(0x45, 0xa0, 0x49),
};

impl Palette {
    /// Labels and other plain text.
    pub fn text(&self) -> Style {
        Style::new()
            .color256(self.fg.to_ansi256())
            .on_color256(self.bg.to_ansi256())
    }

    pub fn title(&self) -> Style {
        self.text().bold()
    }

    /// Input fields.
    pub fn entry(&self) -> Style {
        Style::new()
            .color256(self.fg.to_ansi256())
            .on_color256(self.entry_bg.to_ansi256())
    }

    /// Save and theme actions.
    pub fn button(&self) -> Style {
        Style::new()
            .color256(self.button_fg.to_ansi256())
            .on_color256(self.button_bg.to_ansi256())
            .bold()
    }

    /// The action currently being performed.
    pub fn button_active(&self) -> Style {
        Style::new()
            .color256(self.button_fg.to_ansi256())
            .on_color256(self.button_active_bg.to_ansi256())
            .bold()
    }

    pub fn history_button(&self) -> Style {
        Style::new()
            .color256(self.button_fg.to_ansi256())
            .on_color256(self.history_button_bg.to_ansi256())
            .bold()
    }

    /// Chart background and axis text.
    pub fn graph(&self) -> Style {
        Style::new()
            .color256(self.fg.to_ansi256())
            .on_color256(self.graph_bg.to_ansi256())
    }

    pub fn bar(&self) -> Style {
        Style::new()
            .color256(self.graph_color.to_ansi256())
            .on_color256(self.graph_bg.to_ansi256())
    }

    /// Dashed grid lines.
    pub fn grid(&self) -> Style {
        self.graph().dim()
    }
}
