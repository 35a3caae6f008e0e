use std::collections::HashMap;

use bracket_terminal::prelude::{RGB, WHITE};
use serde::Deserialize;

/// Per-alignment color table, embedded so the binary needs no asset files.
/// Field names mirror the CSS-variable slots the palette drives.
const THEME_TABLE: &str = r##"{
  "lawfulGood": {
    "primary": "#c9a227",
    "secondary": "#7a6a32",
    "accent": "#f2d06b",
    "display": "#fdf6e3",
    "displayContent": "#3b2f0b",
    "buttons": "#e8dcb8",
    "buttonsContent": "#3b2f0b"
  },
  "neutralGood": {
    "primary": "#4f9d69",
    "secondary": "#35704a",
    "accent": "#8fd19e",
    "display": "#eef7ef",
    "displayContent": "#16331f",
    "buttons": "#cde8d2",
    "buttonsContent": "#16331f"
  },
  "chaoticGood": {
    "primary": "#3e8ed0",
    "secondary": "#2b5f8a",
    "accent": "#f2a65a",
    "display": "#eaf4fd",
    "displayContent": "#10283c",
    "buttons": "#bcd9f2",
    "buttonsContent": "#10283c"
  },
  "lawfulNeutral": {
    "primary": "#8c9199",
    "secondary": "#5c6066",
    "accent": "#c2c7cf",
    "display": "#f2f3f5",
    "displayContent": "#26282b",
    "buttons": "#d7dadf",
    "buttonsContent": "#26282b"
  },
  "trueNeutral": {
    "primary": "#a89f91",
    "secondary": "#6f685d",
    "accent": "#d4c9b5",
    "display": "#f5f1e8",
    "displayContent": "#2e2a23",
    "buttons": "#e0d8c8",
    "buttonsContent": "#2e2a23"
  },
  "chaoticNeutral": {
    "primary": "#9b6fd0",
    "secondary": "#684a8e",
    "accent": "#e0b3ff",
    "display": "#f4ecfb",
    "displayContent": "#2a1440",
    "buttons": "#d9c4ef",
    "buttonsContent": "#2a1440"
  },
  "lawfulEvil": {
    "primary": "#8a1c1c",
    "secondary": "#571111",
    "accent": "#d4af37",
    "display": "#1d1313",
    "displayContent": "#e8d9b0",
    "buttons": "#3a2323",
    "buttonsContent": "#e8d9b0"
  },
  "neutralEvil": {
    "primary": "#4a4a55",
    "secondary": "#2d2d35",
    "accent": "#9e4a4a",
    "display": "#17171c",
    "displayContent": "#c9c9d4",
    "buttons": "#2f2f38",
    "buttonsContent": "#c9c9d4"
  },
  "chaoticEvil": {
    "primary": "#b3122e",
    "secondary": "#5e0a18",
    "accent": "#ff5c77",
    "display": "#140508",
    "displayContent": "#ffb3c0",
    "buttons": "#33101a",
    "buttonsContent": "#ffb3c0"
  }
}"##;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPalette {
    primary: String,
    secondary: String,
    accent: String,
    display: String,
    display_content: String,
    buttons: String,
    buttons_content: String,
}

#[derive(Clone, Debug)]
pub struct Palette {
    pub primary: RGB,
    pub secondary: RGB,
    pub accent: RGB,
    pub display: RGB,
    pub display_content: RGB,
    pub buttons: RGB,
    pub buttons_content: RGB,
}

impl Default for Palette {
    fn default() -> Self {
        let gray = RGB::from_u8(160, 160, 160);
        Self {
            primary: gray,
            secondary: RGB::from_u8(100, 100, 100),
            accent: RGB::named(WHITE),
            display: RGB::from_u8(220, 220, 220),
            display_content: RGB::from_u8(30, 30, 30),
            buttons: gray,
            buttons_content: RGB::from_u8(30, 30, 30),
        }
    }
}

impl From<&RawPalette> for Palette {
    fn from(raw: &RawPalette) -> Self {
        Self {
            primary: rgb_from_hex(&raw.primary),
            secondary: rgb_from_hex(&raw.secondary),
            accent: rgb_from_hex(&raw.accent),
            display: rgb_from_hex(&raw.display),
            display_content: rgb_from_hex(&raw.display_content),
            buttons: rgb_from_hex(&raw.buttons),
            buttons_content: rgb_from_hex(&raw.buttons_content),
        }
    }
}

pub struct ThemeBook {
    palettes: HashMap<String, Palette>,
    fallback: Palette,
}

impl ThemeBook {
    pub fn load() -> Self {
        let raw: HashMap<String, RawPalette> =
            serde_json::from_str(THEME_TABLE).unwrap_or_default();
        let palettes = raw
            .iter()
            .map(|(key, palette)| (key.clone(), Palette::from(palette)))
            .collect();
        Self {
            palettes,
            fallback: Palette::default(),
        }
    }

    pub fn palette(&self, key: &str) -> &Palette {
        self.palettes.get(key).unwrap_or(&self.fallback)
    }
}

pub fn rgb_from_hex(hex: &str) -> RGB {
    let raw = hex.strip_prefix('#').unwrap_or(hex);
    if raw.len() != 6 || !raw.is_ascii() {
        return RGB::named(WHITE);
    }
    let channel =
        |range| u8::from_str_radix(&raw[range], 16).unwrap_or(255);
    RGB::from_u8(channel(0..2), channel(2..4), channel(4..6))
}
