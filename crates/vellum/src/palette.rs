//! Theme palette: color roles and typography variables.
//!
//! A palette is loaded once per process. `VELLUM_PALETTE` may point at a
//! JSON file overriding any subset of the defaults; a missing or broken
//! file logs and falls back, it never fails the host.

use std::fs;
use std::rc::Rc;

use serde::Deserialize;

use crate::color::Color;

#[derive(Debug, Clone)]
pub struct PaletteColors {
    pub background: Color,
    pub text: Color,
    pub base: Color,
    pub alternate_base: Color,
    pub bright_text: Color,
    pub accent: Color,
    pub accent_secondary: Color,
}

#[derive(Debug, Clone)]
pub struct PaletteVars {
    pub h1_size: f32,
    pub h2_size: f32,
    pub h3_size: f32,
    pub font_size: f32,
    pub small_font_size: f32,
    pub icon_theme: String,
    pub big_rounding: i32,
    pub small_rounding: i32,
    pub font_family: String,
    pub font_family_monospace: String,
}

#[derive(Debug, Clone)]
pub struct Palette {
    pub colors: PaletteColors,
    pub vars: PaletteVars,
}

thread_local! {
    static CURRENT: Rc<Palette> = Rc::new(Palette::load());
}

impl Palette {
    /// The process palette: configured or default. Cached per thread.
    pub fn current() -> Rc<Palette> {
        CURRENT.with(Rc::clone)
    }

    /// Built-in dark defaults.
    pub fn empty() -> Self {
        Palette {
            colors: PaletteColors {
                background: Color::from_hex(0x1e1e28ff),
                text: Color::from_hex(0xcdd6f4ff),
                base: Color::from_hex(0x313244ff),
                alternate_base: Color::from_hex(0x45475aff),
                bright_text: Color::from_hex(0xffffffff),
                accent: Color::from_hex(0x89b4faff),
                accent_secondary: Color::from_hex(0xf5c2e7ff),
            },
            vars: PaletteVars {
                h1_size: 24.0,
                h2_size: 18.0,
                h3_size: 14.0,
                font_size: 11.0,
                small_font_size: 9.0,
                icon_theme: "hicolor".into(),
                big_rounding: 10,
                small_rounding: 5,
                font_family: "Sans".into(),
                font_family_monospace: "Monospace".into(),
            },
        }
    }

    /// Defaults overlaid with the `VELLUM_PALETTE` config file, if any.
    pub fn load() -> Self {
        let mut palette = Palette::empty();
        let Ok(path) = std::env::var("VELLUM_PALETTE") else {
            return palette;
        };
        match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<PaletteConfig>(&text) {
                Ok(config) => palette.apply(config),
                Err(err) => {
                    tracing::warn!(%path, "ignoring malformed palette config: {err}");
                }
            },
            Err(err) => {
                tracing::warn!(%path, "cannot read palette config: {err}");
            }
        }
        palette
    }

    fn apply(&mut self, config: PaletteConfig) {
        let colors = &mut self.colors;
        let apply_color = |slot: &mut Color, value: Option<String>| {
            if let Some(hex) = value {
                match parse_hex(&hex) {
                    Some(c) => *slot = c,
                    None => tracing::warn!(%hex, "ignoring malformed palette color"),
                }
            }
        };
        apply_color(&mut colors.background, config.colors.background);
        apply_color(&mut colors.text, config.colors.text);
        apply_color(&mut colors.base, config.colors.base);
        apply_color(&mut colors.alternate_base, config.colors.alternate_base);
        apply_color(&mut colors.bright_text, config.colors.bright_text);
        apply_color(&mut colors.accent, config.colors.accent);
        apply_color(&mut colors.accent_secondary, config.colors.accent_secondary);

        let vars = &mut self.vars;
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if let Some(v) = config.vars.$field { vars.$field = v; })*
            };
        }
        overlay!(
            h1_size,
            h2_size,
            h3_size,
            font_size,
            small_font_size,
            icon_theme,
            big_rounding,
            small_rounding,
            font_family,
            font_family_monospace
        );
    }
}

/// `#RRGGBB` or `#RRGGBBAA`, leading `#` optional.
fn parse_hex(s: &str) -> Option<Color> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    match digits.len() {
        6 => u32::from_str_radix(digits, 16)
            .ok()
            .map(|v| Color::from_hex((v << 8) | 0xff)),
        8 => u32::from_str_radix(digits, 16).ok().map(Color::from_hex),
        _ => None,
    }
}

#[derive(Debug, Default, Deserialize)]
struct PaletteConfig {
    #[serde(default)]
    colors: ColorsConfig,
    #[serde(default)]
    vars: VarsConfig,
}

#[derive(Debug, Default, Deserialize)]
struct ColorsConfig {
    background: Option<String>,
    text: Option<String>,
    base: Option<String>,
    alternate_base: Option<String>,
    bright_text: Option<String>,
    accent: Option<String>,
    accent_secondary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct VarsConfig {
    h1_size: Option<f32>,
    h2_size: Option<f32>,
    h3_size: Option<f32>,
    font_size: Option<f32>,
    small_font_size: Option<f32>,
    icon_theme: Option<String>,
    big_rounding: Option<i32>,
    small_rounding: Option<i32>,
    font_family: Option<String>,
    font_family_monospace: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex("#ff0000"), Some(Color::from_hex(0xff0000ff)));
        assert_eq!(parse_hex("00ff0080"), Some(Color::from_hex(0x00ff0080)));
        assert_eq!(parse_hex("zzz"), None);
    }

    #[test]
    fn config_overlay() {
        let mut palette = Palette::empty();
        let config: PaletteConfig = serde_json::from_str(
            r##"{"colors": {"accent": "#102030"}, "vars": {"font_size": 13.0, "icon_theme": "breeze"}}"##,
        )
        .unwrap();
        palette.apply(config);
        assert_eq!(palette.colors.accent, Color::from_hex(0x102030ff));
        assert_eq!(palette.vars.font_size, 13.0);
        assert_eq!(palette.vars.icon_theme, "breeze");
        // untouched slots keep defaults
        assert_eq!(palette.vars.h1_size, 24.0);
    }
}
