//! Accent theming: hex parsing, the current accent, and swatch selection.
//!
//! The particle loop never parses colours itself.  It reads the [`ThemeColor`]
//! resource each frame, so a swatch pick recolours every particle on the next
//! frame with no per-particle transition.

use crate::config::FieldConfig;
use crate::constants::DEFAULT_ACCENT_HEX;
use bevy::prelude::*;

/// Fallback triple for unparseable colours (the default indigo accent).
pub const DEFAULT_ACCENT_RGB: Rgb = Rgb::new(99, 102, 241);

/// Accent swatches offered by the picker: (label, primary, secondary).
pub const SWATCHES: &[(&str, &str, &str)] = &[
    ("Indigo", "#6366f1", "#8b5cf6"),
    ("Sky", "#0ea5e9", "#22d3ee"),
    ("Emerald", "#10b981", "#34d399"),
    ("Amber", "#f59e0b", "#fbbf24"),
    ("Rose", "#f43f5e", "#fb7185"),
    ("Violet", "#8b5cf6", "#a78bfa"),
    ("Teal", "#14b8a6", "#2dd4bf"),
    ("Orange", "#f97316", "#fb923c"),
];

/// An sRGB colour triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `"r,g,b"`, the form the site's style variable used.
    pub fn css_triplet(&self) -> String {
        format!("{},{},{}", self.r, self.g, self.b)
    }

    pub fn with_alpha(&self, alpha: f32) -> Color {
        Color::srgba(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            alpha.clamp(0.0, 1.0),
        )
    }

    /// This colour at `alpha` composited over opaque black.
    pub fn over_black(&self, alpha: f32) -> Color {
        let a = alpha.clamp(0.0, 1.0);
        Color::srgb(
            self.r as f32 / 255.0 * a,
            self.g as f32 / 255.0 * a,
            self.b as f32 / 255.0 * a,
        )
    }
}

impl Default for Rgb {
    fn default() -> Self {
        DEFAULT_ACCENT_RGB
    }
}

/// Parse `#rgb`, `rgb`, `#rrggbb` or `rrggbb`.
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let h = hex.trim();
    let h = h.strip_prefix('#').unwrap_or(h).trim();
    if !h.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match h.len() {
        3 => {
            let mut digits = h.chars().map(|c| c.to_digit(16).unwrap_or(0) as u8);
            let mut next = || digits.next().map(|d| d * 17).unwrap_or(0);
            Some(Rgb::new(next(), next(), next()))
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(&h[i..i + 2], 16).ok();
            Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

/// Like [`parse_hex`], falling back to [`DEFAULT_ACCENT_RGB`].
pub fn hex_to_rgb(hex: &str) -> Rgb {
    parse_hex(hex).unwrap_or(DEFAULT_ACCENT_RGB)
}

/// A chosen accent pair, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accent {
    pub primary: String,
    pub secondary: String,
}

impl Accent {
    /// Empty primary falls back to the default accent; empty secondary
    /// mirrors the primary.
    pub fn new(primary: &str, secondary: &str) -> Self {
        let primary = match primary.trim() {
            "" => DEFAULT_ACCENT_HEX.to_string(),
            p => p.to_string(),
        };
        let secondary = match secondary.trim() {
            "" => primary.clone(),
            s => s.to_string(),
        };
        Self { primary, secondary }
    }

    pub fn rgb(&self) -> Rgb {
        hex_to_rgb(&self.primary)
    }
}

impl Default for Accent {
    fn default() -> Self {
        Self::new(DEFAULT_ACCENT_HEX, "")
    }
}

/// Current accent and its resolved RGB triple.
///
/// Written only by [`apply_accent_system`] and [`init_theme_from_config`];
/// everything else reads it.
#[derive(Resource, Debug, Clone, Default)]
pub struct ThemeColor {
    accent: Accent,
    rgb: Rgb,
}

impl ThemeColor {
    pub fn new(accent: Accent) -> Self {
        let rgb = accent.rgb();
        Self { accent, rgb }
    }

    pub fn accent(&self) -> &Accent {
        &self.accent
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }
}

/// The user picked an accent swatch.
#[derive(Message, Debug, Clone)]
pub struct AccentSelected {
    pub accent: Accent,
}

impl AccentSelected {
    pub fn swatch(index: usize) -> Option<Self> {
        SWATCHES.get(index).map(|(_, a1, a2)| Self {
            accent: Accent::new(a1, a2),
        })
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct ThemePlugin;

impl Plugin for ThemePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ThemeColor>()
            .add_message::<AccentSelected>()
            .add_systems(Startup, init_theme_from_config)
            .add_systems(
                Update,
                (
                    accent_hotkey_system.run_if(resource_exists::<ButtonInput<KeyCode>>),
                    apply_accent_system,
                )
                    .chain(),
            );
    }
}

/// Startup system: seed [`ThemeColor`] from the configured accent.
pub fn init_theme_from_config(config: Res<FieldConfig>, mut theme: ResMut<ThemeColor>) {
    let accent = Accent::new(&config.accent, &config.accent_secondary);
    if parse_hex(&accent.primary).is_none() {
        warn!(
            "Accent '{}' is not a hex colour; drawing with {}",
            accent.primary,
            DEFAULT_ACCENT_RGB.css_triplet()
        );
    }
    *theme = ThemeColor::new(accent);
}

/// Digit keys 1–8 pick the matching swatch.
pub fn accent_hotkey_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut writer: MessageWriter<AccentSelected>,
) {
    const DIGITS: [KeyCode; 8] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
    ];
    for (index, key) in DIGITS.iter().enumerate() {
        if keys.just_pressed(*key) {
            if let Some(selected) = AccentSelected::swatch(index) {
                writer.write(selected);
            }
        }
    }
}

pub fn apply_accent_system(
    mut selections: MessageReader<AccentSelected>,
    mut theme: ResMut<ThemeColor>,
) {
    // Several picks in one frame: the last one wins.
    if let Some(selected) = selections.read().last() {
        *theme = ThemeColor::new(selected.accent.clone());
        info!(
            "Accent set to {} (rgb {})",
            theme.accent().primary,
            theme.rgb().css_triplet()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(parse_hex("#6366f1"), Some(Rgb::new(99, 102, 241)));
        assert_eq!(parse_hex("0ea5e9"), Some(Rgb::new(14, 165, 233)));
        assert_eq!(parse_hex("#fa0"), Some(Rgb::new(255, 170, 0)));
        assert_eq!(parse_hex("  #FFF "), Some(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn malformed_hex_falls_back() {
        assert_eq!(hex_to_rgb(""), DEFAULT_ACCENT_RGB);
        assert_eq!(hex_to_rgb("#12345"), DEFAULT_ACCENT_RGB);
        assert_eq!(hex_to_rgb("#ggghhh"), DEFAULT_ACCENT_RGB);
        assert_eq!(hex_to_rgb("rebeccapurple"), DEFAULT_ACCENT_RGB);
    }

    #[test]
    fn css_triplet_format() {
        assert_eq!(DEFAULT_ACCENT_RGB.css_triplet(), "99,102,241");
    }

    #[test]
    fn accent_defaults() {
        let accent = Accent::new("", "");
        assert_eq!(accent.primary, DEFAULT_ACCENT_HEX);
        assert_eq!(accent.secondary, DEFAULT_ACCENT_HEX);

        let accent = Accent::new("#10b981", "");
        assert_eq!(accent.secondary, "#10b981");
    }

    #[test]
    fn every_swatch_parses() {
        for (label, a1, a2) in SWATCHES {
            assert!(parse_hex(a1).is_some(), "{label} primary");
            assert!(parse_hex(a2).is_some(), "{label} secondary");
        }
    }

    #[test]
    fn last_selection_in_a_frame_wins() {
        let mut world = World::new();
        world.init_resource::<ThemeColor>();
        world.init_resource::<Messages<AccentSelected>>();
        for index in [1, 4] {
            let msg = AccentSelected::swatch(index).expect("swatch exists");
            world.write_message(msg);
        }

        let mut schedule = Schedule::default();
        schedule.add_systems(apply_accent_system);
        schedule.run(&mut world);

        let theme = world.resource::<ThemeColor>();
        assert_eq!(theme.accent().primary, SWATCHES[4].1);
        assert_eq!(theme.rgb(), hex_to_rgb(SWATCHES[4].1));
    }
}
