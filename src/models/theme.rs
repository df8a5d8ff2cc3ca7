use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ThemeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Default,
    Blue,
    Green,
    Purple,
    Orange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 2] = [ThemeMode::Light, ThemeMode::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 5] = [
        ColorScheme::Default,
        ColorScheme::Blue,
        ColorScheme::Green,
        ColorScheme::Purple,
        ColorScheme::Orange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Default => "default",
            ColorScheme::Blue => "blue",
            ColorScheme::Green => "green",
            ColorScheme::Purple => "purple",
            ColorScheme::Orange => "orange",
        }
    }
}

impl FontSize {
    pub const ALL: [FontSize; 4] = [
        FontSize::Small,
        FontSize::Medium,
        FontSize::Large,
        FontSize::ExtraLarge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
            FontSize::ExtraLarge => "extra-large",
        }
    }

    /// Root font size in pixels
    pub fn base_px(&self) -> u8 {
        match self {
            FontSize::Small => 14,
            FontSize::Medium => 16,
            FontSize::Large => 18,
            FontSize::ExtraLarge => 20,
        }
    }
}

fn parse_variant<T: Copy>(
    field: &'static str,
    value: &str,
    all: &[T],
    name: fn(&T) -> &'static str,
) -> Result<T, ThemeError> {
    let wanted = value.trim().to_ascii_lowercase();
    all.iter()
        .copied()
        .find(|variant| name(variant) == wanted)
        .ok_or_else(|| ThemeError::InvalidValue {
            field,
            value: value.to_string(),
            expected: all.iter().map(name).collect::<Vec<_>>().join(", "),
        })
}

impl FromStr for ThemeMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("mode", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for ColorScheme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("colorScheme", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for FontSize {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("fontSize", s, &Self::ALL, Self::as_str)
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display preferences persisted per user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub mode: ThemeMode,
    pub color_scheme: ColorScheme,
    pub font_size: FontSize,
}

impl ThemeConfig {
    pub fn colors(&self) -> ThemeColors {
        ThemeColors::resolve(self.mode, self.color_scheme)
    }
}

/// Concrete color per semantic role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: &'static str,
    pub primary_hover: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub border: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub info: &'static str,
}

struct SchemeSwatch {
    primary: &'static str,
    primary_hover: &'static str,
    secondary: &'static str,
    accent: &'static str,
}

fn swatch(mode: ThemeMode, scheme: ColorScheme) -> SchemeSwatch {
    use ColorScheme::*;
    use ThemeMode::*;

    let (primary, primary_hover, secondary, accent) = match (mode, scheme) {
        (Light, Default) => ("#4f46e5", "#4338ca", "#64748b", "#0ea5e9"),
        (Dark, Default) => ("#818cf8", "#6366f1", "#94a3b8", "#38bdf8"),
        (Light, Blue) => ("#2563eb", "#1d4ed8", "#475569", "#06b6d4"),
        (Dark, Blue) => ("#60a5fa", "#3b82f6", "#94a3b8", "#22d3ee"),
        (Light, Green) => ("#059669", "#047857", "#4b5563", "#84cc16"),
        (Dark, Green) => ("#34d399", "#10b981", "#9ca3af", "#a3e635"),
        (Light, Purple) => ("#7c3aed", "#6d28d9", "#6b7280", "#ec4899"),
        (Dark, Purple) => ("#a78bfa", "#8b5cf6", "#a1a1aa", "#f472b6"),
        (Light, Orange) => ("#ea580c", "#c2410c", "#57534e", "#eab308"),
        (Dark, Orange) => ("#fb923c", "#f97316", "#a8a29e", "#facc15"),
    };

    SchemeSwatch {
        primary,
        primary_hover,
        secondary,
        accent,
    }
}

impl ThemeColors {
    /// Colors for a mode/scheme pair. Total over both enums.
    pub fn resolve(mode: ThemeMode, scheme: ColorScheme) -> Self {
        let swatch = swatch(mode, scheme);
        match mode {
            ThemeMode::Light => Self {
                primary: swatch.primary,
                primary_hover: swatch.primary_hover,
                secondary: swatch.secondary,
                accent: swatch.accent,
                background: "#f8fafc",
                surface: "#ffffff",
                border: "#e2e8f0",
                text_primary: "#0f172a",
                text_secondary: "#475569",
                success: "#16a34a",
                warning: "#d97706",
                error: "#dc2626",
                info: "#0284c7",
            },
            ThemeMode::Dark => Self {
                primary: swatch.primary,
                primary_hover: swatch.primary_hover,
                secondary: swatch.secondary,
                accent: swatch.accent,
                background: "#0f172a",
                surface: "#1e293b",
                border: "#334155",
                text_primary: "#f1f5f9",
                text_secondary: "#cbd5e1",
                success: "#4ade80",
                warning: "#fbbf24",
                error: "#f87171",
                info: "#38bdf8",
            },
        }
    }

    /// (role, color) pairs in a stable order, role names in kebab-case.
    pub fn roles(&self) -> [(&'static str, &'static str); 13] {
        [
            ("primary", self.primary),
            ("primary-hover", self.primary_hover),
            ("secondary", self.secondary),
            ("accent", self.accent),
            ("background", self.background),
            ("surface", self.surface),
            ("border", self.border),
            ("text-primary", self.text_primary),
            ("text-secondary", self.text_secondary),
            ("success", self.success),
            ("warning", self.warning),
            ("error", self.error),
            ("info", self.info),
        ]
    }
}
