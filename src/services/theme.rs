use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::ThemeError;
use crate::models::{ColorScheme, FontSize, ThemeColors, ThemeConfig, ThemeMode};
use crate::services::theme_store::ThemeStore;

/// Pure lookup of the colors for a mode/scheme pair.
pub fn get_theme_colors(mode: ThemeMode, scheme: ColorScheme) -> ThemeColors {
    ThemeColors::resolve(mode, scheme)
}

/// Anything that can display a theme: a DOM root, a terminal, a stylesheet.
/// Setting the same name twice replaces the previous value.
pub trait ThemeSurface {
    fn set_property(&mut self, name: &str, value: &str);
    fn set_attribute(&mut self, name: &str, value: &str);
}

/// Pushes the resolved theme onto a surface. Calling it again with the
/// same config leaves the surface unchanged.
pub fn apply_theme(config: &ThemeConfig, surface: &mut dyn ThemeSurface) {
    let colors = config.colors();
    for (role, value) in colors.roles() {
        surface.set_property(&format!("--color-{}", role), value);
    }
    surface.set_property(
        "--font-size-base",
        &format!("{}px", config.font_size.base_px()),
    );
    surface.set_property("color-scheme", config.mode.as_str());

    surface.set_attribute("data-theme", config.mode.as_str());
    surface.set_attribute("data-color-scheme", config.color_scheme.as_str());
    surface.set_attribute("data-font-size", config.font_size.as_str());
}

/// Reads, derives and persists display preferences.
///
/// Every mutation is load-modify-save under one lock, so concurrent
/// callers never observe or persist a half-applied change.
pub struct ThemeResolver {
    store: Box<dyn ThemeStore>,
    write_lock: Mutex<()>,
}

impl ThemeResolver {
    pub fn new(store: impl ThemeStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            write_lock: Mutex::new(()),
        }
    }

    /// Stored config, or the default when absent or unreadable.
    pub fn get_theme_config(&self) -> ThemeConfig {
        match self.store.load() {
            Ok(Some(config)) => config,
            Ok(None) => ThemeConfig::default(),
            Err(e) => {
                log::warn!("Ignoring stored theme, falling back to default: {}", e);
                ThemeConfig::default()
            }
        }
    }

    pub fn get_theme_colors(&self, mode: ThemeMode, scheme: ColorScheme) -> ThemeColors {
        get_theme_colors(mode, scheme)
    }

    pub fn toggle_mode(&self) -> Result<ThemeConfig, ThemeError> {
        self.update(|config| config.mode = config.mode.toggled())
    }

    pub fn update_color_scheme(&self, scheme: ColorScheme) -> Result<ThemeConfig, ThemeError> {
        self.update(|config| config.color_scheme = scheme)
    }

    pub fn update_font_size(&self, size: FontSize) -> Result<ThemeConfig, ThemeError> {
        self.update(|config| config.font_size = size)
    }

    pub fn reset_to_default(&self) -> Result<ThemeConfig, ThemeError> {
        self.update(|config| *config = ThemeConfig::default())
    }

    pub fn apply_theme(&self, config: &ThemeConfig, surface: &mut dyn ThemeSurface) {
        apply_theme(config, surface)
    }

    fn update(&self, change: impl FnOnce(&mut ThemeConfig)) -> Result<ThemeConfig, ThemeError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut config = self.get_theme_config();
        change(&mut config);
        self.store.save(&config)?;
        log::info!(
            "Theme updated: mode={} scheme={} font={}",
            config.mode,
            config.color_scheme,
            config.font_size
        );
        Ok(config)
    }
}

const STYLESHEET_TEMPLATE: &str = r#"/* theme: {% for name, value in attributes %}{{ name }}={{ value }}{% if not loop.last %} {% endif %}{% endfor %} */
:root {
{% for name, value in properties %}  {{ name }}: {{ value }};
{% endfor %}}
"#;

/// Collects applied values as CSS custom properties and root attributes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CssVariables {
    properties: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
}

impl CssVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut surface = Self::new();
        apply_theme(config, &mut surface);
        surface
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn to_css(&self) -> Result<String, ThemeError> {
        let context = tera::Context::from_serialize(self)
            .map_err(|e| ThemeError::Render(e.to_string()))?;
        tera::Tera::one_off(STYLESHEET_TEMPLATE, &context, false)
            .map_err(|e| ThemeError::Render(e.to_string()))
    }
}

impl ThemeSurface for CssVariables {
    fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }
}
