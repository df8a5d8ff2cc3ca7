pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;

pub use config::{Config, OcrSettings};
pub use error::{AppError, AppResult, ThemeError};
pub use models::{
    ColorScheme, FontSize, ImageFile, OcrErrorKind, OcrResult, ThemeColors, ThemeConfig, ThemeMode,
    ValidationResult,
};
pub use services::{
    apply_theme, get_theme_colors, validate, ChatTransport, CssVariables, ImageTextExtractor,
    JsonFileThemeStore, MemoryThemeStore, ThemeResolver, ThemeStore, ThemeSurface,
};
