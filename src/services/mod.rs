pub mod ocr;
pub use ocr::{
    validate, ChatTransport, ImageTextExtractor, ReqwestTransport, TransportError,
    TransportResponse,
};

pub mod theme;
pub use theme::{apply_theme, get_theme_colors, CssVariables, ThemeResolver, ThemeSurface};

pub mod theme_store;
pub use theme_store::{JsonFileThemeStore, MemoryThemeStore, ThemeStore};
