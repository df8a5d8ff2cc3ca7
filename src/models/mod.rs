pub mod ocr;
pub mod theme;

pub use ocr::*;
pub use theme::*;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSchemeRequest {
    pub color_scheme: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSizeRequest {
    pub font_size: String,
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub config: ThemeConfig,
    pub colors: ThemeColors,
}

impl From<ThemeConfig> for ThemeResponse {
    fn from(config: ThemeConfig) -> Self {
        Self {
            colors: config.colors(),
            config,
        }
    }
}
