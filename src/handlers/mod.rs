pub mod ocr;
pub mod theme;

pub use ocr::*;
pub use theme::*;
