use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::models::{ColorScheme, FontSize, ImageFile, OcrResult, ThemeConfig};
use crate::services::{
    validate, CssVariables, ImageTextExtractor, JsonFileThemeStore, ThemeResolver,
};

#[derive(Parser)]
#[command(name = "scholar")]
#[command(
    author,
    version,
    about = "OCR and theme utilities for the scholar desk",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve,

    /// Check whether an image would be accepted for OCR
    Validate {
        /// Path to the image
        image: PathBuf,
    },

    /// Extract the text of an image
    Ocr {
        /// Path to the image
        image: PathBuf,
    },

    /// Inspect or change the stored display theme
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },
}

#[derive(Subcommand)]
pub enum ThemeCommand {
    /// Print the stored config and its colors
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set the color scheme (default, blue, green, purple, orange)
    Scheme { name: String },
    /// Set the font size (small, medium, large, extra-large)
    FontSize { size: String },
    /// Restore the default theme
    Reset,
    /// Print the theme as a CSS stylesheet
    Css,
}

fn load_image(path: &Path) -> anyhow::Result<ImageFile> {
    ImageFile::from_path(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn handle_validate(image: &Path) -> anyhow::Result<()> {
    let file = load_image(image)?;
    let result = validate(&file);
    match result.error {
        None => {
            println!("{}: ok ({}, {} bytes)", file.name, file.media_type, file.size());
            Ok(())
        }
        Some(message) => bail!("{}: {}", file.name, message),
    }
}

pub fn handle_ocr(config: &Config, image: &Path) -> anyhow::Result<()> {
    let file = load_image(image)?;
    let extractor = ImageTextExtractor::new(config.ocr.clone());

    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    match rt.block_on(extractor.extract(&file)) {
        OcrResult::Success { text } => {
            info!("OCR finished for {}", file.name);
            println!("{}", text);
            Ok(())
        }
        OcrResult::Failure { kind, message } => bail!("OCR failed ({}): {}", kind, message),
    }
}

pub fn handle_theme(config: &Config, action: &ThemeCommand) -> anyhow::Result<()> {
    let resolver = ThemeResolver::new(JsonFileThemeStore::new(config.theme_store_path.clone()));

    let theme = match action {
        ThemeCommand::Show => resolver.get_theme_config(),
        ThemeCommand::Toggle => resolver.toggle_mode()?,
        ThemeCommand::Scheme { name } => {
            resolver.update_color_scheme(name.parse::<ColorScheme>()?)?
        }
        ThemeCommand::FontSize { size } => resolver.update_font_size(size.parse::<FontSize>()?)?,
        ThemeCommand::Reset => resolver.reset_to_default()?,
        ThemeCommand::Css => {
            let mut surface = CssVariables::new();
            resolver.apply_theme(&resolver.get_theme_config(), &mut surface);
            print!("{}", surface.to_css()?);
            return Ok(());
        }
    };

    print_theme(&theme);
    Ok(())
}

fn print_theme(theme: &ThemeConfig) {
    println!("{:16}: {}", "mode", theme.mode);
    println!("{:16}: {}", "color scheme", theme.color_scheme);
    println!("{:16}: {} ({}px)", "font size", theme.font_size, theme.font_size.base_px());
    println!();
    for (role, value) in theme.colors().roles() {
        println!("{:16}: {}", role, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OcrSettings;
    use crate::models::ThemeMode;

    fn test_config(dir: &Path) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            theme_store_path: dir.join("theme.json"),
            ocr: OcrSettings::default(),
        }
    }

    #[test]
    fn test_cli_parses_theme_subcommands() {
        let cli = Cli::try_parse_from(["scholar", "theme", "font-size", "large"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Theme { action: ThemeCommand::FontSize { ref size } }) if size == "large"
        ));

        let cli = Cli::try_parse_from(["scholar"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_theme_commands_persist() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        handle_theme(&config, &ThemeCommand::Toggle).unwrap();
        handle_theme(&config, &ThemeCommand::Scheme { name: "purple".to_string() }).unwrap();

        let stored = ThemeResolver::new(JsonFileThemeStore::new(&config.theme_store_path))
            .get_theme_config();
        assert_eq!(stored.mode, ThemeMode::Dark);
        assert_eq!(stored.color_scheme, ColorScheme::Purple);

        let bad_size = ThemeCommand::FontSize {
            size: "huge".to_string(),
        };
        assert!(handle_theme(&config, &bad_size).is_err());
    }

    #[test]
    fn test_validate_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        assert!(handle_validate(&path).is_err());

        let path = dir.path().join("page.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();
        assert!(handle_validate(&path).is_ok());
    }

    #[test]
    fn test_ocr_without_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let err = handle_ocr(&test_config(dir.path()), &path).unwrap_err();
        assert!(err.to_string().contains("configuration"));
    }
}
