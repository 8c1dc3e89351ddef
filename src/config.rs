//! # Settings File
//!
//! Everything the CLI reads from disk, in one TOML document:
//!
//! ```toml
//! font_path = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"
//! date_format = "%B %d, %Y"
//!
//! [printer]
//! dpi = 203
//! label_width_in = 2.25
//! label_height_in = 1.25
//!
//! [tspl]
//! density = 10
//!
//! [transport]
//! device = "/dev/rfcomm0"
//! max_retries = 3
//! ```
//!
//! Every key is optional and falls back to its default.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::EtiquetaError;
use crate::printer::PrinterConfig;
use crate::protocol::tspl::TsplConfig;
use crate::text::MAX_FONT_SIZE;
use crate::transport::TransportConfig;

/// Default `strftime` pattern for printed dates ("August 09, 2025").
pub const DEFAULT_DATE_FORMAT: &str = "%B %d, %Y";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// TrueType font for label text; the built-in bitmap font when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    pub date_format: String,
    pub printer: PrinterConfig,
    pub tspl: TsplConfig,
    pub transport: TransportConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_path: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            printer: PrinterConfig::default(),
            tspl: TsplConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults when `path` is `None`.
    ///
    /// ## Errors
    ///
    /// [`EtiquetaError::Config`] when the file cannot be read, is not valid
    /// TOML, or carries an unusable value.
    pub fn load(path: Option<&Path>) -> Result<Self, EtiquetaError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .map_err(|e| EtiquetaError::Config(format!("{}: {}", path.display(), e)))?;
        let settings = Self::from_toml(&text)
            .map_err(|e| EtiquetaError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, EtiquetaError> {
        let settings: Settings =
            toml::from_str(text).map_err(|e| EtiquetaError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize the effective settings.
    pub fn to_toml(&self) -> Result<String, EtiquetaError> {
        toml::to_string_pretty(self).map_err(|e| EtiquetaError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), EtiquetaError> {
        if self.printer.dpi == 0 {
            return Err(EtiquetaError::Config("printer.dpi must be positive".to_string()));
        }
        if self.printer.label_width_in <= 0.0 || self.printer.label_height_in <= 0.0 {
            return Err(EtiquetaError::Config("label dimensions must be positive".to_string()));
        }
        let (min, max) = (self.printer.min_font_size, self.printer.max_font_size);
        if min == 0 {
            return Err(EtiquetaError::Config(
                "printer.min_font_size must be positive".to_string(),
            ));
        }
        if max > MAX_FONT_SIZE {
            return Err(EtiquetaError::Config(format!(
                "printer.max_font_size {} exceeds {}",
                max, MAX_FONT_SIZE
            )));
        }
        if min > max {
            return Err(EtiquetaError::Config(format!(
                "printer.min_font_size {} is above printer.max_font_size {}",
                min, max
            )));
        }
        validate_date_format(&self.date_format)
    }

    /// Format `date` with [`Settings::date_format`].
    pub fn format_date(&self, date: NaiveDate) -> Result<String, EtiquetaError> {
        validate_date_format(&self.date_format)?;
        Ok(date.format(&self.date_format).to_string())
    }
}

fn validate_date_format(format: &str) -> Result<(), EtiquetaError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(EtiquetaError::Config(format!("invalid date_format {:?}", format)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_path_gives_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.printer, PrinterConfig::RW402B);
    }

    #[test]
    fn test_partial_file() {
        let settings = Settings::from_toml(
            r#"
            font_path = "/fonts/label.ttf"

            [printer]
            label_width_in = 2.0

            [transport]
            max_retries = 1
            "#,
        )
        .unwrap();
        assert_eq!(settings.font_path, Some(PathBuf::from("/fonts/label.ttf")));
        assert_eq!(settings.printer.label_width_in, 2.0);
        assert_eq!(settings.printer.dpi, 203);
        assert_eq!(settings.transport.max_retries, 1);
        assert_eq!(settings.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(settings.tspl, TsplConfig::default());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let settings = Settings {
            font_path: Some(PathBuf::from("/fonts/a.ttf")),
            ..Settings::default()
        };
        let text = settings.to_toml().unwrap();
        assert_eq!(Settings::from_toml(&text).unwrap(), settings);
    }

    #[test]
    fn test_invalid_files_are_config_errors() {
        assert!(matches!(
            Settings::from_toml("printer = 3"),
            Err(EtiquetaError::Config(_))
        ));
        assert!(matches!(
            Settings::from_toml("[printer]\ndpi = 0\n"),
            Err(EtiquetaError::Config(_))
        ));
        assert!(matches!(
            Settings::from_toml("date_format = \"%Q\"\n"),
            Err(EtiquetaError::Config(_))
        ));
        assert!(matches!(
            Settings::load(Some(Path::new("/nonexistent/etiqueta.toml"))),
            Err(EtiquetaError::Config(_))
        ));
    }

    #[test]
    fn test_font_size_bounds() {
        let rejected = [
            "[printer]\nmax_font_size = 4000000000\n",
            "[printer]\nmin_font_size = 300\nmax_font_size = 20\n",
            "[printer]\nmin_font_size = 0\n",
            "[printer]\nmax_font_size = 501\n",
        ];
        for text in rejected {
            assert!(
                matches!(Settings::from_toml(text), Err(EtiquetaError::Config(_))),
                "accepted {:?}",
                text
            );
        }

        let settings =
            Settings::from_toml("[printer]\nmin_font_size = 1\nmax_font_size = 500\n").unwrap();
        assert_eq!(settings.printer.min_font_size, 1);
        assert_eq!(settings.printer.max_font_size, MAX_FONT_SIZE);

        let settings = Settings::from_toml("[printer]\nmin_font_size = 24\nmax_font_size = 24\n");
        assert!(settings.is_ok());
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 9).unwrap();
        let settings = Settings::default();
        assert_eq!(settings.format_date(date).unwrap(), "August 09, 2025");

        let iso = Settings {
            date_format: "%Y-%m-%d".to_string(),
            ..Settings::default()
        };
        assert_eq!(iso.format_date(date).unwrap(), "2025-08-09");
    }
}
