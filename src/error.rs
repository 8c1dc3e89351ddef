//! # Error Types
//!
//! This module defines error types used throughout the etiqueta library.
//!
//! Two families live here:
//!
//! - [`EtiquetaError`]: real failures returned through `Result` by the
//!   collaborators around the engine (font loading, config files, transports).
//! - [`EngineWarning`]: conditions the composition engine recovers from on its
//!   own. They never abort a render; the composer hands them back next to the
//!   finished canvas.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for etiqueta operations
#[derive(Debug, Error)]
pub enum EtiquetaError {
    /// Font asset missing or unparseable
    #[error("Font load error ({path}): {reason}")]
    FontLoad { path: PathBuf, reason: String },

    /// Invalid or unreadable configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Transport-level errors (connection, I/O)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Image encoding error (PNG previews)
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A condition the engine recovered from while composing a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineWarning {
    /// The configured font could not be opened; the built-in bitmap font was used.
    FontFallback { path: PathBuf, reason: String },

    /// The background image was not decodable and was left out.
    BackgroundSkipped { reason: String },

    /// The canvas is too small for any content zone; only the border was drawn.
    ZonePlanningDegenerate { width: u32, height: u32 },

    /// Even the minimum font size overflows the zone; text was drawn at that size anyway.
    FitNeverSatisfied { item: crate::layout::ItemKind, font_size: u32 },

    /// Date, message and border message were all present; the border message was dropped.
    BorderMessageDropped,
}

impl std::fmt::Display for EngineWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FontFallback { path, reason } => write!(
                f,
                "font {} unavailable ({}), using built-in bitmap font",
                path.display(),
                reason
            ),
            Self::BackgroundSkipped { reason } => {
                write!(f, "background image skipped: {}", reason)
            }
            Self::ZonePlanningDegenerate { width, height } => {
                write!(f, "canvas {}x{} too small for content", width, height)
            }
            Self::FitNeverSatisfied { item, font_size } => write!(
                f,
                "{:?} overflows its zone even at {}px",
                item, font_size
            ),
            Self::BorderMessageDropped => {
                write!(f, "border message dropped: date and message take every zone")
            }
        }
    }
}

impl From<image::ImageError> for EtiquetaError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e.to_string())
    }
}
