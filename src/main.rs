//! # Etiqueta CLI
//!
//! Command-line interface for composing and printing labels.
//!
//! ## Usage
//!
//! ```bash
//! # Preview today's date label as PNG
//! etiqueta render --today --png label.png
//!
//! # Date plus message, two copies to the printer
//! etiqueta render --date 2025-08-09 --message "Leftover lasagna" --count 2
//!
//! # Border message only, saved as a raw TSPL job
//! etiqueta render --border-message "Birthday" --tspl job.bin
//!
//! # Show the effective settings
//! etiqueta config --config etiqueta.toml
//! ```

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use etiqueta::{
    ContentItem, DeviceTransport, EtiquetaError, Label, LabelComposer, LabelContent, Settings,
    protocol::tspl,
    transport::TransportConfig,
};

/// Etiqueta - Thermal label composer
#[derive(Parser, Debug)]
#[command(name = "etiqueta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compose a label and preview, save or print it
    Render {
        /// Main message (middle zone)
        #[arg(long)]
        message: Option<String>,

        /// Border message, printed upright at the top and upside down at the bottom
        #[arg(long)]
        border_message: Option<String>,

        /// Side caption, printed down the left and up the right edge
        #[arg(long)]
        side_caption: Option<String>,

        /// Date to print (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date, conflicts_with = "today")]
        date: Option<NaiveDate>,

        /// Print today's date
        #[arg(long)]
        today: bool,

        /// Background image file
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,

        /// TrueType font (overrides font_path from the settings file)
        #[arg(long, value_name = "FILE")]
        font: Option<PathBuf>,

        /// Save a PNG preview
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        /// Save the TSPL job instead of printing it.
        /// With neither --png nor --tspl the label goes to the printer.
        #[arg(long, value_name = "FILE")]
        tspl: Option<PathBuf>,

        /// Printer device path (overrides transport.device)
        #[arg(long)]
        device: Option<PathBuf>,

        /// Number of labels to print
        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Print the effective settings as TOML
    Config,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), EtiquetaError> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Config => {
            print!("{}", settings.to_toml()?);
        }
        Commands::Render {
            message,
            border_message,
            side_caption,
            date,
            today,
            image,
            font,
            png,
            tspl: tspl_path,
            device,
            count,
        } => {
            if font.is_some() {
                settings.font_path = font;
            }
            if let Some(device) = device {
                settings.transport.device = device;
            }

            let date = if today { Some(Local::now().date_naive()) } else { date };
            let mut content = LabelContent::new();
            if let Some(date) = date {
                content.insert(ContentItem::Date(settings.format_date(date)?));
            }
            let texts: [(Option<String>, fn(String) -> ContentItem); 3] = [
                (message, ContentItem::Message),
                (border_message, ContentItem::BorderMessage),
                (side_caption, ContentItem::SideCaption),
            ];
            for (text, item) in texts {
                if let Some(text) = text {
                    content.insert(item(text));
                }
            }
            if let Some(bytes) = image.as_deref().and_then(read_background) {
                content.insert(ContentItem::BackgroundImage(bytes));
            }

            if content.is_empty() {
                return Err(EtiquetaError::Config(
                    "nothing to print: pass --date, --today, --message, --border-message or --side-caption"
                        .to_string(),
                ));
            }

            let composer = LabelComposer::with_font_path(
                settings.printer.layout(),
                settings.font_path.as_deref(),
            );
            let label = composer.render(&content);
            for warning in &label.warnings {
                eprintln!("Warning: {}", warning);
            }
            println!(
                "Composed {}x{} label",
                label.canvas.width(),
                label.canvas.height()
            );

            if let Some(path) = &png {
                label.canvas.save_png(path)?;
                println!("Saved preview to {}", path.display());
            }

            if let Some(path) = &tspl_path {
                let job = tspl::encode(&label.canvas, &settings.printer, &settings.tspl, count);
                std::fs::write(path, job)?;
                println!("Saved TSPL job to {}", path.display());
            } else if png.is_none() {
                print_labels(&settings, &label, count)?;
            }
        }
    }

    Ok(())
}

/// Parse a `YYYY-MM-DD` date argument.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD format.", s))
}

/// Read a background image file. An unreadable file is reported and skipped
/// so the rest of the label still prints.
fn read_background(path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "background image unreadable");
            eprintln!("Warning: background skipped: {}: {}", path.display(), e);
            None
        }
    }
}

/// Send `count` copies, one job per label, retrying each label.
fn print_labels(settings: &Settings, label: &Label, count: u32) -> Result<(), EtiquetaError> {
    let transport = &settings.transport;
    let job = tspl::encode(&label.canvas, &settings.printer, &settings.tspl, 1);
    println!("Printing {} label(s) to {}...", count, transport.device.display());

    for n in 1..=count {
        if count > 1 {
            println!("Label {} of {}", n, count);
        }
        send_with_retries(transport, &job)?;
        if n < count {
            thread::sleep(Duration::from_millis(transport.pause_between_labels_ms));
        }
    }

    println!(
        "Printed {} label(s) ({}x{})",
        count,
        label.canvas.width(),
        label.canvas.height()
    );
    Ok(())
}

fn send_with_retries(transport: &TransportConfig, job: &[u8]) -> Result<(), EtiquetaError> {
    let attempts = transport.max_retries.max(1);
    let mut last_error = None;

    for attempt in 1..=attempts {
        tracing::info!(attempt, attempts, device = %transport.device.display(), "print attempt");
        let result = DeviceTransport::open_with(transport).and_then(|mut t| t.write_all(job));
        match result {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::warn!(attempt, error = %e, "print attempt failed");
                last_error = Some(e);
                if attempt < attempts {
                    thread::sleep(Duration::from_millis(transport.retry_wait_ms));
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        EtiquetaError::Transport("Failed to print after multiple attempts".to_string())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unreadable_background_is_skipped() {
        assert_eq!(read_background(Path::new("/nonexistent/background.png")), None);
    }

    #[test]
    fn test_background_bytes_are_read() {
        let path = std::env::temp_dir().join(format!("etiqueta-bg-{}.png", std::process::id()));
        std::fs::write(&path, b"not decoded here").unwrap();
        let bytes = read_background(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(bytes, Some(b"not decoded here".to_vec()));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-08-09"), Ok(NaiveDate::from_ymd_opt(2025, 8, 9).unwrap()));
        assert!(parse_date("09/08/2025").is_err());
    }
}
