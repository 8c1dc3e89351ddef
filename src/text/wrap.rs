//! Greedy word wrapping against a pixel width.

use super::metrics::TextMetrics;

/// Split `text` into lines no wider than `max_width` pixels at `size`.
///
/// Words are separated on any whitespace and joined with single spaces. A
/// word is appended to the current line while the joined line still fits;
/// otherwise the line is closed and the word starts the next one. A single
/// word wider than `max_width` is placed alone on its own line rather than
/// split.
///
/// Empty (or all-whitespace) input yields a single empty line.
///
/// ## Example
///
/// ```
/// use etiqueta::text::{FontFace, wrap};
///
/// let face = FontFace::builtin();
/// // Built-in font at 20px: 10px per character.
/// let lines = wrap(&face, "happy birthday to you", 20, 150);
/// assert_eq!(lines, vec!["happy birthday", "to you"]);
/// ```
pub fn wrap<M: TextMetrics + ?Sized>(
    metrics: &M,
    text: &str,
    size: u32,
    max_width: u32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", current, word);
        if metrics.measure(&candidate, size).width <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}
