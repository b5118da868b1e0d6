//! Terminal rendering of the answer panels
//!
//! Formats a `MemorySurface` to ANSI strings via crossterm styling. Class
//! flags map to colours: active is yellow, submitted green with a check,
//! hidden dimmed.

use crossterm::style::{Attribute, Stylize};

use crate::config::Config;
use crate::surface::{Class, Handles, MemorySurface, Player};

/// Carriage return + newline (raw-mode terminals)
pub const CRLF: &str = "\r\n";

/// Render one player's panel as a single line
pub fn panel_line(
    surface: &MemorySurface,
    handles: &Handles,
    player: Player,
    config: &Config,
) -> String {
    let panel = handles.panel(player);
    let input = handles.input(player);

    let label = format!("Player {}", player.index());
    let value = surface.field(input).map(|f| f.value()).unwrap_or_default();
    let text = if value.is_empty() {
        format!("{}", config.placeholder.as_str().dark_grey())
    } else if surface.has_class(input, Class::Active) {
        format!("{}", value.yellow())
    } else {
        value.to_string()
    };

    let cursor = if surface.focused() == Some(input) { "_" } else { " " };

    if surface.has_class(panel, Class::Hidden) {
        format!(
            "{}",
            format!("  {}  (no answer)", label).attribute(Attribute::Dim)
        )
    } else if surface.has_class(panel, Class::Submitted) {
        format!("{} {}: {}", "✓".green(), label.green().bold(), text)
    } else if surface.has_class(panel, Class::Active) {
        format!("{} {}: {}{}", "▸".yellow(), label.bold(), text, cursor)
    } else {
        format!("  {}", format!("{}: waiting", label).dark_grey())
    }
}

/// Render both panels, one per line
pub fn panels(surface: &MemorySurface, handles: &Handles, config: &Config) -> String {
    [Player::One, Player::Two]
        .iter()
        .map(|p| panel_line(surface, handles, *p, config))
        .collect::<Vec<_>>()
        .join(CRLF)
}
