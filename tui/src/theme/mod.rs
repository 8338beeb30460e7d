//! Theme and Colors
//!
//! Terminal colours for the chrome around the canvas. Scene colours come
//! from `namegen-core` and are converted with [`to_color`].

use namegen_core::Rgb;
use ratatui::style::Color;

// ============================================================================
// UI Colors
// ============================================================================

/// Selector border and header accent
pub const ACCENT: Color = Color::Rgb(180, 180, 220);

/// Highlight for the selected preset
pub const SELECTED: Color = Color::Rgb(255, 223, 128);

/// Unselected option text
pub const OPTION_TEXT: Color = Color::Rgb(200, 200, 200);

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Error red
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Convert a scene colour to a terminal colour
#[must_use]
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
