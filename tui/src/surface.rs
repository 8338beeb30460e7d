//! Terminal Surface Geometry
//!
//! Maps terminal cells to the core's surface units and client coordinates.
//!
//! One column is one surface unit wide and one row is two units tall, so a
//! circle drawn by the core stays round on the usual 1:2 terminal cell.

use namegen_core::{ClickEvent, SurfaceRect, SurfaceSize};
use ratatui::layout::Rect;

/// Surface units per terminal row
pub const UNITS_PER_ROW: f64 = 2.0;

/// Surface size for a terminal area
#[must_use]
pub fn surface_size(area: Rect) -> SurfaceSize {
    SurfaceSize::new(
        f64::from(area.width),
        f64::from(area.height) * UNITS_PER_ROW,
    )
}

/// Bounding rectangle of `area` in client (cell) coordinates
#[must_use]
pub fn surface_rect(area: Rect) -> SurfaceRect {
    SurfaceRect::new(
        f64::from(area.x),
        f64::from(area.y),
        f64::from(area.width),
        f64::from(area.height),
    )
}

/// Click at the centre of the cell under the mouse
#[must_use]
pub fn click_at(column: u16, row: u16) -> ClickEvent {
    ClickEvent::new(f64::from(column) + 0.5, f64::from(row) + 0.5)
}

/// Cells whose centre lies inside a rectangle given in absolute surface units
///
/// Uses the same cell centre as [`click_at`], so every returned cell hits
/// the rectangle when clicked. The result is clipped to `area`.
#[must_use]
pub fn cells_for(area: Rect, x: f64, y: f64, width: f64, height: f64) -> Rect {
    let first_col = (x - 0.5).ceil().max(0.0);
    let last_col = (x + width - 0.5).floor();
    let first_row = (y / UNITS_PER_ROW - 0.5).ceil().max(0.0);
    let last_row = ((y + height) / UNITS_PER_ROW - 0.5).floor();

    if last_col < first_col || last_row < first_row {
        return Rect::new(area.x, area.y, 0, 0);
    }

    let cell = Rect::new(
        area.x.saturating_add(to_cell(first_col)),
        area.y.saturating_add(to_cell(first_row)),
        to_cell(last_col - first_col + 1.0),
        to_cell(last_row - first_row + 1.0),
    );
    cell.intersection(area)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_cell(value: f64) -> u16 {
    value.clamp(0.0, f64::from(u16::MAX)) as u16
}
