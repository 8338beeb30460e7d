//! Preset Selector Panel
//!
//! Bordered list of presets in the top-left corner. Only shown once the
//! widget is idle; clicking an option selects that preset.

use namegen_core::WidgetState;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use unicode_width::UnicodeWidthStr;

use crate::theme::{ACCENT, DIM_GRAY, OPTION_TEXT, SELECTED};

const HEADER: &str = " Preset ";

/// Marker drawn before the selected option
const MARKER: &str = "› ";

/// Smallest panel that can show a border and one option
const MIN_WIDTH: u16 = 10;
const MIN_HEIGHT: u16 = 3;

/// Preset selector widget
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectorPanel;

impl SelectorPanel {
    /// Create a selector panel
    pub fn new() -> Self {
        Self
    }

    /// Check if the panel should be drawn for this state
    pub fn should_show(&self, state: &WidgetState) -> bool {
        state.is_idle() && !state.catalog().is_empty()
    }

    /// Panel rectangle inside `area`, or `None` when hidden or too small
    pub fn panel_rect(&self, state: &WidgetState, area: Rect) -> Option<Rect> {
        if !self.should_show(state) {
            return None;
        }

        let options = state.catalog().selector_options();
        let widest = options
            .iter()
            .map(|o| o.width())
            .chain(std::iter::once(HEADER.width()))
            .max()
            .unwrap_or(0);

        let width = u16::try_from(widest + MARKER.width() + 2)
            .unwrap_or(u16::MAX)
            .min(area.width);
        let height = u16::try_from(options.len() + 2)
            .unwrap_or(u16::MAX)
            .min(area.height.saturating_sub(1));

        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return None;
        }
        Some(Rect::new(area.x, area.y, width, height))
    }

    /// Index of the option drawn at a terminal cell, if any
    pub fn option_at(
        &self,
        state: &WidgetState,
        area: Rect,
        column: u16,
        row: u16,
    ) -> Option<usize> {
        let panel = self.panel_rect(state, area)?;

        let inside_x = column > panel.x && column < panel.right().saturating_sub(1);
        let inside_y = row > panel.y && row < panel.bottom().saturating_sub(1);
        if !inside_x || !inside_y {
            return None;
        }

        let index = usize::from(row - panel.y - 1);
        state.catalog().contains_index(index).then_some(index)
    }

    /// Render the panel into `buf`
    pub fn render(&self, state: &WidgetState, area: Rect, buf: &mut Buffer) {
        let Some(panel) = self.panel_rect(state, area) else {
            return;
        };

        Self::draw_border(buf, panel);

        let header_x = panel.x + panel.width.saturating_sub(HEADER.width() as u16) / 2;
        buf.set_string(header_x, panel.y, HEADER, Style::default().fg(ACCENT));

        let inner_width = usize::from(panel.width.saturating_sub(2 + MARKER.width() as u16));
        let selected = state.catalog().selected_index();
        let rows = usize::from(panel.height.saturating_sub(2));

        for (i, option) in state.catalog().selector_options().iter().take(rows).enumerate() {
            let y = panel.y + 1 + i as u16;
            let text: String = option.chars().take(inner_width).collect();

            if selected == Some(i) {
                let style = Style::default().fg(SELECTED).add_modifier(Modifier::BOLD);
                buf.set_string(panel.x + 1, y, MARKER, style);
                buf.set_string(panel.x + 1 + MARKER.width() as u16, y, &text, style);
            } else {
                buf.set_string(
                    panel.x + 1 + MARKER.width() as u16,
                    y,
                    &text,
                    Style::default().fg(OPTION_TEXT),
                );
            }
        }
    }

    fn draw_border(buf: &mut Buffer, area: Rect) {
        let border_style = Style::default().fg(DIM_GRAY);
        let inner = "─".repeat(usize::from(area.width.saturating_sub(2)));

        buf.set_string(area.x, area.y, format!("╭{inner}╮"), border_style);
        for y in (area.y + 1)..area.bottom().saturating_sub(1) {
            buf.set_string(area.x, y, "│", border_style);
            buf.set_string(area.right().saturating_sub(1), y, "│", border_style);
        }
        buf.set_string(
            area.x,
            area.bottom().saturating_sub(1),
            format!("╰{inner}╯"),
            border_style,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use namegen_core::{Action, NameGenerator, Preset};

    fn preset(name: &str, first: &str, second: &str) -> Preset {
        Preset::new(name, "tester", vec![first.to_string()], vec![second.to_string()])
    }

    fn idle_state() -> WidgetState {
        let mut state = WidgetState::new(NameGenerator::seeded(5));
        state.apply(Action::LoadComplete(Ok(vec![
            preset("Elegant Penguin", "Elegant", "Penguin"),
            preset("Visionary Palm Tree", "Visionary", "Palm"),
        ])));
        state
    }

    #[test]
    fn test_hidden_while_loading() {
        let state = WidgetState::new(NameGenerator::seeded(5));
        let panel = SelectorPanel::new();
        assert!(!panel.should_show(&state));
        assert!(panel.panel_rect(&state, Rect::new(0, 0, 80, 24)).is_none());
    }

    #[test]
    fn test_panel_fits_widest_label() {
        let state = idle_state();
        let rect = SelectorPanel::new()
            .panel_rect(&state, Rect::new(0, 0, 80, 24))
            .unwrap();
        // "Visionary Palm Tree by tester" is 29 wide, plus marker and borders
        assert_eq!(rect, Rect::new(0, 0, 33, 4));
    }

    #[test]
    fn test_option_at_maps_rows() {
        let state = idle_state();
        let panel = SelectorPanel::new();
        let area = Rect::new(0, 0, 80, 24);

        assert_eq!(panel.option_at(&state, area, 5, 1), Some(0));
        assert_eq!(panel.option_at(&state, area, 5, 2), Some(1));
        assert_eq!(panel.option_at(&state, area, 5, 0), None);
        assert_eq!(panel.option_at(&state, area, 0, 1), None);
        assert_eq!(panel.option_at(&state, area, 60, 1), None);
    }

    #[test]
    fn test_render_highlights_selection() {
        let state = idle_state();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);

        SelectorPanel::new().render(&state, area, &mut buf);

        assert_eq!(buf[(1, 1)].symbol(), "›");
        assert_eq!(buf[(1, 1)].fg, SELECTED);
        assert_eq!(buf[(3, 2)].symbol(), "V");
        assert_eq!(buf[(3, 2)].fg, OPTION_TEXT);
    }
}
