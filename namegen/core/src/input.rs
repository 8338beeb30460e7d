//! Input Routing
//!
//! Turns raw pointer clicks and selector change events into [`Action`]s.
//! The router never mutates state itself; callers apply what it returns.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::Layout;
use crate::state::{Action, WidgetState};

/// A pointer click in client coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Horizontal client coordinate
    pub client_x: f64,
    /// Vertical client coordinate
    pub client_y: f64,
}

impl ClickEvent {
    /// Create a click at `(client_x, client_y)`
    #[must_use]
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// Bounding rectangle of the render surface in client coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRect {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl SurfaceRect {
    /// Create a surface rectangle
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Stateless translator from raw input to actions
#[derive(Clone, Copy, Debug, Default)]
pub struct InputRouter;

impl InputRouter {
    /// Create a router
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Express a click as fractions of the surface size
    ///
    /// Returns `None` when the surface has no area.
    #[must_use]
    pub fn normalize(click: ClickEvent, rect: SurfaceRect) -> Option<(f64, f64)> {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return None;
        }
        Some((
            (click.client_x - rect.left) / rect.width,
            (click.client_y - rect.top) / rect.height,
        ))
    }

    /// Route a click; only a click on the button while idle regenerates
    #[must_use]
    pub fn route_click(
        &self,
        state: &WidgetState,
        click: ClickEvent,
        rect: SurfaceRect,
    ) -> Option<Action> {
        if !state.is_idle() {
            return None;
        }

        let (x, y) = Self::normalize(click, rect)?;
        if Layout::button_normalized().contains(x, y) {
            debug!(x, y, "Button pressed");
            Some(Action::Regenerate)
        } else {
            None
        }
    }

    /// Route a selector change to `index`
    ///
    /// Indices that do not name a loaded preset are ignored.
    #[must_use]
    pub fn route_selection(&self, state: &WidgetState, index: usize) -> Option<Action> {
        if !state.is_idle() {
            return None;
        }
        if !state.catalog().contains_index(index) {
            debug!(index, "Ignoring selection of unknown preset");
            return None;
        }
        Some(Action::SelectPreset(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::NameGenerator;
    use crate::preset::Preset;

    const RECT: SurfaceRect = SurfaceRect::new(10.0, 20.0, 200.0, 100.0);

    fn idle_state() -> WidgetState {
        let mut state = WidgetState::new(NameGenerator::seeded(5));
        state.apply(Action::LoadComplete(Ok(vec![Preset::new(
            "P",
            "a",
            vec!["One".to_string()],
            vec!["Two".to_string()],
        )])));
        state
    }

    fn click_at_normalized(x: f64, y: f64) -> ClickEvent {
        ClickEvent::new(RECT.left + x * RECT.width, RECT.top + y * RECT.height)
    }

    #[test]
    fn test_normalize_offsets_and_scales() {
        let (x, y) = InputRouter::normalize(ClickEvent::new(110.0, 70.0), RECT).unwrap();
        assert!((x - 0.5).abs() < 1e-12);
        assert!((y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_degenerate_rect() {
        let rect = SurfaceRect::new(0.0, 0.0, 0.0, 10.0);
        assert!(InputRouter::normalize(ClickEvent::new(1.0, 1.0), rect).is_none());
    }

    #[test]
    fn test_click_on_button_center_regenerates() {
        let (cx, cy) = Layout::button_normalized().center();
        let action = InputRouter::new().route_click(&idle_state(), click_at_normalized(cx, cy), RECT);
        assert!(matches!(action, Some(Action::Regenerate)));
    }

    #[test]
    fn test_click_on_corner_does_nothing() {
        let action =
            InputRouter::new().route_click(&idle_state(), click_at_normalized(0.0, 0.0), RECT);
        assert!(action.is_none());
    }

    #[test]
    fn test_click_ignored_while_loading() {
        let (cx, cy) = Layout::button_normalized().center();
        let state = WidgetState::default();
        let action = InputRouter::new().route_click(&state, click_at_normalized(cx, cy), RECT);
        assert!(action.is_none());
    }

    #[test]
    fn test_selection_routes_valid_index_only() {
        let router = InputRouter::new();
        let state = idle_state();
        assert!(matches!(
            router.route_selection(&state, 0),
            Some(Action::SelectPreset(0))
        ));
        assert!(router.route_selection(&state, 1).is_none());
        assert!(router.route_selection(&WidgetState::default(), 0).is_none());
    }
}
