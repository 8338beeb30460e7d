//! Main Application
//!
//! The App struct owns the widget state and drives it from the terminal:
//! - Event loop (keyboard, mouse, resize)
//! - Background preset load with a one-shot completion
//! - Frame timer that renders a scene per tick
//!
//! All state changes go through [`WidgetState::apply`]; the event loop is
//! the only writer.

use std::sync::Arc;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::Terminal;
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use namegen_core::{
    Action, AnimationController, AnimationState, DefaultSource, InputRouter, LoadError,
    NameGenerator, Preset, PresetLoader, WidgetConfig, WidgetState,
};

use crate::painter::ScenePainter;
use crate::selector::SelectorPanel;
use crate::surface::{click_at, surface_rect, surface_size};
use crate::theme::{DIM_GRAY, ERROR_RED};

/// Rows reserved below the canvas for the status line
const STATUS_HEIGHT: u16 = 1;

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Resolved configuration
    config: WidgetConfig,
    /// Widget state, mutated only through `apply`
    state: WidgetState,

    // === Components ===
    controller: AnimationController,
    router: InputRouter,
    painter: ScenePainter,
    selector: SelectorPanel,

    /// Canvas area (terminal minus the status line)
    area: Rect,
}

impl App {
    /// Create an app for a terminal of the given size
    pub fn new(config: WidgetConfig, terminal_area: Rect) -> Self {
        Self::with_generator(config, NameGenerator::from_entropy(), terminal_area)
    }

    /// Create an app with a specific name generator
    pub fn with_generator(
        config: WidgetConfig,
        generator: NameGenerator,
        terminal_area: Rect,
    ) -> Self {
        Self {
            running: true,
            config,
            state: WidgetState::new(generator),
            controller: AnimationController::new(),
            router: InputRouter::new(),
            painter: ScenePainter::new(),
            selector: SelectorPanel::new(),
            area: canvas_area(terminal_area),
        }
    }

    /// Widget state
    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Whether the event loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let source = DefaultSource::new(self.config.fetch_timeout)?;
        let loader =
            PresetLoader::new(Arc::new(source)).with_fetch_timeout(self.config.fetch_timeout);
        let locators = self.config.locators();

        info!(
            presets = locators.len(),
            config_source = %self.config.source(),
            "Starting preset load"
        );

        let (load_tx, mut load_rx) = oneshot::channel();
        let load_task = tokio::spawn(async move {
            let result = loader.load(&locators).await;
            // Receiver is gone if the user quit while loading
            let _ = load_tx.send(result);
        });

        let mut event_stream = EventStream::new();
        let mut ticker = tokio::time::interval(self.config.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut loading = true;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => {
                        load_task.abort();
                        return Err(e.into());
                    }
                    None => self.running = false,
                },

                result = &mut load_rx, if loading => {
                    loading = false;
                    let result = result.unwrap_or_else(|_| {
                        Err(LoadError::TaskFailed {
                            reason: "loader exited without a result".to_string(),
                        })
                    });
                    self.apply_load_result(result);
                }

                _ = ticker.tick() => self.draw(terminal)?,
            }
        }

        load_task.abort();
        Ok(())
    }

    /// Hand a finished preset load to the widget
    pub fn apply_load_result(&mut self, result: Result<Vec<Preset>, LoadError>) {
        match &result {
            Ok(presets) => debug!(count = presets.len(), "Load result delivered"),
            Err(e) => warn!(error = %e, "Preset load failed"),
        }
        self.state.apply(Action::LoadComplete(result));
    }

    /// Dispatch one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(w, h) => self.handle_resize(w, h),
            _ => {}
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Enter | KeyCode::Char(' ' | 'g') => self.state.apply(Action::Regenerate),
            KeyCode::Up => self.cycle_preset(false),
            KeyCode::Down => self.cycle_preset(true),
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(digit) = c.to_digit(10) {
                    self.select_preset(digit as usize - 1);
                }
            }
            _ => {}
        }
    }

    /// Handle mouse input
    ///
    /// Left presses hit the selector first, then the button.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        if let Some(index) = self
            .selector
            .option_at(&self.state, self.area, mouse.column, mouse.row)
        {
            self.select_preset(index);
            return;
        }

        let click = click_at(mouse.column, mouse.row);
        if let Some(action) = self
            .router
            .route_click(&self.state, click, surface_rect(self.area))
        {
            debug!(column = mouse.column, row = mouse.row, "Button clicked");
            self.state.apply(action);
        }
    }

    /// Handle terminal resize
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.area = canvas_area(Rect::new(0, 0, width, height));
    }

    fn select_preset(&mut self, index: usize) {
        if let Some(action) = self.router.route_selection(&self.state, index) {
            self.state.apply(action);
        }
    }

    fn cycle_preset(&mut self, forward: bool) {
        let catalog = self.state.catalog();
        let (Some(current), len) = (catalog.selected_index(), catalog.len()) else {
            return;
        };
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.select_preset(next);
    }

    /// Render one frame to the terminal
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        terminal.draw(|frame| {
            let area = frame.area();
            self.render(area, frame.buffer_mut());
        })?;
        Ok(())
    }

    /// Render the widget, selector and status line into `buf`
    ///
    /// Each call advances the animation by one frame.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.area = canvas_area(area);

        let scene = self
            .controller
            .render_frame(&mut self.state, surface_size(self.area));
        self.painter.render(&scene, self.area, buf);
        self.selector.render(&self.state, self.area, buf);

        if area.height > STATUS_HEIGHT {
            let status = Rect::new(area.x, area.bottom() - STATUS_HEIGHT, area.width, STATUS_HEIGHT);
            self.render_status(status, buf);
        }
    }

    /// Render status bar
    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let phase = self.state.phase();
        let style = match phase {
            AnimationState::Failed { .. } => Style::default().fg(ERROR_RED),
            _ => Style::default().fg(DIM_GRAY),
        };

        let hints = if self.state.is_idle() {
            " | ↑/↓ preset | Enter regenerate | Esc quit"
        } else {
            " | Esc quit"
        };
        let status = format!(" {}{hints}", phase.description());
        buf.set_stringn(area.x, area.y, &status, usize::from(area.width), style);
    }
}

/// Terminal area minus the status line
fn canvas_area(area: Rect) -> Rect {
    Rect::new(
        area.x,
        area.y,
        area.width,
        area.height.saturating_sub(STATUS_HEIGHT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(name: &str, first: &str, second: &str) -> Preset {
        Preset::new(name, "unit", vec![first.to_string()], vec![second.to_string()])
    }

    fn idle_app() -> App {
        let mut app = App::with_generator(
            WidgetConfig::default(),
            NameGenerator::seeded(9),
            Rect::new(0, 0, 80, 24),
        );
        app.apply_load_result(Ok(vec![
            preset("One", "Alpha", "Beta"),
            preset("Two", "Gamma", "Delta"),
            preset("Three", "Epsilon", "Zeta"),
        ]));
        app
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_canvas_area_leaves_status_row() {
        assert_eq!(canvas_area(Rect::new(0, 0, 80, 24)), Rect::new(0, 0, 80, 23));
        assert_eq!(canvas_area(Rect::new(0, 0, 80, 0)), Rect::new(0, 0, 80, 0));
    }

    #[test]
    fn test_quit_keys() {
        for key in [
            press(KeyCode::Esc),
            press(KeyCode::Char('q')),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = idle_app();
            app.handle_key(key);
            assert!(!app.is_running());
        }
    }

    #[test]
    fn test_arrow_keys_wrap() {
        let mut app = idle_app();
        app.handle_key(press(KeyCode::Up));
        assert_eq!(app.state().catalog().selected_index(), Some(2));
        assert_eq!(app.state().project_name(), Some("Epsilon Zeta"));

        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.state().catalog().selected_index(), Some(0));
    }

    #[test]
    fn test_digit_selects_preset() {
        let mut app = idle_app();
        app.handle_key(press(KeyCode::Char('2')));
        assert_eq!(app.state().project_name(), Some("Gamma Delta"));

        // Out of range is ignored
        app.handle_key(press(KeyCode::Char('9')));
        assert_eq!(app.state().catalog().selected_index(), Some(1));
    }

    #[test]
    fn test_keys_ignored_while_loading() {
        let mut app = App::with_generator(
            WidgetConfig::default(),
            NameGenerator::seeded(1),
            Rect::new(0, 0, 80, 24),
        );
        app.handle_key(press(KeyCode::Enter));
        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.state().phase(), &AnimationState::Loading);
        assert!(app.state().project_name().is_none());
    }
}
