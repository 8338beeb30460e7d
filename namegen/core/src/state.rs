//! Widget State
//!
//! The single owned value behind the widget. Surfaces pass it explicitly to
//! the render step and the event handlers; it changes only through
//! [`WidgetState::apply`].
//!
//! # Lifecycle
//!
//! ```text
//! Loading ──(load ok + first name)──→ Idle
//!    │
//!    └──(load rejected / no name)───→ Failed
//! ```
//!
//! Idle and Failed are terminal.

use tracing::{debug, info, warn};

use crate::generator::{GenerateError, NameGenerator};
use crate::loader::LoadError;
use crate::preset::{Preset, PresetCatalog};

/// Which of the widget's visual modes is active
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// Presets are still being fetched
    #[default]
    Loading,
    /// Presets are loaded and a name is on display
    Idle,
    /// Loading failed; the widget shows the cause
    Failed {
        /// Human-readable cause
        reason: String,
    },
}

impl AnimationState {
    /// Short description for status lines and logs
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Loading => "Loading presets",
            Self::Idle => "Ready",
            Self::Failed { .. } => "Failed to load presets",
        }
    }
}

/// Everything that can change the widget state
#[derive(Debug)]
pub enum Action {
    /// The preset loader resolved
    LoadComplete(Result<Vec<Preset>, LoadError>),
    /// The selector picked a preset
    SelectPreset(usize),
    /// Produce a new name from the current preset
    Regenerate,
    /// A frame was rendered
    FrameTick,
}

/// Transient widget state
#[derive(Debug)]
pub struct WidgetState {
    phase: AnimationState,
    catalog: PresetCatalog,
    project_name: Option<String>,
    frame: u64,
    generator: NameGenerator,
}

impl WidgetState {
    /// Fresh state in Loading mode
    #[must_use]
    pub fn new(generator: NameGenerator) -> Self {
        Self {
            phase: AnimationState::Loading,
            catalog: PresetCatalog::new(),
            project_name: None,
            frame: 0,
            generator,
        }
    }

    /// Current visual mode
    #[must_use]
    pub fn phase(&self) -> &AnimationState {
        &self.phase
    }

    /// Whether the widget accepts clicks and selections
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == AnimationState::Idle
    }

    /// Loaded presets and selection
    #[must_use]
    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    /// Name currently on display
    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    /// Frames rendered so far
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Apply one action
    ///
    /// Actions that make no sense in the current mode are ignored.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::LoadComplete(result) => self.on_load_complete(result),
            Action::SelectPreset(index) => self.on_select(index),
            Action::Regenerate => {
                if !self.is_idle() {
                    return;
                }
                if let Err(e) = self.regenerate() {
                    warn!(error = %e, "Could not regenerate name");
                }
            }
            Action::FrameTick => self.frame = self.frame.wrapping_add(1),
        }
    }

    fn on_load_complete(&mut self, result: Result<Vec<Preset>, LoadError>) {
        if self.phase != AnimationState::Loading {
            debug!("Ignoring duplicate load completion");
            return;
        }

        let presets = match result {
            Ok(presets) if presets.is_empty() => {
                self.fail("no presets were loaded".to_string());
                return;
            }
            Ok(presets) => presets,
            Err(e) => {
                self.fail(e.to_string());
                return;
            }
        };

        self.catalog.populate(presets);

        // Idle must never be entered without a name to show
        match self.regenerate() {
            Ok(()) => {
                info!(presets = self.catalog.len(), "Widget ready");
                self.phase = AnimationState::Idle;
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn on_select(&mut self, index: usize) {
        if !self.is_idle() {
            return;
        }
        if self.catalog.select(index).is_none() {
            debug!(index, "Ignoring out-of-range preset selection");
            return;
        }
        if let Err(e) = self.regenerate() {
            warn!(error = %e, index, "Could not generate name for selected preset");
        }
    }

    fn regenerate(&mut self) -> Result<(), GenerateError> {
        let preset = self.catalog.current().ok_or(GenerateError::NoPresetSelected)?;
        let name = self.generator.generate(preset)?;
        debug!(preset = %preset.name, name = %name, "Generated project name");
        self.project_name = Some(name);
        Ok(())
    }

    fn fail(&mut self, reason: String) {
        warn!(reason = %reason, "Widget failed to load");
        self.phase = AnimationState::Failed { reason };
    }
}

impl Default for WidgetState {
    fn default() -> Self {
        Self::new(NameGenerator::from_entropy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{FetchError, Locator};
    use pretty_assertions::assert_eq;

    fn preset(name: &str, first: &[&str], second: &[&str]) -> Preset {
        Preset::new(
            name,
            "tester",
            first.iter().map(|s| (*s).to_string()).collect(),
            second.iter().map(|s| (*s).to_string()).collect(),
        )
    }

    fn loaded() -> WidgetState {
        let mut state = WidgetState::new(NameGenerator::seeded(9));
        state.apply(Action::LoadComplete(Ok(vec![
            preset("Elegant Penguin", &["Elegant"], &["Penguin"]),
            preset("Visionary Palm Tree", &["Visionary"], &["Palm", "Tree"]),
        ])));
        state
    }

    #[test]
    fn test_starts_loading() {
        let state = WidgetState::default();
        assert_eq!(state.phase(), &AnimationState::Loading);
        assert_eq!(state.project_name(), None);
        assert_eq!(state.frame(), 0);
    }

    #[test]
    fn test_load_complete_enters_idle_with_name() {
        let state = loaded();
        assert_eq!(state.phase(), &AnimationState::Idle);
        assert_eq!(state.project_name(), Some("Elegant Penguin"));
        assert_eq!(state.catalog().selected_index(), Some(0));
    }

    #[test]
    fn test_idle_never_reverts() {
        let mut state = loaded();
        state.apply(Action::LoadComplete(Err(LoadError::NoLocators)));
        assert_eq!(state.phase(), &AnimationState::Idle);
        state.apply(Action::LoadComplete(Ok(vec![])));
        assert_eq!(state.phase(), &AnimationState::Idle);
        assert_eq!(state.catalog().len(), 2);
    }

    #[test]
    fn test_load_failure_enters_failed() {
        let mut state = WidgetState::default();
        state.apply(Action::LoadComplete(Err(LoadError::Fetch {
            locator: Locator::parse("presets/missing.json"),
            source: FetchError::Status { status: 404 },
        })));

        match state.phase() {
            AnimationState::Failed { reason } => {
                assert!(reason.contains("presets/missing.json"), "{reason}");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert_eq!(state.project_name(), None);
    }

    #[test]
    fn test_empty_load_enters_failed() {
        let mut state = WidgetState::default();
        state.apply(Action::LoadComplete(Ok(vec![])));
        assert!(matches!(state.phase(), AnimationState::Failed { .. }));
    }

    #[test]
    fn test_unusable_first_preset_enters_failed() {
        let mut state = WidgetState::default();
        state.apply(Action::LoadComplete(Ok(vec![preset("Broken", &[], &["x"])])));
        match state.phase() {
            AnimationState::Failed { reason } => assert!(reason.contains("wordlist1")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_regenerate_ignored_while_loading() {
        let mut state = WidgetState::default();
        state.apply(Action::Regenerate);
        assert_eq!(state.project_name(), None);
        assert_eq!(state.phase(), &AnimationState::Loading);
    }

    #[test]
    fn test_select_switches_and_regenerates() {
        let mut state = loaded();
        for _ in 0..10 {
            state.apply(Action::SelectPreset(1));
            let name = state.project_name().unwrap();
            assert!(name == "Visionary Palm" || name == "Visionary Tree", "{name}");
            state.apply(Action::Regenerate);
            let name = state.project_name().unwrap();
            assert!(name == "Visionary Palm" || name == "Visionary Tree", "{name}");
        }
        assert_eq!(state.catalog().selected_index(), Some(1));
    }

    #[test]
    fn test_out_of_range_select_ignored() {
        let mut state = loaded();
        state.apply(Action::SelectPreset(7));
        assert_eq!(state.catalog().selected_index(), Some(0));
        assert_eq!(state.project_name(), Some("Elegant Penguin"));
    }

    #[test]
    fn test_frame_tick_increments() {
        let mut state = WidgetState::default();
        for _ in 0..3 {
            state.apply(Action::FrameTick);
        }
        assert_eq!(state.frame(), 3);
    }
}
