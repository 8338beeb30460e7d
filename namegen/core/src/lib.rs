//! Namegen Core - Headless Project Name Widget Logic
//!
//! This crate holds everything the project-name widget does that is not
//! terminal I/O. It can drive the ratatui surface in `namegen-tui`, or run
//! headless for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        UI Surface                             │
//! │   terminal events ──→ InputRouter ──→ Action                  │
//! │   Scene (display list) ←── AnimationController ←── frame tick │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┼───────────────────────────────┐
//! │                        NAMEGEN CORE                           │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐   │
//! │  │ PresetLoader │──→│ WidgetState  │──→│  NameGenerator   │   │
//! │  │ (JoinSet)    │   │ catalog/phase│   │  (word lists)    │   │
//! │  └──────────────┘   └──────────────┘   └──────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`WidgetState`]: the single owned state value, mutated by [`Action`]s
//! - [`PresetLoader`]: concurrent, order-stable loading of preset resources
//! - [`NameGenerator`]: two-word project names from a [`Preset`]
//! - [`AnimationController`]: produces a [`Scene`] per frame
//! - [`InputRouter`]: clicks and selector changes to [`Action`]s
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod animation;
pub mod config;
pub mod generator;
pub mod input;
pub mod layout;
pub mod loader;
pub mod preset;
pub mod state;
pub mod text;

pub use animation::{
    AnimationController, DrawCommand, Rgb, Scene, TextAlign, BUTTON_FILL, FAILED_LABEL,
    LOADING_LABEL,
};
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigSource,
    NamegenToml, WidgetConfig,
};
pub use generator::{GenerateError, NameGenerator, WordList};
pub use input::{ClickEvent, InputRouter, SurfaceRect};
pub use layout::{CenteredRect, Layout, NormalizedRect, SurfaceSize, BUTTON_LABEL};
pub use loader::{
    BundledSource, DefaultSource, FetchError, FileSource, HttpSource, LoadError, Locator,
    PresetLoader, PresetSource, BUNDLED_SCHEME,
};
pub use preset::{Preset, PresetCatalog, PresetError};
pub use state::{Action, AnimationState, WidgetState};
pub use text::{pick_random, truncate, ELLIPSIS, SELECTOR_LABEL_MAX_LEN, WORD_MAX_LEN};
