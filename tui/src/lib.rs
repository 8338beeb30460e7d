//! Namegen TUI - Terminal surface for the project-name widget
//!
//! This crate hosts the headless `namegen-core` widget in a full-screen
//! terminal. The core decides what to draw; this crate decides how.
//!
//! # Architecture
//!
//! - **App**: Event loop, background preset load, frame timer
//! - **Painter**: Replays core scenes onto a braille canvas
//! - **Selector**: Preset list in the top-left corner
//! - **Surface**: Cell to surface-unit geometry
//! - **Theme**: Terminal colours

pub mod app;
pub mod painter;
pub mod selector;
pub mod surface;
pub mod theme;

pub use app::App;
