//! Animation - Surface-Agnostic Frame Rendering
//!
//! The [`AnimationController`] turns the widget state into a [`Scene`]: a
//! display list of drawing commands that any surface can replay. It does not
//! schedule itself; surfaces call [`AnimationController::render_frame`] once
//! per display refresh from an explicit loop.
//!
//! # Frame Structure
//!
//! Every scene starts with [`DrawCommand::Clear`] and a
//! [`DrawCommand::Translate`] to the surface centre. The remaining commands
//! depend on the mode:
//!
//! - **Loading**: a label and three colour-cycling ribbons, rotating by
//!   `frame * PI / 30` (one turn per 60 frames)
//! - **Idle**: the project name and the "Generate another" button
//! - **Failed**: an error headline and its cause

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::layout::{Layout, SurfaceSize, BUTTON_LABEL};
use crate::state::{Action, AnimationState, WidgetState};

/// Number of ribbons in the loading spinner
pub const RIBBON_COUNT: usize = 3;

/// Angular segments per ribbon
pub const SEGMENTS_PER_RIBBON: usize = 255;

/// Spinner rotation per rendered frame (radians)
pub const ROTATION_PER_FRAME: f64 = PI / 30.0;

/// Loading label text
pub const LOADING_LABEL: &str = "Loading presets...";

/// Failed-mode headline
pub const FAILED_LABEL: &str = "Could not load presets";

// ============================================================================
// Colors
// ============================================================================

/// 24-bit colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a colour from components
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Primary text colour
pub const TEXT_COLOR: Rgb = Rgb::new(235, 235, 235);
/// Button fill
pub const BUTTON_FILL: Rgb = Rgb::new(70, 70, 90);
/// Button outline
pub const BUTTON_STROKE: Rgb = Rgb::new(180, 180, 220);
/// Error text
pub const ERROR_COLOR: Rgb = Rgb::new(255, 90, 90);
/// Secondary text
pub const DIM_COLOR: Rgb = Rgb::new(140, 140, 140);

// ============================================================================
// Display List
// ============================================================================

/// Horizontal text anchoring
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TextAlign {
    /// Anchor is the centre of the text
    #[default]
    Center,
    /// Anchor is the left edge of the text
    Left,
}

/// One drawing instruction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Wipe the surface
    Clear,
    /// Move the origin; later coordinates are relative to it
    Translate {
        /// Horizontal offset
        x: f64,
        /// Vertical offset
        y: f64,
    },
    /// Draw a line of text
    Text {
        /// What to draw
        text: String,
        /// Anchor x
        x: f64,
        /// Anchor y (vertical middle of the text)
        y: f64,
        /// Nominal glyph height
        font_size: f64,
        /// Text colour
        color: Rgb,
        /// How the anchor relates to the text
        align: TextAlign,
    },
    /// Stroke a circular arc; angles in radians, clockwise from +x
    Arc {
        /// Centre x
        cx: f64,
        /// Centre y
        cy: f64,
        /// Radius
        radius: f64,
        /// Start angle
        start_angle: f64,
        /// End angle
        end_angle: f64,
        /// Stroke thickness
        thickness: f64,
        /// Stroke colour
        color: Rgb,
    },
    /// Fill and outline a rounded rectangle
    RoundRect {
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Width
        width: f64,
        /// Height
        height: f64,
        /// Corner radius, same for all corners
        radius: f64,
        /// Fill colour
        fill: Rgb,
        /// Outline colour
        stroke: Rgb,
    },
}

/// Display list for one frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Commands in paint order
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Text strings drawn in this scene, in paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of arc segments in this scene
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Arc { .. }))
            .count()
    }

    /// Whether the scene contains a button
    #[must_use]
    pub fn has_button(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, DrawCommand::RoundRect { .. }))
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Builds one [`Scene`] per frame from the widget state
#[derive(Clone, Copy, Debug, Default)]
pub struct AnimationController;

impl AnimationController {
    /// Create a controller
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Spinner rotation at `frame`
    #[must_use]
    pub fn rotation(frame: u64) -> f64 {
        // Reduce first so the angle stays precise for long runs
        let phase = frame % 60;
        phase as f64 * ROTATION_PER_FRAME
    }

    /// Colour of `segment` in `ribbon`
    ///
    /// Ribbons ramp red to green, green to blue, and blue to red.
    #[must_use]
    pub fn segment_color(ribbon: usize, segment: usize) -> Rgb {
        let up = u8::try_from(segment.min(255)).unwrap_or(u8::MAX);
        let down = u8::MAX - up;
        match ribbon % RIBBON_COUNT {
            0 => Rgb::new(down, up, 0),
            1 => Rgb::new(0, down, up),
            _ => Rgb::new(up, 0, down),
        }
    }

    /// Render one frame and advance the frame counter
    pub fn render_frame(&self, state: &mut WidgetState, size: SurfaceSize) -> Scene {
        let layout = Layout::new(size);
        let mut scene = Scene::default();

        scene.push(DrawCommand::Clear);
        let (cx, cy) = size.center();
        scene.push(DrawCommand::Translate { x: cx, y: cy });

        match state.phase() {
            AnimationState::Loading => Self::draw_loading(&mut scene, &layout, state.frame()),
            AnimationState::Idle => {
                Self::draw_idle(&mut scene, &layout, state.project_name().unwrap_or_default());
            }
            AnimationState::Failed { reason } => Self::draw_failed(&mut scene, &layout, reason),
        }

        state.apply(Action::FrameTick);
        scene
    }

    fn draw_loading(scene: &mut Scene, layout: &Layout, frame: u64) {
        let (lx, ly) = layout.loading_label_anchor();
        scene.push(DrawCommand::Text {
            text: LOADING_LABEL.to_string(),
            x: lx,
            y: ly,
            font_size: layout.loading_font_size(),
            color: TEXT_COLOR,
            align: TextAlign::Center,
        });

        let rotation = Self::rotation(frame);
        let radius = layout.spinner_radius();
        let thickness = layout.spinner_thickness();
        let ribbon_span = 2.0 * PI / RIBBON_COUNT as f64;
        let step = ribbon_span / SEGMENTS_PER_RIBBON as f64;

        for ribbon in 0..RIBBON_COUNT {
            let offset = rotation + ribbon as f64 * ribbon_span;
            for segment in 0..SEGMENTS_PER_RIBBON {
                let start_angle = offset + segment as f64 * step;
                scene.push(DrawCommand::Arc {
                    cx: 0.0,
                    cy: 0.0,
                    radius,
                    start_angle,
                    end_angle: start_angle + step,
                    thickness,
                    color: Self::segment_color(ribbon, segment),
                });
            }
        }
    }

    fn draw_idle(scene: &mut Scene, layout: &Layout, name: &str) {
        let (nx, ny) = layout.name_anchor();
        scene.push(DrawCommand::Text {
            text: name.to_string(),
            x: nx,
            y: ny,
            font_size: layout.name_font_size(),
            color: TEXT_COLOR,
            align: TextAlign::Center,
        });

        let button = layout.button_rect();
        scene.push(DrawCommand::RoundRect {
            x: button.x,
            y: button.y,
            width: button.width,
            height: button.height,
            radius: layout.button_corner_radius(),
            fill: BUTTON_FILL,
            stroke: BUTTON_STROKE,
        });

        let (bx, by) = layout.button_label_anchor();
        scene.push(DrawCommand::Text {
            text: BUTTON_LABEL.to_string(),
            x: bx,
            y: by,
            font_size: layout.button_font_size(),
            color: TEXT_COLOR,
            align: TextAlign::Center,
        });
    }

    fn draw_failed(scene: &mut Scene, layout: &Layout, reason: &str) {
        let (nx, ny) = layout.name_anchor();
        scene.push(DrawCommand::Text {
            text: FAILED_LABEL.to_string(),
            x: nx,
            y: ny,
            font_size: layout.name_font_size(),
            color: ERROR_COLOR,
            align: TextAlign::Center,
        });

        let (bx, by) = layout.button_label_anchor();
        scene.push(DrawCommand::Text {
            text: reason.to_string(),
            x: bx,
            y: by,
            font_size: layout.button_font_size(),
            color: DIM_COLOR,
            align: TextAlign::Center,
        });
    }
}
