//! Widget Geometry
//!
//! Every size and offset the widget draws with is a fixed ratio of the
//! surface width or height, kept here so the renderer and the hit-tester
//! can never disagree about where the button is.
//!
//! Coordinates are relative to the surface centre with y growing downward,
//! so "above the origin" means negative y.

use serde::{Deserialize, Serialize};

/// Loading label font size, fraction of surface height
pub const LOADING_FONT_RATIO: f64 = 0.05;
/// Gap between the spinner and the loading label, fraction of height
pub const LOADING_LABEL_GAP_RATIO: f64 = 0.06;
/// Spinner radius, fraction of the smaller surface dimension
pub const SPINNER_RADIUS_RATIO: f64 = 0.3;
/// Spinner ribbon thickness, fraction of the smaller surface dimension
pub const SPINNER_THICKNESS_RATIO: f64 = 0.03;

/// Project name font size, fraction of surface height
pub const NAME_FONT_RATIO: f64 = 0.08;
/// Distance of the project name above the origin, fraction of height
pub const NAME_OFFSET_RATIO: f64 = 0.08;

/// Button width, fraction of surface width
pub const BUTTON_WIDTH_RATIO: f64 = 0.3;
/// Button height, fraction of surface height
pub const BUTTON_HEIGHT_RATIO: f64 = 0.12;
/// Distance of the button centre below the origin, fraction of height
pub const BUTTON_OFFSET_RATIO: f64 = 0.1;
/// Button corner radius, fraction of surface width (all four corners)
pub const BUTTON_CORNER_RATIO: f64 = 0.01;
/// Button label font size, fraction of surface height
pub const BUTTON_FONT_RATIO: f64 = 0.05;

/// Label drawn inside the button
pub const BUTTON_LABEL: &str = "Generate another";

/// Size of the render surface in surface units
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    /// Width in surface units
    pub width: f64,
    /// Height in surface units
    pub height: f64,
}

impl SurfaceSize {
    /// Create a surface size
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Centre of the surface in absolute coordinates
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Smaller of the two dimensions
    #[must_use]
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// Axis-aligned rectangle in normalized `[0,1] x [0,1]` space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Right edge
    pub right: f64,
    /// Bottom edge
    pub bottom: f64,
}

impl NormalizedRect {
    /// Whether `(x, y)` lies inside, edges included
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Centre point
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

/// Rectangle relative to the surface centre
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CenteredRect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

/// Geometry for one frame at a given surface size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    size: SurfaceSize,
}

impl Layout {
    /// Compute geometry for `size`
    #[must_use]
    pub const fn new(size: SurfaceSize) -> Self {
        Self { size }
    }

    /// Surface this layout was computed for
    #[must_use]
    pub const fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Spinner radius
    #[must_use]
    pub fn spinner_radius(&self) -> f64 {
        self.size.min_side() * SPINNER_RADIUS_RATIO
    }

    /// Spinner ribbon thickness
    #[must_use]
    pub fn spinner_thickness(&self) -> f64 {
        self.size.min_side() * SPINNER_THICKNESS_RATIO
    }

    /// Loading label anchor, centred above the spinner
    #[must_use]
    pub fn loading_label_anchor(&self) -> (f64, f64) {
        let gap = self.size.height * LOADING_LABEL_GAP_RATIO;
        (0.0, -(self.spinner_radius() + gap))
    }

    /// Loading label font size
    #[must_use]
    pub fn loading_font_size(&self) -> f64 {
        self.size.height * LOADING_FONT_RATIO
    }

    /// Project name anchor, centred above the origin
    #[must_use]
    pub fn name_anchor(&self) -> (f64, f64) {
        (0.0, -self.size.height * NAME_OFFSET_RATIO)
    }

    /// Project name font size
    #[must_use]
    pub fn name_font_size(&self) -> f64 {
        self.size.height * NAME_FONT_RATIO
    }

    /// Button rectangle, centred horizontally below the origin
    #[must_use]
    pub fn button_rect(&self) -> CenteredRect {
        let width = self.size.width * BUTTON_WIDTH_RATIO;
        let height = self.size.height * BUTTON_HEIGHT_RATIO;
        let center_y = self.size.height * BUTTON_OFFSET_RATIO;
        CenteredRect {
            x: -width / 2.0,
            y: center_y - height / 2.0,
            width,
            height,
        }
    }

    /// Button corner radius
    #[must_use]
    pub fn button_corner_radius(&self) -> f64 {
        self.size.width * BUTTON_CORNER_RATIO
    }

    /// Button label anchor (button centre)
    #[must_use]
    pub fn button_label_anchor(&self) -> (f64, f64) {
        (0.0, self.size.height * BUTTON_OFFSET_RATIO)
    }

    /// Button label font size
    #[must_use]
    pub fn button_font_size(&self) -> f64 {
        self.size.height * BUTTON_FONT_RATIO
    }

    /// The button in normalized coordinates
    ///
    /// Independent of surface size since every dimension is a ratio.
    #[must_use]
    pub fn button_normalized() -> NormalizedRect {
        let center_y = 0.5 + BUTTON_OFFSET_RATIO;
        NormalizedRect {
            left: 0.5 - BUTTON_WIDTH_RATIO / 2.0,
            top: center_y - BUTTON_HEIGHT_RATIO / 2.0,
            right: 0.5 + BUTTON_WIDTH_RATIO / 2.0,
            bottom: center_y + BUTTON_HEIGHT_RATIO / 2.0,
        }
    }
}
