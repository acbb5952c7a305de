/*
 * Coordinate conversion between device pixels (what the OS reports in
 * non-client messages and window rectangles) and logical pixels (the
 * DPI-independent units the application's layout works in), plus the small
 * point/rectangle types shared by the hit-test core. All scaling math funnels
 * through these helpers so the rounding rules live in one place.
 */

/// Per-axis scale factors mapping logical pixels to device pixels.
///
/// Owned by the window and updated only from the OS DPI-change notification;
/// a scale of 1.0 corresponds to 96 DPI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DpiScale {
    pub x: f64,
    pub y: f64,
}

impl DpiScale {
    pub const IDENTITY: DpiScale = DpiScale { x: 1.0, y: 1.0 };

    /// Builds a scale pair from raw monitor DPI values (96 == 1.0).
    pub fn from_dpi(dpi_x: u32, dpi_y: u32) -> Self {
        DpiScale {
            x: dpi_x as f64 / 96.0,
            y: dpi_y as f64 / 96.0,
        }
    }
}

impl Default for DpiScale {
    fn default() -> Self {
        DpiScale::IDENTITY
    }
}

/// Converts a logical-pixel value to device pixels.
///
/// Truncates toward negative infinity rather than rounding, so a fractional
/// device pixel is never counted as inside a region. This mirrors how the
/// layout side truncates fractional device pixels when rendering.
pub fn dip_to_px(value: f64, scale: f64) -> i32 {
    (value * scale).floor() as i32
}

/// Converts a device-pixel value to logical pixels.
pub fn px_to_dip(value: i32, scale: f64) -> f64 {
    value as f64 / scale
}

/// A point in device pixels (screen or window-relative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointPx {
    pub x: i32,
    pub y: i32,
}

/// A point in logical pixels, relative to the window's client origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointDip {
    pub x: f64,
    pub y: f64,
}

/// A rectangle in device pixels, screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectPx {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Logical-pixel placement of a template part, relative to the window origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}
