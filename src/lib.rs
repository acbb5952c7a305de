/*
 * Provides the public entry point for the winchrome crate, a Win32 custom
 * window chrome layer: it removes the OS title bar and border from an
 * existing window while keeping resizing, dragging and snapping intact, and
 * lets the application draw its own caption row with minimize/maximize/close
 * buttons.
 *
 * The hit-test core (region classification, caption-button location, the
 * hover/press tracker and the engine composing them) is platform-agnostic and
 * compiles everywhere so its logic stays testable without a live message
 * pump. Only `window_common`, the glue that subclasses a real HWND and talks
 * to DWM, is gated to Windows.
 */
pub mod chrome;
pub mod error;
pub mod geometry;
pub(crate) mod theme;
pub mod types;
#[cfg(target_os = "windows")]
pub(crate) mod window_common;

pub use chrome::ChromeEngine;
pub use error::{ChromeError, Result as ChromeResult};
pub use geometry::{DpiScale, PartBounds, PointDip, PointPx, RectPx};
pub use types::{
    CaptionButton, CaptionButtonPart, ChromeAction, ChromeConfig, ChromeEffects, ChromeHost,
    ChromeMessage, ChromeParts, DEFAULT_CAPTION_HEIGHT_DIP, Dispatch, HitRegion, RestoreState,
    ThemeMode, hit_test_code,
};
#[cfg(target_os = "windows")]
pub use window_common::{attach_window_chrome, detach_window_chrome, reconfigure_window_chrome};
