/*
 * The hit-test core: region classification over the window geometry, custom
 * caption-button location over the visual layer's template parts, the
 * hover/press tracker, and the engine that composes them per incoming
 * notification. Platform-neutral throughout; the Win32 glue feeds it from
 * `window_common`.
 */
pub(crate) mod buttons;
pub(crate) mod engine;
pub(crate) mod region;
pub(crate) mod state;

pub use engine::ChromeEngine;
