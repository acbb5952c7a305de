/*
 * Decision logic for the theme-and-frame controller: which chrome mode a
 * configuration resolves to, how the requested theme mode collapses to a
 * dark-mode flag, and the content padding that keeps maximized windows from
 * clipping under the OS. The native effects (compositor attributes, style
 * bits, metrics) live behind the `ChromeEffects` trait and are driven from
 * `ChromeEngine::apply_configuration`.
 */
use crate::geometry::px_to_dip;
use crate::types::{ChromeConfig, DEFAULT_CAPTION_HEIGHT_DIP, RestoreState, ThemeMode};

/// True when the window should suppress the OS caption buttons and take over
/// the caption row: content extends into the title bar, the caption is taller
/// than the OS default, and the window is not a fixed tool window.
pub(crate) fn custom_chrome_active(config: &ChromeConfig) -> bool {
    config.extend_into_titlebar
        && config.caption_height > DEFAULT_CAPTION_HEIGHT_DIP
        && !config.tool_window
}

/// Resolves the requested theme mode to a dark-mode flag. `FollowSystem`
/// consults the OS personalization probe; a missing or unreadable setting
/// resolves to light, never to an error, since the effect is cosmetic.
pub(crate) fn resolve_dark_mode(
    mode: ThemeMode,
    apps_use_light_theme: impl FnOnce() -> Option<u32>,
) -> bool {
    match mode {
        ThemeMode::Light => false,
        ThemeMode::Dark => true,
        ThemeMode::FollowSystem => matches!(apps_use_light_theme(), Some(0)),
    }
}

/// Logical top padding for the content border: the border thickness while
/// maximized (the OS pushes a maximized window's frame off-screen by exactly
/// that much), zero in every other state.
pub(crate) fn content_top_padding_dip(
    state: RestoreState,
    border_px: i32,
    scale_y: f64,
) -> f64 {
    match state {
        RestoreState::Maximized => px_to_dip(border_px, scale_y),
        _ => 0.0,
    }
}
