/*
 * Platform-agnostic types for the chrome engine: configuration, the logical
 * regions a screen point can resolve to, the notification stream consumed by
 * the dispatch function, and the collaborator traits at the host boundary.
 * Everything here compiles on every platform so the hit-test core stays
 * testable without a live message pump.
 */
use crate::geometry::{DpiScale, PartBounds, PointDip, PointPx, RectPx};

/// The OS default caption height in logical pixels. A configured caption
/// height must exceed this before custom caption buttons take over.
pub const DEFAULT_CAPTION_HEIGHT_DIP: f64 = 28.0;

/// Native `WM_NCHITTEST` result codes, mirrored here so the portable core can
/// report them without linking the Win32 bindings.
pub mod hit_test_code {
    pub const NOWHERE: isize = 0;
    pub const CLIENT: isize = 1;
    pub const CAPTION: isize = 2;
    pub const MIN_BUTTON: isize = 8;
    pub const MAX_BUTTON: isize = 9;
    pub const LEFT: isize = 10;
    pub const RIGHT: isize = 11;
    pub const TOP: isize = 12;
    pub const TOP_LEFT: isize = 13;
    pub const TOP_RIGHT: isize = 14;
    pub const CLOSE: isize = 20;
}

/// Requested window theme. `FollowSystem` resolves against the user's OS
/// personalization setting on every configuration apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    FollowSystem,
}

/// Window size state as reported by the OS resize notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestoreState {
    #[default]
    Restored,
    Minimized,
    Maximized,
}

impl RestoreState {
    /// Maps the resize notification's size parameter. Returns `None` for
    /// values outside the restored/minimized/maximized triple (e.g. the
    /// other-window-maximized notifications), which the chrome ignores.
    pub fn from_size_param(param: u32) -> Option<RestoreState> {
        match param {
            0 => Some(RestoreState::Restored),
            1 => Some(RestoreState::Minimized),
            2 => Some(RestoreState::Maximized),
            _ => None,
        }
    }
}

/// Identifies a logical caption button independent of its visual element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionButton {
    Minimize,
    Maximize,
    Close,
}

impl CaptionButton {
    pub fn hit_region(self) -> HitRegion {
        match self {
            CaptionButton::Minimize => HitRegion::MinimizeButton,
            CaptionButton::Maximize => HitRegion::MaximizeButton,
            CaptionButton::Close => HitRegion::CloseButton,
        }
    }
}

/// Logical bounds and enablement of one custom caption button, as exposed by
/// the visual layer. A disabled button is never matched by hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionButtonPart {
    pub bounds: PartBounds,
    pub enabled: bool,
}

/// The logical window region a device point resolves to.
///
/// Bottom and bottom-corner resize zones are intentionally absent: only the
/// edges the custom chrome takes away from the OS need reclassification, the
/// rest stays on default platform handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    Nowhere,
    Client,
    Caption,
    MinimizeButton,
    MaximizeButton,
    CloseButton,
    ResizeLeft,
    ResizeRight,
    ResizeTop,
    ResizeTopLeft,
    ResizeTopRight,
}

impl HitRegion {
    /// The native hit-test code reported back to the OS for this region.
    pub fn hit_test_code(self) -> isize {
        match self {
            HitRegion::Nowhere => hit_test_code::NOWHERE,
            HitRegion::Client => hit_test_code::CLIENT,
            HitRegion::Caption => hit_test_code::CAPTION,
            HitRegion::MinimizeButton => hit_test_code::MIN_BUTTON,
            HitRegion::MaximizeButton => hit_test_code::MAX_BUTTON,
            HitRegion::CloseButton => hit_test_code::CLOSE,
            HitRegion::ResizeLeft => hit_test_code::LEFT,
            HitRegion::ResizeRight => hit_test_code::RIGHT,
            HitRegion::ResizeTop => hit_test_code::TOP,
            HitRegion::ResizeTopLeft => hit_test_code::TOP_LEFT,
            HitRegion::ResizeTopRight => hit_test_code::TOP_RIGHT,
        }
    }
}

/*
 * Host-settable chrome configuration. Field-level change interception is
 * deliberately absent: the host mutates the struct and calls
 * `ChromeEngine::reconfigure` (or `apply_configuration`), which recomputes
 * everything derived in one pass.
 */
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeConfig {
    /// Extends application content into the title bar region.
    pub extend_into_titlebar: bool,
    /// Height of the caption/drag region in logical pixels.
    pub caption_height: f64,
    pub theme: ThemeMode,
    /// Requests the compositor's backdrop blur for the window surface.
    pub enable_backdrop: bool,
    /// Fixed tool windows never switch to custom caption buttons.
    pub tool_window: bool,
    /// False when the window runs without any OS decorations at all, in which
    /// case the non-client handling below is a no-op.
    pub standard_frame: bool,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        ChromeConfig {
            extend_into_titlebar: false,
            caption_height: DEFAULT_CAPTION_HEIGHT_DIP,
            theme: ThemeMode::default(),
            enable_backdrop: true,
            tool_window: false,
            standard_frame: true,
        }
    }
}

/// One native window notification, reduced to the cases the chrome consumes.
/// Every other opcode stays with default platform handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChromeMessage {
    SizeChanged { state: RestoreState },
    DpiChanged { scale: DpiScale },
    NcCalcSize { client: RectPx },
    NcHitTest { screen: PointPx },
    NcPointerMove { screen: PointPx },
    NcPointerDown { screen: PointPx },
    NcPointerUp { screen: PointPx },
    NcPointerLeave,
}

/// A side effect the host must realize after a dispatch returns. Actions are
/// applied outside the engine so a synchronous re-entrant notification (for
/// example the resize triggered by a minimize) never observes a half-updated
/// state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeAction {
    Minimize,
    Maximize,
    Restore,
    Close,
    /// Replacement client rectangle for the non-client size calculation.
    AdjustClientRect(RectPx),
}

/// Outcome of dispatching one notification: whether the chrome fully handled
/// it (suppressing default processing), the result value to report when it
/// did, and an optional action for the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispatch {
    pub handled: bool,
    pub result: isize,
    pub action: Option<ChromeAction>,
}

impl Dispatch {
    pub fn unhandled() -> Dispatch {
        Dispatch {
            handled: false,
            result: 0,
            action: None,
        }
    }

    pub fn handled(result: isize) -> Dispatch {
        Dispatch {
            handled: true,
            result,
            action: None,
        }
    }
}

/// Everything the engine queries while handling a single notification.
///
/// The window rectangle is fetched through here (never cached between
/// notifications) so hit-testing stays accurate during drags; the remaining
/// methods expose the visual layer's template parts, all of which may be
/// absent.
pub trait ChromeHost {
    /// Current window rectangle in device pixels, screen coordinates.
    fn window_rect(&self) -> RectPx;

    /// Bounds of the caption-button row container, if the template has one.
    fn caption_area(&self) -> Option<PartBounds> {
        None
    }

    /// Bounds and enablement of one custom caption button, if present.
    fn caption_button(&self, _button: CaptionButton) -> Option<CaptionButtonPart> {
        None
    }

    /// True when the content layer marks the element at `point` as
    /// hit-test-visible, which overrides any chrome classification.
    fn content_hit_test_visible(&self, _point: PointDip) -> bool {
        false
    }
}

/// The layout/template collaborator. Every method has a degrade-gracefully
/// default, so a host that registers no template parts keeps native buttons
/// and native border padding.
pub trait ChromeParts {
    fn caption_area(&self) -> Option<PartBounds> {
        None
    }

    fn caption_button(&self, _button: CaptionButton) -> Option<CaptionButtonPart> {
        None
    }

    fn content_hit_test_visible(&self, _point: PointDip) -> bool {
        false
    }

    /// Receives the logical top padding the content border needs so the
    /// window does not clip under the OS while maximized.
    fn set_content_top_padding(&mut self, _dip: f64) {}

    /// Notified after each configuration apply with the resolved dark-mode
    /// and native-caption-buttons flags, for restyling.
    fn chrome_restyled(&mut self, _dark_mode: bool, _native_buttons: bool) {}
}

/// Outbound surface toward the OS: window style bits, compositor attributes,
/// system metrics and the theme setting probe. Implemented over the native
/// window on Windows and by mocks in tests.
pub trait ChromeEffects {
    /// Toggles the system-menu/native-caption-buttons style bit.
    fn set_native_caption_buttons(&mut self, enabled: bool);

    /// Pushes the dark-mode flag to the compositor. Best-effort.
    fn set_dark_mode(&mut self, dark: bool);

    /// Pushes the backdrop-blur flag to the compositor. Best-effort.
    fn set_backdrop_blur(&mut self, enabled: bool);

    /// Current resize border thickness from the OS size metrics, in device
    /// pixels.
    fn resize_border_thickness(&self) -> i32;

    /// Re-issues the compositor frame extension across the whole surface.
    fn extend_frame_into_client(&mut self);

    /// Reads the OS "apps use light theme" setting. `None` when the value is
    /// missing or unreadable, which resolves to the light theme.
    fn apps_use_light_theme(&self) -> Option<u32>;
}
