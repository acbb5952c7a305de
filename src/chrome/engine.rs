/*
 * The chrome engine: a single dispatch point consuming the window's native
 * notification stream and composing the region classifier, the caption-button
 * locator and the hover/press tracker into one hit-test answer or button
 * activation per message. Also owns the configuration fan-in that drives the
 * theme-and-frame controller.
 *
 * All state lives on the engine and is touched only from the message-pump
 * thread; geometry is re-read from the host on every hit-test instead of
 * being cached, because the OS rectangle is the source of truth during drags.
 */
use super::{buttons, region, state::CaptionButtonTracker};
use crate::geometry::{DpiScale, PointDip, PointPx, RectPx, dip_to_px, px_to_dip};
use crate::theme;
use crate::types::{
    CaptionButton, ChromeAction, ChromeConfig, ChromeEffects, ChromeHost, ChromeMessage, Dispatch,
    HitRegion, RestoreState,
};

/// Initial resize border before the first configuration apply reads the real
/// OS metrics.
const FALLBACK_BORDER_PX: i32 = 4;

pub struct ChromeEngine {
    config: ChromeConfig,
    dpi: DpiScale,
    /// Width of the invisible resize border in device pixels. Recomputed from
    /// the OS size metrics on every configuration apply; never negative.
    border_px: i32,
    restore_state: RestoreState,
    tracker: CaptionButtonTracker,
    dark_mode: bool,
    native_buttons: bool,
}

impl ChromeEngine {
    pub fn new(config: ChromeConfig) -> Self {
        ChromeEngine {
            native_buttons: !theme::custom_chrome_active(&config),
            config,
            dpi: DpiScale::IDENTITY,
            border_px: FALLBACK_BORDER_PX,
            restore_state: RestoreState::Restored,
            tracker: CaptionButtonTracker::default(),
            dark_mode: false,
        }
    }

    pub fn config(&self) -> &ChromeConfig {
        &self.config
    }

    pub fn dpi_scale(&self) -> DpiScale {
        self.dpi
    }

    pub fn set_dpi_scale(&mut self, scale: DpiScale) {
        self.dpi = scale;
    }

    pub fn border_thickness_px(&self) -> i32 {
        self.border_px
    }

    pub fn restore_state(&self) -> RestoreState {
        self.restore_state
    }

    /// Resolved dark-mode flag after the last configuration apply.
    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// True while the OS draws and handles the caption buttons itself.
    pub fn native_caption_buttons(&self) -> bool {
        self.native_buttons
    }

    pub fn hovered_button(&self) -> Option<CaptionButton> {
        self.tracker.hovered()
    }

    pub fn pressed_button(&self) -> Option<CaptionButton> {
        self.tracker.pressed()
    }

    /// True while a press is held and the pointer has left the pressed
    /// button; used by the visual layer to suppress hover feedback.
    pub fn pointer_left_pressed_button(&self) -> bool {
        self.tracker.left_pressed_button()
    }

    /// Logical top padding the content border currently needs. Derived, so
    /// repeated size notifications with the same state are idempotent.
    pub fn content_top_padding_dip(&self) -> f64 {
        theme::content_top_padding_dip(self.restore_state, self.border_px, self.dpi.y)
    }

    /// Replaces the configuration and recomputes everything derived from it.
    pub fn reconfigure(&mut self, config: ChromeConfig, effects: &mut impl ChromeEffects) {
        self.config = config;
        self.apply_configuration(effects);
    }

    /*
     * Recomputes the chrome mode, the resolved theme, the border thickness
     * and the frame extension. Invoked by the host after any configuration
     * change and on the OS settings-changed notification; the frame extension
     * is re-issued every time because some compositors reset it on theme
     * changes.
     */
    pub fn apply_configuration(&mut self, effects: &mut impl ChromeEffects) {
        self.native_buttons = !theme::custom_chrome_active(&self.config);
        effects.set_native_caption_buttons(self.native_buttons);

        self.dark_mode =
            theme::resolve_dark_mode(self.config.theme, || effects.apps_use_light_theme());
        effects.set_backdrop_blur(self.config.enable_backdrop);
        effects.set_dark_mode(self.dark_mode);

        self.border_px = effects.resize_border_thickness().max(0);
        effects.extend_frame_into_client();

        log::debug!(
            "Chrome configuration applied: dark={}, native_buttons={}, border_px={}, caption_dip={}",
            self.dark_mode,
            self.native_buttons,
            self.border_px,
            self.config.caption_height
        );
    }

    /*
     * Dispatches one native notification. Size and DPI updates are tracked
     * even for windows running without OS decorations; the non-client
     * messages are a no-op in that case and fall through to default platform
     * handling.
     */
    pub fn dispatch(&mut self, message: &ChromeMessage, host: &impl ChromeHost) -> Dispatch {
        match *message {
            ChromeMessage::SizeChanged { state } => {
                if state != self.restore_state {
                    log::debug!(
                        "Window state changed: {:?} -> {state:?}",
                        self.restore_state
                    );
                    self.restore_state = state;
                }
                Dispatch::unhandled()
            }
            ChromeMessage::DpiChanged { scale } => {
                log::debug!("DPI scale changed to ({}, {})", scale.x, scale.y);
                self.dpi = scale;
                Dispatch::unhandled()
            }
            _ if !self.config.standard_frame => Dispatch::unhandled(),
            ChromeMessage::NcCalcSize { client } => Dispatch {
                handled: true,
                result: 0,
                action: Some(ChromeAction::AdjustClientRect(region::shrink_for_frame(
                    client,
                    self.border_px,
                ))),
            },
            ChromeMessage::NcHitTest { screen } => self.hit_test(screen, host),
            ChromeMessage::NcPointerMove { screen } => {
                if !self.native_buttons {
                    let over = self.caption_button_at(screen, host);
                    self.tracker.pointer_moved(over);
                }
                Dispatch::unhandled()
            }
            ChromeMessage::NcPointerDown { screen } => {
                if !self.native_buttons {
                    let over = self.caption_button_at(screen, host);
                    if self.tracker.press(over) {
                        // The down-event landed on a custom button; suppress
                        // the default caption handling so the press does not
                        // start a drag or open the system menu.
                        return Dispatch::handled(0);
                    }
                }
                Dispatch::unhandled()
            }
            ChromeMessage::NcPointerUp { screen } => {
                if !self.native_buttons {
                    let over = self.caption_button_at(screen, host);
                    if let Some(button) = self.tracker.release(over) {
                        let action = self.activate_button(button);
                        return Dispatch {
                            handled: false,
                            result: 0,
                            action: Some(action),
                        };
                    }
                }
                Dispatch::unhandled()
            }
            ChromeMessage::NcPointerLeave => {
                self.tracker.pointer_left();
                Dispatch::unhandled()
            }
        }
    }

    /*
     * Full non-client hit-test composition. The classifier's answer can be
     * overridden twice, in this order: a point inside the custom caption
     * button row resolves to the specific button (so the OS applies that
     * button's click semantics), and content the application marked
     * hit-test-visible always wins and reports as plain client area.
     */
    fn hit_test(&self, screen: PointPx, host: &impl ChromeHost) -> Dispatch {
        let window = host.window_rect();
        let caption_px = dip_to_px(self.config.caption_height, self.dpi.y);

        let mut hit = region::classify_region(screen, window, self.border_px, caption_px);
        let logical = self.window_point_dip(screen, window);

        if !self.native_buttons && self.tracker.pressed().is_none() {
            if let Some(area) = host.caption_area() {
                if logical.x >= area.x
                    && logical.x <= area.x + area.width
                    && logical.y <= area.height
                {
                    hit = match buttons::locate_caption_button(logical, host) {
                        Some(button) => button.hit_region(),
                        None => HitRegion::Nowhere,
                    };
                }
            }
        }

        if host.content_hit_test_visible(logical) {
            hit = HitRegion::Client;
        }

        log::trace!("Hit test at ({}, {}) -> {hit:?}", screen.x, screen.y);

        if hit == HitRegion::Nowhere {
            Dispatch::unhandled()
        } else {
            Dispatch::handled(hit.hit_test_code())
        }
    }

    /// Activates a caption button released in place. The engine's tracked
    /// window state transitions immediately; the returned action lets the
    /// host realize the change natively, after which the OS size notification
    /// confirms it.
    fn activate_button(&mut self, button: CaptionButton) -> ChromeAction {
        match button {
            CaptionButton::Minimize => {
                self.restore_state = RestoreState::Minimized;
                ChromeAction::Minimize
            }
            CaptionButton::Maximize => {
                if self.restore_state == RestoreState::Restored {
                    self.restore_state = RestoreState::Maximized;
                    ChromeAction::Maximize
                } else {
                    self.restore_state = RestoreState::Restored;
                    ChromeAction::Restore
                }
            }
            CaptionButton::Close => ChromeAction::Close,
        }
    }

    fn caption_button_at(
        &self,
        screen: PointPx,
        host: &impl ChromeHost,
    ) -> Option<CaptionButton> {
        let logical = self.window_point_dip(screen, host.window_rect());
        buttons::locate_caption_button(logical, host)
    }

    /// Maps a screen point to logical pixels relative to the window. The x
    /// offset additionally backs out the resize border so the result lines up
    /// with the client-area origin the layout works from; y keeps the window
    /// origin because the frame is not inset at the top.
    fn window_point_dip(&self, screen: PointPx, window: RectPx) -> PointDip {
        let rel_x = screen.x - window.left - self.border_px;
        let rel_y = screen.y - window.top;
        PointDip {
            x: px_to_dip(rel_x, self.dpi.x),
            y: px_to_dip(rel_y, self.dpi.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PartBounds;
    use crate::types::{CaptionButtonPart, ThemeMode, hit_test_code};

    const WINDOW: RectPx = RectPx {
        left: 100,
        top: 100,
        right: 900,
        bottom: 700,
    };

    #[derive(Default)]
    struct TestHost {
        rect: RectPx,
        caption_area: Option<PartBounds>,
        minimize: Option<CaptionButtonPart>,
        maximize: Option<CaptionButtonPart>,
        close: Option<CaptionButtonPart>,
        visible_content: Option<PartBounds>,
    }

    impl ChromeHost for TestHost {
        fn window_rect(&self) -> RectPx {
            self.rect
        }

        fn caption_area(&self) -> Option<PartBounds> {
            self.caption_area
        }

        fn caption_button(&self, button: CaptionButton) -> Option<CaptionButtonPart> {
            match button {
                CaptionButton::Minimize => self.minimize,
                CaptionButton::Maximize => self.maximize,
                CaptionButton::Close => self.close,
            }
        }

        fn content_hit_test_visible(&self, point: PointDip) -> bool {
            self.visible_content.is_some_and(|bounds| {
                point.x >= bounds.x
                    && point.x <= bounds.x + bounds.width
                    && point.y >= bounds.y
                    && point.y <= bounds.y + bounds.height
            })
        }
    }

    struct TestEffects {
        border: i32,
        light_theme: Option<u32>,
        native_buttons: Vec<bool>,
        dark_calls: Vec<bool>,
        backdrop_calls: Vec<bool>,
        frame_extensions: usize,
    }

    impl TestEffects {
        fn new(border: i32) -> Self {
            TestEffects {
                border,
                light_theme: None,
                native_buttons: Vec::new(),
                dark_calls: Vec::new(),
                backdrop_calls: Vec::new(),
                frame_extensions: 0,
            }
        }
    }

    impl ChromeEffects for TestEffects {
        fn set_native_caption_buttons(&mut self, enabled: bool) {
            self.native_buttons.push(enabled);
        }

        fn set_dark_mode(&mut self, dark: bool) {
            self.dark_calls.push(dark);
        }

        fn set_backdrop_blur(&mut self, enabled: bool) {
            self.backdrop_calls.push(enabled);
        }

        fn resize_border_thickness(&self) -> i32 {
            self.border
        }

        fn extend_frame_into_client(&mut self) {
            self.frame_extensions += 1;
        }

        fn apps_use_light_theme(&self) -> Option<u32> {
            self.light_theme
        }
    }

    /// Engine with native-button chrome (no custom buttons) and border 8.
    fn native_engine() -> ChromeEngine {
        let mut engine = ChromeEngine::new(ChromeConfig::default());
        engine.apply_configuration(&mut TestEffects::new(8));
        engine
    }

    /// Engine with custom caption buttons active (taller caption, extended
    /// into the title bar) and border 8.
    fn custom_engine() -> ChromeEngine {
        let config = ChromeConfig {
            extend_into_titlebar: true,
            caption_height: 40.0,
            ..ChromeConfig::default()
        };
        let mut engine = ChromeEngine::new(config);
        engine.apply_configuration(&mut TestEffects::new(8));
        engine
    }

    /// Host with a caption-button row at logical x 600..738, 40 dip tall:
    /// minimize 600..646, maximize 646..692, close 692..738.
    fn custom_host() -> TestHost {
        let button = |x: f64| {
            Some(CaptionButtonPart {
                bounds: PartBounds {
                    x,
                    y: 0.0,
                    width: 46.0,
                    height: 40.0,
                },
                enabled: true,
            })
        };
        TestHost {
            rect: WINDOW,
            caption_area: Some(PartBounds {
                x: 600.0,
                y: 0.0,
                width: 138.0,
                height: 40.0,
            }),
            minimize: button(600.0),
            maximize: button(646.0),
            close: button(692.0),
            visible_content: None,
        }
    }

    /// Screen point over the given logical x within the caption row, for a
    /// window at (100, 100) with an 8px border at identity DPI.
    fn screen_over(logical_x: f64, logical_y: f64) -> PointPx {
        PointPx {
            x: logical_x as i32 + WINDOW.left + 8,
            y: logical_y as i32 + WINDOW.top,
        }
    }

    #[test]
    fn hit_test_resolves_corners_caption_and_pass_through() {
        let mut engine = native_engine();
        let host = TestHost {
            rect: WINDOW,
            ..TestHost::default()
        };

        let outcome = engine.dispatch(
            &ChromeMessage::NcHitTest {
                screen: PointPx { x: 105, y: 105 },
            },
            &host,
        );
        assert!(outcome.handled);
        assert_eq!(outcome.result, hit_test_code::TOP_LEFT);

        let outcome = engine.dispatch(
            &ChromeMessage::NcHitTest {
                screen: PointPx { x: 500, y: 120 },
            },
            &host,
        );
        assert!(outcome.handled);
        assert_eq!(outcome.result, hit_test_code::CAPTION);

        // Below both bands: the chrome stays out of the way.
        let outcome = engine.dispatch(
            &ChromeMessage::NcHitTest {
                screen: PointPx { x: 105, y: 150 },
            },
            &host,
        );
        assert!(!outcome.handled);
    }

    #[test]
    fn caption_height_is_interpreted_through_the_dpi_scale() {
        let mut engine = native_engine();
        let host = TestHost {
            rect: WINDOW,
            ..TestHost::default()
        };

        // 28 dip at identity scale: y = 130 (rel 30) is past the caption.
        let miss = ChromeMessage::NcHitTest {
            screen: PointPx { x: 500, y: 130 },
        };
        assert!(!engine.dispatch(&miss, &host).handled);

        // At 1.5x the caption band is 42 device pixels tall.
        engine.dispatch(
            &ChromeMessage::DpiChanged {
                scale: DpiScale { x: 1.5, y: 1.5 },
            },
            &host,
        );
        let outcome = engine.dispatch(&miss, &host);
        assert!(outcome.handled);
        assert_eq!(outcome.result, hit_test_code::CAPTION);
    }

    #[test]
    fn custom_buttons_override_the_caption_classification() {
        let mut engine = custom_engine();
        let host = custom_host();

        let outcome = engine.dispatch(
            &ChromeMessage::NcHitTest {
                screen: screen_over(620.0, 20.0),
            },
            &host,
        );
        assert!(outcome.handled);
        assert_eq!(outcome.result, hit_test_code::MIN_BUTTON);

        let outcome = engine.dispatch(
            &ChromeMessage::NcHitTest {
                screen: screen_over(660.0, 20.0),
            },
            &host,
        );
        assert_eq!(outcome.result, hit_test_code::MAX_BUTTON);

        let outcome = engine.dispatch(
            &ChromeMessage::NcHitTest {
                screen: screen_over(700.0, 20.0),
            },
            &host,
        );
        assert_eq!(outcome.result, hit_test_code::CLOSE);
    }

    #[test]
    fn a_point_in_the_row_but_between_buttons_is_unhandled() {
        let mut engine = custom_engine();
        let mut host = custom_host();
        host.minimize = None;

        // Over where minimize would be: still inside the row, no button.
        let outcome = engine.dispatch(
            &ChromeMessage::NcHitTest {
                screen: screen_over(620.0, 20.0),
            },
            &host,
        );
        assert!(!outcome.handled);
    }

    #[test]
    fn button_override_is_skipped_while_a_press_is_held() {
        let mut engine = custom_engine();
        let host = custom_host();

        engine.dispatch(
            &ChromeMessage::NcPointerDown {
                screen: screen_over(620.0, 20.0),
            },
            &host,
        );
        assert_eq!(engine.pressed_button(), Some(CaptionButton::Minimize));

        // With the press in progress, the same point reports plain caption.
        let outcome = engine.dispatch(
            &ChromeMessage::NcHitTest {
                screen: screen_over(620.0, 20.0),
            },
            &host,
        );
        assert_eq!(outcome.result, hit_test_code::CAPTION);
    }

    #[test]
    fn hit_test_visible_content_wins_over_everything() {
        let mut engine = custom_engine();
        let mut host = custom_host();
        host.visible_content = Some(PartBounds {
            x: 590.0,
            y: 0.0,
            width: 200.0,
            height: 40.0,
        });

        // Over the minimize button, but the content layer claims the point.
        let outcome = engine.dispatch(
            &ChromeMessage::NcHitTest {
                screen: screen_over(620.0, 20.0),
            },
            &host,
        );
        assert!(outcome.handled);
        assert_eq!(outcome.result, hit_test_code::CLIENT);
    }

    #[test]
    fn pointer_down_on_a_button_is_handled_and_captures_the_press() {
        let mut engine = custom_engine();
        let host = custom_host();

        let outcome = engine.dispatch(
            &ChromeMessage::NcPointerDown {
                screen: screen_over(620.0, 20.0),
            },
            &host,
        );
        assert!(outcome.handled);
        assert_eq!(engine.pressed_button(), Some(CaptionButton::Minimize));

        // Off the buttons the press falls through to the OS.
        let outcome = engine.dispatch(
            &ChromeMessage::NcPointerDown {
                screen: screen_over(200.0, 20.0),
            },
            &host,
        );
        assert!(!outcome.handled);
    }

    #[test]
    fn minimize_press_and_release_emits_the_action_and_tracks_state() {
        let mut engine = custom_engine();
        let host = custom_host();
        let over_minimize = screen_over(620.0, 20.0);

        engine.dispatch(&ChromeMessage::NcPointerDown { screen: over_minimize }, &host);
        let outcome = engine.dispatch(&ChromeMessage::NcPointerUp { screen: over_minimize }, &host);

        assert_eq!(outcome.action, Some(ChromeAction::Minimize));
        assert_eq!(engine.restore_state(), RestoreState::Minimized);
        assert_eq!(engine.pressed_button(), None);
    }

    #[test]
    fn maximize_toggles_between_restored_and_maximized() {
        let mut engine = custom_engine();
        let host = custom_host();
        let over_maximize = screen_over(660.0, 20.0);

        engine.dispatch(&ChromeMessage::NcPointerDown { screen: over_maximize }, &host);
        let outcome = engine.dispatch(&ChromeMessage::NcPointerUp { screen: over_maximize }, &host);
        assert_eq!(outcome.action, Some(ChromeAction::Maximize));
        assert_eq!(engine.restore_state(), RestoreState::Maximized);

        engine.dispatch(&ChromeMessage::NcPointerDown { screen: over_maximize }, &host);
        let outcome = engine.dispatch(&ChromeMessage::NcPointerUp { screen: over_maximize }, &host);
        assert_eq!(outcome.action, Some(ChromeAction::Restore));
        assert_eq!(engine.restore_state(), RestoreState::Restored);
    }

    #[test]
    fn releasing_over_a_different_button_changes_nothing() {
        let mut engine = custom_engine();
        let host = custom_host();

        engine.dispatch(
            &ChromeMessage::NcPointerDown {
                screen: screen_over(660.0, 20.0),
            },
            &host,
        );
        let outcome = engine.dispatch(
            &ChromeMessage::NcPointerUp {
                screen: screen_over(620.0, 20.0),
            },
            &host,
        );

        assert_eq!(outcome.action, None);
        assert_eq!(engine.restore_state(), RestoreState::Restored);
        assert_eq!(engine.pressed_button(), None);
    }

    #[test]
    fn close_release_requests_close_without_touching_window_state() {
        let mut engine = custom_engine();
        let host = custom_host();
        let over_close = screen_over(700.0, 20.0);

        engine.dispatch(&ChromeMessage::NcPointerDown { screen: over_close }, &host);
        let outcome = engine.dispatch(&ChromeMessage::NcPointerUp { screen: over_close }, &host);

        assert_eq!(outcome.action, Some(ChromeAction::Close));
        assert_eq!(engine.restore_state(), RestoreState::Restored);
    }

    #[test]
    fn moving_off_the_pressed_button_sets_the_left_flag() {
        let mut engine = custom_engine();
        let host = custom_host();

        engine.dispatch(
            &ChromeMessage::NcPointerDown {
                screen: screen_over(620.0, 20.0),
            },
            &host,
        );
        engine.dispatch(
            &ChromeMessage::NcPointerMove {
                screen: screen_over(660.0, 20.0),
            },
            &host,
        );
        assert_eq!(engine.hovered_button(), None);
        assert!(engine.pointer_left_pressed_button());

        engine.dispatch(&ChromeMessage::NcPointerLeave, &host);
        assert_eq!(engine.hovered_button(), None);
        assert_eq!(engine.pressed_button(), None);
    }

    #[test]
    fn pointer_tracking_is_inert_while_native_buttons_are_in_use() {
        let mut engine = native_engine();
        // Parts are present, but the OS still owns the caption buttons.
        let host = custom_host();

        let down = engine.dispatch(
            &ChromeMessage::NcPointerDown {
                screen: screen_over(620.0, 20.0),
            },
            &host,
        );
        assert!(!down.handled);
        assert_eq!(engine.pressed_button(), None);
    }

    #[test]
    fn nc_calc_size_insets_the_frame_sides() {
        let mut engine = native_engine();
        let host = TestHost::default();

        let outcome = engine.dispatch(&ChromeMessage::NcCalcSize { client: WINDOW }, &host);
        assert!(outcome.handled);
        assert_eq!(
            outcome.action,
            Some(ChromeAction::AdjustClientRect(RectPx {
                left: 108,
                top: 100,
                right: 892,
                bottom: 692,
            }))
        );
    }

    #[test]
    fn non_client_handling_is_inert_without_a_standard_frame() {
        let config = ChromeConfig {
            standard_frame: false,
            ..ChromeConfig::default()
        };
        let mut engine = ChromeEngine::new(config);
        engine.apply_configuration(&mut TestEffects::new(8));
        let host = TestHost {
            rect: WINDOW,
            ..TestHost::default()
        };

        let outcome = engine.dispatch(
            &ChromeMessage::NcHitTest {
                screen: PointPx { x: 105, y: 105 },
            },
            &host,
        );
        assert!(!outcome.handled);
        assert!(
            !engine
                .dispatch(&ChromeMessage::NcCalcSize { client: WINDOW }, &host)
                .handled
        );

        // Size tracking still works for frameless windows.
        engine.dispatch(
            &ChromeMessage::SizeChanged {
                state: RestoreState::Maximized,
            },
            &host,
        );
        assert_eq!(engine.restore_state(), RestoreState::Maximized);
    }

    #[test]
    fn repeated_maximize_notifications_keep_the_same_padding() {
        let mut engine = native_engine();
        let host = TestHost::default();
        let maximized = ChromeMessage::SizeChanged {
            state: RestoreState::Maximized,
        };

        engine.dispatch(&maximized, &host);
        let first = engine.content_top_padding_dip();
        engine.dispatch(&maximized, &host);
        assert_eq!(engine.content_top_padding_dip(), first);
        assert_eq!(first, 8.0);

        engine.dispatch(
            &ChromeMessage::SizeChanged {
                state: RestoreState::Restored,
            },
            &host,
        );
        assert_eq!(engine.content_top_padding_dip(), 0.0);
    }

    #[test]
    fn apply_configuration_drives_the_full_effect_sequence() {
        let config = ChromeConfig {
            extend_into_titlebar: true,
            caption_height: 40.0,
            theme: ThemeMode::FollowSystem,
            ..ChromeConfig::default()
        };
        let mut engine = ChromeEngine::new(config);
        let mut effects = TestEffects::new(9);
        effects.light_theme = Some(0);

        engine.apply_configuration(&mut effects);
        assert_eq!(effects.native_buttons, vec![false]);
        assert_eq!(effects.dark_calls, vec![true]);
        assert_eq!(effects.backdrop_calls, vec![true]);
        assert_eq!(effects.frame_extensions, 1);
        assert!(engine.is_dark_mode());
        assert!(!engine.native_caption_buttons());
        assert_eq!(engine.border_thickness_px(), 9);

        // Settings change: everything is re-issued, including the frame
        // extension, because the compositor may have reset it.
        engine.apply_configuration(&mut effects);
        assert_eq!(effects.frame_extensions, 2);
        assert_eq!(effects.native_buttons, vec![false, false]);
    }

    #[test]
    fn reconfigure_switches_back_to_native_buttons() {
        let mut engine = custom_engine();
        assert!(!engine.native_caption_buttons());

        let mut effects = TestEffects::new(8);
        engine.reconfigure(ChromeConfig::default(), &mut effects);
        assert!(engine.native_caption_buttons());
        assert_eq!(effects.native_buttons, vec![true]);
    }

    #[test]
    fn border_thickness_never_goes_negative() {
        let mut engine = native_engine();
        engine.apply_configuration(&mut TestEffects::new(-3));
        assert_eq!(engine.border_thickness_px(), 0);
    }
}
