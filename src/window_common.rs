/*
 * Win32 glue for the chrome engine. Subclasses an existing window by swapping
 * its window procedure, translates the raw message stream into the engine's
 * notification enum, and realizes the engine's decisions through DWM, window
 * style bits and the system metrics.
 *
 * Ownership: a heap-allocated `ChromeContext` is parked in `GWLP_USERDATA`
 * for the lifetime of the subclass. Attaching therefore requires that slot to
 * be free, and the window whose chrome this manages must not use it for
 * anything else. The context is reclaimed on detach or `WM_NCDESTROY`,
 * whichever comes first.
 */
use std::cell::RefCell;
use std::ffi::c_void;

use windows::Win32::{
    Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM},
    Graphics::Dwm::{
        DWMWINDOWATTRIBUTE, DwmDefWindowProc, DwmExtendFrameIntoClientArea, DwmSetWindowAttribute,
    },
    System::Registry::{HKEY_CURRENT_USER, RRF_RT_REG_DWORD, RegGetValueW},
    UI::Controls::MARGINS,
    UI::HiDpi::GetDpiForWindow,
    UI::WindowsAndMessaging::{
        CallWindowProcW, DefWindowProcW, GWL_STYLE, GWLP_USERDATA, GWLP_WNDPROC, GetSystemMetrics,
        GetWindowLongPtrW, GetWindowLongW, GetWindowRect, PostMessageW, SM_CXPADDEDBORDER,
        SM_CXSIZEFRAME, SW_MAXIMIZE, SW_MINIMIZE, SW_RESTORE, SWP_NOACTIVATE, SWP_NOZORDER,
        SetWindowLongPtrW, SetWindowLongW, SetWindowPos, ShowWindow, WM_CLOSE, WM_DPICHANGED,
        WM_NCCALCSIZE, WM_NCDESTROY, WM_NCHITTEST, WM_NCLBUTTONDOWN, WM_NCLBUTTONUP,
        WM_NCMOUSELEAVE, WM_NCMOUSEMOVE, WM_SETTINGCHANGE, WM_SIZE, WNDPROC, WS_SYSMENU,
    },
};
use windows::core::w;

use crate::chrome::ChromeEngine;
use crate::error::{ChromeError, Result};
use crate::geometry::{DpiScale, PartBounds, PointDip, PointPx, RectPx};
use crate::types::{
    CaptionButton, CaptionButtonPart, ChromeAction, ChromeConfig, ChromeEffects, ChromeHost,
    ChromeMessage, ChromeParts, Dispatch, RestoreState,
};

/// Per-window chrome state, owned by the subclass through `GWLP_USERDATA`.
/// The window procedure runs on the window's thread only, so `RefCell` is
/// sufficient; `try_borrow` guards against re-entrant messages sent by the
/// OS from within a dispatch (those fall through to the previous procedure).
struct ChromeContext {
    prev_proc: isize,
    engine: RefCell<ChromeEngine>,
    parts: RefCell<Box<dyn ChromeParts>>,
}

/*
 * Installs the custom chrome on an existing window. The current window
 * procedure is saved and every message is routed through the chrome first;
 * unclaimed messages are forwarded unchanged, so the application's own
 * handling keeps working.
 *
 * Fails when the handle is invalid or when `GWLP_USERDATA` is already in use
 * (including a previous attach).
 */
pub fn attach_window_chrome(
    hwnd: HWND,
    config: ChromeConfig,
    parts: Box<dyn ChromeParts>,
) -> Result<()> {
    if hwnd.is_invalid() {
        return Err(ChromeError::InvalidHandle(
            "attach_window_chrome requires a valid window handle".to_string(),
        ));
    }
    if unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } != 0 {
        return Err(ChromeError::InitializationFailed(
            "window user data is already in use (chrome attached twice?)".to_string(),
        ));
    }

    let mut engine = ChromeEngine::new(config);
    let dpi = unsafe { GetDpiForWindow(hwnd) };
    if dpi != 0 {
        engine.set_dpi_scale(DpiScale::from_dpi(dpi, dpi));
    }
    engine.apply_configuration(&mut Win32ChromeEffects { hwnd });

    let prev_proc = unsafe { GetWindowLongPtrW(hwnd, GWLP_WNDPROC) };
    let context = Box::into_raw(Box::new(ChromeContext {
        prev_proc,
        engine: RefCell::new(engine),
        parts: RefCell::new(parts),
    }));

    unsafe {
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, context as isize);
        #[allow(clippy::fn_to_numeric_cast)]
        let swapped = SetWindowLongPtrW(hwnd, GWLP_WNDPROC, chrome_wnd_proc as isize);
        if swapped == 0 {
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
            drop(Box::from_raw(context));
            return Err(ChromeError::OperationFailed(
                "failed to install the chrome window procedure".to_string(),
            ));
        }
    }

    sync_parts(unsafe { &*context }, true);
    log::debug!("Chrome attached to window {hwnd:?} (dpi={dpi})");
    Ok(())
}

/// Removes the custom chrome and restores the original window procedure.
/// A zero `GWLP_USERDATA` slot means "not attached" and is ignored, so
/// repeated detaches are harmless. A non-zero slot is reclaimed as this
/// module's context; that is sound only under the exclusive-slot rule above,
/// the same precondition `attach_window_chrome` enforces.
pub fn detach_window_chrome(hwnd: HWND) {
    if hwnd.is_invalid() {
        return;
    }
    let context = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *mut ChromeContext;
    if context.is_null() {
        return;
    }
    unsafe {
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
        SetWindowLongPtrW(hwnd, GWLP_WNDPROC, (*context).prev_proc);
        drop(Box::from_raw(context));
    }
    log::debug!("Chrome detached from window {hwnd:?}");
}

/// Replaces the attached window's chrome configuration and re-applies every
/// derived native effect, then pushes the resulting padding and restyle
/// notification to the parts collaborator.
pub fn reconfigure_window_chrome(hwnd: HWND, config: ChromeConfig) -> Result<()> {
    let context = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *mut ChromeContext;
    if context.is_null() {
        return Err(ChromeError::InvalidHandle(
            "no chrome is attached to this window".to_string(),
        ));
    }
    let context = unsafe { &*context };
    {
        let mut engine = context.engine.try_borrow_mut().map_err(|_| {
            ChromeError::OperationFailed(
                "cannot reconfigure from within a chrome dispatch".to_string(),
            )
        })?;
        engine.reconfigure(config, &mut Win32ChromeEffects { hwnd });
    }
    sync_parts(context, true);
    Ok(())
}

/*
 * The subclass window procedure. DWM gets first pick so the compositor can
 * run the snap-layout flyout and its own caption-button handling; when it
 * declines, the chrome engine dispatches, and whatever neither claims is
 * forwarded to the window's original procedure.
 */
unsafe extern "system" fn chrome_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let context_ptr = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *mut ChromeContext;
    if context_ptr.is_null() {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    }
    let context = unsafe { &*context_ptr };

    if msg == WM_NCDESTROY {
        let prev_proc = context.prev_proc;
        unsafe {
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
            SetWindowLongPtrW(hwnd, GWLP_WNDPROC, prev_proc);
            drop(Box::from_raw(context_ptr));
        }
        return forward_to_prev(prev_proc, hwnd, msg, wparam, lparam);
    }

    let mut dwm_result = LRESULT(0);
    let dwm_handled =
        unsafe { DwmDefWindowProc(hwnd, msg, wparam, lparam, &mut dwm_result) }.as_bool();
    if dwm_handled {
        return dwm_result;
    }

    match handle_chrome_message(context, hwnd, msg, wparam, lparam) {
        Some(result) => result,
        None => forward_to_prev(context.prev_proc, hwnd, msg, wparam, lparam),
    }
}

/*
 * Translates one raw message into the engine's notification enum and applies
 * the outcome. Returns `Some` when the chrome fully handled the message;
 * `None` falls through to the previous window procedure, including for the
 * tracking messages the chrome observes without consuming (size, settings).
 */
fn handle_chrome_message(
    context: &ChromeContext,
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> Option<LRESULT> {
    match msg {
        WM_SIZE => {
            if let Some(state) = RestoreState::from_size_param((wparam.0 & 0xFFFF) as u32) {
                let _ = dispatch_to_engine(context, hwnd, ChromeMessage::SizeChanged { state });
                sync_parts(context, false);
            }
            None
        }
        WM_SETTINGCHANGE => {
            // Theme or metrics may have changed; re-resolve and re-apply.
            if let Ok(mut engine) = context.engine.try_borrow_mut() {
                engine.apply_configuration(&mut Win32ChromeEffects { hwnd });
            }
            sync_parts(context, true);
            None
        }
        WM_DPICHANGED => {
            let dpi_x = (wparam.0 & 0xFFFF) as u32;
            let dpi_y = ((wparam.0 >> 16) & 0xFFFF) as u32;
            let _ = dispatch_to_engine(
                context,
                hwnd,
                ChromeMessage::DpiChanged {
                    scale: DpiScale::from_dpi(dpi_x, dpi_y),
                },
            );
            // The OS suggests a rectangle that keeps the window the same
            // physical size on the new monitor.
            let suggested = lparam.0 as *const RECT;
            if !suggested.is_null() {
                let rect = unsafe { *suggested };
                let _ = unsafe {
                    SetWindowPos(
                        hwnd,
                        None,
                        rect.left,
                        rect.top,
                        rect.right - rect.left,
                        rect.bottom - rect.top,
                        SWP_NOZORDER | SWP_NOACTIVATE,
                    )
                };
            }
            Some(LRESULT(0))
        }
        WM_NCCALCSIZE => {
            // Both payload layouts of this message start with the proposed
            // window rectangle, which is all the chrome reads and writes.
            let rect_ptr = lparam.0 as *mut RECT;
            if rect_ptr.is_null() {
                return None;
            }
            let proposed = unsafe { *rect_ptr };
            let client = RectPx {
                left: proposed.left,
                top: proposed.top,
                right: proposed.right,
                bottom: proposed.bottom,
            };
            let outcome = dispatch_to_engine(context, hwnd, ChromeMessage::NcCalcSize { client })?;
            if !outcome.handled {
                return None;
            }
            if let Some(ChromeAction::AdjustClientRect(adjusted)) = outcome.action {
                unsafe {
                    (*rect_ptr).left = adjusted.left;
                    (*rect_ptr).top = adjusted.top;
                    (*rect_ptr).right = adjusted.right;
                    (*rect_ptr).bottom = adjusted.bottom;
                }
            }
            Some(LRESULT(outcome.result))
        }
        WM_NCHITTEST => {
            let screen = screen_point_from_lparam(lparam);
            let outcome = dispatch_to_engine(context, hwnd, ChromeMessage::NcHitTest { screen })?;
            outcome.handled.then_some(LRESULT(outcome.result))
        }
        WM_NCMOUSEMOVE => complete_pointer_message(
            context,
            hwnd,
            ChromeMessage::NcPointerMove {
                screen: screen_point_from_lparam(lparam),
            },
        ),
        WM_NCLBUTTONDOWN => complete_pointer_message(
            context,
            hwnd,
            ChromeMessage::NcPointerDown {
                screen: screen_point_from_lparam(lparam),
            },
        ),
        WM_NCLBUTTONUP => complete_pointer_message(
            context,
            hwnd,
            ChromeMessage::NcPointerUp {
                screen: screen_point_from_lparam(lparam),
            },
        ),
        WM_NCMOUSELEAVE => complete_pointer_message(context, hwnd, ChromeMessage::NcPointerLeave),
        _ => None,
    }
}

/// Dispatches a pointer notification and realizes any resulting window-state
/// action. The action runs after both cell borrows are released, because
/// `ShowWindow` synchronously re-enters the window procedure with the resize
/// notification.
fn complete_pointer_message(
    context: &ChromeContext,
    hwnd: HWND,
    message: ChromeMessage,
) -> Option<LRESULT> {
    let outcome = dispatch_to_engine(context, hwnd, message)?;
    if let Some(action) = outcome.action {
        apply_action(hwnd, action);
        sync_parts(context, false);
    }
    outcome.handled.then_some(LRESULT(outcome.result))
}

fn dispatch_to_engine(
    context: &ChromeContext,
    hwnd: HWND,
    message: ChromeMessage,
) -> Option<Dispatch> {
    let parts = context.parts.try_borrow().ok()?;
    let mut engine = match context.engine.try_borrow_mut() {
        Ok(engine) => engine,
        Err(_) => {
            log::warn!("Chrome: dropping re-entrant notification {message:?}");
            return None;
        }
    };
    let host = HwndChromeHost {
        hwnd,
        parts: &**parts,
    };
    Some(engine.dispatch(&message, &host))
}

fn apply_action(hwnd: HWND, action: ChromeAction) {
    log::debug!("Chrome action on {hwnd:?}: {action:?}");
    match action {
        ChromeAction::Minimize => {
            let _ = unsafe { ShowWindow(hwnd, SW_MINIMIZE) };
        }
        ChromeAction::Maximize => {
            let _ = unsafe { ShowWindow(hwnd, SW_MAXIMIZE) };
        }
        ChromeAction::Restore => {
            let _ = unsafe { ShowWindow(hwnd, SW_RESTORE) };
        }
        ChromeAction::Close => {
            // Posted, not sent: the close must not run inside this dispatch.
            let _ = unsafe { PostMessageW(Some(hwnd), WM_CLOSE, WPARAM(0), LPARAM(0)) };
        }
        // Realized in place by the size-calculation handler.
        ChromeAction::AdjustClientRect(_) => {}
    }
}

/// Pushes the derived layout values to the parts collaborator. `restyled` is
/// set only after a configuration apply so templates are not re-themed on
/// every resize.
fn sync_parts(context: &ChromeContext, restyled: bool) {
    let Ok(engine) = context.engine.try_borrow() else {
        return;
    };
    let padding = engine.content_top_padding_dip();
    let dark_mode = engine.is_dark_mode();
    let native_buttons = engine.native_caption_buttons();
    drop(engine);

    if let Ok(mut parts) = context.parts.try_borrow_mut() {
        parts.set_content_top_padding(padding);
        if restyled {
            parts.chrome_restyled(dark_mode, native_buttons);
        }
    }
}

fn forward_to_prev(prev: isize, hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if prev != 0 {
        let prev_proc: WNDPROC = unsafe { std::mem::transmute(prev) };
        unsafe { CallWindowProcW(prev_proc, hwnd, msg, wparam, lparam) }
    } else {
        unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
    }
}

/// Screen coordinates packed into `lparam` by the non-client mouse messages.
/// Both halves are signed: multi-monitor desktops place windows at negative
/// coordinates.
fn screen_point_from_lparam(lparam: LPARAM) -> PointPx {
    PointPx {
        x: (lparam.0 & 0xFFFF) as u16 as i16 as i32,
        y: ((lparam.0 >> 16) & 0xFFFF) as u16 as i16 as i32,
    }
}

/// Engine-facing view of the live window: the rectangle comes from the OS on
/// every query, the template parts from the registered collaborator.
struct HwndChromeHost<'a> {
    hwnd: HWND,
    parts: &'a dyn ChromeParts,
}

impl ChromeHost for HwndChromeHost<'_> {
    fn window_rect(&self) -> RectPx {
        let mut rect = RECT::default();
        if unsafe { GetWindowRect(self.hwnd, &mut rect) }.is_err() {
            log::warn!("Chrome: GetWindowRect failed for {:?}", self.hwnd);
            return RectPx::default();
        }
        RectPx {
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
        }
    }

    fn caption_area(&self) -> Option<PartBounds> {
        self.parts.caption_area()
    }

    fn caption_button(&self, button: CaptionButton) -> Option<CaptionButtonPart> {
        self.parts.caption_button(button)
    }

    fn content_hit_test_visible(&self, point: PointDip) -> bool {
        self.parts.content_hit_test_visible(point)
    }
}

/// Attribute IDs that predate their public enum entries: 20 is the immersive
/// dark-mode flag on 20H1 and later, 19 the pre-20H1 spelling, 1029 the Mica
/// backdrop toggle on Windows 11.
const DWMWA_USE_IMMERSIVE_DARK_MODE: DWMWINDOWATTRIBUTE = DWMWINDOWATTRIBUTE(20);
const DWMWA_USE_IMMERSIVE_DARK_MODE_OLD: DWMWINDOWATTRIBUTE = DWMWINDOWATTRIBUTE(19);
const DWMWA_MICA_EFFECT: DWMWINDOWATTRIBUTE = DWMWINDOWATTRIBUTE(1029);

/// Realizes the engine's decisions against the live window. Every call is
/// best-effort: a DWM or style failure degrades the visuals, never the
/// application.
struct Win32ChromeEffects {
    hwnd: HWND,
}

impl Win32ChromeEffects {
    fn set_dwm_flag(&self, attribute: DWMWINDOWATTRIBUTE, enabled: bool) {
        let value: i32 = if enabled { 1 } else { 0 };
        unsafe {
            let _ = DwmSetWindowAttribute(
                self.hwnd,
                attribute,
                &value as *const _ as *const c_void,
                std::mem::size_of_val(&value) as u32,
            );
        }
    }
}

impl ChromeEffects for Win32ChromeEffects {
    fn set_native_caption_buttons(&mut self, enabled: bool) {
        unsafe {
            let style = GetWindowLongW(self.hwnd, GWL_STYLE) as u32;
            let updated = if enabled {
                style | WS_SYSMENU.0
            } else {
                style & !WS_SYSMENU.0
            };
            if updated != style {
                let _ = SetWindowLongW(self.hwnd, GWL_STYLE, updated as i32);
            }
        }
    }

    fn set_dark_mode(&mut self, dark: bool) {
        self.set_dwm_flag(DWMWA_USE_IMMERSIVE_DARK_MODE, dark);
        // Some builds expect 19; attempt as secondary.
        self.set_dwm_flag(DWMWA_USE_IMMERSIVE_DARK_MODE_OLD, dark);
    }

    fn set_backdrop_blur(&mut self, enabled: bool) {
        self.set_dwm_flag(DWMWA_MICA_EFFECT, enabled);
    }

    fn resize_border_thickness(&self) -> i32 {
        unsafe { GetSystemMetrics(SM_CXSIZEFRAME) + GetSystemMetrics(SM_CXPADDEDBORDER) }
    }

    fn extend_frame_into_client(&mut self) {
        // Negative margins extend the frame across the whole surface, which
        // keeps the compositor's shadow and rounded corners on a window that
        // draws its own caption.
        let margins = MARGINS {
            cxLeftWidth: -1,
            cxRightWidth: -1,
            cyTopHeight: -1,
            cyBottomHeight: -1,
        };
        unsafe {
            let _ = DwmExtendFrameIntoClientArea(self.hwnd, &margins);
        }
    }

    fn apps_use_light_theme(&self) -> Option<u32> {
        let mut data: u32 = 0;
        let mut size = std::mem::size_of::<u32>() as u32;
        let status = unsafe {
            RegGetValueW(
                HKEY_CURRENT_USER,
                w!(r"Software\Microsoft\Windows\CurrentVersion\Themes\Personalize"),
                w!("AppsUseLightTheme"),
                RRF_RT_REG_DWORD,
                None,
                Some(&mut data as *mut u32 as *mut c_void),
                Some(&mut size),
            )
        };
        if status.is_ok() { Some(data) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lparam_points_sign_extend() {
        let packed = LPARAM(((300i64 & 0xFFFF) << 16) as isize | (500i64 & 0xFFFF) as isize);
        assert_eq!(screen_point_from_lparam(packed), PointPx { x: 500, y: 300 });

        // A window dragged onto a monitor left of the primary reports
        // negative screen coordinates.
        let negative =
            LPARAM(((((-50i64) & 0xFFFF) << 16) | ((-120i64) & 0xFFFF)) as isize);
        assert_eq!(
            screen_point_from_lparam(negative),
            PointPx { x: -120, y: -50 }
        );
    }
}
